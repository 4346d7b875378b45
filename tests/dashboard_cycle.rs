use chrono::Local;
use pandemic_dash::api::FetchCause;
use pandemic_dash::models::{CycleData, Snapshot, TimeSeries};
use pandemic_dash::render::Metric;
use pandemic_dash::{CycleOutcome, Dashboard, FetchError, Scope, StatsSource};
use reqwest::StatusCode;

/// Canned source: succeeds for every scope except the ones listed as failing.
struct FakeSource {
    failing: Vec<Scope>,
}

fn data(cases: u64, series: &[(&str, u64)]) -> CycleData {
    CycleData {
        snapshot: Snapshot {
            total_cases: cases,
            total_deaths: cases / 50,
            total_recovered: 0,
        },
        cumulative: series.iter().map(|(d, v)| (*d, *v)).collect::<TimeSeries>(),
        region_name: None,
    }
}

fn failure() -> FetchError {
    FetchError::from(FetchCause::Status {
        url: "http://stub/v3/covid-19/countries/Atlantis".into(),
        status: StatusCode::NOT_FOUND,
    })
}

impl StatsSource for FakeSource {
    fn fetch_cycle(&self, scope: &Scope) -> Result<CycleData, FetchError> {
        if self.failing.contains(scope) {
            return Err(failure());
        }
        Ok(data(1000, &[("d1", 100), ("d2", 150), ("d3", 130)]))
    }
}

#[test]
fn successful_cycle_renders_cards_and_chart() {
    let source = FakeSource { failing: vec![] };
    let mut dash = Dashboard::new();
    assert_eq!(dash.run_cycle(&source, Scope::Global), CycleOutcome::Rendered);

    assert!(!dash.is_loading());
    assert!(!dash.has_error());
    let cards = dash.cards().expect("cards rendered");
    assert_eq!(cards.cards.len(), 3);
    assert_eq!(cards.title, "Global");
    assert_eq!(cards.card(Metric::Recovered).unwrap().target, 0);

    let chart = dash.chart().expect("chart drawn");
    assert_eq!(chart.values(), &[50, -20]);
    assert_eq!(chart.labels(), &["d2".to_string(), "d3".to_string()]);
    assert_eq!(dash.chart_slot().live_instances(), 1);
}

#[test]
fn failed_cycle_shows_error_and_no_cards() {
    let source = FakeSource {
        failing: vec![Scope::parse("Atlantis")],
    };
    let mut dash = Dashboard::new();
    dash.run_cycle(&source, Scope::Global);
    assert!(dash.cards().is_some());

    let outcome = dash.select_scope(&source, Scope::parse("Atlantis"));
    assert_eq!(outcome, CycleOutcome::Failed);
    assert!(dash.has_error());
    assert!(!dash.is_loading());
    assert!(dash.cards().is_none());
    assert!(dash.chart().is_none());
    assert_eq!(dash.chart_slot().live_instances(), 0);

    // next successful cycle clears the error
    assert_eq!(dash.select_scope(&source, Scope::Global), CycleOutcome::Rendered);
    assert!(!dash.has_error());
}

#[test]
fn single_point_history_gives_empty_chart() {
    let mut dash = Dashboard::new();
    let ticket = dash.begin_cycle(Scope::parse("Chile"));
    let outcome = dash.complete_cycle(ticket, Ok(data(10, &[("d1", 10)])), Local::now());
    assert_eq!(outcome, CycleOutcome::Rendered);
    let chart = dash.chart().unwrap();
    assert!(chart.is_empty());
    assert_eq!(chart.y_range(), (0.0, 1.0));
    assert_eq!(dash.cards().unwrap().title, "Chile");
}

#[test]
fn overlapping_cycles_keep_one_chart_and_drop_stale_results() {
    let mut dash = Dashboard::new();
    let first = dash.begin_cycle(Scope::parse("France"));
    let second = dash.begin_cycle(Scope::parse("Spain"));

    // the newer cycle resolves first
    let fresh = data(2000, &[("d1", 10), ("d2", 40)]);
    assert_eq!(
        dash.complete_cycle(second, Ok(fresh), Local::now()),
        CycleOutcome::Rendered
    );
    // the older one lands afterwards and is ignored
    let stale = data(9999, &[("d1", 0), ("d2", 1), ("d3", 2)]);
    assert_eq!(
        dash.complete_cycle(first, Ok(stale), Local::now()),
        CycleOutcome::Superseded
    );

    assert_eq!(dash.chart_slot().live_instances(), 1);
    assert_eq!(dash.chart().unwrap().values(), &[30]);
    assert_eq!(dash.cards().unwrap().card(Metric::Cases).unwrap().target, 2000);
    assert_eq!(dash.scope(), &Scope::Country("Spain".into()));
}

#[test]
fn stale_failure_does_not_raise_error_banner() {
    let mut dash = Dashboard::new();
    let first = dash.begin_cycle(Scope::Global);
    let second = dash.begin_cycle(Scope::Global);
    assert_eq!(
        dash.complete_cycle(first, Err(failure()), Local::now()),
        CycleOutcome::Superseded
    );
    assert!(!dash.has_error());
    assert!(dash.is_loading());
    dash.complete_cycle(second, Ok(data(1, &[("a", 1), ("b", 2)])), Local::now());
    assert!(!dash.is_loading());
}

#[test]
fn new_cycle_cancels_running_counters() {
    let source = FakeSource { failing: vec![] };
    let mut dash = Dashboard::new();
    dash.run_cycle(&source, Scope::Global);
    assert!(dash.tick());

    let ticket = dash.begin_cycle(Scope::Global);
    assert!(dash.cards().is_none());
    assert!(!dash.tick(), "nothing to animate while loading");
    dash.complete_cycle(ticket, source.fetch_cycle(&Scope::Global), Local::now());
    assert!(dash.tick(), "fresh cards animate again");
}
