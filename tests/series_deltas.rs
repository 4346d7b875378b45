use pandemic_dash::TimeSeries;
use pandemic_dash::series::daily_deltas;
use pandemic_dash::stats::delta_summary;

fn series(values: &[u64]) -> TimeSeries {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("10/{}/22", i + 1), *v))
        .collect()
}

#[test]
fn downward_revision_gives_negative_delta() {
    let ts: TimeSeries = [("d1", 100), ("d2", 150), ("d3", 130)].into_iter().collect();
    let deltas = daily_deltas(&ts);
    assert_eq!(deltas.values(), vec![50, -20]);
    assert_eq!(deltas.labels(), vec!["d2".to_string(), "d3".to_string()]);
}

#[test]
fn length_and_telescoping_sum() {
    let cases: [&[u64]; 5] = [
        &[5],
        &[0, 0],
        &[10, 20, 15, 15, 40],
        &[1_000_000, 999_000, 1_200_000, 1_200_001, 1_199_999, 1_300_000, 1_300_000, 1_500_000],
        &[u32::MAX as u64, 0, u32::MAX as u64],
    ];
    for values in cases {
        let ts = series(values);
        let deltas = daily_deltas(&ts);
        assert_eq!(deltas.len(), values.len() - 1, "input {values:?}");
        let first = ts.first().unwrap() as i64;
        let last = ts.last().unwrap() as i64;
        assert_eq!(first + deltas.total(), last, "input {values:?}");
    }
}

#[test]
fn single_entry_gives_empty_series() {
    let deltas = daily_deltas(&series(&[42]));
    assert!(deltas.is_empty());
    assert!(deltas.labels().is_empty());
    assert!(delta_summary(&deltas).is_none());
}

#[test]
fn summary_over_deltas() {
    // deltas: 10, -5, 0, 25
    let deltas = daily_deltas(&series(&[100, 110, 105, 105, 130]));
    let s = delta_summary(&deltas).unwrap();
    assert_eq!(s.count, 4);
    assert_eq!(s.min, -5);
    assert_eq!(s.max, 25);
    assert_eq!(s.total, 30);
    assert_eq!(s.corrections, 1);
    assert!((s.mean - 7.5).abs() < 1e-9);
    assert!((s.median - 5.0).abs() < 1e-9);
}
