use pandemic_dash::chart::ChartSlot;
use std::fs;

fn labels(n: usize) -> Vec<String> {
    (1..=n).map(|d| format!("10/{d}/22")).collect()
}

#[test]
fn svg_has_axis_titles_and_legend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily.svg");
    let mut slot = ChartSlot::new();
    let chart = slot.redraw(labels(7), vec![1200, 3400, 2500, -300, 4100, 3900, 4200]);
    chart.render_to_file(&path, 800, 480, "en").unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Date"));
    assert!(svg.contains("Daily Cases"));
    assert!(svg.contains("Daily New Cases"));
}

#[test]
fn large_values_are_scaled_in_axis_title() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scaled.svg");
    let mut slot = ChartSlot::new();
    let chart = slot.redraw(labels(3), vec![2_500_000, 3_100_000, 2_900_000]);
    chart.render_to_file(&path, 800, 480, "de").unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Daily Cases (millions)"));
}

#[test]
fn empty_chart_renders() {
    let dir = tempfile::tempdir().unwrap();
    let mut slot = ChartSlot::new();
    let chart = slot.redraw(vec![], vec![]);
    for name in ["empty.svg", "empty.png"] {
        let path = dir.path().join(name);
        chart.render_to_file(&path, 640, 400, "en").unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0, "{name} written");
    }
}

#[test]
fn single_point_chart_renders_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("one.png");
    let mut slot = ChartSlot::new();
    let chart = slot.redraw(labels(1), vec![17]);
    chart.render_to_file(&path, 640, 400, "en").unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
