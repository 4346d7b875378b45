//! Daily new cases derived from a cumulative series.

use crate::models::TimeSeries;
use chrono::NaiveDate;

/// Day-over-day differences, one entry per date after the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaSeries {
    points: Vec<(String, i64)>,
}

impl DeltaSeries {
    pub fn points(&self) -> &[(String, i64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Date keys, as delivered by the API.
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|(d, _)| d.clone()).collect()
    }

    pub fn values(&self) -> Vec<i64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    pub fn total(&self) -> i64 {
        self.points.iter().map(|(_, v)| *v).sum()
    }
}

/// Convert running totals into daily new cases.
///
/// `delta[i] = cumulative[i] - cumulative[i - 1]`; the first date has no
/// predecessor and is dropped. Downward revisions in the source show up as
/// negative deltas and are kept as they are.
pub fn daily_deltas(cumulative: &TimeSeries) -> DeltaSeries {
    let points = cumulative
        .points()
        .windows(2)
        .map(|w| {
            let (_, prev) = &w[0];
            let (date, cur) = &w[1];
            (date.clone(), *cur as i64 - *prev as i64)
        })
        .collect();
    DeltaSeries { points }
}

/// Shorten an API date key (`"10/9/22"`, month/day/two-digit year) to `"Oct 09"`.
/// Keys in any other format are returned unchanged.
pub fn short_date_label(key: &str) -> String {
    match NaiveDate::parse_from_str(key, "%m/%d/%y") {
        Ok(d) => d.format("%b %d").to_string(),
        Err(_) => key.to_string(),
    }
}
