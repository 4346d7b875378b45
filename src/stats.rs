use crate::series::DeltaSeries;
use serde::{Deserialize, Serialize};

/// Summary statistics over a daily delta series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeltaSummary {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub median: f64,
    pub total: i64,
    /// Days with a negative delta (downward revisions upstream).
    pub corrections: usize,
}

/// Compute the summary, or `None` for an empty series.
pub fn delta_summary(deltas: &DeltaSeries) -> Option<DeltaSummary> {
    let mut vals = deltas.values();
    if vals.is_empty() {
        return None;
    }
    vals.sort_unstable();
    let count = vals.len();
    let total: i64 = vals.iter().sum();
    let median = if count % 2 == 1 {
        vals[count / 2] as f64
    } else {
        (vals[count / 2 - 1] + vals[count / 2]) as f64 / 2.0
    };
    Some(DeltaSummary {
        count,
        min: vals[0],
        max: vals[count - 1],
        mean: total as f64 / count as f64,
        median,
        total,
        corrections: vals.iter().filter(|v| **v < 0).count(),
    })
}
