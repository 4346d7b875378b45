//! The daily new cases chart and the slot that owns it.
//!
//! A [`ChartSlot`] holds zero or one live [`DailyChart`]. Redrawing never edits
//! the live chart: the old instance is torn down first, then a new one is built
//! from the new labels and values.

use crate::viz;
use anyhow::Result;
use log::debug;
use std::path::Path;

/// Legend text of the single dataset.
pub const SERIES_LABEL: &str = "Daily New Cases";
pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Daily Cases";

/// One constructed chart: a line series over date labels.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyChart {
    id: u64,
    labels: Vec<String>,
    values: Vec<i64>,
}

impl DailyChart {
    /// Labels and values are paired by index; extra entries on either side are dropped.
    fn new(id: u64, mut labels: Vec<String>, mut values: Vec<i64>) -> Self {
        let n = labels.len().min(values.len());
        labels.truncate(n);
        values.truncate(n);
        Self { id, labels, values }
    }

    /// Instance number within its slot, starting at 1.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Hover text for the point at `index`, e.g. `"10/9/22: 1,234"`.
    pub fn tooltip(&self, index: usize, locale_tag: &str) -> Option<String> {
        let label = self.labels.get(index)?;
        let value = self.values.get(index)?;
        Some(format!(
            "{label}: {}",
            crate::render::format_delta(*value, locale_tag)
        ))
    }

    /// Vertical value range. Zero is always inside it, so the axis begins at
    /// zero for positive data and extends below it for negative corrections.
    pub fn y_range(&self) -> (f64, f64) {
        let lo = self.values.iter().copied().min().unwrap_or(0).min(0) as f64;
        let hi = self.values.iter().copied().max().unwrap_or(0).max(0) as f64;
        if (hi - lo).abs() < f64::EPSILON {
            (lo, lo + 1.0)
        } else {
            (lo, hi)
        }
    }

    /// Write the chart to `.svg` (by extension) or a bitmap format.
    pub fn render_to_file<P: AsRef<Path>>(
        &self,
        out_path: P,
        width: u32,
        height: u32,
        locale_tag: &str,
    ) -> Result<()> {
        viz::render_daily_chart(self, out_path, width, height, locale_tag)
    }

    fn destroy(self) {
        debug!("chart #{} destroyed", self.id);
    }
}

/// Exclusive owner of the live chart.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<DailyChart>,
    created: u64,
    destroyed: u64,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear down the current chart (if any) and build a new one.
    pub fn redraw(&mut self, labels: Vec<String>, values: Vec<i64>) -> &DailyChart {
        self.clear();
        self.created += 1;
        debug!("chart #{} created with {} points", self.created, values.len());
        self.current.insert(DailyChart::new(self.created, labels, values))
    }

    /// Tear down the current chart, leaving the slot empty.
    pub fn clear(&mut self) {
        if let Some(old) = self.current.take() {
            old.destroy();
            self.destroyed += 1;
        }
    }

    pub fn current(&self) -> Option<&DailyChart> {
        self.current.as_ref()
    }

    /// Charts constructed and not yet torn down; 0 or 1.
    pub fn live_instances(&self) -> u64 {
        self.created - self.destroyed
    }

    pub fn created(&self) -> u64 {
        self.created
    }
}
