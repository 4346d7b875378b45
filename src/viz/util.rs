//! Utility functions for chart rendering: axis scaling, tick labels, gradient bands.

use crate::render::map_locale;
use num_format::ToFormattedString;

/// Pick a single Y-axis scale and its human label based on the overall magnitude.
/// Returns (scale, label), e.g. (1e6, "millions").
pub fn choose_axis_scale(max_abs: f64) -> (f64, &'static str) {
    if max_abs >= 1.0e9 {
        (1.0e9, "billions")
    } else if max_abs >= 1.0e6 {
        (1.0e6, "millions")
    } else if max_abs >= 1.0e3 {
        (1.0e3, "thousands")
    } else {
        (1.0, "")
    }
}

/// Format an already-scaled Y tick: whole numbers get locale grouping,
/// small magnitudes keep one or two decimals.
pub fn format_y_tick(v: f64, locale_tag: &str) -> String {
    let a = v.abs();
    if a >= 100.0 || v.fract() == 0.0 {
        (v.round() as i64).to_formatted_string(map_locale(locale_tag))
    } else if a >= 10.0 {
        format!("{v:.1}")
    } else {
        format!("{v:.2}")
    }
}

/// Horizontal slice of the area under the line, with its fill opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientBand {
    pub polygon: Vec<(f64, f64)>,
    pub alpha: f64,
}

/// Sample a polyline at `steps` sub-points per segment.
fn densify(points: &[(f64, f64)], steps: usize) -> Vec<(f64, f64)> {
    let steps = steps.max(1);
    let mut out = Vec::with_capacity(points.len() * steps);
    for w in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (w[0], w[1]);
        for k in 0..steps {
            let t = k as f64 / steps as f64;
            out.push((x0 + (x1 - x0) * t, y0 + (y1 - y0) * t));
        }
    }
    if let Some(last) = points.last() {
        out.push(*last);
    }
    out
}

/// Split the area between the line and the zero baseline into `bands`
/// horizontal slices over `y_min..y_max`. Opacity grows linearly from 0 at
/// `y_min` to `top_alpha` at `y_max`, which draws as a vertical gradient.
/// Slices the area does not reach are omitted.
pub fn gradient_bands(
    points: &[(f64, f64)],
    y_min: f64,
    y_max: f64,
    bands: usize,
    top_alpha: f64,
) -> Vec<GradientBand> {
    let span = y_max - y_min;
    if points.len() < 2 || bands == 0 || span <= 0.0 {
        return Vec::new();
    }
    let samples = densify(points, 8);
    let h = span / bands as f64;
    let mut out = Vec::new();
    for k in 0..bands {
        let y0 = y_min + h * k as f64;
        let y1 = y0 + h;
        let upper: Vec<(f64, f64)> = samples
            .iter()
            .map(|(x, y)| (*x, y.max(0.0).clamp(y0, y1)))
            .collect();
        let lower: Vec<(f64, f64)> = samples
            .iter()
            .map(|(x, y)| (*x, y.min(0.0).clamp(y0, y1)))
            .collect();
        let covered = upper
            .iter()
            .zip(&lower)
            .any(|((_, hi), (_, lo))| hi - lo > f64::EPSILON);
        if !covered {
            continue;
        }
        let mut polygon = upper;
        polygon.extend(lower.into_iter().rev());
        let mid = (y0 + y1) / 2.0;
        out.push(GradientBand {
            polygon,
            alpha: top_alpha * (mid - y_min) / span,
        });
    }
    out
}
