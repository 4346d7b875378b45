//! Visualization: render the daily new cases chart to **SVG** or **PNG**.
//!
//! - Single line series with point markers and a vertical gradient fill
//! - Axis titles "Date" / "Daily Cases", y-axis always includes zero
//! - Locale-aware tick labels, magnitude scaling (thousands/millions)
//! - An empty chart renders axes and legend only

pub mod util;

use crate::chart::{DailyChart, SERIES_LABEL, X_AXIS_TITLE, Y_AXIS_TITLE};
use crate::series::short_date_label;
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use util::{choose_axis_scale, format_y_tick, gradient_bands};

/// Teal line colour (`#4bc0c0`).
pub const LINE_COLOR: RGBColor = RGBColor(75, 192, 192);
/// Fill opacity right under the top of the plot; fades to 0 at the bottom.
pub const GRADIENT_TOP_ALPHA: f64 = 0.4;
const GRADIENT_BANDS: usize = 32;
const POINT_RADIUS: i32 = 4;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Render `chart` to `out_path`; `.svg` selects the SVG backend, anything else
/// goes through the bitmap backend (format by extension, e.g. `.png`).
pub fn render_daily_chart<P: AsRef<Path>>(
    chart: &DailyChart,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
) -> Result<()> {
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, chart, locale_tag)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, chart, locale_tag)?;
    }
    Ok(())
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, chart: &DailyChart, locale_tag: &str) -> Result<()>
where
    DB: DrawingBackend,
{
    const MARGIN: u32 = 16;

    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    // X is the point index; labels are looked up by index.
    let n = chart.len();
    let x_max = if n > 1 { (n - 1) as f64 } else { 1.0 };

    let (y_min, y_max) = chart.y_range();
    let (yscale, scale_word) = choose_axis_scale(y_min.abs().max(y_max.abs()));
    let y_axis_title = if scale_word.is_empty() {
        Y_AXIS_TITLE.to_string()
    } else {
        format!("{Y_AXIS_TITLE} ({scale_word})")
    };

    let labels = chart.labels();
    let x_label_fmt = |x: &f64| {
        let i = x.round();
        if i < 0.0 || (x - i).abs() > 1e-6 {
            return String::new();
        }
        labels
            .get(i as usize)
            .map(|l| short_date_label(l))
            .unwrap_or_default()
    };
    let y_label_fmt = |v: &f64| format_y_tick(*v, locale_tag);

    let mut cc = ChartBuilder::on(&root)
        .margin(MARGIN)
        .caption(SERIES_LABEL, (FontFamily::SansSerif, 22))
        .set_label_area_size(LabelAreaPosition::Left, 72)
        .set_label_area_size(LabelAreaPosition::Bottom, 56)
        .build_cartesian_2d(-0.3..(x_max + 0.3), (y_min / yscale)..(y_max / yscale))
        .map_err(|e| anyhow!("{:?}", e))?;

    cc.configure_mesh()
        .x_desc(X_AXIS_TITLE)
        .y_desc(y_axis_title)
        .x_labels(n.max(2))
        .y_labels(8)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let points: Vec<(f64, f64)> = chart
        .values()
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v as f64 / yscale))
        .collect();

    for band in gradient_bands(
        &points,
        y_min / yscale,
        y_max / yscale,
        GRADIENT_BANDS,
        GRADIENT_TOP_ALPHA,
    ) {
        cc.draw_series(std::iter::once(Polygon::new(
            band.polygon,
            LINE_COLOR.mix(band.alpha).filled(),
        )))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    cc.draw_series(LineSeries::new(points.clone(), LINE_COLOR.stroke_width(2)))
        .map_err(|e| anyhow!("{:?}", e))?
        .label(SERIES_LABEL)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], LINE_COLOR.stroke_width(2)));

    cc.draw_series(
        points
            .iter()
            .map(|p| Circle::new(*p, POINT_RADIUS, LINE_COLOR.filled())),
    )
    .map_err(|e| anyhow!("{:?}", e))?;

    cc.configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .label_font((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
