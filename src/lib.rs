//! pandemic_dash
//!
//! A small Rust library behind a pandemic statistics dashboard: it fetches the
//! current totals and the last eight days of cumulative cases from the public
//! [disease.sh](https://disease.sh) API, derives daily new cases, animates the
//! summary counters and draws the daily chart. Pairs with the `pdash` CLI and
//! the `pdash-gui` desktop app.
//!
//! ### Features
//! - Global or per-country scope; both requests of a cycle run in parallel and
//!   succeed or fail together
//! - Daily deltas from a cumulative series (negative corrections preserved)
//! - Frame-pumped counter ramps with explicit cancellation
//! - Single-owner chart slot; SVG/PNG rendering via plotters
//! - Stale results of superseded cycles are discarded
//!
//! ### Example
//! ```no_run
//! use pandemic_dash::{Client, Config, Dashboard, Scope};
//!
//! let client = Client::new(&Config::default())?;
//! let mut dash = Dashboard::new();
//! dash.run_cycle(&client, Scope::parse("Germany"));
//! if let Some(chart) = dash.chart() {
//!     chart.render_to_file("daily.svg", 1000, 600, "en")?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod counter;
pub mod dashboard;
pub mod models;
pub mod render;
pub mod series;
pub mod stats;
pub mod viz;

pub use api::{Client, FetchError, StatsSource};
pub use config::Config;
pub use dashboard::{CycleOutcome, Dashboard, Theme};
pub use models::{CycleData, Scope, Snapshot, TimeSeries};
