//! Dashboard state and the fetch → render cycle.
//!
//! The dashboard owns every display region: the summary cards, the chart slot,
//! and the loading / error flags. A cycle runs in two halves so hosts can do
//! the network part off the UI thread:
//!
//! 1. [`Dashboard::begin_cycle`] clears the cards, shows loading, hides the error
//!    and hands out a [`CycleTicket`] stamped with a new generation.
//! 2. [`Dashboard::complete_cycle`] applies the fetch result, unless a newer
//!    cycle has started since, in which case the result is dropped.
//!
//! [`Dashboard::run_cycle`] does both halves in one call.

use crate::api::{FetchError, StatsSource};
use crate::chart::{ChartSlot, DailyChart};
use crate::models::{CycleData, Scope};
use crate::render::{CardRegion, render_cards};
use crate::series::{DeltaSeries, daily_deltas};
use chrono::{DateTime, Local};
use log::{debug, error, info};

/// Colour scheme of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Proof that a cycle was started; required to complete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTicket {
    generation: u64,
    scope: Scope,
}

impl CycleTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

/// What [`Dashboard::complete_cycle`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Cards and chart now show the new data.
    Rendered,
    /// The error banner is showing.
    Failed,
    /// A newer cycle was started; the result was discarded.
    Superseded,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    scope: Scope,
    generation: u64,
    loading: bool,
    error: bool,
    cards: Option<CardRegion>,
    deltas: Option<DeltaSeries>,
    chart: ChartSlot,
    theme: Theme,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a cycle for `scope`: retire the old cards (and their animation),
    /// show the loading state, hide the error.
    pub fn begin_cycle(&mut self, scope: Scope) -> CycleTicket {
        self.generation += 1;
        if let Some(old) = self.cards.take() {
            old.cancel_animation();
        }
        self.loading = true;
        self.error = false;
        self.scope = scope.clone();
        debug!("cycle {} started for {scope}", self.generation);
        CycleTicket {
            generation: self.generation,
            scope,
        }
    }

    /// Apply the result of the cycle identified by `ticket`. `now` is the
    /// wall-clock time stamped as "last updated".
    pub fn complete_cycle(
        &mut self,
        ticket: CycleTicket,
        result: Result<CycleData, FetchError>,
        now: DateTime<Local>,
    ) -> CycleOutcome {
        if ticket.generation != self.generation {
            debug!(
                "dropping result of cycle {} ({}); cycle {} is current",
                ticket.generation, ticket.scope, self.generation
            );
            return CycleOutcome::Superseded;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                let deltas = daily_deltas(&data.cumulative);
                self.chart.redraw(deltas.labels(), deltas.values());
                let title = data
                    .region_name
                    .clone()
                    .unwrap_or_else(|| ticket.scope.to_string());
                self.cards = Some(render_cards(&data.snapshot, &title, now));
                self.deltas = Some(deltas);
                info!("rendered {} ({} cases)", title, data.snapshot.total_cases);
                CycleOutcome::Rendered
            }
            Err(err) => {
                match std::error::Error::source(&err) {
                    Some(cause) => error!("{} for {}: {cause}", err, ticket.scope),
                    None => error!("{} for {}", err, ticket.scope),
                }
                self.error = true;
                self.cards = None;
                // an error banner next to the previous scope's chart would misattribute it
                self.deltas = None;
                self.chart.clear();
                CycleOutcome::Failed
            }
        }
    }

    /// Fetch and render `scope` synchronously.
    pub fn run_cycle<S: StatsSource + ?Sized>(&mut self, source: &S, scope: Scope) -> CycleOutcome {
        let ticket = self.begin_cycle(scope);
        let result = source.fetch_cycle(ticket.scope());
        self.complete_cycle(ticket, result, Local::now())
    }

    /// Selection changed: refresh for the newly chosen scope.
    pub fn select_scope<S: StatsSource + ?Sized>(&mut self, source: &S, scope: Scope) -> CycleOutcome {
        self.run_cycle(source, scope)
    }

    /// Advance card counters by one frame. Returns `true` while any still moves.
    pub fn tick(&mut self) -> bool {
        self.cards.as_mut().is_some_and(CardRegion::tick)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn cards(&self) -> Option<&CardRegion> {
        self.cards.as_ref()
    }

    pub fn cards_mut(&mut self) -> Option<&mut CardRegion> {
        self.cards.as_mut()
    }

    pub fn deltas(&self) -> Option<&DeltaSeries> {
        self.deltas.as_ref()
    }

    pub fn chart(&self) -> Option<&DailyChart> {
        self.chart.current()
    }

    pub fn chart_slot(&self) -> &ChartSlot {
        &self.chart
    }
}
