//! Summary cards built from a snapshot.

use crate::counter::{AnimationHandle, CounterRamp};
use crate::models::Snapshot;
use chrono::{DateTime, Local};
use num_format::{Locale, ToFormattedString};

/// Statistics shown as cards, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cases,
    Deaths,
    Recovered,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Cases, Metric::Deaths, Metric::Recovered];

    pub fn title(self) -> &'static str {
        match self {
            Metric::Cases => "Total Cases",
            Metric::Deaths => "Deaths",
            Metric::Recovered => "Recovered",
        }
    }

    pub fn value_in(self, s: &Snapshot) -> u64 {
        match self {
            Metric::Cases => s.total_cases,
            Metric::Deaths => s.total_deaths,
            Metric::Recovered => s.total_recovered,
        }
    }
}

/// One counter card: starts at zero and ramps to `target`.
#[derive(Debug, Clone)]
pub struct Card {
    pub metric: Metric,
    pub target: u64,
    pub display: u64,
    ramp: CounterRamp,
}

impl Card {
    fn new(metric: Metric, target: u64, handle: AnimationHandle) -> Self {
        Self {
            metric,
            target,
            display: 0,
            ramp: CounterRamp::new(target, handle),
        }
    }

    /// Advance one frame. Returns `true` while the counter is still moving.
    pub fn tick(&mut self) -> bool {
        match self.ramp.next() {
            Some(v) => {
                self.display = v;
                !self.ramp.is_done()
            }
            None => false,
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.ramp.is_done()
    }
}

/// The whole summary-card region of one render.
#[derive(Debug, Clone)]
pub struct CardRegion {
    pub title: String,
    pub cards: Vec<Card>,
    pub last_updated: DateTime<Local>,
    animation: AnimationHandle,
}

impl CardRegion {
    pub fn card(&self, metric: Metric) -> Option<&Card> {
        self.cards.iter().find(|c| c.metric == metric)
    }

    /// Pump every counter by one frame. Returns `true` while any is still moving.
    pub fn tick(&mut self) -> bool {
        let mut moving = false;
        for card in &mut self.cards {
            moving |= card.tick();
        }
        moving
    }

    pub fn is_animating(&self) -> bool {
        self.cards.iter().any(Card::is_animating)
    }

    /// Jump every counter to its final value.
    pub fn finish(&mut self) {
        self.animation.cancel();
        for card in &mut self.cards {
            card.display = card.target;
        }
    }

    /// Retire this region's animation; its counters stop where they are.
    pub fn cancel_animation(&self) {
        self.animation.cancel();
    }

    pub fn last_updated_text(&self) -> String {
        format!(
            "Last updated: {}",
            self.last_updated.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Build a fresh card region for `snapshot`: one card per metric, each showing
/// zero and armed to ramp to its real value. `now` becomes the "last updated"
/// stamp.
pub fn render_cards(snapshot: &Snapshot, title: &str, now: DateTime<Local>) -> CardRegion {
    let animation = AnimationHandle::new();
    let cards = Metric::ALL
        .iter()
        .map(|m| Card::new(*m, m.value_in(snapshot), animation.clone()))
        .collect();
    CardRegion {
        title: title.to_string(),
        cards,
        last_updated: now,
        animation,
    }
}

/// Map a user-provided locale tag to a num-format Locale.
/// Supported tags (case-insensitive): "en", "us", "en_US", "de", "de_DE", "german", "fr", "es", "it", "pt", "nl"
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Group digits for display (`1234567` → `1,234,567` with "en").
pub fn format_count(n: u64, locale_tag: &str) -> String {
    n.to_formatted_string(map_locale(locale_tag))
}

/// Signed variant of [`format_count`] for daily deltas.
pub fn format_delta(n: i64, locale_tag: &str) -> String {
    n.to_formatted_string(map_locale(locale_tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_per_locale() {
        assert_eq!(format_count(603, "en"), "603");
        assert_eq!(format_count(1_234_567, "en"), "1,234,567");
        assert_eq!(format_count(1_234_567, "de"), "1.234.567");
        assert_eq!(format_delta(-20_000, "en"), "-20,000");
    }

    #[test]
    fn finish_jumps_to_targets() {
        let snap = Snapshot {
            total_cases: 900,
            total_deaths: 9,
            total_recovered: 0,
        };
        let mut region = render_cards(&snap, "Global", Local::now());
        region.tick();
        region.finish();
        assert!(!region.is_animating());
        assert_eq!(region.card(Metric::Cases).map(|c| c.display), Some(900));
        assert!(!region.tick());
    }
}
