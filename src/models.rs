use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Reporting region a fetch cycle is issued for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    /// Global aggregate (`all` in the API paths).
    #[default]
    Global,
    /// A single country identifier (name, ISO2 or ISO3), passed through unvalidated.
    Country(String),
}

impl Scope {
    /// Parse user input: `"all"` (any case) or blank selects [`Scope::Global`],
    /// anything else is trimmed and taken as a country identifier.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Scope::Global
        } else {
            Scope::Country(s.to_string())
        }
    }

    /// The raw path segment used in API URLs (not yet percent-encoded).
    pub fn path_segment(&self) -> &str {
        match self {
            Scope::Global => "all",
            Scope::Country(id) => id.as_str(),
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Scope::Global)
    }
}

impl FromStr for Scope {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Scope::parse(s))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "Global"),
            Scope::Country(id) => write!(f, "{id}"),
        }
    }
}

/// Raw snapshot body as returned by `/v3/covid-19/all` and `/v3/covid-19/countries/{id}`.
///
/// Only the fields the dashboard consumes are declared; the rest are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub cases: u64,
    pub deaths: u64,
    /// Missing for some regions, and sometimes `null`.
    #[serde(default)]
    pub recovered: Option<u64>,
    /// Present on per-country responses only.
    #[serde(default)]
    pub country: Option<String>,
}

/// Point-in-time cumulative totals for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub total_cases: u64,
    pub total_deaths: u64,
    pub total_recovered: u64,
}

impl From<&SnapshotResponse> for Snapshot {
    fn from(r: &SnapshotResponse) -> Self {
        Self {
            total_cases: r.cases,
            total_deaths: r.deaths,
            total_recovered: r.recovered.unwrap_or(0),
        }
    }
}

/// Cumulative case counts keyed by date, in the order the API listed them.
///
/// The API encodes the series as a JSON object (`{"10/9/22": 123, ...}`); a plain
/// map would re-sort the keys lexically and put `"10/1/22"` before `"9/30/22"`,
/// so this type deserializes the object into a vector instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSeries {
    points: Vec<(String, u64)>,
}

impl TimeSeries {
    pub fn new(points: Vec<(String, u64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(String, u64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<u64> {
        self.points.first().map(|(_, v)| *v)
    }

    pub fn last(&self) -> Option<u64> {
        self.points.last().map(|(_, v)| *v)
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = TimeSeries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an object mapping date strings to non-negative counts")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut points = Vec::with_capacity(map.size_hint().unwrap_or(8));
                while let Some((date, count)) = map.next_entry::<String, u64>()? {
                    points.push((date, count));
                }
                Ok(TimeSeries { points })
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// `{cases: {...}, deaths: {...}, recovered: {...}}` block of a history response.
#[derive(Debug, Clone, Deserialize)]
pub struct Timeline {
    pub cases: TimeSeries,
}

/// History body; its shape depends on the scope it was requested for.
///
/// Global: `{"cases": {...}, "deaths": {...}, ...}`
/// Per-country: `{"country": "...", "province": [...], "timeline": {"cases": {...}, ...}}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HistoryResponse {
    Country {
        #[serde(default)]
        country: Option<String>,
        timeline: Timeline,
    },
    Global(Timeline),
}

impl HistoryResponse {
    /// Resolve either shape into the cumulative cases series.
    pub fn into_cases(self) -> TimeSeries {
        match self {
            HistoryResponse::Country { timeline, .. } | HistoryResponse::Global(timeline) => {
                timeline.cases
            }
        }
    }
}

/// Everything one successful fetch cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleData {
    pub snapshot: Snapshot,
    pub cumulative: TimeSeries,
    /// Display name reported by the API for per-country scopes.
    pub region_name: Option<String>,
}
