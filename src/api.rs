//! Blocking client for the **disease.sh** COVID-19 endpoints (v3).
//!
//! One dashboard refresh is a *cycle*: a snapshot request and a history request
//! issued in parallel and joined. A cycle either yields both payloads or fails
//! as a whole with [`FetchError`]; callers never see half a cycle.
//!
//! ### Notes
//! - No retry and no caching: each cycle is a single best-effort attempt.
//! - The two history shapes (global vs. per-country) are resolved here into one
//!   [`TimeSeries`], so nothing downstream branches on scope.
//! - The scope identifier is percent-encoded as a single path segment and
//!   otherwise sent as-is; unknown countries surface as an HTTP 404 failure.
//!
//! Typical usage:
//! ```no_run
//! # use pandemic_dash::{Client, Config, Scope};
//! let client = Client::new(&Config::default())?;
//! let data = client.fetch_cycle(&Scope::parse("Germany"))?;
//! println!("{} total cases", data.snapshot.total_cases);
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::config::{Config, HISTORY_DAYS};
use crate::models::{CycleData, HistoryResponse, Scope, Snapshot, SnapshotResponse, TimeSeries};
use anyhow::{Context, Result};
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// The single failure kind of a fetch cycle.
///
/// Users only ever see "fetch failed"; the underlying [`FetchCause`] is kept as
/// the error source for the diagnostic log.
#[derive(Debug, Error)]
#[error("fetch failed")]
pub struct FetchError {
    #[from]
    cause: FetchCause,
}

impl FetchError {
    pub fn cause(&self) -> &FetchCause {
        &self.cause
    }
}

/// What went wrong underneath a [`FetchError`].
#[derive(Debug, Error)]
pub enum FetchCause {
    #[error("GET {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GET {url}: HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("decode {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("request worker panicked")]
    Worker,
}

/// Where a dashboard gets its data from. [`Client`] talks to the network;
/// tests plug in canned sources.
pub trait StatsSource {
    fn fetch_cycle(&self, scope: &Scope) -> Result<CycleData, FetchError>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

// Keep a few safe punctuation characters readable in country names/ids.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc_segment(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s.trim(), SEGMENT).to_string()
}

impl Client {
    /// Build a client from validated settings.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::builder()
            .timeout(config.timeout()) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("pandemic_dash/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: config.api_root().to_string(),
            http,
        })
    }

    /// `/v3/covid-19/all` or `/v3/covid-19/countries/{scope}`.
    pub fn snapshot_url(&self, scope: &Scope) -> String {
        match scope {
            Scope::Global => format!("{}/v3/covid-19/all", self.base_url),
            Scope::Country(id) => {
                format!("{}/v3/covid-19/countries/{}", self.base_url, enc_segment(id))
            }
        }
    }

    /// `/v3/covid-19/historical/{all|scope}?lastdays=8`.
    pub fn history_url(&self, scope: &Scope) -> String {
        let segment = match scope {
            Scope::Global => "all".to_string(),
            Scope::Country(id) => enc_segment(id),
        };
        format!(
            "{}/v3/covid-19/historical/{}?lastdays={}",
            self.base_url, segment, HISTORY_DAYS
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchCause> {
        debug!("GET {url}");
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|source| FetchCause::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchCause::Status {
                url: url.to_string(),
                status,
            });
        }
        let body = resp.bytes().map_err(|source| FetchCause::Transport {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| FetchCause::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch the current totals for `scope` (one request).
    pub fn fetch_snapshot(&self, scope: &Scope) -> Result<SnapshotResponse, FetchError> {
        Ok(self.get_json(&self.snapshot_url(scope))?)
    }

    /// Fetch the cumulative cases of the last eight days for `scope` (one request).
    pub fn fetch_history(&self, scope: &Scope) -> Result<TimeSeries, FetchError> {
        let history: HistoryResponse = self.get_json(&self.history_url(scope))?;
        Ok(history.into_cases())
    }

    /// Issue both requests in parallel and join them; all or nothing.
    pub fn fetch_cycle(&self, scope: &Scope) -> Result<CycleData, FetchError> {
        let (snapshot, history) = thread::scope(|s| {
            let snapshot = s.spawn(|| self.fetch_snapshot(scope));
            let history = s.spawn(|| self.fetch_history(scope));
            (
                snapshot
                    .join()
                    .unwrap_or_else(|_| Err(FetchCause::Worker.into())),
                history
                    .join()
                    .unwrap_or_else(|_| Err(FetchCause::Worker.into())),
            )
        });
        let snapshot = snapshot?;
        let cumulative = history?;
        debug!(
            "cycle for {scope}: {} cases, {} history points",
            snapshot.cases,
            cumulative.len()
        );
        Ok(CycleData {
            snapshot: Snapshot::from(&snapshot),
            cumulative,
            region_name: snapshot.country,
        })
    }
}

impl StatsSource for Client {
    fn fetch_cycle(&self, scope: &Scope) -> Result<CycleData, FetchError> {
        Client::fetch_cycle(self, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new(&Config::default().with_base_url("https://example.test/")).unwrap()
    }

    #[test]
    fn global_urls() {
        let c = client();
        assert_eq!(
            c.snapshot_url(&Scope::Global),
            "https://example.test/v3/covid-19/all"
        );
        assert_eq!(
            c.history_url(&Scope::Global),
            "https://example.test/v3/covid-19/historical/all?lastdays=8"
        );
    }

    #[test]
    fn country_urls_are_encoded() {
        let c = client();
        let scope = Scope::parse(" South Korea ");
        assert_eq!(
            c.snapshot_url(&scope),
            "https://example.test/v3/covid-19/countries/South%20Korea"
        );
        assert_eq!(
            c.history_url(&scope),
            "https://example.test/v3/covid-19/historical/South%20Korea?lastdays=8"
        );
    }

    #[test]
    fn error_reads_fetch_failed() {
        let err = FetchError::from(FetchCause::Worker);
        assert_eq!(err.to_string(), "fetch failed");
        assert!(std::error::Error::source(&err).is_some());
    }
}
