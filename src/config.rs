//! Runtime settings shared by the CLI and the desktop dashboard.

use anyhow::{Result, bail};
use std::time::Duration;

/// Public disease.sh deployment.
pub const DEFAULT_BASE_URL: &str = "https://disease.sh";

/// Number of days of history requested per cycle. Seven deltas need eight points.
pub const HISTORY_DAYS: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API root without trailing slash, e.g. `https://disease.sh`.
    pub base_url: String,
    /// Total per-request timeout.
    pub timeout_secs: u64,
    /// Number formatting tag for counters and tick labels ("en", "de", ...).
    pub locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 30,
            locale: "en".into(),
        }
    }
}

impl Config {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL with any trailing slashes removed.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<()> {
        let root = self.api_root().trim();
        if root.is_empty() {
            bail!("base url must not be empty");
        }
        if !(root.starts_with("http://") || root.starts_with("https://")) {
            bail!("base url must start with http:// or https:// (got {root})");
        }
        if self.timeout_secs == 0 {
            bail!("timeout must be at least one second");
        }
        Ok(())
    }
}
