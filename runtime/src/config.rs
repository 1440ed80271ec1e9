//! Scrape configuration: defaults, environment overrides and validation.

use crate::error::ConfigError;
use crate::extraction::title::TitleTarget;
use serde::{Deserialize, Serialize};

/// Default per-request deadline.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default cap on in-flight fetches.
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Settings shared by every worker in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Element predicate for the structural search.
    #[serde(flatten)]
    pub target: TitleTarget,
    /// Deadline for each worker's fetch, parse and extract.
    pub request_timeout_ms: u64,
    /// Maximum workers fetching at once. `0` means unbounded.
    pub max_concurrency: usize,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            target: TitleTarget::default(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_redirects: 10,
            user_agent: format!("title-scout/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ScrapeConfig {
    /// Defaults overridden by `TITLE_SCOUT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (environment-style names).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tag) = lookup("TITLE_SCOUT_TAG") {
            self.target.tag = tag;
        }
        if let Some(class) = lookup("TITLE_SCOUT_CLASS") {
            self.target.class = class;
        }
        if let Some(raw) = lookup("TITLE_SCOUT_TIMEOUT_MS") {
            self.request_timeout_ms = parse_number("TITLE_SCOUT_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = lookup("TITLE_SCOUT_MAX_CONCURRENCY") {
            self.max_concurrency = parse_number("TITLE_SCOUT_MAX_CONCURRENCY", &raw)?;
        }
        if let Some(agent) = lookup("TITLE_SCOUT_USER_AGENT") {
            self.user_agent = agent;
        }
        Ok(self)
    }

    /// Reject settings no batch can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.tag.trim().is_empty() {
            return Err(ConfigError::InvalidTag);
        }
        if self.target.class.is_empty() {
            return Err(ConfigError::InvalidClass);
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_ms".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
