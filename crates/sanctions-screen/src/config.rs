//! Immutable run configuration passed into the screening pipeline.

use crate::error::ScreenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Canonical host of the sanctions search site.
pub const DEFAULT_BASE_URL: &str = "https://www.opensanctions.org";

/// Descriptive client identifier sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Links kept per query in batch mode.
pub const DEFAULT_MAX_LINKS: usize = 3;

/// Links shown per query in the interactive search.
pub const INTERACTIVE_MAX_LINKS: usize = 5;

pub const DEFAULT_TIMEOUT_SECS: f64 = 20.0;
pub const DEFAULT_DELAY_SECS: f64 = 0.5;

/// Which entity link extractor implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// Tolerant pattern scan over raw markup.
    #[default]
    Regex,
    /// Full HTML parse with CSS selectors.
    Dom,
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractorKind::Regex => f.write_str("regex"),
            ExtractorKind::Dom => f.write_str("dom"),
        }
    }
}

impl FromStr for ExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regex" => Ok(ExtractorKind::Regex),
            "dom" | "html" => Ok(ExtractorKind::Dom),
            other => Err(format!("unknown extractor '{other}' (expected regex or dom)")),
        }
    }
}

/// Settings for one screening run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    /// Site root; search URLs and absolute entity URLs are built from it.
    pub base_url: String,
    pub user_agent: String,
    /// Maximum entity links kept per query.
    pub max_links: usize,
    pub timeout: Duration,
    /// Pause between consecutive requests.
    pub delay: Duration,
    pub dedupe: bool,
    /// Number of queries to process after dedupe (0 = unlimited).
    pub limit: usize,
    pub extractor: ExtractorKind,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_links: DEFAULT_MAX_LINKS,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECS),
            dedupe: true,
            limit: 0,
            extractor: ExtractorKind::Regex,
        }
    }
}

impl ScreenConfig {
    /// Defaults for single lookups: more links, no pacing.
    pub fn interactive() -> Self {
        Self {
            max_links: INTERACTIVE_MAX_LINKS,
            delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Site root without a trailing slash.
    pub fn site_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), ScreenError> {
        if self.max_links == 0 {
            return Err(ScreenError::Config("max_links must be at least 1".into()));
        }
        if self.timeout.is_zero() {
            return Err(ScreenError::Config("timeout must be positive".into()));
        }
        url::Url::parse(self.site_root())
            .map_err(|e| ScreenError::Config(format!("invalid base URL '{}': {e}", self.base_url)))?;
        Ok(())
    }
}

/// Convert a user-supplied seconds value into a `Duration`.
///
/// Negative values and NaN clamp to zero. Values too large for a `Duration`
/// are a configuration error.
pub fn secs(value: f64) -> Result<Duration, ScreenError> {
    if value.is_nan() || value <= 0.0 {
        return Ok(Duration::ZERO);
    }
    Duration::try_from_secs_f64(value)
        .map_err(|_| ScreenError::Config(format!("{value} seconds is out of range")))
}
