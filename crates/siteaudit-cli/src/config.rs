//! CLI configuration for `SiteAudit`.
//!
//! Loads settings from `SITEAUDIT_*` environment variables with defaults.
//! Command-line flags override what is read here.

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Log level filter (e.g., `warn`, `info`, `debug`). `RUST_LOG` wins if set.
    pub log_level: String,
    /// Format of log lines written to stderr.
    pub log_format: LogFormat,
    /// Multiplier on analysis phase delays. `0` skips the wait.
    pub pace: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: LogFormat::Text,
            pace: 1.0,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SITEAUDIT_LOG_LEVEL`: log filter (default: `warn`)
    /// - `SITEAUDIT_LOG_FORMAT`: `text` or `json` (default: `text`)
    /// - `SITEAUDIT_PACE`: phase delay multiplier (default: `1.0`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let log_level = lookup("SITEAUDIT_LOG_LEVEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.log_level);

        let log_format = match lookup("SITEAUDIT_LOG_FORMAT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let pace = lookup("SITEAUDIT_PACE")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite() && *p >= 0.0)
            .unwrap_or(defaults.pace);

        Self {
            log_level,
            log_format,
            pace,
        }
    }
}
