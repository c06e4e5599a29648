//! Logging setup.
//!
//! Logs go to stderr so stdout carries only the report tables. `RUST_LOG`
//! overrides the configured level. The level and format come from the
//! `[logging]` section of the config file:
//!
//! ```toml
//! [logging]
//! level = "dvdrental_report=debug"
//! format = "pretty"
//! ```

use serde::Deserialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log format style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human-readable
    Pretty,
    /// Compact single-line format (default)
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Minimum log level, in `EnvFilter` directive syntax
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl LogConfig {
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    }

    /// Installs the global subscriber. A second call is a no-op.
    pub fn init(&self) {
        let layer = fmt::layer().with_writer(std::io::stderr);
        let result = match self.format {
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(self.filter())
                .with(layer.pretty())
                .try_init(),
            LogFormat::Compact => tracing_subscriber::registry()
                .with(self.filter())
                .with(layer.compact())
                .try_init(),
        };
        if result.is_err() {
            tracing::debug!("global subscriber already installed");
        }
    }
}
