//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/confsched/config.toml` by default. Every section is optional:
//!
//! ```toml
//! debug = false
//!
//! [source]
//! schedule_url = "https://www.ai.engineer/worldsfair/2024/schedule"
//! event_base_url = "https://www.ai.engineer/worldsfair/2024/schedule/"
//! timeout_secs = 30
//!
//! [export]
//! output_dir = "exports"
//! adjust_column_width = true
//! include_index = false
//!
//! [logging]
//! format = "json"
//! filter = "confsched_source=trace"
//! timestamps = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use confsched_core::{TracingConfig, TracingOutputFormat};
use confsched_source::{DEFAULT_EVENT_BASE_URL, DEFAULT_SCHEDULE_URL, SourceConfig};

/// Configuration for the confsched client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Where the schedule comes from.
    pub source: SourceSettings,

    /// Export defaults.
    pub export: ExportSettings,

    /// Log output.
    pub logging: LoggingSettings,
}

/// Schedule source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Schedule page URL.
    pub schedule_url: String,

    /// Prefix for event links.
    pub event_base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent override.
    pub user_agent: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            schedule_url: DEFAULT_SCHEDULE_URL.to_string(),
            event_base_url: DEFAULT_EVENT_BASE_URL.to_string(),
            timeout_secs: SourceConfig::DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl SourceSettings {
    /// Converts to source configuration, with an optional URL override.
    pub fn to_source_config(&self, url_override: Option<&str>) -> Result<SourceConfig, String> {
        let schedule_url = url_override.unwrap_or(&self.schedule_url);
        let mut config = SourceConfig::new(schedule_url, &self.event_base_url)
            .map_err(|e| format!("invalid source URL: {}", e))?
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(ref user_agent) = self.user_agent {
            config = config.with_user_agent(user_agent);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Export settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory for exported files; the working directory when unset.
    pub output_dir: Option<PathBuf>,

    /// Size workbook columns to their content.
    pub adjust_column_width: bool,

    /// Include a row index column in single-table exports.
    pub include_index: bool,
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Line format: `compact`, `pretty` or `json`.
    pub format: TracingOutputFormat,

    /// Filter directive, overrides `RUST_LOG` and `--debug`.
    pub filter: Option<String>,

    /// Prefix lines with a timestamp.
    pub timestamps: bool,
}

impl LoggingSettings {
    /// Tracing configuration for this run.
    pub fn tracing_config(&self, debug: bool) -> TracingConfig {
        let base = if debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::cli()
        };
        let config = base.with_format(self.format).with_timestamp(self.timestamps);
        match self.filter {
            Some(ref filter) => config.with_env_filter(filter),
            None => config,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("confsched")
    }
}
