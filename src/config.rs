use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub database: DatabaseConfig,
    pub reporter: ReporterConfig,
    pub logging: LoggingConfig,
}

/// Live message feed settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the append-only JSON-lines feed
    pub path: String,
    /// Seconds to sleep between polls when no new data arrived
    pub poll_interval_secs: u64,
    /// Consecutive misses of the source file before giving up
    pub max_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_connections: u32,
}

/// Periodic distribution report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// Seconds between chart renders
    pub interval_secs: u64,
    /// Path of the chart artifact, overwritten each cycle
    pub chart_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub format: String, // "json" or "text"
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig {
                path: "data/live_messages.jsonl".to_string(),
                poll_interval_secs: 2,
                max_retries: 10,
            },
            database: DatabaseConfig {
                path: "data/messages.db".to_string(),
                max_connections: 4,
            },
            reporter: ReporterConfig {
                interval_secs: 30,
                chart_path: "output/message_length_distribution.svg".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// defaults, then config files, then `MSG_STREAM__*` environment variables.
    ///
    /// Does not validate: CLI flags are applied on top of the loaded values,
    /// so the caller runs [`validate`](Self::validate) once after all
    /// overrides are in place.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let config = Config::builder()
            .set_default("source.path", defaults.source.path)?
            .set_default("source.poll_interval_secs", defaults.source.poll_interval_secs)?
            .set_default("source.max_retries", defaults.source.max_retries)?
            .set_default("database.path", defaults.database.path)?
            .set_default("database.max_connections", defaults.database.max_connections)?
            .set_default("reporter.interval_secs", defaults.reporter.interval_secs)?
            .set_default("reporter.chart_path", defaults.reporter.chart_path)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.file_path", defaults.logging.file_path)?
            .set_default("logging.format", defaults.logging.format)?
            // Add config files if they exist
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix
            .add_source(
                Environment::with_prefix("MSG_STREAM")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {}", e))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.source.path.trim().is_empty() {
            return Err(anyhow::anyhow!("source.path must not be empty"));
        }
        if self.source.poll_interval_secs == 0 {
            return Err(anyhow::anyhow!("poll_interval_secs must be greater than 0"));
        }
        if self.source.max_retries == 0 {
            return Err(anyhow::anyhow!("max_retries must be greater than 0"));
        }

        if self.database.path.trim().is_empty() {
            return Err(anyhow::anyhow!("database.path must not be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!("max_connections must be greater than 0"));
        }

        if self.reporter.interval_secs == 0 {
            return Err(anyhow::anyhow!("interval_secs must be greater than 0"));
        }
        if self.reporter.chart_path.trim().is_empty() {
            return Err(anyhow::anyhow!("chart_path must not be empty"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format,
                valid_formats
            ));
        }

        Ok(())
    }

    /// Get log level from environment or config
    #[must_use]
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.source.poll_interval_secs, 2);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.reporter.interval_secs, 30);
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = AppConfig::default();
        config.source.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }
}
