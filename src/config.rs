use crate::models::MatchingRules;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

/// Profile cache settings; no `redis_url` means an in-process cache only
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

/// Tolerance windows for the eligibility filter
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_wake_window")]
    pub wake_window_minutes: i64,
    #[serde(default = "default_bedtime_window")]
    pub bedtime_window_minutes: i64,
    #[serde(default = "default_move_date_window")]
    pub move_date_window_days: i64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            wake_window_minutes: default_wake_window(),
            bedtime_window_minutes: default_bedtime_window(),
            move_date_window_days: default_move_date_window(),
        }
    }
}

impl MatchingSettings {
    /// Windows are distances, so a negative one would reject every candidate
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("wake_window_minutes", self.wake_window_minutes),
            ("bedtime_window_minutes", self.bedtime_window_minutes),
            ("move_date_window_days", self.move_date_window_days),
        ];

        for (name, value) in windows {
            if value < 0 {
                return Err(ConfigError::Message(format!(
                    "matching.{} must not be negative (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn rules(&self) -> MatchingRules {
        MatchingRules {
            wake_window_minutes: self.wake_window_minutes,
            bedtime_window_minutes: self.bedtime_window_minutes,
            move_date_window_days: self.move_date_window_days,
        }
    }
}

fn default_wake_window() -> i64 { 60 }
fn default_bedtime_window() -> i64 { 60 }
fn default_move_date_window() -> i64 { 14 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with ROOMMATE__)
    /// 4. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local development overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., ROOMMATE__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        Self::from_config(with_database_url_override(settings)?)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::from_config(with_database_url_override(settings)?)
    }

    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;
        settings.matching.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("ROOMMATE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply the conventional `DATABASE_URL` variable over whatever the
/// files and prefixed variables set
fn with_database_url_override(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn config_from(toml: &str) -> Config {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_matching_rules() {
        let rules = MatchingSettings::default().rules();
        assert_eq!(rules, MatchingRules::default());
        assert_eq!(rules.wake_window_minutes, 60);
        assert_eq!(rules.bedtime_window_minutes, 60);
        assert_eq!(rules.move_date_window_days, 14);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_optional_sections_fall_back_to_defaults() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "postgres://localhost/test"

            [matching]
            wake_window_minutes = 30
        "#;

        let settings = Settings::from_config(config_from(toml)).unwrap();

        assert!(settings.cache.redis_url.is_none());
        assert_eq!(settings.matching.wake_window_minutes, 30);
        assert_eq!(settings.matching.bedtime_window_minutes, 60);
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_negative_window_is_rejected() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "postgres://localhost/test"

            [matching]
            wake_window_minutes = -5
        "#;

        let err = Settings::from_config(config_from(toml)).unwrap_err();
        assert!(err.to_string().contains("wake_window_minutes"));

        let zero = MatchingSettings {
            move_date_window_days: 0,
            ..MatchingSettings::default()
        };
        assert!(zero.validate().is_ok());
    }
}
