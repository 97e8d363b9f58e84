//! Configuration loading and typed config structures for the Snowtooth
//! service.
//!
//! The canonical configuration lives in `snowtooth-config.yaml` in the
//! working directory. Every field has a default, so a missing file or a
//! partial file is fine. Selected values can be overridden with
//! environment variables for container deployments.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value `{value}` for {name}")]
    InvalidEnv {
        /// The environment variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `snowtooth-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnowtoothConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Initial dataset locations.
    #[serde(default)]
    pub data: DataConfig,

    /// Notification bus settings.
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SnowtoothConfig {
    /// Load configuration from `path`, or defaults if it does not exist.
    ///
    /// Environment overrides are applied in both cases.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed, or an override is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides()?;
            Ok(config)
        }
    }

    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `SNOWTOOTH_HOST` overrides `http.host`
    /// - `SNOWTOOTH_PORT` overrides `http.port`
    /// - `SNOWTOOTH_LIFTS_PATH` overrides `data.lifts_path`
    /// - `SNOWTOOTH_TRAILS_PATH` overrides `data.trails_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `SNOWTOOTH_PORT` is not a
    /// valid port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `SNOWTOOTH_PORT` is not a
    /// valid port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SNOWTOOTH_HOST") {
            self.http.host = val;
        }
        if let Some(val) = lookup("SNOWTOOTH_PORT") {
            self.http.port = val.parse().map_err(|_err: std::num::ParseIntError| {
                ConfigError::InvalidEnv {
                    name: "SNOWTOOTH_PORT",
                    value: val.clone(),
                }
            })?;
        }
        if let Some(val) = lookup("SNOWTOOTH_LIFTS_PATH") {
            self.data.lifts_path = PathBuf::from(val);
        }
        if let Some(val) = lookup("SNOWTOOTH_TRAILS_PATH") {
            self.data.trails_path = PathBuf::from(val);
        }
        Ok(())
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Address to bind (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Locations of the initial dataset files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// JSON array of lifts.
    #[serde(default = "default_lifts_path")]
    pub lifts_path: PathBuf,

    /// JSON array of trails.
    #[serde(default = "default_trails_path")]
    pub trails_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            lifts_path: default_lifts_path(),
            trails_path: default_trails_path(),
        }
    }
}

/// Notification bus configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationConfig {
    /// Per-subscriber queue bound. Absent means unbounded; when set, a
    /// subscriber that falls this many events behind is disconnected.
    #[serde(default)]
    pub subscriber_capacity: Option<usize>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    4000
}

fn default_lifts_path() -> PathBuf {
    PathBuf::from("data/lifts.json")
}

fn default_trails_path() -> PathBuf {
    PathBuf::from("data/trails.json")
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SnowtoothConfig::default();
        assert_eq!(config.http.port, 4000);
        assert_eq!(config.data.lifts_path, PathBuf::from("data/lifts.json"));
        assert_eq!(config.notifications.subscriber_capacity, None);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
http:
  host: "127.0.0.1"
  port: 8080

data:
  lifts_path: "fixtures/lifts.json"
  trails_path: "fixtures/trails.json"

notifications:
  subscriber_capacity: 64

logging:
  level: "debug"
  format: "json"
"#;
        let config = SnowtoothConfig::parse(yaml).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.data.trails_path, PathBuf::from("fixtures/trails.json"));
        assert_eq!(config.notifications.subscriber_capacity, Some(64));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn parse_partial_yaml_uses_defaults() {
        let config = SnowtoothConfig::parse("http:\n  port: 5000\n").unwrap();
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn overrides_replace_yaml_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SNOWTOOTH_PORT", "9000"),
            ("SNOWTOOTH_LIFTS_PATH", "/srv/lifts.json"),
        ]);
        let mut config = SnowtoothConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| (*v).to_owned()))
            .unwrap();
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.data.lifts_path, PathBuf::from("/srv/lifts.json"));
        assert_eq!(config.data.trails_path, PathBuf::from("data/trails.json"));
    }

    #[test]
    fn malformed_port_override_is_an_error() {
        let mut config = SnowtoothConfig::default();
        let result = config.apply_overrides(|name| {
            (name == "SNOWTOOTH_PORT").then(|| String::from("ninety"))
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { name: "SNOWTOOTH_PORT", .. })
        ));
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        assert!(matches!(
            SnowtoothConfig::parse("http: [unterminated"),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
