//! Engine settings loaded from `club-config.yaml`.
//!
//! Club parameters (tables, hours, price) always come from the input log
//! header. This file only controls how the engine logs and prints:
//!
//! ```yaml
//! logging:
//!   level: warn      # trace, debug, info, warn, error, or an EnvFilter directive
//!   format: text     # text or json
//! output:
//!   format: text     # text or json
//! ```
//!
//! Precedence, lowest first: built-in defaults, the YAML file,
//! environment variables, command-line flags.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading engine settings.
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

    /// An environment override holds an unknown value.
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv {
        /// The environment variable.
        var: &'static str,
        /// Its value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Report rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The plain line-oriented report.
    #[default]
    Text,
    /// The report as pretty-printed JSON.
    Json,
}

/// Log line rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level engine settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Report output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl EngineConfig {
    /// Load settings from a YAML file, then apply environment overrides.
    ///
    /// Environment variables override YAML values:
    /// - `CLUB_LOG_LEVEL` overrides `logging.level`
    /// - `CLUB_LOG_FORMAT` overrides `logging.format`
    /// - `CLUB_OUTPUT_FORMAT` overrides `output.format`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] for an unknown override value.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse settings from a YAML string. An empty document yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `CLUB_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for an unknown format value.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("CLUB_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("CLUB_LOG_FORMAT") {
            self.logging.format = match val.as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: "CLUB_LOG_FORMAT",
                        value: val,
                    });
                }
            };
        }
        if let Some(val) = lookup("CLUB_OUTPUT_FORMAT") {
            self.output.format = match val.as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: "CLUB_OUTPUT_FORMAT",
                        value: val,
                    });
                }
            };
        }
        Ok(())
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log line format.
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

fn default_log_level() -> String {
    "warn".to_owned()
}

/// Report output settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(EngineConfig::parse("").unwrap(), EngineConfig::default());
        assert_eq!(EngineConfig::parse("\n  \n").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = EngineConfig::parse("output:\n  format: json\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn full_yaml() {
        let yaml = "logging:\n  level: debug\n  format: json\noutput:\n  format: text\n";
        let config = EngineConfig::parse(yaml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn unknown_format_is_a_yaml_error() {
        let err = EngineConfig::parse("output:\n  format: xml\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn overrides_win_over_yaml() {
        let mut config = EngineConfig::parse("logging:\n  level: info\n").unwrap();
        let env: HashMap<&str, &str> = [
            ("CLUB_LOG_LEVEL", "club_core=trace"),
            ("CLUB_OUTPUT_FORMAT", "json"),
        ]
        .into_iter()
        .collect();
        config
            .apply_overrides(|var| env.get(var).map(|v| (*v).to_owned()))
            .unwrap();
        assert_eq!(config.logging.level, "club_core=trace");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn bad_override_is_rejected() {
        let mut config = EngineConfig::default();
        let err = config
            .apply_overrides(|var| (var == "CLUB_LOG_FORMAT").then(|| "yaml".to_owned()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                var: "CLUB_LOG_FORMAT",
                ..
            }
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output:\n  format: json").unwrap();
        let config = EngineConfig::parse(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::from_file(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
