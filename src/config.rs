//! DDL generation settings.
//!
//! [`DdlConfig::load`] reads the `ddl` section of `config/harbor.toml`, falling
//! back to `HARBOR__DDL__*` environment variables:
//!
//! ```toml
//! [ddl]
//! dialect = "Postgre11"
//! ```

use crate::dialect::Dialect;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Default MySQL storage engine
pub const DEFAULT_ENGINE: &str = "InnoDB";
/// Default MySQL character set
pub const DEFAULT_CHARSET: &str = "utf8mb4";

const CONFIG_FILE: &str = "config/harbor.toml";
const ENV_PREFIX: &str = "HARBOR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DdlConfig {
    #[serde(default = "default_dialect")]
    pub dialect: Dialect,
    /// MySQL `ENGINE` table option
    #[serde(default = "default_engine")]
    pub engine: String,
    /// MySQL `CHARACTER SET` for tables declaring none
    #[serde(default = "default_charset")]
    pub charset: String,
}

fn default_dialect() -> Dialect {
    Dialect::MySQL80
}

fn default_engine() -> String {
    DEFAULT_ENGINE.to_string()
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

impl Default for DdlConfig {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            engine: default_engine(),
            charset: default_charset(),
        }
    }
}

impl DdlConfig {
    /// Load from `config/harbor.toml`, falling back to env vars
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load from the TOML file at `path` (optional) overlaid with env vars
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                if std::path::Path::new(path).exists() {
                    log::warn!(
                        "Failed to load config file {}, falling back to env: {}",
                        path,
                        err
                    );
                }
                Config::builder()
                    .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {}, then env-only error: {}",
                            err, env_err
                        ))
                    })?
            }
        };
        Self::from_settings(&settings)
    }

    /// Parse the `ddl` section of TOML text
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Config) -> Result<Self, ConfigError> {
        match settings.get::<DdlConfig>("ddl") {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) => {
                log::debug!("No ddl configuration section, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Message(format!(
                "DDL configuration could not be loaded: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DdlConfig::default();
        assert_eq!(config.dialect, Dialect::MySQL80);
        assert_eq!(config.engine, "InnoDB");
        assert_eq!(config.charset, "utf8mb4");
    }

    #[test]
    fn test_from_toml_partial_section() {
        let config = DdlConfig::from_toml_str("[ddl]\ndialect = \"postgre11\"\n").unwrap();
        assert_eq!(config.dialect, Dialect::Postgre11);
        assert_eq!(config.engine, DEFAULT_ENGINE);
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let config = DdlConfig::from_toml_str("[other]\nkey = 1\n").unwrap();
        assert_eq!(config, DdlConfig::default());
    }

    #[test]
    fn test_unknown_dialect_rejected() {
        let err = DdlConfig::from_toml_str("[ddl]\ndialect = \"sqlite3\"\n").unwrap_err();
        assert!(err.to_string().contains("DDL configuration"));
    }
}
