//! Schema file loading
//!
//! A schema file is TOML (`.toml`) or JSON (`.json`) describing tables in the
//! [`SchemaDef`] model:
//!
//! ```toml
//! [[tables]]
//! entity = "Account"
//! name = "account"
//! versioned = true
//!
//! [[tables.fields]]
//! property = "id"
//! host_type = "i64"
//! auto_increment = true
//! ```

use harbor::meta::SchemaDef;
use harbor::{MetaError, SchemaRegistry};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaFileError {
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML schema {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid JSON schema {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid schema definition: {0}")]
    Meta(#[from] MetaError),
}

/// Parse a schema file, choosing the format by extension (TOML unless `.json`)
pub fn load_schema(path: &Path) -> Result<SchemaDef, SchemaFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| SchemaFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        SchemaDef::from_json_str(&text).map_err(|source| SchemaFileError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(&text).map_err(|source| SchemaFileError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Parse and validate a schema file into a registry
pub fn load_registry(path: &Path) -> Result<SchemaRegistry, SchemaFileError> {
    let schema = load_schema(path)?;
    log::debug!("Loaded {} table definitions from {}", schema.tables.len(), path.display());
    Ok(schema.into_registry()?)
}
