//! Migration-specific error types

use crate::error::MetaError;

/// Errors raised while extracting live schema information or comparing it
/// with table metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// Metadata or definition error surfaced during comparison
    Meta(MetaError),
    /// Live schema information could not be read or is malformed
    SchemaInfo {
        table: String,
        column: Option<String>,
        message: String,
    },
    /// Live column type does not resolve to a known SQL type
    UnsupportedSqlType {
        table: String,
        column: String,
        type_name: String,
    },
    /// Snapshot file I/O failure
    Io(String),
}

impl std::fmt::Display for MigrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MigrationError::Meta(e) => write!(f, "Metadata error: {}", e),
            MigrationError::SchemaInfo {
                table,
                column: Some(column),
                message,
            } => write!(f, "Schema info error at {}.{}: {}", table, column, message),
            MigrationError::SchemaInfo {
                table,
                column: None,
                message,
            } if table.is_empty() => write!(f, "Schema info error: {}", message),
            MigrationError::SchemaInfo {
                table,
                column: None,
                message,
            } => write!(f, "Schema info error at table {}: {}", table, message),
            MigrationError::UnsupportedSqlType {
                table,
                column,
                type_name,
            } => write!(
                f,
                "Column {}.{} has type '{}' which is not a known SQL type of this dialect",
                table, column, type_name
            ),
            MigrationError::Io(msg) => write!(f, "Schema snapshot I/O error: {}", msg),
        }
    }
}

impl std::error::Error for MigrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MigrationError::Meta(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MetaError> for MigrationError {
    fn from(error: MetaError) -> Self {
        MigrationError::Meta(error)
    }
}

impl From<std::io::Error> for MigrationError {
    fn from(error: std::io::Error) -> Self {
        MigrationError::Io(error.to_string())
    }
}
