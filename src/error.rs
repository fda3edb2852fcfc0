//! Metadata and DDL generation errors

use crate::dialect::Dialect;
use std::fmt;

/// Errors raised while validating schema metadata or rendering it for a dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    /// A field definition is malformed or cannot be rendered
    Definition {
        entity: String,
        property: String,
        message: String,
    },
    /// A table definition is malformed
    Table { entity: String, message: String },
    /// A type, function or default is not available on the dialect
    UnsupportedDialect { dialect: Dialect, what: String },
    /// The dialect's DDL builder does not provide the operation
    UnsupportedOperation {
        operation: &'static str,
        dialect: Dialect,
    },
}

impl MetaError {
    pub(crate) fn definition(
        entity: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        MetaError::Definition {
            entity: entity.into(),
            property: property.into(),
            message: message.into(),
        }
    }

    pub(crate) fn table(entity: impl Into<String>, message: impl Into<String>) -> Self {
        MetaError::Table {
            entity: entity.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for MetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaError::Definition {
                entity,
                property,
                message,
            } => write!(f, "Field {entity}.{property}: {message}"),
            MetaError::Table { entity, message } => write!(f, "Table {entity}: {message}"),
            MetaError::UnsupportedDialect { dialect, what } => {
                write!(f, "{what} is not supported by dialect {dialect}")
            }
            MetaError::UnsupportedOperation { operation, dialect } => {
                write!(f, "{operation} is not supported for dialect {dialect}")
            }
        }
    }
}

impl std::error::Error for MetaError {}
