//! Span constructors for the optional `tracing` feature.
//!
//! Callers enter the returned span for the duration of the operation:
//!
//! ```rust,ignore
//! #[cfg(feature = "tracing")]
//! let _span = tracing_helpers::table_definition_span(table.name(), dialect).entered();
//! ```

use crate::dialect::Dialect;
use tracing::Span;

/// Span around rendering one CREATE TABLE statement
pub fn table_definition_span(table: &str, dialect: Dialect) -> Span {
    tracing::debug_span!("harbor.ddl.table_definition", table = table, dialect = %dialect)
}

/// Span around comparing a registry with a live schema
pub fn compare_span(dialect: Dialect, tables: usize) -> Span {
    tracing::info_span!("harbor.migration.compare", dialect = %dialect, tables = tables)
}
