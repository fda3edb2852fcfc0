//! Oracle DDL rendering.
//!
//! Column alterations are not implemented for Oracle; the trait defaults
//! report them as unsupported.

use super::{comment_on_statements, ColumnLayout, DialectDdl};
use crate::dialect::Dialect;
use crate::meta::TableMeta;

#[derive(Debug, Clone, Copy)]
pub struct OracleDdl {
    dialect: Dialect,
}

impl OracleDdl {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }
}

impl DialectDdl for OracleDdl {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn column_layout(&self) -> ColumnLayout {
        ColumnLayout::DefaultFirst
    }

    fn identity_clause(&self) -> &'static str {
        "GENERATED BY DEFAULT AS IDENTITY"
    }

    fn key_definition(&self, table: &TableMeta) -> Vec<String> {
        vec![format!(
            "CONSTRAINT pk_{} PRIMARY KEY({})",
            table.name(),
            table.primary_key().column()
        )]
    }

    fn table_options(&self, _table: &TableMeta) -> String {
        String::new()
    }

    fn comment_statements(&self, table: &TableMeta) -> Vec<String> {
        comment_on_statements(table)
    }
}
