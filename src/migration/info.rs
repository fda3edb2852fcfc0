//! Live schema information.
//!
//! Mirrors what a database reports about its tables. Values are rebuilt on
//! every migration run. Tables, columns and indexes are keyed by lower-cased
//! name so lookups ignore the case the database reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One live column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Owning table; empty in a snapshot means the enclosing table
    #[serde(default)]
    pub table: String,
    pub name: String,
    /// Type text as reported, e.g. `decimal(14,2)` or `character varying`
    pub type_name: String,
    #[serde(default)]
    pub nullable: bool,
    /// Stored default text
    #[serde(default)]
    pub default_value: Option<String>,
    /// Length, precision or fractional-seconds digits, depending on the type
    #[serde(default)]
    pub column_size: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ColumnInfo {
    pub fn new(table: impl Into<String>, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            type_name: type_name.into(),
            nullable: false,
            default_value: None,
            column_size: None,
            scale: None,
            comment: None,
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn column_size(mut self, column_size: u32) -> Self {
        self.column_size = Some(column_size);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// One live index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    /// Owning table; empty in a snapshot means the enclosing table
    #[serde(default)]
    pub table: String,
    pub name: String,
    #[serde(default)]
    pub unique: bool,
    /// Column names in index order
    pub columns: Vec<String>,
}

impl IndexInfo {
    /// Whether the index covers exactly `columns` in order, ignoring case
    pub fn covers(&self, columns: &[&str]) -> bool {
        self.columns.len() == columns.len()
            && self
                .columns
                .iter()
                .zip(columns)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

/// One live table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableInfo {
    name: String,
    columns: BTreeMap<String, ColumnInfo>,
    indexes: BTreeMap<String, IndexInfo>,
}

impl TableInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add or replace a column
    pub fn insert_column(&mut self, column: ColumnInfo) {
        self.columns.insert(column.name.to_lowercase(), column);
    }

    /// Add or replace an index
    pub fn insert_index(&mut self, index: IndexInfo) {
        self.indexes.insert(index.name.to_lowercase(), index);
    }

    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.get(&name.to_lowercase())
    }

    pub fn index(&self, name: &str) -> Option<&IndexInfo> {
        self.indexes.get(&name.to_lowercase())
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.values()
    }

    pub fn indexes(&self) -> impl Iterator<Item = &IndexInfo> {
        self.indexes.values()
    }
}

/// Live schema of one database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaInfo {
    catalog: Option<String>,
    schema: Option<String>,
    tables: BTreeMap<String, TableInfo>,
}

impl SchemaInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema located by catalog and schema name, as the database reports them
    pub fn located(catalog: Option<String>, schema: Option<String>) -> Self {
        Self {
            catalog,
            schema,
            tables: BTreeMap::new(),
        }
    }

    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Add or replace a table
    pub fn insert_table(&mut self, table: TableInfo) {
        self.tables.insert(table.name.to_lowercase(), table);
    }

    pub fn table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.get(&name.to_lowercase())
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableInfo> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
