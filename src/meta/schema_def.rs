//! Declarative schema definitions.
//!
//! A schema file describes tables and fields as plain data; [`SchemaDef::into_registry`]
//! turns it into validated [`TableMeta`] values. The format is serde-based so the
//! same model loads from JSON here and from TOML in `harbor-migrate`.
//!
//! ```json
//! { "tables": [ {
//!     "entity": "Account", "name": "account", "versioned": true,
//!     "fields": [
//!         { "property": "id", "host_type": "i64", "auto_increment": true },
//!         { "property": "create_time", "host_type": "local_date_time" },
//!         { "property": "update_time", "host_type": "local_date_time" },
//!         { "property": "version", "host_type": "i32" },
//!         { "property": "balance", "host_type": "decimal", "precision": 14, "scale": 2, "default": "0.00" }
//!     ]
//! } ] }
//! ```

use super::field::{FieldBuilder, FieldMeta, UpdateMode};
use super::host_type::HostType;
use super::registry::SchemaRegistry;
use super::sql_type::SqlType;
use super::table::TableMeta;
use crate::dialect::Database;
use crate::error::MetaError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Root of a schema file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDef {
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableDef {
    pub entity: String,
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub charset: Option<String>,
    #[serde(default)]
    pub immutable: bool,
    #[serde(default)]
    pub versioned: bool,
    #[serde(default)]
    pub soft_delete: bool,
    /// Discriminator property; makes the table a parent
    #[serde(default)]
    pub discriminator: Option<String>,
    /// Parent entity; makes the table a child
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub discriminator_value: Option<i32>,
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub indexes: Vec<IndexDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDef {
    pub property: String,
    #[serde(default)]
    pub column: Option<String>,
    pub host_type: HostType,
    /// Explicit type text per database: `mysql`, `postgre` or `oracle`
    #[serde(default)]
    pub sql_type: BTreeMap<String, String>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default = "default_true")]
    pub insertable: bool,
    #[serde(default)]
    pub update_mode: UpdateMode,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub comment: String,
    #[serde(default, rename = "default")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub auto_increment: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unique: bool,
    pub properties: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl SchemaDef {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build and validate every table, then the registry
    pub fn into_registry(self) -> Result<SchemaRegistry, MetaError> {
        let tables = self
            .tables
            .into_iter()
            .map(TableDef::into_table_meta)
            .collect::<Result<Vec<_>, _>>()?;
        SchemaRegistry::new(tables)
    }
}

impl TableDef {
    pub fn into_table_meta(self) -> Result<TableMeta, MetaError> {
        let mut builder = TableMeta::builder(&self.entity, &self.name)
            .comment(self.comment)
            .immutable(self.immutable)
            .versioned(self.versioned)
            .soft_delete(self.soft_delete);
        if let Some(charset) = self.charset {
            builder = builder.charset(charset);
        }
        match (self.discriminator, self.parent, self.discriminator_value) {
            (Some(_), Some(_), _) => {
                return Err(MetaError::table(
                    &self.entity,
                    "a table cannot declare both a discriminator and a parent",
                ))
            }
            (Some(discriminator), None, _) => builder = builder.parent(discriminator),
            (None, Some(parent), Some(value)) => builder = builder.child_of(parent, value),
            (None, Some(_), None) => {
                return Err(MetaError::table(
                    &self.entity,
                    "child table needs a discriminator_value",
                ))
            }
            (None, None, _) => {}
        }
        for field in self.fields {
            builder = builder.field(field.into_builder(&self.entity)?);
        }
        for index in &self.indexes {
            let properties: Vec<&str> = index.properties.iter().map(String::as_str).collect();
            builder = if index.unique {
                builder.unique(&index.name, &properties)
            } else {
                builder.index(&index.name, &properties)
            };
        }
        builder.build()
    }
}

impl FieldDef {
    fn into_builder(self, entity: &str) -> Result<FieldBuilder, MetaError> {
        let mut builder = FieldMeta::builder(&self.property, self.host_type)
            .nullable(self.nullable)
            .insertable(self.insertable)
            .update_mode(self.update_mode)
            .comment(self.comment)
            .auto_increment(self.auto_increment);
        if let Some(column) = self.column {
            builder = builder.column(column);
        }
        if let Some(precision) = self.precision {
            builder = builder.precision(precision);
        }
        if let Some(scale) = self.scale {
            builder = builder.scale(scale);
        }
        if let Some(default_value) = self.default_value {
            builder = builder.default_value(default_value);
        }
        for (database, text) in &self.sql_type {
            let database = parse_database(database).ok_or_else(|| {
                MetaError::definition(
                    entity,
                    &self.property,
                    format!("unknown database '{database}' in sql_type"),
                )
            })?;
            let sql_type = SqlType::parse(database, text).ok_or_else(|| {
                MetaError::definition(
                    entity,
                    &self.property,
                    format!("unknown {database} SQL type '{text}'"),
                )
            })?;
            builder = builder.sql_type(sql_type);
        }
        Ok(builder)
    }
}

fn parse_database(name: &str) -> Option<Database> {
    match name.to_lowercase().as_str() {
        "mysql" => Some(Database::MySQL),
        "postgre" | "postgres" | "postgresql" => Some(Database::Postgre),
        "oracle" => Some(Database::Oracle),
        _ => None,
    }
}
