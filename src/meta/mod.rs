//! Schema metadata model and SQL type registry
//!
//! This module provides:
//! - [`DataKind`] classification and per-database SQL type descriptors
//! - [`TableMeta`] / [`FieldMeta`], the immutable table and column model
//! - [`SchemaRegistry`], the read-only table arena shared by DDL and migration code
//! - [`SchemaDef`], the declarative schema file model

pub mod data_kind;
pub mod field;
pub mod host_type;
pub mod mapping;
pub mod mysql_type;
pub mod oracle_type;
pub mod postgre_type;
pub mod registry;
pub mod schema_def;
pub mod sql_type;
pub mod table;

pub use data_kind::{DataFamily, DataKind, NumberKind, TimeKind};
pub use field::{FieldBuilder, FieldMeta, UpdateMode, RESERVED_PROPS};
pub use host_type::HostType;
pub use mapping::data_type;
pub use mysql_type::MySqlType;
pub use oracle_type::OracleType;
pub use postgre_type::PostgreType;
pub use registry::SchemaRegistry;
pub use schema_def::SchemaDef;
pub use sql_type::{Precision, SqlDataType, SqlType, TypeArgs};
pub use table::{IndexMeta, Inheritance, TableBuilder, TableMeta};
