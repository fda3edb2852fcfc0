//! # Harbor
//!
//! Dialect-aware DDL generation for MySQL, PostgreSQL and Oracle.
//!
//! Table metadata ([`meta::TableMeta`]) is validated once and then rendered to
//! CREATE TABLE and ALTER statements by a per-dialect [`ddl::DialectDdl`]
//! strategy. The [`migration`] module compares the same metadata with a live
//! schema snapshot and plans the DDL that closes the gap.

pub mod config;
pub mod ddl;
pub mod default_value;
pub mod dialect;
pub mod error;
pub mod meta;
pub mod migration;
#[cfg(feature = "tracing")]
pub mod tracing_helpers;

pub use config::DdlConfig;
pub use ddl::DialectDdl;
pub use dialect::{Database, Dialect};
pub use error::MetaError;
pub use meta::{FieldMeta, SchemaRegistry, TableMeta};
pub use migration::{MigrationDiffer, MigrationError};
