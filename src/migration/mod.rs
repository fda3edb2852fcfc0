//! Schema migration support.
//!
//! Compares table metadata with the schema a live database reports and turns
//! the differences into DDL. Live schema information comes from a
//! [`SchemaExtractor`]; this module never opens a connection.
//!
//! ```rust
//! use harbor::dialect::Dialect;
//! use harbor::migration::{ColumnInfo, MigrationDiffer};
//! use harbor::meta::{FieldMeta, HostType, TableMeta};
//!
//! let table = TableMeta::builder("Account", "account")
//!     .field(FieldMeta::id(HostType::I64))
//!     .field(FieldMeta::create_time())
//!     .field(FieldMeta::update_time())
//!     .field(FieldMeta::builder("balance", HostType::Decimal).precision(14).scale(2))
//!     .build()
//!     .unwrap();
//! let live = ColumnInfo::new("account", "balance", "decimal").column_size(14).scale(2);
//! let differ = MigrationDiffer::new(Dialect::MySQL80);
//! assert!(!differ.precision_or_scale_alter(table.field("balance").unwrap(), &live).unwrap());
//! ```

pub mod differ;
pub mod error;
pub mod extractor;
pub mod info;
pub mod plan;

pub use differ::MigrationDiffer;
pub use error::MigrationError;
pub use extractor::{SchemaExtractor, SnapshotExtractor};
pub use info::{ColumnInfo, IndexInfo, SchemaInfo, TableInfo};
pub use plan::{compare, AlterReason, ColumnAlter, MigrationPlan};
