//! Migration planning.
//!
//! [`compare`] walks the registry in order and classifies every table, column
//! and index against the live schema. The resulting [`MigrationPlan`] renders
//! to DDL through any [`DialectDdl`] strategy. Live columns and indexes with no
//! declared counterpart are left alone.

use super::differ::MigrationDiffer;
use super::error::MigrationError;
use super::info::{ColumnInfo, SchemaInfo, TableInfo};
use crate::ddl::{create_table, DialectDdl};
use crate::dialect::Dialect;
use crate::error::MetaError;
use crate::meta::{FieldMeta, IndexMeta, SchemaRegistry, TableMeta};
#[cfg(feature = "tracing")]
use crate::tracing_helpers;
use std::fmt;

/// Why a column needs altering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlterReason {
    Type,
    PrecisionOrScale,
    Default,
    Nullable,
}

impl fmt::Display for AlterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlterReason::Type => "type",
            AlterReason::PrecisionOrScale => "precision/scale",
            AlterReason::Default => "default",
            AlterReason::Nullable => "nullable",
        };
        f.write_str(name)
    }
}

/// An existing column that differs from its declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAlter<'a> {
    pub field: &'a FieldMeta,
    pub reasons: Vec<AlterReason>,
}

/// Changes needed to bring a live schema in line with a registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationPlan<'a> {
    new_tables: Vec<&'a TableMeta>,
    new_columns: Vec<&'a FieldMeta>,
    altered_columns: Vec<ColumnAlter<'a>>,
    new_indexes: Vec<(&'a TableMeta, &'a IndexMeta)>,
}

impl<'a> MigrationPlan<'a> {
    /// Tables missing from the live schema
    pub fn new_tables(&self) -> &[&'a TableMeta] {
        &self.new_tables
    }

    /// Columns missing from existing live tables
    pub fn new_columns(&self) -> &[&'a FieldMeta] {
        &self.new_columns
    }

    pub fn altered_columns(&self) -> &[ColumnAlter<'a>] {
        &self.altered_columns
    }

    /// Declared indexes of existing tables with no live counterpart
    pub fn new_indexes(&self) -> &[(&'a TableMeta, &'a IndexMeta)] {
        &self.new_indexes
    }

    pub fn is_empty(&self) -> bool {
        self.new_tables.is_empty()
            && self.new_columns.is_empty()
            && self.altered_columns.is_empty()
            && self.new_indexes.is_empty()
    }

    /// Render the plan as DDL statements, tables first
    pub fn to_ddl(&self, ddl: &dyn DialectDdl) -> Result<Vec<String>, MetaError> {
        let mut statements = Vec::new();
        for table in &self.new_tables {
            statements.extend(create_table(ddl, table)?);
        }
        for field in &self.new_columns {
            statements.push(ddl.add_column(field)?);
        }
        for alter in &self.altered_columns {
            statements.push(ddl.modify_column(alter.field)?);
        }
        for (table, index) in &self.new_indexes {
            statements.push(ddl.create_index(table, index));
        }
        Ok(statements)
    }
}

impl fmt::Display for MigrationPlan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} new tables, {} new columns, {} altered columns, {} new indexes",
            self.new_tables.len(),
            self.new_columns.len(),
            self.altered_columns.len(),
            self.new_indexes.len()
        )
    }
}

/// Compare every registered table with the live schema
pub fn compare<'a>(
    registry: &'a SchemaRegistry,
    schema: &SchemaInfo,
    dialect: Dialect,
) -> Result<MigrationPlan<'a>, MigrationError> {
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::compare_span(dialect, registry.len()).entered();

    let differ = MigrationDiffer::new(dialect);
    let mut plan = MigrationPlan::default();
    for table in registry.iter() {
        let Some(live) = schema.table(table.name()) else {
            plan.new_tables.push(table);
            continue;
        };
        for field in table.fields() {
            match live.column(field.column()) {
                None => plan.new_columns.push(field),
                Some(column) => {
                    let reasons = alter_reasons(&differ, field, column)?;
                    if !reasons.is_empty() {
                        plan.altered_columns.push(ColumnAlter { field, reasons });
                    }
                }
            }
        }
        for index in table.indexes() {
            if !index_exists(table, index, live) {
                plan.new_indexes.push((table, index));
            }
        }
    }
    log::info!("Migration plan for {}: {}", dialect, plan);
    Ok(plan)
}

fn alter_reasons(
    differ: &MigrationDiffer,
    field: &FieldMeta,
    column: &ColumnInfo,
) -> Result<Vec<AlterReason>, MigrationError> {
    let mut reasons = Vec::new();
    if differ.type_alter(field, column)? {
        reasons.push(AlterReason::Type);
    } else if differ.precision_or_scale_alter(field, column)? {
        reasons.push(AlterReason::PrecisionOrScale);
    }
    // reserved fields carry generated defaults the live text never matches
    if !field.is_reserved() && differ.default_value_alter(field, column) {
        reasons.push(AlterReason::Default);
    }
    if differ.nullable_alter(field, column) {
        reasons.push(AlterReason::Nullable);
    }
    Ok(reasons)
}

fn index_exists(table: &TableMeta, index: &IndexMeta, live: &TableInfo) -> bool {
    if live.index(&index.name).is_some() {
        return true;
    }
    let columns = table.index_columns(index);
    live.indexes()
        .any(|i| i.unique == index.unique && i.covers(&columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::{MySqlDdl, OracleDdl};
    use crate::meta::{HostType, TableMeta};
    use crate::migration::info::IndexInfo;

    fn registry() -> SchemaRegistry {
        let customer = TableMeta::builder("Customer", "customer")
            .field(FieldMeta::id(HostType::I64).auto_increment(true))
            .field(FieldMeta::create_time())
            .field(FieldMeta::update_time())
            .field(FieldMeta::builder("name", HostType::String).precision(64))
            .field(FieldMeta::builder("level", HostType::I32).default_value("1"))
            .field(FieldMeta::builder("phone", HostType::String).precision(20).nullable(true))
            .index("", &["name"])
            .build()
            .unwrap();
        let coupon = TableMeta::builder("Coupon", "coupon")
            .immutable(true)
            .field(FieldMeta::id(HostType::I64))
            .field(FieldMeta::create_time())
            .build()
            .unwrap();
        SchemaRegistry::new(vec![customer, coupon]).unwrap()
    }

    fn live_schema() -> SchemaInfo {
        let mut customer = TableInfo::new("customer");
        customer.insert_column(ColumnInfo::new("customer", "id", "bigint"));
        customer.insert_column(
            ColumnInfo::new("customer", "create_time", "datetime").default_value("CURRENT_TIMESTAMP"),
        );
        customer.insert_column(ColumnInfo::new("customer", "update_time", "datetime"));
        customer.insert_column(ColumnInfo::new("customer", "name", "varchar").column_size(32));
        customer.insert_column(ColumnInfo::new("customer", "level", "int").default_value("1"));
        customer.insert_index(IndexInfo {
            table: "customer".to_string(),
            name: "idx_legacy".to_string(),
            unique: false,
            columns: vec!["name".to_string()],
        });
        let mut schema = SchemaInfo::new();
        schema.insert_table(customer);
        schema
    }

    #[test]
    fn test_compare_classifies_changes() {
        let registry = registry();
        let plan = compare(&registry, &live_schema(), Dialect::MySQL80).unwrap();
        assert_eq!(plan.new_tables().len(), 1);
        assert_eq!(plan.new_tables()[0].name(), "coupon");
        assert_eq!(plan.new_columns().len(), 1);
        assert_eq!(plan.new_columns()[0].property(), "phone");
        assert_eq!(plan.altered_columns().len(), 1);
        assert_eq!(plan.altered_columns()[0].field.property(), "name");
        assert_eq!(plan.altered_columns()[0].reasons, vec![AlterReason::PrecisionOrScale]);
        assert!(plan.new_indexes().is_empty());
        assert_eq!(
            plan.to_string(),
            "1 new tables, 1 new columns, 1 altered columns, 0 new indexes"
        );
    }

    #[test]
    fn test_to_ddl_for_mysql() {
        let registry = registry();
        let plan = compare(&registry, &live_schema(), Dialect::MySQL80).unwrap();
        let statements = plan.to_ddl(&MySqlDdl::new(Dialect::MySQL80)).unwrap();
        assert_eq!(statements.len(), 3);
        assert!(statements[0].starts_with("CREATE TABLE coupon("));
        assert_eq!(
            statements[1],
            "ALTER TABLE customer ADD COLUMN phone VARCHAR(20) NULL COMMENT ''"
        );
        assert_eq!(
            statements[2],
            "ALTER TABLE customer MODIFY COLUMN name VARCHAR(64) NOT NULL COMMENT ''"
        );
    }

    #[test]
    fn test_to_ddl_unsupported_on_oracle() {
        let registry = registry();
        let plan = compare(&registry, &live_schema(), Dialect::MySQL80).unwrap();
        let err = plan.to_ddl(&OracleDdl::new(Dialect::Oracle12)).unwrap_err();
        assert!(matches!(err, MetaError::UnsupportedOperation { operation: "ADD COLUMN", .. }));
    }

    #[test]
    fn test_missing_index_and_empty_plan() {
        let registry = registry();
        let mut schema = live_schema();
        let mut customer = schema.table("customer").unwrap().clone();
        customer.insert_column(ColumnInfo::new("customer", "phone", "varchar").column_size(20).nullable(true));
        customer.insert_column(ColumnInfo::new("customer", "name", "varchar").column_size(64));
        let mut with_columns = customer.clone();
        schema.insert_table(customer);
        let mut coupon = TableInfo::new("coupon");
        coupon.insert_column(ColumnInfo::new("coupon", "id", "bigint"));
        coupon.insert_column(ColumnInfo::new("coupon", "create_time", "datetime"));
        schema.insert_table(coupon.clone());

        let plan = compare(&registry, &schema, Dialect::MySQL80).unwrap();
        assert!(plan.is_empty());

        // index with other columns under another name
        with_columns.insert_index(IndexInfo {
            table: "customer".to_string(),
            name: "idx_legacy".to_string(),
            unique: false,
            columns: vec!["phone".to_string()],
        });
        let mut schema = SchemaInfo::new();
        schema.insert_table(with_columns);
        schema.insert_table(coupon);
        let plan = compare(&registry, &schema, Dialect::MySQL80).unwrap();
        assert_eq!(plan.new_indexes().len(), 1);
        let statements = plan.to_ddl(&MySqlDdl::new(Dialect::MySQL80)).unwrap();
        assert_eq!(statements, vec!["CREATE INDEX idx_customer_name ON customer(name)"]);
    }
}
