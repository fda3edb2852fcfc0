//! Column comparison between table metadata and a live database.
//!
//! Each check takes one declared [`FieldMeta`] and the [`ColumnInfo`] the
//! database reports for it and answers whether the column needs altering.
//! Nothing here touches a database.

use super::error::MigrationError;
use super::info::ColumnInfo;
use crate::dialect::{Database, Dialect};
use crate::meta::mapping::{check_precision, data_type, effective_precision};
use crate::meta::{DataKind, FieldMeta, SqlDataType, SqlType, TypeArgs};

/// Compares declared columns with live ones for one dialect
#[derive(Debug, Clone, Copy)]
pub struct MigrationDiffer {
    dialect: Dialect,
}

impl MigrationDiffer {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Resolve the live column's type text to a SQL type of this dialect's database
    pub fn live_type(&self, column: &ColumnInfo) -> Result<SqlType, MigrationError> {
        SqlType::parse(self.dialect.database(), &column.type_name).ok_or_else(|| {
            MigrationError::UnsupportedSqlType {
                table: column.table.clone(),
                column: column.name.clone(),
                type_name: column.type_name.clone(),
            }
        })
    }

    /// Whether the declared precision or scale differs from the live column.
    ///
    /// Argument-less types never differ. Unset declared components, after the
    /// type's defaults are applied, match anything. Time types compare
    /// fractional-second digits with the live scale.
    pub fn precision_or_scale_alter(
        &self,
        field: &FieldMeta,
        column: &ColumnInfo,
    ) -> Result<bool, MigrationError> {
        let live = self.live_type(column)?;
        check_precision(field, &live)?;
        let declared = effective_precision(field, &live);

        let alter = match (live.args(), live.data_kind()) {
            (TypeArgs::Bare, _) => false,
            (TypeArgs::Length, DataKind::DateTime(_)) => {
                let declared_fsp = declared
                    .precision
                    .unwrap_or_else(|| default_fsp(self.dialect.database()));
                declared_fsp != column.scale.unwrap_or(0)
            }
            (TypeArgs::Length, _) => differs(declared.precision, column.column_size),
            (TypeArgs::PrecisionScale, _) => {
                differs(declared.precision, column.column_size)
                    || differs(declared.scale, column.scale)
            }
        };
        if alter {
            log::debug!(
                "Column {}.{} precision/scale differs: declared {:?}, live {:?}/{:?}",
                field.table_name(),
                field.column(),
                declared,
                column.column_size,
                column.scale
            );
        }
        Ok(alter)
    }

    /// Whether the declared default text differs from the live default text.
    ///
    /// The comparison is textual: `0.00` and `0.0` differ even though they are
    /// the same number. Primary keys never report a default alteration.
    pub fn default_value_alter(&self, field: &FieldMeta, column: &ColumnInfo) -> bool {
        !field.is_primary_key() && field.default_value() != column.default_value.as_deref()
    }

    /// Whether the live type differs from the declared type's storage
    pub fn type_alter(&self, field: &FieldMeta, column: &ColumnInfo) -> Result<bool, MigrationError> {
        let declared = data_type(field, self.dialect)?;
        let live = self.live_type(column)?;
        Ok(!declared.same_storage(&live))
    }

    pub fn nullable_alter(&self, field: &FieldMeta, column: &ColumnInfo) -> bool {
        field.nullable() != column.nullable
    }
}

/// Fractional-second digits a time column gets when none are declared
fn default_fsp(database: Database) -> u32 {
    match database {
        Database::MySQL => 0,
        Database::Postgre | Database::Oracle => 6,
    }
}

fn differs(declared: Option<u32>, live: Option<u32>) -> bool {
    matches!((declared, live), (Some(d), Some(l)) if d != l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetaError;
    use crate::meta::{HostType, TableMeta};

    fn table() -> TableMeta {
        TableMeta::builder("Product", "product")
            .field(FieldMeta::id(HostType::I64))
            .field(FieldMeta::create_time().precision(3))
            .field(FieldMeta::update_time())
            .field(FieldMeta::builder("name", HostType::String).precision(64))
            .field(FieldMeta::builder("price", HostType::Decimal).precision(12))
            .field(FieldMeta::builder("enabled", HostType::Bool))
            .field(FieldMeta::builder("memo", HostType::String).scale(1).nullable(true))
            .build()
            .unwrap()
    }

    fn column(name: &str, type_name: &str) -> ColumnInfo {
        ColumnInfo::new("product", name, type_name)
    }

    #[test]
    fn test_length_types() {
        let table = table();
        let differ = MigrationDiffer::new(Dialect::MySQL80);
        let name = table.field("name").unwrap();
        assert!(!differ
            .precision_or_scale_alter(name, &column("name", "varchar").column_size(64))
            .unwrap());
        assert!(differ
            .precision_or_scale_alter(name, &column("name", "varchar").column_size(32))
            .unwrap());
        assert!(!differ
            .precision_or_scale_alter(name, &column("name", "text"))
            .unwrap());
    }

    #[test]
    fn test_decimal_uses_default_scale() {
        let table = table();
        let differ = MigrationDiffer::new(Dialect::MySQL57);
        let price = table.field("price").unwrap();
        let live = column("price", "decimal(12,2)").column_size(12).scale(2);
        assert!(!differ.precision_or_scale_alter(price, &live).unwrap());
        let live = column("price", "decimal").column_size(12).scale(4);
        assert!(differ.precision_or_scale_alter(price, &live).unwrap());
    }

    #[test]
    fn test_time_precision_per_dialect() {
        let table = table();
        let create_time = table.field("create_time").unwrap();
        let update_time = table.field("update_time").unwrap();

        let mysql = MigrationDiffer::new(Dialect::MySQL80);
        assert!(!mysql
            .precision_or_scale_alter(create_time, &column("create_time", "datetime").scale(3))
            .unwrap());
        assert!(!mysql
            .precision_or_scale_alter(update_time, &column("update_time", "datetime"))
            .unwrap());
        assert!(mysql
            .precision_or_scale_alter(update_time, &column("update_time", "datetime").scale(6))
            .unwrap());

        let postgre = MigrationDiffer::new(Dialect::Postgre11);
        let live = column("update_time", "timestamp without time zone").scale(6);
        assert!(!postgre.precision_or_scale_alter(update_time, &live).unwrap());
    }

    #[test]
    fn test_unknown_live_type() {
        let table = table();
        let differ = MigrationDiffer::new(Dialect::MySQL80);
        let err = differ
            .precision_or_scale_alter(table.field("name").unwrap(), &column("name", "geometry"))
            .unwrap_err();
        assert_eq!(
            err,
            MigrationError::UnsupportedSqlType {
                table: "product".to_string(),
                column: "name".to_string(),
                type_name: "geometry".to_string(),
            }
        );
    }

    #[test]
    fn test_rule_violation_is_meta_error() {
        let table = table();
        let differ = MigrationDiffer::new(Dialect::MySQL80);
        let err = differ
            .precision_or_scale_alter(table.field("memo").unwrap(), &column("memo", "varchar"))
            .unwrap_err();
        assert!(matches!(
            err,
            MigrationError::Meta(MetaError::Definition { ref entity, ref property, .. })
                if entity == "Product" && property == "memo"
        ));
    }

    #[test]
    fn test_type_and_nullable_alter() {
        let table = table();
        let differ = MigrationDiffer::new(Dialect::MySQL80);
        let enabled = table.field("enabled").unwrap();
        assert!(!differ.type_alter(enabled, &column("enabled", "tinyint(1)")).unwrap());
        assert!(differ.type_alter(enabled, &column("enabled", "int")).unwrap());
        assert!(!differ.nullable_alter(enabled, &column("enabled", "tinyint")));
        assert!(differ.nullable_alter(enabled, &column("enabled", "tinyint").nullable(true)));
    }
}
