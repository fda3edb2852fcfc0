//! Resolution of a field's SQL data type for a dialect.
//!
//! Explicit per-database overrides win over the host type mapping. Zone-aware
//! host types are rejected up front on dialects that cannot store them.

use super::field::FieldMeta;
use super::host_type::HostType;
use super::mysql_type::MySqlType;
use super::oracle_type::OracleType;
use super::postgre_type::PostgreType;
use super::sql_type::{Precision, SqlDataType, SqlType, TypeArgs};
use crate::dialect::{Database, Dialect};
use crate::error::MetaError;

/// Fail when `field` holds zoned time values and `dialect` cannot store them
pub fn zone_guard(field: &FieldMeta, dialect: Dialect) -> Result<(), MetaError> {
    if field.host_type().is_zoned() && !dialect.support_zone_id() {
        return Err(MetaError::definition(
            field.entity(),
            field.property(),
            format!(
                "dialect {} does not support zoned time type {}",
                dialect,
                field.host_type()
            ),
        ));
    }
    Ok(())
}

/// SQL data type of `field` under `dialect`
pub fn data_type(field: &FieldMeta, dialect: Dialect) -> Result<SqlType, MetaError> {
    zone_guard(field, dialect)?;
    if !field.sql_types().is_empty() {
        return field
            .sql_types()
            .iter()
            .find(|t| t.support_dialect(dialect))
            .copied()
            .ok_or_else(|| MetaError::UnsupportedDialect {
                dialect,
                what: format!(
                    "explicit SQL type of {}.{}",
                    field.entity(),
                    field.property()
                ),
            });
    }
    default_sql_type(field.host_type(), dialect.database()).ok_or_else(|| {
        MetaError::UnsupportedDialect {
            dialect,
            what: format!(
                "host type {} of {}.{}",
                field.host_type(),
                field.entity(),
                field.property()
            ),
        }
    })
}

/// Default SQL type for a host type on `database`
#[must_use]
pub fn default_sql_type(host_type: HostType, database: Database) -> Option<SqlType> {
    match database {
        Database::MySQL => mysql_type(host_type).map(SqlType::MySql),
        Database::Postgre => postgre_type(host_type).map(SqlType::Postgre),
        Database::Oracle => oracle_type(host_type).map(SqlType::Oracle),
    }
}

fn mysql_type(host_type: HostType) -> Option<MySqlType> {
    let t = match host_type {
        HostType::Bool => MySqlType::Boolean,
        HostType::I8 => MySqlType::TinyInt,
        HostType::I16 => MySqlType::SmallInt,
        HostType::I32 | HostType::CodeEnum => MySqlType::Int,
        HostType::I64 => MySqlType::BigInt,
        HostType::F32 => MySqlType::Float,
        HostType::F64 => MySqlType::Double,
        HostType::Decimal => MySqlType::Decimal,
        HostType::String => MySqlType::VarChar,
        HostType::Char => MySqlType::Char,
        HostType::Bytes => MySqlType::VarBinary,
        HostType::LocalDate => MySqlType::Date,
        HostType::LocalTime => MySqlType::Time,
        HostType::LocalDateTime => MySqlType::DateTime,
        HostType::Year => MySqlType::Year,
        HostType::Json => MySqlType::Json,
        HostType::OffsetDateTime | HostType::ZonedDateTime | HostType::OffsetTime => {
            return None
        }
    };
    Some(t)
}

fn postgre_type(host_type: HostType) -> Option<PostgreType> {
    let t = match host_type {
        HostType::Bool => PostgreType::Boolean,
        HostType::I8 | HostType::I16 | HostType::Year => PostgreType::SmallInt,
        HostType::I32 | HostType::CodeEnum => PostgreType::Integer,
        HostType::I64 => PostgreType::BigInt,
        HostType::F32 => PostgreType::Real,
        HostType::F64 => PostgreType::DoublePrecision,
        HostType::Decimal => PostgreType::Decimal,
        HostType::String => PostgreType::VarChar,
        HostType::Char => PostgreType::Char,
        HostType::Bytes => PostgreType::Bytea,
        HostType::LocalDate => PostgreType::Date,
        HostType::LocalTime => PostgreType::Time,
        HostType::OffsetTime => PostgreType::TimeTz,
        HostType::LocalDateTime => PostgreType::Timestamp,
        HostType::OffsetDateTime | HostType::ZonedDateTime => PostgreType::TimestampTz,
        HostType::Json => PostgreType::Jsonb,
    };
    Some(t)
}

fn oracle_type(host_type: HostType) -> Option<OracleType> {
    let t = match host_type {
        HostType::Bool
        | HostType::I8
        | HostType::I16
        | HostType::I32
        | HostType::I64
        | HostType::Decimal
        | HostType::Year
        | HostType::CodeEnum => OracleType::Number,
        HostType::F32 => OracleType::BinaryFloat,
        HostType::F64 => OracleType::BinaryDouble,
        HostType::String => OracleType::VarChar2,
        HostType::Char => OracleType::Char,
        HostType::Bytes => OracleType::Blob,
        HostType::LocalDate => OracleType::Date,
        HostType::LocalDateTime => OracleType::Timestamp,
        HostType::OffsetDateTime | HostType::ZonedDateTime => OracleType::TimestampTz,
        HostType::Json => OracleType::Clob,
        HostType::LocalTime | HostType::OffsetTime => return None,
    };
    Some(t)
}

/// Precision and scale of `field` with the type's defaults filled in
#[must_use]
pub fn effective_precision(field: &FieldMeta, sql_type: &SqlType) -> Precision {
    Precision {
        precision: field.precision(),
        scale: field.scale(),
    }
    .or(sql_type.default_precision())
}

/// Check the declared precision and scale of `field` against the limits of `sql_type`
pub fn check_precision(field: &FieldMeta, sql_type: &SqlType) -> Result<(), MetaError> {
    let spec = sql_type.spec();
    let effective = effective_precision(field, sql_type);
    let fail = |message: String| -> Result<(), MetaError> {
        Err(MetaError::definition(
            field.entity(),
            field.property(),
            message,
        ))
    };
    if let (Some(p), Some(max)) = (field.precision(), spec.max_precision) {
        if p > max {
            return fail(format!("precision {p} exceeds maximum {max} of {sql_type}"));
        }
    }
    match spec.args {
        TypeArgs::PrecisionScale => {
            if let (Some(s), Some(max)) = (field.scale(), spec.max_scale) {
                if s > max {
                    return fail(format!("scale {s} exceeds maximum {max} of {sql_type}"));
                }
            }
            if let (Some(p), Some(s)) = (effective.precision, effective.scale) {
                if s > p {
                    return fail(format!("scale {s} exceeds precision {p} of {sql_type}"));
                }
            }
        }
        TypeArgs::Length | TypeArgs::Bare => {
            if let Some(s) = field.scale() {
                return fail(format!("{sql_type} does not accept a scale, found {s}"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::table::TableMeta;

    fn event_table() -> TableMeta {
        TableMeta::builder("Event", "t_event")
            .field(FieldMeta::id(HostType::I64))
            .field(FieldMeta::create_time())
            .field(FieldMeta::update_time())
            .field(FieldMeta::builder("happened_at", HostType::OffsetDateTime))
            .field(FieldMeta::builder("at_time", HostType::LocalTime))
            .field(
                FieldMeta::builder("body", HostType::String)
                    .sql_type(MySqlType::MediumText)
                    .sql_type(PostgreType::Text),
            )
            .field(FieldMeta::builder("amount", HostType::Decimal).precision(70))
            .field(FieldMeta::builder("code", HostType::String).scale(2))
            .build()
            .unwrap()
    }

    #[test]
    fn test_zoned_type_rejected_on_mysql() {
        let table = event_table();
        let field = table.field("happened_at").unwrap();
        let err = data_type(field, Dialect::MySQL80).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("MySQL80"));
        assert!(message.contains("Event"));
        assert!(message.contains("happened_at"));
        assert_eq!(
            data_type(field, Dialect::Postgre11).unwrap(),
            SqlType::Postgre(PostgreType::TimestampTz)
        );
        assert_eq!(
            data_type(field, Dialect::Oracle12).unwrap(),
            SqlType::Oracle(OracleType::TimestampTz)
        );
    }

    #[test]
    fn test_explicit_override_per_database() {
        let table = event_table();
        let body = table.field("body").unwrap();
        assert_eq!(
            data_type(body, Dialect::MySQL57).unwrap(),
            SqlType::MySql(MySqlType::MediumText)
        );
        assert_eq!(
            data_type(body, Dialect::Postgre11).unwrap(),
            SqlType::Postgre(PostgreType::Text)
        );
        assert!(matches!(
            data_type(body, Dialect::Oracle12),
            Err(MetaError::UnsupportedDialect { .. })
        ));
    }

    #[test]
    fn test_local_time_has_no_oracle_type() {
        let table = event_table();
        let field = table.field("at_time").unwrap();
        assert!(data_type(field, Dialect::Oracle12).is_err());
        assert_eq!(
            data_type(field, Dialect::MySQL80).unwrap(),
            SqlType::MySql(MySqlType::Time)
        );
    }

    #[test]
    fn test_check_precision_limits() {
        let table = event_table();
        let amount = table.field("amount").unwrap();
        let mysql = data_type(amount, Dialect::MySQL80).unwrap();
        assert!(check_precision(amount, &mysql).is_err());
        let postgre = data_type(amount, Dialect::Postgre11).unwrap();
        assert!(check_precision(amount, &postgre).is_ok());

        let code = table.field("code").unwrap();
        let varchar = data_type(code, Dialect::MySQL80).unwrap();
        assert!(check_precision(code, &varchar)
            .unwrap_err()
            .to_string()
            .contains("does not accept a scale"));
    }
}
