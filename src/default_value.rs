//! Default-value resolution.
//!
//! Turns a field's declared default text into dialect-correct SQL. Reserved
//! bookkeeping properties have fixed semantics; everything else is routed by
//! the [`DataFamily`] of the field's SQL type. Time columns additionally
//! understand a small set of symbolic placeholders.

use crate::dialect::Dialect;
use crate::error::MetaError;
use crate::meta::field::{CREATE_TIME, ID, UPDATE_TIME, VERSION, VISIBLE};
use crate::meta::mapping::{data_type, zone_guard};
use crate::meta::{DataFamily, FieldMeta, SqlDataType, SqlType};
use chrono::{DateTime, Utc};

/// Current timestamp
pub const NOW: &str = "NOW";
/// Epoch date and time, `1970-01-01 00:00:00`
pub const SOURCE_DATE_TIME: &str = "SOURCE_DATE_TIME";
/// Epoch date, `1970-01-01`
pub const SOURCE_DATE: &str = "SOURCE_DATE";
/// Start of day, `00:00:00`
pub const MIDNIGHT: &str = "MIDNIGHT";
/// Current date
pub const CURRENT_DATE: &str = "CURRENT_DATE";
/// Current time of day
pub const CURRENT_TIME: &str = "CURRENT_TIME";

/// A resolved column default
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlDefault {
    /// Value generated by the database; no DEFAULT clause
    Generated,
    /// SQL expression or numeric literal emitted verbatim
    Expression(String),
    /// Text emitted as a quoted string literal
    Literal(String),
    /// Time placeholder this crate does not interpret, emitted verbatim
    Unresolved(String),
}

impl SqlDefault {
    /// The default's text before quoting
    pub fn value(&self) -> &str {
        match self {
            SqlDefault::Generated => "",
            SqlDefault::Expression(s) | SqlDefault::Literal(s) | SqlDefault::Unresolved(s) => s,
        }
    }

    /// SQL text for a DEFAULT clause, `None` for [`SqlDefault::Generated`]
    pub fn to_sql(&self) -> Option<String> {
        match self {
            SqlDefault::Generated => None,
            SqlDefault::Expression(s) | SqlDefault::Unresolved(s) => Some(s.clone()),
            SqlDefault::Literal(s) => Some(quote(s)),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, SqlDefault::Unresolved(_))
    }
}

/// Single-quote `text`, doubling embedded quotes
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Resolve the default of `field` for `dialect`.
///
/// Returns `Ok(None)` when a non-reserved field declares no default.
pub fn resolve(field: &FieldMeta, dialect: Dialect) -> Result<Option<SqlDefault>, MetaError> {
    zone_guard(field, dialect)?;
    if field.is_reserved() {
        return required_default(field, dialect).map(Some);
    }
    let Some(raw) = field.default_value() else {
        return Ok(None);
    };
    let sql_type = data_type(field, dialect)?;
    let resolved = match sql_type.data_kind().family() {
        DataFamily::Text => SqlDefault::Literal(raw.to_string()),
        DataFamily::Number => SqlDefault::Expression(raw.to_string()),
        DataFamily::DateTime => time_default(field, raw, dialect)?,
        _ if field.host_type().is_textual() => SqlDefault::Literal(raw.to_string()),
        _ => SqlDefault::Expression(raw.to_string()),
    };
    match sql_type {
        SqlType::MySql(t) if t.is_large_object() => {
            large_object_default(resolved, dialect).map(Some)
        }
        _ => Ok(Some(resolved)),
    }
}

/// MySQL only accepts parenthesized expression defaults on TEXT, BLOB and JSON
/// columns, and only from 8.0.13 on
fn large_object_default(resolved: SqlDefault, dialect: Dialect) -> Result<SqlDefault, MetaError> {
    if dialect == Dialect::MySQL57 {
        return Err(MetaError::UnsupportedDialect {
            dialect,
            what: "Default value on a TEXT, BLOB or JSON column".to_string(),
        });
    }
    Ok(match resolved.to_sql() {
        Some(sql) => SqlDefault::Expression(format!("({sql})")),
        None => resolved,
    })
}

/// Default of a reserved bookkeeping field
pub fn required_default(field: &FieldMeta, dialect: Dialect) -> Result<SqlDefault, MetaError> {
    let resolved = match field.property() {
        ID => SqlDefault::Generated,
        CREATE_TIME | UPDATE_TIME => SqlDefault::Expression(
            dialect.now(field.precision(), field.host_type().is_zoned()),
        ),
        VISIBLE => SqlDefault::Expression(dialect.boolean_true().to_string()),
        VERSION => SqlDefault::Literal("0".to_string()),
        other => {
            return Err(MetaError::definition(
                field.entity(),
                other,
                "not required, no reserved default applies",
            ))
        }
    };
    Ok(resolved)
}

fn time_default(field: &FieldMeta, raw: &str, dialect: Dialect) -> Result<SqlDefault, MetaError> {
    let epoch = DateTime::<Utc>::UNIX_EPOCH.naive_utc();
    let resolved = match raw {
        NOW => SqlDefault::Expression(dialect.now(field.precision(), field.host_type().is_zoned())),
        SOURCE_DATE_TIME => {
            SqlDefault::Literal(epoch.format("%Y-%m-%d %H:%M:%S").to_string())
        }
        SOURCE_DATE => SqlDefault::Literal(epoch.format("%Y-%m-%d").to_string()),
        MIDNIGHT => SqlDefault::Literal(epoch.format("%H:%M:%S").to_string()),
        CURRENT_DATE => SqlDefault::Expression(dialect.current_date()?),
        CURRENT_TIME => SqlDefault::Expression(dialect.current_time(field.precision())?),
        other => {
            log::warn!(
                "Default '{}' of {}.{} is not a known time placeholder, passing it through for {}",
                other,
                field.entity(),
                field.property(),
                dialect
            );
            SqlDefault::Unresolved(other.to_string())
        }
    };
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{FieldMeta, HostType, MySqlType, TableMeta};

    fn table() -> TableMeta {
        TableMeta::builder("Order", "t_order")
            .versioned(true)
            .soft_delete(true)
            .field(FieldMeta::id(HostType::I64).auto_increment(true))
            .field(FieldMeta::create_time().precision(6))
            .field(FieldMeta::update_time())
            .field(FieldMeta::version())
            .field(FieldMeta::visible())
            .field(FieldMeta::builder("title", HostType::String).default_value("it's new"))
            .field(FieldMeta::builder("amount", HostType::Decimal).default_value("0.00"))
            .field(FieldMeta::builder("paid_at", HostType::LocalDateTime).default_value(NOW))
            .field(FieldMeta::builder("start_day", HostType::LocalDate).default_value(SOURCE_DATE))
            .field(
                FieldMeta::builder("start_time", HostType::LocalDateTime)
                    .default_value(SOURCE_DATE_TIME),
            )
            .field(FieldMeta::builder("open_at", HostType::LocalTime).default_value(MIDNIGHT))
            .field(FieldMeta::builder("today", HostType::LocalDate).default_value(CURRENT_DATE))
            .field(
                FieldMeta::builder("clock", HostType::LocalTime)
                    .precision(3)
                    .default_value(CURRENT_TIME),
            )
            .field(
                FieldMeta::builder("expires_at", HostType::LocalDateTime)
                    .default_value("DATE_ADD(NOW(), INTERVAL 1 DAY)"),
            )
            .field(FieldMeta::builder("paid", HostType::Bool).default_value("FALSE"))
            .field(
                FieldMeta::builder("extra", HostType::Json)
                    .sql_type(MySqlType::Json)
                    .default_value("{}"),
            )
            .field(FieldMeta::builder("zoned_at", HostType::OffsetDateTime).default_value(NOW))
            .field(FieldMeta::builder("note", HostType::String).nullable(true))
            .build()
            .unwrap()
    }

    fn resolve_sql(property: &str, dialect: Dialect) -> Option<String> {
        let table = table();
        resolve(table.field(property).unwrap(), dialect)
            .unwrap()
            .and_then(|d| d.to_sql())
    }

    #[test]
    fn test_version_default_is_zero_for_every_dialect() {
        let table = table();
        let version = table.field("version").unwrap();
        for dialect in Dialect::ALL {
            let resolved = resolve(version, dialect).unwrap().unwrap();
            assert_eq!(resolved.value(), "0");
            assert_eq!(resolved.to_sql().unwrap(), "'0'");
        }
    }

    #[test]
    fn test_reserved_defaults() {
        assert_eq!(resolve_sql("id", Dialect::MySQL80), None);
        assert_eq!(resolve_sql("create_time", Dialect::MySQL80).unwrap(), "NOW(6)");
        assert_eq!(resolve_sql("update_time", Dialect::MySQL57).unwrap(), "NOW()");
        assert_eq!(resolve_sql("update_time", Dialect::Postgre11).unwrap(), "LOCALTIMESTAMP");
        assert_eq!(resolve_sql("visible", Dialect::MySQL80).unwrap(), "TRUE");
        assert_eq!(resolve_sql("visible", Dialect::Oracle12).unwrap(), "1");
    }

    #[test]
    fn test_required_default_rejects_ordinary_field() {
        let table = table();
        let err = required_default(table.field("title").unwrap(), Dialect::MySQL80).unwrap_err();
        assert!(err.to_string().contains("not required"));
        assert!(err.to_string().contains("Order.title"));
    }

    #[test]
    fn test_family_routing() {
        assert_eq!(resolve_sql("title", Dialect::MySQL80).unwrap(), "'it''s new'");
        assert_eq!(resolve_sql("amount", Dialect::MySQL80).unwrap(), "0.00");
        assert_eq!(resolve_sql("paid", Dialect::MySQL80).unwrap(), "FALSE");
        assert_eq!(resolve_sql("extra", Dialect::MySQL80).unwrap(), "('{}')");
        assert_eq!(resolve_sql("extra", Dialect::Postgre11).unwrap(), "'{}'");
        assert_eq!(resolve_sql("note", Dialect::MySQL80), None);
    }

    #[test]
    fn test_large_object_default_on_mysql() {
        let table = table();
        let extra = table.field("extra").unwrap();
        let err = resolve(extra, Dialect::MySQL57).unwrap_err();
        assert!(matches!(err, MetaError::UnsupportedDialect { dialect: Dialect::MySQL57, .. }));
        assert!(err.to_string().contains("JSON"));

        let resolved = resolve(extra, Dialect::MySQL80).unwrap().unwrap();
        assert_eq!(resolved, SqlDefault::Expression("('{}')".to_string()));
    }

    #[test]
    fn test_time_placeholders() {
        assert_eq!(resolve_sql("paid_at", Dialect::MySQL80).unwrap(), "NOW()");
        assert_eq!(resolve_sql("start_day", Dialect::MySQL80).unwrap(), "'1970-01-01'");
        assert_eq!(
            resolve_sql("start_time", Dialect::Postgre11).unwrap(),
            "'1970-01-01 00:00:00'"
        );
        assert_eq!(resolve_sql("open_at", Dialect::MySQL80).unwrap(), "'00:00:00'");
        assert_eq!(resolve_sql("today", Dialect::Postgre11).unwrap(), "CURRENT_DATE");
        assert_eq!(resolve_sql("clock", Dialect::MySQL80).unwrap(), "(CURRENT_TIME(3))");
    }

    #[test]
    fn test_unknown_time_expression_is_unresolved() {
        let table = table();
        let resolved = resolve(table.field("expires_at").unwrap(), Dialect::MySQL80)
            .unwrap()
            .unwrap();
        assert!(!resolved.is_resolved());
        assert_eq!(resolved.value(), "DATE_ADD(NOW(), INTERVAL 1 DAY)");
    }

    #[test]
    fn test_zoned_guard() {
        let table = table();
        let zoned = table.field("zoned_at").unwrap();
        let err = resolve(zoned, Dialect::MySQL80).unwrap_err();
        assert!(matches!(err, MetaError::Definition { .. }));
        assert!(err.to_string().contains("MySQL80"));
        let ok = resolve(zoned, Dialect::Postgre11).unwrap().unwrap();
        assert_eq!(ok.to_sql().unwrap(), "CURRENT_TIMESTAMP");
        assert!(resolve(zoned, Dialect::Oracle12).is_ok());
    }

    #[test]
    fn test_unsupported_placeholder_on_dialect() {
        let table = table();
        let err = resolve(table.field("today").unwrap(), Dialect::MySQL57).unwrap_err();
        assert!(matches!(err, MetaError::UnsupportedDialect { .. }));
    }
}
