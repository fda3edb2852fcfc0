//! PostgreSQL column types

use super::data_kind::{DataKind, NumberKind, TimeKind};
use super::sql_type::{Precision, SqlDataType, TypeSpec};
use crate::dialect::Dialect;

const POSTGRE: &[Dialect] = &[Dialect::Postgre11];

const MAX_FSP: u32 = 6;
const MAX_LENGTH: u32 = 10_485_760;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostgreType {
    SmallInt,
    Integer,
    BigInt,
    Decimal,
    Real,
    DoublePrecision,
    Boolean,
    Char,
    VarChar,
    Text,
    Bytea,
    Date,
    Time,
    TimeTz,
    Timestamp,
    TimestampTz,
    Json,
    Jsonb,
    Uuid,
    Bit,
    VarBit,
}

impl SqlDataType for PostgreType {
    fn spec(&self) -> TypeSpec {
        use DataKind::{Binary, Bit, Boolean, DateTime, Json, Number, Text};
        match self {
            PostgreType::SmallInt => TypeSpec::bare("SMALLINT", Number(NumberKind::Int), POSTGRE),
            PostgreType::Integer => TypeSpec::bare("INTEGER", Number(NumberKind::Int), POSTGRE),
            PostgreType::BigInt => TypeSpec::bare("BIGINT", Number(NumberKind::Int), POSTGRE),
            PostgreType::Decimal => TypeSpec::decimal(
                "DECIMAL",
                Number(NumberKind::Decimal),
                Precision::new(10, 2),
                1000,
                1000,
                POSTGRE,
            ),
            PostgreType::Real => TypeSpec::bare("REAL", Number(NumberKind::Float), POSTGRE),
            PostgreType::DoublePrecision => {
                TypeSpec::bare("DOUBLE PRECISION", Number(NumberKind::Float), POSTGRE)
            }
            PostgreType::Boolean => TypeSpec::bare("BOOLEAN", Boolean, POSTGRE),
            PostgreType::Char => TypeSpec::length("CHAR", Text, Some(1), MAX_LENGTH, POSTGRE),
            PostgreType::VarChar => {
                TypeSpec::length("VARCHAR", Text, Some(255), MAX_LENGTH, POSTGRE)
            }
            PostgreType::Text => TypeSpec::bare("TEXT", Text, POSTGRE),
            PostgreType::Bytea => TypeSpec::bare("BYTEA", Binary, POSTGRE),
            PostgreType::Date => TypeSpec::bare("DATE", DateTime(TimeKind::Date), POSTGRE),
            PostgreType::Time => {
                TypeSpec::length("TIME", DateTime(TimeKind::Time), None, MAX_FSP, POSTGRE)
            }
            PostgreType::TimeTz => {
                TypeSpec::length("TIME", DateTime(TimeKind::Time), None, MAX_FSP, POSTGRE)
                    .with_suffix(" WITH TIME ZONE")
            }
            PostgreType::Timestamp => TypeSpec::length(
                "TIMESTAMP",
                DateTime(TimeKind::Timestamp),
                None,
                MAX_FSP,
                POSTGRE,
            ),
            PostgreType::TimestampTz => TypeSpec::length(
                "TIMESTAMP",
                DateTime(TimeKind::Timestamp),
                None,
                MAX_FSP,
                POSTGRE,
            )
            .with_suffix(" WITH TIME ZONE"),
            PostgreType::Json => TypeSpec::bare("JSON", Json, POSTGRE),
            PostgreType::Jsonb => TypeSpec::bare("JSONB", Json, POSTGRE),
            PostgreType::Uuid => TypeSpec::bare("UUID", Text, POSTGRE),
            PostgreType::Bit => TypeSpec::length("BIT", Bit, Some(1), 83_886_080, POSTGRE),
            PostgreType::VarBit => TypeSpec::length("VARBIT", Bit, None, 83_886_080, POSTGRE),
        }
    }
}

impl PostgreType {
    /// Resolve a normalized type name, including `pg_catalog` aliases
    pub(crate) fn from_normalized(name: &str) -> Option<Self> {
        let t = match name {
            "smallint" | "int2" => PostgreType::SmallInt,
            "integer" | "int" | "int4" => PostgreType::Integer,
            "bigint" | "int8" => PostgreType::BigInt,
            "decimal" | "numeric" => PostgreType::Decimal,
            "real" | "float4" => PostgreType::Real,
            "double precision" | "float8" => PostgreType::DoublePrecision,
            "boolean" | "bool" => PostgreType::Boolean,
            "char" | "character" | "bpchar" => PostgreType::Char,
            "varchar" | "character varying" => PostgreType::VarChar,
            "text" => PostgreType::Text,
            "bytea" => PostgreType::Bytea,
            "date" => PostgreType::Date,
            "time" | "time without time zone" => PostgreType::Time,
            "timetz" | "time with time zone" => PostgreType::TimeTz,
            "timestamp" | "timestamp without time zone" => PostgreType::Timestamp,
            "timestamptz" | "timestamp with time zone" => PostgreType::TimestampTz,
            "json" => PostgreType::Json,
            "jsonb" => PostgreType::Jsonb,
            "uuid" => PostgreType::Uuid,
            "bit" => PostgreType::Bit,
            "varbit" | "bit varying" => PostgreType::VarBit,
            _ => return None,
        };
        Some(t)
    }
}
