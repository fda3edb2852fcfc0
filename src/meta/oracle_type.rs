//! Oracle column types

use super::data_kind::{DataKind, NumberKind, TimeKind};
use super::sql_type::{Precision, SqlDataType, TypeSpec};
use crate::dialect::Dialect;

const ORACLE: &[Dialect] = &[Dialect::Oracle12];

const MAX_FSP: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OracleType {
    Number,
    BinaryFloat,
    BinaryDouble,
    Char,
    NChar,
    VarChar2,
    NVarChar2,
    Clob,
    NClob,
    Blob,
    Raw,
    Date,
    Timestamp,
    TimestampTz,
    TimestampLtz,
}

impl SqlDataType for OracleType {
    fn spec(&self) -> TypeSpec {
        use DataKind::{Binary, DateTime, Number, Text};
        match self {
            OracleType::Number => TypeSpec::decimal(
                "NUMBER",
                Number(NumberKind::Decimal),
                Precision::UNSET,
                38,
                127,
                ORACLE,
            ),
            OracleType::BinaryFloat => {
                TypeSpec::bare("BINARY_FLOAT", Number(NumberKind::Float), ORACLE)
            }
            OracleType::BinaryDouble => {
                TypeSpec::bare("BINARY_DOUBLE", Number(NumberKind::Float), ORACLE)
            }
            OracleType::Char => TypeSpec::length("CHAR", Text, Some(1), 2000, ORACLE),
            OracleType::NChar => TypeSpec::length("NCHAR", Text, Some(1), 2000, ORACLE),
            OracleType::VarChar2 => TypeSpec::length("VARCHAR2", Text, Some(255), 4000, ORACLE),
            OracleType::NVarChar2 => {
                TypeSpec::length("NVARCHAR2", Text, Some(255), 4000, ORACLE)
            }
            OracleType::Clob => TypeSpec::bare("CLOB", Text, ORACLE),
            OracleType::NClob => TypeSpec::bare("NCLOB", Text, ORACLE),
            OracleType::Blob => TypeSpec::bare("BLOB", Binary, ORACLE),
            OracleType::Raw => TypeSpec::length("RAW", Binary, Some(16), 2000, ORACLE),
            OracleType::Date => TypeSpec::bare("DATE", DateTime(TimeKind::Date), ORACLE),
            OracleType::Timestamp => TypeSpec::length(
                "TIMESTAMP",
                DateTime(TimeKind::Timestamp),
                None,
                MAX_FSP,
                ORACLE,
            ),
            OracleType::TimestampTz => TypeSpec::length(
                "TIMESTAMP",
                DateTime(TimeKind::Timestamp),
                None,
                MAX_FSP,
                ORACLE,
            )
            .with_suffix(" WITH TIME ZONE"),
            OracleType::TimestampLtz => TypeSpec::length(
                "TIMESTAMP",
                DateTime(TimeKind::Timestamp),
                None,
                MAX_FSP,
                ORACLE,
            )
            .with_suffix(" WITH LOCAL TIME ZONE"),
        }
    }
}

impl OracleType {
    pub(crate) fn from_normalized(name: &str) -> Option<Self> {
        let t = match name {
            "number" | "numeric" | "decimal" | "integer" | "int" | "smallint" => {
                OracleType::Number
            }
            "binary_float" => OracleType::BinaryFloat,
            "binary_double" => OracleType::BinaryDouble,
            "char" => OracleType::Char,
            "nchar" => OracleType::NChar,
            "varchar2" | "varchar" => OracleType::VarChar2,
            "nvarchar2" => OracleType::NVarChar2,
            "clob" => OracleType::Clob,
            "nclob" => OracleType::NClob,
            "blob" => OracleType::Blob,
            "raw" => OracleType::Raw,
            "date" => OracleType::Date,
            "timestamp" => OracleType::Timestamp,
            "timestamp with time zone" => OracleType::TimestampTz,
            "timestamp with local time zone" => OracleType::TimestampLtz,
            _ => return None,
        };
        Some(t)
    }
}
