//! MySQL column types

use super::data_kind::{DataKind, NumberKind, TimeKind};
use super::sql_type::{Precision, SqlDataType, TypeSpec};
use crate::dialect::Dialect;

const MYSQL: &[Dialect] = &[Dialect::MySQL57, Dialect::MySQL80];

/// Fractional seconds precision limit for TIME, DATETIME and TIMESTAMP
const MAX_FSP: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MySqlType {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Decimal,
    Float,
    Double,
    Boolean,
    Bit,
    Char,
    VarChar,
    TinyText,
    Text,
    MediumText,
    LongText,
    Binary,
    VarBinary,
    Blob,
    LongBlob,
    Date,
    Time,
    DateTime,
    Timestamp,
    Year,
    Json,
}

impl SqlDataType for MySqlType {
    fn spec(&self) -> TypeSpec {
        use DataKind::{Binary, Bit, Boolean, DateTime, Json, Number, Text};
        match self {
            MySqlType::TinyInt => TypeSpec::bare("TINYINT", Number(NumberKind::Int), MYSQL),
            MySqlType::SmallInt => TypeSpec::bare("SMALLINT", Number(NumberKind::Int), MYSQL),
            MySqlType::MediumInt => TypeSpec::bare("MEDIUMINT", Number(NumberKind::Int), MYSQL),
            MySqlType::Int => TypeSpec::bare("INT", Number(NumberKind::Int), MYSQL),
            MySqlType::BigInt => TypeSpec::bare("BIGINT", Number(NumberKind::Int), MYSQL),
            MySqlType::Decimal => TypeSpec::decimal(
                "DECIMAL",
                Number(NumberKind::Decimal),
                Precision::new(10, 2),
                65,
                30,
                MYSQL,
            ),
            MySqlType::Float => TypeSpec::bare("FLOAT", Number(NumberKind::Float), MYSQL),
            MySqlType::Double => TypeSpec::bare("DOUBLE", Number(NumberKind::Float), MYSQL),
            MySqlType::Boolean => TypeSpec::bare("BOOLEAN", Boolean, MYSQL),
            MySqlType::Bit => TypeSpec::length("BIT", Bit, Some(1), 64, MYSQL),
            MySqlType::Char => TypeSpec::length("CHAR", Text, Some(1), 255, MYSQL),
            MySqlType::VarChar => TypeSpec::length("VARCHAR", Text, Some(255), 65_535, MYSQL),
            MySqlType::TinyText => TypeSpec::bare("TINYTEXT", Text, MYSQL),
            MySqlType::Text => TypeSpec::bare("TEXT", Text, MYSQL),
            MySqlType::MediumText => TypeSpec::bare("MEDIUMTEXT", Text, MYSQL),
            MySqlType::LongText => TypeSpec::bare("LONGTEXT", Text, MYSQL),
            MySqlType::Binary => TypeSpec::length("BINARY", Binary, Some(1), 255, MYSQL),
            MySqlType::VarBinary => {
                TypeSpec::length("VARBINARY", Binary, Some(255), 65_535, MYSQL)
            }
            MySqlType::Blob => TypeSpec::bare("BLOB", Binary, MYSQL),
            MySqlType::LongBlob => TypeSpec::bare("LONGBLOB", Binary, MYSQL),
            MySqlType::Date => TypeSpec::bare("DATE", DateTime(TimeKind::Date), MYSQL),
            MySqlType::Time => {
                TypeSpec::length("TIME", DateTime(TimeKind::Time), None, MAX_FSP, MYSQL)
            }
            MySqlType::DateTime => TypeSpec::length(
                "DATETIME",
                DateTime(TimeKind::Timestamp),
                None,
                MAX_FSP,
                MYSQL,
            ),
            MySqlType::Timestamp => TypeSpec::length(
                "TIMESTAMP",
                DateTime(TimeKind::Timestamp),
                None,
                MAX_FSP,
                MYSQL,
            ),
            MySqlType::Year => TypeSpec::bare("YEAR", DateTime(TimeKind::Year), MYSQL),
            MySqlType::Json => TypeSpec::bare("JSON", Json, MYSQL),
        }
    }
}

impl MySqlType {
    /// TEXT, BLOB and JSON columns, which accept no literal default
    pub fn is_large_object(self) -> bool {
        matches!(
            self,
            MySqlType::TinyText
                | MySqlType::Text
                | MySqlType::MediumText
                | MySqlType::LongText
                | MySqlType::Blob
                | MySqlType::LongBlob
                | MySqlType::Json
        )
    }

    /// Resolve a normalized (lower-case, argument-free) type name
    pub(crate) fn from_normalized(name: &str) -> Option<Self> {
        let t = match name {
            "tinyint" => MySqlType::TinyInt,
            "smallint" => MySqlType::SmallInt,
            "mediumint" => MySqlType::MediumInt,
            "int" | "integer" => MySqlType::Int,
            "bigint" => MySqlType::BigInt,
            "decimal" | "dec" | "numeric" | "fixed" => MySqlType::Decimal,
            "float" => MySqlType::Float,
            "double" | "double precision" | "real" => MySqlType::Double,
            "boolean" | "bool" => MySqlType::Boolean,
            "bit" => MySqlType::Bit,
            "char" => MySqlType::Char,
            "varchar" => MySqlType::VarChar,
            "tinytext" => MySqlType::TinyText,
            "text" => MySqlType::Text,
            "mediumtext" => MySqlType::MediumText,
            "longtext" => MySqlType::LongText,
            "binary" => MySqlType::Binary,
            "varbinary" => MySqlType::VarBinary,
            "blob" => MySqlType::Blob,
            "longblob" => MySqlType::LongBlob,
            "date" => MySqlType::Date,
            "time" => MySqlType::Time,
            "datetime" => MySqlType::DateTime,
            "timestamp" => MySqlType::Timestamp,
            "year" => MySqlType::Year,
            "json" => MySqlType::Json,
            _ => return None,
        };
        Some(t)
    }
}
