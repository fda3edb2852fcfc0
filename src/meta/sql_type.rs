//! SQL data type descriptors.
//!
//! Every concrete type is a unit variant of a per-database enum
//! ([`MySqlType`], [`PostgreType`], [`OracleType`]) and describes itself with a
//! static [`TypeSpec`]. [`SqlType`] is the database-independent wrapper used by
//! field mapping, DDL rendering and migration comparison.

use super::data_kind::DataKind;
use super::mysql_type::MySqlType;
use super::oracle_type::OracleType;
use super::postgre_type::PostgreType;
use crate::dialect::{Database, Dialect};
use crate::error::MetaError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Precision and scale pair; `None` means unset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Precision {
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

impl Precision {
    pub const UNSET: Precision = Precision {
        precision: None,
        scale: None,
    };

    #[must_use]
    pub const fn new(precision: u32, scale: u32) -> Self {
        Self {
            precision: Some(precision),
            scale: Some(scale),
        }
    }

    #[must_use]
    pub const fn length(precision: u32) -> Self {
        Self {
            precision: Some(precision),
            scale: None,
        }
    }

    /// Fill the components missing from `self` with the ones from `defaults`
    #[must_use]
    pub fn or(self, defaults: Precision) -> Precision {
        Precision {
            precision: self.precision.or(defaults.precision),
            scale: self.scale.or(defaults.scale),
        }
    }
}

/// Argument shape of a type's DDL syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeArgs {
    /// No arguments, e.g. `INT`, `TEXT`
    Bare,
    /// A single length or fractional-seconds argument, e.g. `VARCHAR(64)`, `DATETIME(6)`
    Length,
    /// Precision and scale, e.g. `DECIMAL(14,2)`
    PrecisionScale,
}

/// Static description of one concrete SQL type
#[derive(Debug, Clone, Copy)]
pub struct TypeSpec {
    pub name: &'static str,
    /// Rendered after the argument list, e.g. `" WITH TIME ZONE"`
    pub suffix: &'static str,
    pub kind: DataKind,
    pub args: TypeArgs,
    pub default_precision: Precision,
    pub max_precision: Option<u32>,
    pub max_scale: Option<u32>,
    pub dialects: &'static [Dialect],
}

impl TypeSpec {
    pub(crate) const fn bare(
        name: &'static str,
        kind: DataKind,
        dialects: &'static [Dialect],
    ) -> Self {
        Self {
            name,
            suffix: "",
            kind,
            args: TypeArgs::Bare,
            default_precision: Precision::UNSET,
            max_precision: None,
            max_scale: None,
            dialects,
        }
    }

    pub(crate) const fn length(
        name: &'static str,
        kind: DataKind,
        default: Option<u32>,
        max: u32,
        dialects: &'static [Dialect],
    ) -> Self {
        Self {
            name,
            suffix: "",
            kind,
            args: TypeArgs::Length,
            default_precision: Precision {
                precision: default,
                scale: None,
            },
            max_precision: Some(max),
            max_scale: None,
            dialects,
        }
    }

    pub(crate) const fn decimal(
        name: &'static str,
        kind: DataKind,
        default: Precision,
        max_precision: u32,
        max_scale: u32,
        dialects: &'static [Dialect],
    ) -> Self {
        Self {
            name,
            suffix: "",
            kind,
            args: TypeArgs::PrecisionScale,
            default_precision: default,
            max_precision: Some(max_precision),
            max_scale: Some(max_scale),
            dialects,
        }
    }

    pub(crate) const fn with_suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }
}

/// Behaviour shared by every SQL data type
pub trait SqlDataType {
    /// Static description of the type
    fn spec(&self) -> TypeSpec;

    fn data_kind(&self) -> DataKind {
        self.spec().kind
    }

    fn args(&self) -> TypeArgs {
        self.spec().args
    }

    /// Precision and scale used when a field leaves them unset
    fn default_precision(&self) -> Precision {
        self.spec().default_precision
    }

    fn support_dialect(&self, dialect: Dialect) -> bool {
        self.spec().dialects.contains(&dialect)
    }

    /// Render the DDL type name.
    ///
    /// Missing components are taken from [`default_precision`](Self::default_precision)
    /// one at a time, so an explicit precision keeps the default scale and vice
    /// versa. A scale without any precision renders as `NAME(*,s)`. Does not
    /// check dialect support.
    fn type_name(&self, precision: Option<u32>, scale: Option<u32>) -> String {
        let spec = self.spec();
        let merged = Precision { precision, scale }.or(spec.default_precision);
        let args = match (spec.args, merged.precision, merged.scale) {
            (TypeArgs::Bare, _, _) => None,
            (TypeArgs::Length, Some(p), _) => Some(p.to_string()),
            (TypeArgs::PrecisionScale, Some(p), Some(s)) => Some(format!("{p},{s}")),
            (TypeArgs::PrecisionScale, Some(p), None) => Some(p.to_string()),
            // Only Oracle NUMBER lacks a default precision; `*` keeps its maximum
            (TypeArgs::PrecisionScale, None, Some(s)) => Some(format!("*,{s}")),
            _ => None,
        };
        match args {
            Some(args) => format!("{}({}){}", spec.name, args, spec.suffix),
            None => format!("{}{}", spec.name, spec.suffix),
        }
    }
}

/// A concrete SQL type of one of the supported databases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    MySql(MySqlType),
    Postgre(PostgreType),
    Oracle(OracleType),
}

impl SqlType {
    #[must_use]
    pub fn database(&self) -> Database {
        match self {
            SqlType::MySql(_) => Database::MySQL,
            SqlType::Postgre(_) => Database::Postgre,
            SqlType::Oracle(_) => Database::Oracle,
        }
    }

    /// Resolve type text, as declared in a schema file or reported by a live
    /// database, to a type of `database`.
    ///
    /// Matching ignores case, argument lists and `UNSIGNED`/`ZEROFILL`.
    #[must_use]
    pub fn parse(database: Database, raw: &str) -> Option<SqlType> {
        let normalized = normalize_type_name(raw);
        match database {
            Database::MySQL => MySqlType::from_normalized(&normalized).map(SqlType::MySql),
            Database::Postgre => {
                PostgreType::from_normalized(&normalized).map(SqlType::Postgre)
            }
            Database::Oracle => OracleType::from_normalized(&normalized).map(SqlType::Oracle),
        }
    }

    /// [`SqlDataType::type_name`] guarded by [`SqlDataType::support_dialect`]
    pub fn checked_type_name(
        &self,
        dialect: Dialect,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Result<String, MetaError> {
        if !self.support_dialect(dialect) {
            return Err(MetaError::UnsupportedDialect {
                dialect,
                what: format!("SQL type {self}"),
            });
        }
        Ok(self.type_name(precision, scale))
    }

    /// True when both types share a storage representation on their database,
    /// e.g. MySQL `BOOLEAN` is stored as `TINYINT`.
    #[must_use]
    pub fn same_storage(&self, other: &SqlType) -> bool {
        if self == other {
            return true;
        }
        matches!(
            (self, other),
            (
                SqlType::MySql(MySqlType::Boolean),
                SqlType::MySql(MySqlType::TinyInt)
            ) | (
                SqlType::MySql(MySqlType::TinyInt),
                SqlType::MySql(MySqlType::Boolean)
            )
        )
    }
}

impl SqlDataType for SqlType {
    fn spec(&self) -> TypeSpec {
        match self {
            SqlType::MySql(t) => t.spec(),
            SqlType::Postgre(t) => t.spec(),
            SqlType::Oracle(t) => t.spec(),
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = self.spec();
        write!(f, "{}{}", spec.name, spec.suffix)
    }
}

impl From<MySqlType> for SqlType {
    fn from(value: MySqlType) -> Self {
        SqlType::MySql(value)
    }
}

impl From<PostgreType> for SqlType {
    fn from(value: PostgreType) -> Self {
        SqlType::Postgre(value)
    }
}

impl From<OracleType> for SqlType {
    fn from(value: OracleType) -> Self {
        SqlType::Oracle(value)
    }
}

static TYPE_ARGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));
static TYPE_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(unsigned|zerofill)\b").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Lower-case type text with argument lists and modifiers removed,
/// e.g. `"TIMESTAMP(6) WITH TIME ZONE"` becomes `"timestamp with time zone"`.
pub(crate) fn normalize_type_name(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let no_args = TYPE_ARGS.replace_all(&lower, " ");
    let no_noise = TYPE_NOISE.replace_all(&no_args, " ");
    WHITESPACE.replace_all(no_noise.trim(), " ").trim().to_string()
}
