//! Target SQL dialects and the capabilities default-value rendering needs.
//!
//! A [`Dialect`] is always passed explicitly; nothing in this crate detects one
//! from a live connection.

use crate::error::MetaError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Database product family a dialect belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Database {
    MySQL,
    Oracle,
    Postgre,
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Database::MySQL => write!(f, "MySQL"),
            Database::Oracle => write!(f, "Oracle"),
            Database::Postgre => write!(f, "PostgreSQL"),
        }
    }
}

/// Target SQL engine and version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Dialect {
    MySQL57,
    MySQL80,
    Oracle12,
    Postgre11,
}

impl Dialect {
    /// All supported dialects, oldest first within each database
    pub const ALL: [Dialect; 4] = [
        Dialect::MySQL57,
        Dialect::MySQL80,
        Dialect::Oracle12,
        Dialect::Postgre11,
    ];

    /// The database family of this dialect
    #[must_use]
    pub fn database(self) -> Database {
        match self {
            Dialect::MySQL57 | Dialect::MySQL80 => Database::MySQL,
            Dialect::Oracle12 => Database::Oracle,
            Dialect::Postgre11 => Database::Postgre,
        }
    }

    /// Whether the dialect can store zone or offset aware time values
    #[must_use]
    pub fn support_zone_id(self) -> bool {
        match self.database() {
            Database::MySQL => false,
            Database::Oracle | Database::Postgre => true,
        }
    }

    /// Current timestamp expression used for `NOW` defaults.
    ///
    /// `zoned` selects the zone-aware form on databases that distinguish it.
    #[must_use]
    pub fn now(self, precision: Option<u32>, zoned: bool) -> String {
        let func = match self.database() {
            Database::MySQL => "NOW",
            Database::Oracle | Database::Postgre if zoned => "CURRENT_TIMESTAMP",
            Database::Oracle | Database::Postgre => "LOCALTIMESTAMP",
        };
        match (self.database(), precision) {
            (Database::MySQL, None) => format!("{func}()"),
            (_, None) => func.to_string(),
            (_, Some(p)) => format!("{func}({p})"),
        }
    }

    /// Current date expression used for `CURRENT_DATE` defaults
    pub fn current_date(self) -> Result<String, MetaError> {
        match self {
            // Expression defaults arrived in 8.0.13
            Dialect::MySQL57 => Err(MetaError::UnsupportedDialect {
                dialect: self,
                what: "CURRENT_DATE column default".to_string(),
            }),
            Dialect::MySQL80 => Ok("(CURRENT_DATE)".to_string()),
            Dialect::Oracle12 => Ok("TRUNC(SYSDATE)".to_string()),
            Dialect::Postgre11 => Ok("CURRENT_DATE".to_string()),
        }
    }

    /// Current time-of-day expression used for `CURRENT_TIME` defaults
    pub fn current_time(self, precision: Option<u32>) -> Result<String, MetaError> {
        let func = match self {
            Dialect::MySQL80 => {
                return Ok(match precision {
                    Some(p) => format!("(CURRENT_TIME({p}))"),
                    None => "(CURRENT_TIME)".to_string(),
                })
            }
            Dialect::Postgre11 => "LOCALTIME",
            Dialect::MySQL57 | Dialect::Oracle12 => {
                return Err(MetaError::UnsupportedDialect {
                    dialect: self,
                    what: "CURRENT_TIME column default".to_string(),
                })
            }
        };
        Ok(match precision {
            Some(p) => format!("{func}({p})"),
            None => func.to_string(),
        })
    }

    /// SQL literal for boolean true
    #[must_use]
    pub fn boolean_true(self) -> &'static str {
        match self.database() {
            Database::MySQL | Database::Postgre => "TRUE",
            Database::Oracle => "1",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::MySQL57 => "MySQL57",
            Dialect::MySQL80 => "MySQL80",
            Dialect::Oracle12 => "Oracle12",
            Dialect::Postgre11 => "Postgre11",
        };
        f.write_str(name)
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown dialect '{}', expected one of MySQL57, MySQL80, Oracle12, Postgre11",
                    s
                )
            })
    }
}

impl TryFrom<String> for Dialect {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
