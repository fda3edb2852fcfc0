//! Application-side value types of mapped fields

use serde::Deserialize;
use std::fmt;

/// The value type a field holds in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Decimal,
    String,
    Char,
    Bytes,
    LocalDate,
    LocalTime,
    LocalDateTime,
    OffsetDateTime,
    ZonedDateTime,
    OffsetTime,
    Year,
    Json,
    /// Enumeration persisted by its integer code
    CodeEnum,
}

impl HostType {
    /// True for time values that carry a UTC offset or zone id
    #[must_use]
    pub fn is_zoned(self) -> bool {
        matches!(
            self,
            HostType::OffsetDateTime | HostType::ZonedDateTime | HostType::OffsetTime
        )
    }

    /// True for values written as quoted text
    #[must_use]
    pub fn is_textual(self) -> bool {
        matches!(self, HostType::String | HostType::Char | HostType::Json)
    }

    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            HostType::I8 | HostType::I16 | HostType::I32 | HostType::I64 | HostType::CodeEnum
        )
    }

    /// True for values holding a date and a time of day
    #[must_use]
    pub fn is_date_time(self) -> bool {
        matches!(
            self,
            HostType::LocalDateTime | HostType::OffsetDateTime | HostType::ZonedDateTime
        )
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoned_types() {
        assert!(HostType::OffsetDateTime.is_zoned());
        assert!(HostType::ZonedDateTime.is_zoned());
        assert!(HostType::OffsetTime.is_zoned());
        assert!(!HostType::LocalDateTime.is_zoned());
    }

    #[test]
    fn test_deserialize_snake_case() {
        let host: HostType = serde_json::from_str("\"offset_date_time\"").unwrap();
        assert_eq!(host, HostType::OffsetDateTime);
        let host: HostType = serde_json::from_str("\"code_enum\"").unwrap();
        assert_eq!(host, HostType::CodeEnum);
    }
}
