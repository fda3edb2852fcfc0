//! Coarse classification of SQL data types.
//!
//! [`DataKind`] routes default-value formatting and migration comparison;
//! [`DataFamily`] is the top level of the tree.

/// Sub-kinds of the numeric family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Int,
    Float,
    Decimal,
}

/// Sub-kinds of the date/time family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeKind {
    /// Date plus time of day, with or without zone
    Timestamp,
    Date,
    Time,
    Year,
}

/// Classification of a SQL data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Number(NumberKind),
    Text,
    DateTime(TimeKind),
    Boolean,
    Binary,
    Json,
    Bit,
}

/// Top-level family of a [`DataKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFamily {
    Number,
    Text,
    DateTime,
    Boolean,
    Binary,
    Json,
    Bit,
}

impl DataKind {
    #[must_use]
    pub fn family(self) -> DataFamily {
        match self {
            DataKind::Number(_) => DataFamily::Number,
            DataKind::Text => DataFamily::Text,
            DataKind::DateTime(_) => DataFamily::DateTime,
            DataKind::Boolean => DataFamily::Boolean,
            DataKind::Binary => DataFamily::Binary,
            DataKind::Json => DataFamily::Json,
            DataKind::Bit => DataFamily::Bit,
        }
    }

    /// True when `self` is `other` or one of its sub-kinds
    #[must_use]
    pub fn is_in(self, other: DataFamily) -> bool {
        self.family() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_of_sub_kinds() {
        assert_eq!(DataKind::Number(NumberKind::Decimal).family(), DataFamily::Number);
        assert_eq!(DataKind::DateTime(TimeKind::Year).family(), DataFamily::DateTime);
        assert_eq!(DataKind::Text.family(), DataFamily::Text);
        assert!(DataKind::DateTime(TimeKind::Date).is_in(DataFamily::DateTime));
        assert!(!DataKind::Json.is_in(DataFamily::Text));
    }
}
