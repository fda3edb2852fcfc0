//! Harbor Migration Library
//!
//! Schema file loading and table ordering used by the `harbor-migrate` CLI.

pub mod dependency_ordering;
pub mod schema_file;
