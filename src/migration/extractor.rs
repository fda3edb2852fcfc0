//! Sources of live schema information.
//!
//! Extraction runs strictly before any comparison; the differ only ever sees a
//! finished [`SchemaInfo`].

use super::error::MigrationError;
use super::info::{ColumnInfo, IndexInfo, SchemaInfo, TableInfo};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Produces the live schema of one database
pub trait SchemaExtractor {
    fn extract(&self) -> Result<SchemaInfo, MigrationError>;
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    catalog: Option<String>,
    #[serde(default)]
    schema: Option<String>,
    #[serde(default)]
    tables: Vec<SnapshotTable>,
}

#[derive(Debug, Deserialize)]
struct SnapshotTable {
    name: String,
    #[serde(default)]
    columns: Vec<ColumnInfo>,
    #[serde(default)]
    indexes: Vec<IndexInfo>,
}

/// Reads a JSON snapshot of a live schema:
///
/// ```json
/// { "catalog": "def", "schema": "shop", "tables": [ { "name": "account",
///     "columns": [ { "name": "balance", "type_name": "decimal", "column_size": 14, "scale": 2 } ],
///     "indexes": [ { "name": "uni_account_no", "unique": true, "columns": ["no"] } ] } ] }
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotExtractor {
    path: PathBuf,
}

impl SnapshotExtractor {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse snapshot JSON text
    pub fn parse(json: &str) -> Result<SchemaInfo, MigrationError> {
        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|e| MigrationError::SchemaInfo {
                table: String::new(),
                column: None,
                message: format!("invalid snapshot: {}", e),
            })?;

        let mut schema = SchemaInfo::located(snapshot.catalog, snapshot.schema);
        for table in snapshot.tables {
            if schema.table(&table.name).is_some() {
                return Err(MigrationError::SchemaInfo {
                    table: table.name,
                    column: None,
                    message: "table listed twice".to_string(),
                });
            }
            let mut info = TableInfo::new(&table.name);
            for mut column in table.columns {
                if column.table.is_empty() {
                    column.table = table.name.clone();
                } else if !column.table.eq_ignore_ascii_case(&table.name) {
                    return Err(MigrationError::SchemaInfo {
                        table: table.name,
                        column: Some(column.name),
                        message: format!("column row belongs to table '{}'", column.table),
                    });
                }
                info.insert_column(column);
            }
            for mut index in table.indexes {
                if index.table.is_empty() {
                    index.table = table.name.clone();
                } else if !index.table.eq_ignore_ascii_case(&table.name) {
                    return Err(MigrationError::SchemaInfo {
                        table: table.name,
                        column: None,
                        message: format!(
                            "index '{}' belongs to table '{}'",
                            index.name, index.table
                        ),
                    });
                }
                if let Some(missing) = index.columns.iter().find(|c| info.column(c).is_none()) {
                    return Err(MigrationError::SchemaInfo {
                        table: table.name,
                        column: Some(missing.clone()),
                        message: format!("index '{}' references an unknown column", index.name),
                    });
                }
                info.insert_index(index);
            }
            schema.insert_table(info);
        }
        Ok(schema)
    }
}

impl SchemaExtractor for SnapshotExtractor {
    fn extract(&self) -> Result<SchemaInfo, MigrationError> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            MigrationError::Io(format!("{}: {}", self.path.display(), e))
        })?;
        let schema = Self::parse(&json)?;
        log::debug!(
            "Extracted {} tables from snapshot {}",
            schema.len(),
            self.path.display()
        );
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{ "tables": [
        { "name": "ACCOUNT",
          "columns": [
            { "name": "ID", "type_name": "bigint" },
            { "table": "account", "name": "BALANCE", "type_name": "decimal",
              "column_size": 14, "scale": 2, "default_value": "0.00" }
          ],
          "indexes": [ { "name": "IDX_BALANCE", "columns": ["balance"] } ] }
    ] }"#;

    #[test]
    fn test_parse_snapshot() {
        let schema = SnapshotExtractor::parse(SNAPSHOT).unwrap();
        let account = schema.table("account").unwrap();
        let id = account.column("id").unwrap();
        assert_eq!(id.table, "ACCOUNT");
        assert!(!id.nullable);
        let balance = account.column("balance").unwrap();
        assert_eq!(balance.default_value.as_deref(), Some("0.00"));
        assert_eq!(balance.column_size, Some(14));
        assert!(!account.index("idx_balance").unwrap().unique);
    }

    #[test]
    fn test_foreign_table_row_rejected() {
        let json = r#"{ "tables": [ { "name": "a",
            "columns": [ { "table": "b", "name": "x", "type_name": "int" } ] } ] }"#;
        let err = SnapshotExtractor::parse(json).unwrap_err();
        assert_eq!(
            err,
            MigrationError::SchemaInfo {
                table: "a".to_string(),
                column: Some("x".to_string()),
                message: "column row belongs to table 'b'".to_string(),
            }
        );
    }

    #[test]
    fn test_location_comments_and_index_owner() {
        let json = r#"{ "catalog": "def", "schema": "shop", "tables": [ { "name": "coupon",
            "columns": [ { "name": "code", "type_name": "varchar", "comment": "coupon code" } ],
            "indexes": [ { "name": "uni_coupon_code", "unique": true, "columns": ["code"] } ] } ] }"#;
        let schema = SnapshotExtractor::parse(json).unwrap();
        assert_eq!(schema.catalog(), Some("def"));
        assert_eq!(schema.schema(), Some("shop"));
        let coupon = schema.table("coupon").unwrap();
        assert_eq!(coupon.column("code").unwrap().comment.as_deref(), Some("coupon code"));
        assert_eq!(coupon.index("uni_coupon_code").unwrap().table, "coupon");

        let bare = SnapshotExtractor::parse(SNAPSHOT).unwrap();
        assert_eq!(bare.catalog(), None);
        assert_eq!(bare.table("account").unwrap().column("id").unwrap().comment, None);
    }

    #[test]
    fn test_foreign_table_index_rejected() {
        let json = r#"{ "tables": [ { "name": "a",
            "columns": [ { "name": "x", "type_name": "int" } ],
            "indexes": [ { "table": "b", "name": "idx_x", "columns": ["x"] } ] } ] }"#;
        let err = SnapshotExtractor::parse(json).unwrap_err();
        assert_eq!(
            err,
            MigrationError::SchemaInfo {
                table: "a".to_string(),
                column: None,
                message: "index 'idx_x' belongs to table 'b'".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_snapshot() {
        let err = SnapshotExtractor::parse("{ \"tables\": 3 }").unwrap_err();
        assert!(err.to_string().starts_with("Schema info error: invalid snapshot"));
    }

    #[test]
    fn test_extract_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        let schema = SnapshotExtractor::new(file.path()).extract().unwrap();
        assert_eq!(schema.len(), 1);

        let missing = SnapshotExtractor::new("does/not/exist.json").extract();
        assert!(matches!(missing, Err(MigrationError::Io(_))));
    }
}
