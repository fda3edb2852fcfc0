//! DDL statement generation.
//!
//! One generation path ([`table_definition`], [`column_definition`],
//! [`create_table`]) is parameterized by a [`DialectDdl`] strategy that renders
//! the dialect-specific pieces: data types, key definitions, table options,
//! comments and column alterations.
//!
//! # Example
//!
//! ```rust
//! use harbor::ddl::{self, MySqlDdl};
//! use harbor::dialect::Dialect;
//! use harbor::meta::{FieldMeta, HostType, TableMeta};
//!
//! let table = TableMeta::builder("Account", "account")
//!     .field(FieldMeta::id(HostType::I64).auto_increment(true))
//!     .field(FieldMeta::create_time())
//!     .field(FieldMeta::update_time())
//!     .build()
//!     .unwrap();
//! let sql = ddl::table_definition(&MySqlDdl::new(Dialect::MySQL80), &table).unwrap();
//! assert!(sql.starts_with("CREATE TABLE account("));
//! ```

pub mod mysql;
pub mod oracle;
pub mod postgre;

pub use mysql::MySqlDdl;
pub use oracle::OracleDdl;
pub use postgre::PostgreDdl;

use crate::config::DdlConfig;
use crate::default_value::{self, quote};
use crate::dialect::{Database, Dialect};
use crate::error::MetaError;
use crate::meta::mapping::{check_precision, data_type};
use crate::meta::{FieldMeta, IndexMeta, TableMeta};
#[cfg(feature = "tracing")]
use crate::tracing_helpers;

/// Indentation of column and key lines inside CREATE TABLE
const INDENT: &str = "    ";

/// Order of the DEFAULT and NULL clauses in a column definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// `<type> NOT NULL DEFAULT <d> <identity>`
    NullFirst,
    /// `<type> DEFAULT <d> | <identity> NOT NULL`
    DefaultFirst,
}

/// Dialect-specific rendering hooks used by the generic DDL functions
pub trait DialectDdl {
    fn dialect(&self) -> Dialect;

    /// Placement of DEFAULT relative to NULL / NOT NULL
    fn column_layout(&self) -> ColumnLayout {
        ColumnLayout::NullFirst
    }

    /// Data type clause of `field`, guarded by dialect support and precision limits
    fn data_type(&self, field: &FieldMeta) -> Result<String, MetaError> {
        let sql_type = data_type(field, self.dialect())?;
        check_precision(field, &sql_type)?;
        sql_type.checked_type_name(self.dialect(), field.precision(), field.scale())
    }

    /// Clause marking a database-generated key column
    fn identity_clause(&self) -> &'static str;

    /// Inline comment clause of a column, if the dialect supports one
    fn column_comment_clause(&self, _field: &FieldMeta) -> Option<String> {
        None
    }

    /// Key lines closing the CREATE TABLE body
    fn key_definition(&self, table: &TableMeta) -> Vec<String>;

    /// Text after the closing parenthesis, may be empty
    fn table_options(&self, table: &TableMeta) -> String;

    /// Standalone statement creating one index of `table`
    fn create_index(&self, table: &TableMeta, index: &IndexMeta) -> String {
        format!(
            "CREATE {}INDEX {} ON {}({})",
            if index.unique { "UNIQUE " } else { "" },
            index.name,
            table.name(),
            table.index_columns(index).join(",")
        )
    }

    /// Statements creating the table's declared indexes after CREATE TABLE
    fn index_statements(&self, table: &TableMeta) -> Vec<String> {
        table
            .indexes()
            .iter()
            .map(|index| self.create_index(table, index))
            .collect()
    }

    /// Statements attaching table and column comments
    fn comment_statements(&self, _table: &TableMeta) -> Vec<String> {
        Vec::new()
    }

    /// `ALTER TABLE` statement adding `field` to its table
    fn add_column(&self, _field: &FieldMeta) -> Result<String, MetaError> {
        Err(MetaError::UnsupportedOperation {
            operation: "ADD COLUMN",
            dialect: self.dialect(),
        })
    }

    /// `ALTER TABLE` statement(s) bringing an existing column in line with `field`
    fn modify_column(&self, _field: &FieldMeta) -> Result<String, MetaError> {
        Err(MetaError::UnsupportedOperation {
            operation: "MODIFY COLUMN",
            dialect: self.dialect(),
        })
    }
}

/// Strategy for `dialect` with default table options
pub fn for_dialect(dialect: Dialect) -> Box<dyn DialectDdl> {
    match dialect.database() {
        Database::MySQL => Box::new(MySqlDdl::new(dialect)),
        Database::Postgre => Box::new(PostgreDdl::new(dialect)),
        Database::Oracle => Box::new(OracleDdl::new(dialect)),
    }
}

/// Strategy for the configured dialect and table options
pub fn for_config(config: &DdlConfig) -> Box<dyn DialectDdl> {
    match config.dialect.database() {
        Database::MySQL => Box::new(
            MySqlDdl::new(config.dialect)
                .with_engine(&config.engine)
                .with_charset(&config.charset),
        ),
        Database::Postgre => Box::new(PostgreDdl::new(config.dialect)),
        Database::Oracle => Box::new(OracleDdl::new(config.dialect)),
    }
}

/// Column definition of `field`, e.g. `balance DECIMAL(14,2) NOT NULL DEFAULT 0.00 COMMENT ''`
pub fn column_definition(ddl: &dyn DialectDdl, field: &FieldMeta) -> Result<String, MetaError> {
    let mut sql = format!("{} {}", field.column(), ddl.data_type(field)?);
    let null_clause = if field.nullable() { "NULL" } else { "NOT NULL" };
    let default = default_value::resolve(field, ddl.dialect())?.and_then(|d| d.to_sql());
    let identity = field.auto_increment().then(|| ddl.identity_clause());

    match ddl.column_layout() {
        ColumnLayout::NullFirst => {
            push_clause(&mut sql, Some(null_clause));
            if let Some(default) = &default {
                sql.push_str(" DEFAULT ");
                sql.push_str(default);
            }
            push_clause(&mut sql, identity);
        }
        ColumnLayout::DefaultFirst => {
            if let Some(identity) = identity {
                push_clause(&mut sql, Some(identity));
            } else if let Some(default) = &default {
                sql.push_str(" DEFAULT ");
                sql.push_str(default);
            }
            push_clause(&mut sql, Some(null_clause));
        }
    }
    if let Some(comment) = ddl.column_comment_clause(field) {
        sql.push(' ');
        sql.push_str(&comment);
    }
    Ok(sql)
}

fn push_clause(sql: &mut String, clause: Option<&str>) {
    if let Some(clause) = clause {
        sql.push(' ');
        sql.push_str(clause);
    }
}

/// CREATE TABLE statement for `table`; columns follow the table's field order
pub fn table_definition(ddl: &dyn DialectDdl, table: &TableMeta) -> Result<String, MetaError> {
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::table_definition_span(table.name(), ddl.dialect()).entered();

    let mut lines = Vec::with_capacity(table.fields().len() + 1);
    for field in table.fields() {
        lines.push(format!("{}{}", INDENT, column_definition(ddl, field)?));
    }
    for key in ddl.key_definition(table) {
        lines.push(format!("{}{}", INDENT, key));
    }

    let mut sql = format!("CREATE TABLE {}(\n", table.name());
    sql.push_str(&lines.join(",\n"));
    sql.push_str("\n)");
    let options = ddl.table_options(table);
    if !options.is_empty() {
        sql.push(' ');
        sql.push_str(&options);
    }
    log::debug!("Generated {} definition of table {}", ddl.dialect(), table.name());
    Ok(sql)
}

/// CREATE TABLE followed by the table's index and comment statements
pub fn create_table(ddl: &dyn DialectDdl, table: &TableMeta) -> Result<Vec<String>, MetaError> {
    let mut statements = vec![table_definition(ddl, table)?];
    statements.extend(ddl.index_statements(table));
    statements.extend(ddl.comment_statements(table));
    Ok(statements)
}

/// `COMMENT ON TABLE` / `COMMENT ON COLUMN` statements for non-empty comments
pub(crate) fn comment_on_statements(table: &TableMeta) -> Vec<String> {
    let mut statements = Vec::new();
    if !table.comment().is_empty() {
        statements.push(format!(
            "COMMENT ON TABLE {} IS {}",
            table.name(),
            quote(table.comment())
        ));
    }
    for field in table.fields().iter().filter(|f| !f.comment().is_empty()) {
        statements.push(format!(
            "COMMENT ON COLUMN {}.{} IS {}",
            table.name(),
            field.column(),
            quote(field.comment())
        ));
    }
    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::HostType;

    fn ticket() -> TableMeta {
        TableMeta::builder("Ticket", "ticket")
            .comment("support ticket")
            .field(FieldMeta::id(HostType::I64).auto_increment(true))
            .field(FieldMeta::create_time())
            .field(FieldMeta::update_time())
            .field(FieldMeta::builder("subject", HostType::String).precision(120).comment("subject"))
            .field(FieldMeta::builder("closed_at", HostType::LocalDateTime).nullable(true))
            .index("", &["subject"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_for_dialect_selects_strategy() {
        for dialect in Dialect::ALL {
            assert_eq!(for_dialect(dialect).dialect(), dialect);
        }
    }

    #[test]
    fn test_nullable_column_without_default() {
        let table = ticket();
        let ddl = MySqlDdl::new(Dialect::MySQL80);
        let sql = column_definition(&ddl, table.field("closed_at").unwrap()).unwrap();
        assert_eq!(sql, "closed_at DATETIME NULL COMMENT ''");
    }

    #[test]
    fn test_default_first_layout() {
        let table = ticket();
        let ddl = PostgreDdl::new(Dialect::Postgre11);
        assert_eq!(
            column_definition(&ddl, table.field("id").unwrap()).unwrap(),
            "id BIGINT GENERATED BY DEFAULT AS IDENTITY NOT NULL"
        );
        assert_eq!(
            column_definition(&ddl, table.field("create_time").unwrap()).unwrap(),
            "create_time TIMESTAMP DEFAULT LOCALTIMESTAMP NOT NULL"
        );
    }

    #[test]
    fn test_create_table_appends_index_and_comments() {
        let table = ticket();
        let statements = create_table(&PostgreDdl::new(Dialect::Postgre11), &table).unwrap();
        assert_eq!(statements.len(), 1 + 1 + 5);
        assert_eq!(statements[1], "CREATE INDEX idx_ticket_subject ON ticket(subject)");
        assert_eq!(statements[2], "COMMENT ON TABLE ticket IS 'support ticket'");
        assert!(statements.contains(&"COMMENT ON COLUMN ticket.subject IS 'subject'".to_string()));
    }

    #[test]
    fn test_oracle_alterations_unsupported() {
        let table = ticket();
        let ddl = OracleDdl::new(Dialect::Oracle12);
        let field = table.field("subject").unwrap();
        assert_eq!(
            ddl.add_column(field).unwrap_err(),
            MetaError::UnsupportedOperation {
                operation: "ADD COLUMN",
                dialect: Dialect::Oracle12
            }
        );
        assert!(matches!(
            ddl.modify_column(field),
            Err(MetaError::UnsupportedOperation { .. })
        ));
    }
}
