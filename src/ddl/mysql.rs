//! MySQL DDL rendering

use super::{column_definition, DialectDdl};
use crate::config::{DEFAULT_CHARSET, DEFAULT_ENGINE};
use crate::default_value::quote;
use crate::dialect::Dialect;
use crate::error::MetaError;
use crate::meta::{FieldMeta, TableMeta};

/// MySQL 5.7 / 8.0 strategy with inline keys and comments
#[derive(Debug, Clone)]
pub struct MySqlDdl {
    dialect: Dialect,
    engine: String,
    charset: String,
}

impl MySqlDdl {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            engine: DEFAULT_ENGINE.to_string(),
            charset: DEFAULT_CHARSET.to_string(),
        }
    }

    /// Storage engine of created tables
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Character set used when a table declares none
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }
}

impl DialectDdl for MySqlDdl {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn identity_clause(&self) -> &'static str {
        "AUTO_INCREMENT"
    }

    fn column_comment_clause(&self, field: &FieldMeta) -> Option<String> {
        Some(format!("COMMENT {}", quote(field.comment())))
    }

    fn key_definition(&self, table: &TableMeta) -> Vec<String> {
        let mut keys = vec![format!("PRIMARY KEY({})", table.primary_key().column())];
        for index in table.indexes() {
            keys.push(format!(
                "{}KEY {}({})",
                if index.unique { "UNIQUE " } else { "" },
                index.name,
                table.index_columns(index).join(",")
            ));
        }
        keys
    }

    fn table_options(&self, table: &TableMeta) -> String {
        format!(
            "ENGINE = {} CHARACTER SET = {} COMMENT = {}",
            self.engine,
            table.charset().unwrap_or(&self.charset),
            quote(table.comment())
        )
    }

    fn index_statements(&self, _table: &TableMeta) -> Vec<String> {
        Vec::new()
    }

    fn add_column(&self, field: &FieldMeta) -> Result<String, MetaError> {
        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            field.table_name(),
            column_definition(self, field)?
        ))
    }

    fn modify_column(&self, field: &FieldMeta) -> Result<String, MetaError> {
        Ok(format!(
            "ALTER TABLE {} MODIFY COLUMN {}",
            field.table_name(),
            column_definition(self, field)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::{create_table, table_definition};
    use crate::meta::{HostType, MySqlType};

    fn member() -> TableMeta {
        TableMeta::builder("Member", "member")
            .comment("club member")
            .charset("latin1")
            .soft_delete(true)
            .field(FieldMeta::id(HostType::I64).auto_increment(true))
            .field(FieldMeta::create_time().precision(6))
            .field(FieldMeta::update_time())
            .field(FieldMeta::visible())
            .field(FieldMeta::builder("email", HostType::String).precision(128))
            .field(FieldMeta::builder("nick", HostType::String).precision(32).default_value(""))
            .field(
                FieldMeta::builder("bio", HostType::String)
                    .sql_type(MySqlType::Text)
                    .nullable(true),
            )
            .unique("", &["email"])
            .index("idx_nick", &["nick"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_mysql_table_definition() {
        let sql = table_definition(&MySqlDdl::new(Dialect::MySQL80), &member()).unwrap();
        let expected = "CREATE TABLE member(\n\
            \x20   id BIGINT NOT NULL AUTO_INCREMENT COMMENT 'primary key',\n\
            \x20   create_time DATETIME(6) NOT NULL DEFAULT NOW(6) COMMENT 'create time',\n\
            \x20   update_time DATETIME NOT NULL DEFAULT NOW() COMMENT 'update time',\n\
            \x20   visible BOOLEAN NOT NULL DEFAULT TRUE COMMENT 'visible for soft delete',\n\
            \x20   email VARCHAR(128) NOT NULL COMMENT '',\n\
            \x20   nick VARCHAR(32) NOT NULL DEFAULT '' COMMENT '',\n\
            \x20   bio TEXT NULL COMMENT '',\n\
            \x20   PRIMARY KEY(id),\n\
            \x20   UNIQUE KEY uni_member_email(email),\n\
            \x20   KEY idx_nick(nick)\n\
            ) ENGINE = InnoDB CHARACTER SET = latin1 COMMENT = 'club member'";
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_indexes_stay_inline() {
        let statements = create_table(&MySqlDdl::new(Dialect::MySQL57), &member()).unwrap();
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_engine_and_charset_options() {
        let ddl = MySqlDdl::new(Dialect::MySQL80)
            .with_engine("MyISAM")
            .with_charset("utf8");
        let table = TableMeta::builder("Tag", "tag")
            .immutable(true)
            .field(FieldMeta::id(HostType::I32))
            .field(FieldMeta::create_time())
            .build()
            .unwrap();
        assert_eq!(
            ddl.table_options(&table),
            "ENGINE = MyISAM CHARACTER SET = utf8 COMMENT = ''"
        );
    }

    #[test]
    fn test_add_and_modify_column() {
        let table = member();
        let ddl = MySqlDdl::new(Dialect::MySQL80);
        let email = table.field("email").unwrap();
        assert_eq!(
            ddl.add_column(email).unwrap(),
            "ALTER TABLE member ADD COLUMN email VARCHAR(128) NOT NULL COMMENT ''"
        );
        assert_eq!(
            ddl.modify_column(email).unwrap(),
            "ALTER TABLE member MODIFY COLUMN email VARCHAR(128) NOT NULL COMMENT ''"
        );
    }
}
