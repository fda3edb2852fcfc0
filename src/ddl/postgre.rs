//! PostgreSQL DDL rendering

use super::{column_definition, comment_on_statements, ColumnLayout, DialectDdl};
use crate::default_value;
use crate::dialect::Dialect;
use crate::error::MetaError;
use crate::meta::{FieldMeta, TableMeta};

#[derive(Debug, Clone, Copy)]
pub struct PostgreDdl {
    dialect: Dialect,
}

impl PostgreDdl {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }
}

impl DialectDdl for PostgreDdl {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn column_layout(&self) -> ColumnLayout {
        ColumnLayout::DefaultFirst
    }

    fn identity_clause(&self) -> &'static str {
        "GENERATED BY DEFAULT AS IDENTITY"
    }

    fn key_definition(&self, table: &TableMeta) -> Vec<String> {
        vec![format!("PRIMARY KEY({})", table.primary_key().column())]
    }

    fn table_options(&self, _table: &TableMeta) -> String {
        String::new()
    }

    fn comment_statements(&self, table: &TableMeta) -> Vec<String> {
        comment_on_statements(table)
    }

    fn add_column(&self, field: &FieldMeta) -> Result<String, MetaError> {
        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            field.table_name(),
            column_definition(self, field)?
        ))
    }

    /// One `ALTER TABLE` with type, nullability and default sub-clauses
    fn modify_column(&self, field: &FieldMeta) -> Result<String, MetaError> {
        let column = field.column();
        let mut clauses = vec![format!(
            "ALTER COLUMN {} TYPE {}",
            column,
            self.data_type(field)?
        )];
        clauses.push(format!(
            "ALTER COLUMN {} {} NOT NULL",
            column,
            if field.nullable() { "DROP" } else { "SET" }
        ));
        if !field.auto_increment() {
            let default = default_value::resolve(field, self.dialect)?.and_then(|d| d.to_sql());
            clauses.push(match default {
                Some(default) => format!("ALTER COLUMN {column} SET DEFAULT {default}"),
                None => format!("ALTER COLUMN {column} DROP DEFAULT"),
            });
        }
        Ok(format!(
            "ALTER TABLE {} {}",
            field.table_name(),
            clauses.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::table_definition;
    use crate::meta::HostType;

    fn event() -> TableMeta {
        TableMeta::builder("Event", "event")
            .field(FieldMeta::id(HostType::I64).auto_increment(true))
            .field(FieldMeta::create_time())
            .field(FieldMeta::update_time())
            .field(FieldMeta::builder("happened_at", HostType::OffsetDateTime).precision(3))
            .field(
                FieldMeta::builder("score", HostType::Decimal)
                    .precision(8)
                    .default_value("0.0"),
            )
            .field(FieldMeta::builder("payload", HostType::Json).nullable(true))
            .build()
            .unwrap()
    }

    #[test]
    fn test_postgre_table_definition() {
        let sql = table_definition(&PostgreDdl::new(Dialect::Postgre11), &event()).unwrap();
        let expected = "CREATE TABLE event(\n\
            \x20   id BIGINT GENERATED BY DEFAULT AS IDENTITY NOT NULL,\n\
            \x20   create_time TIMESTAMP DEFAULT LOCALTIMESTAMP NOT NULL,\n\
            \x20   update_time TIMESTAMP DEFAULT LOCALTIMESTAMP NOT NULL,\n\
            \x20   happened_at TIMESTAMP(3) WITH TIME ZONE NOT NULL,\n\
            \x20   score DECIMAL(8,2) DEFAULT 0.0 NOT NULL,\n\
            \x20   payload JSONB NULL,\n\
            \x20   PRIMARY KEY(id)\n\
            )";
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_modify_column() {
        let table = event();
        let ddl = PostgreDdl::new(Dialect::Postgre11);
        assert_eq!(
            ddl.modify_column(table.field("score").unwrap()).unwrap(),
            "ALTER TABLE event ALTER COLUMN score TYPE DECIMAL(8,2), \
             ALTER COLUMN score SET NOT NULL, ALTER COLUMN score SET DEFAULT 0.0"
        );
        assert_eq!(
            ddl.modify_column(table.field("payload").unwrap()).unwrap(),
            "ALTER TABLE event ALTER COLUMN payload TYPE JSONB, \
             ALTER COLUMN payload DROP NOT NULL, ALTER COLUMN payload DROP DEFAULT"
        );
    }

    #[test]
    fn test_add_column() {
        let table = event();
        let ddl = PostgreDdl::new(Dialect::Postgre11);
        assert_eq!(
            ddl.add_column(table.field("payload").unwrap()).unwrap(),
            "ALTER TABLE event ADD COLUMN payload JSONB NULL"
        );
    }
}
