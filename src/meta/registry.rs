//! Read-only registry of table metadata.
//!
//! Built once after schema loading and then passed by reference to every
//! component that needs table lookups.

use super::table::{Inheritance, TableMeta};
use crate::error::MetaError;
use std::collections::HashMap;

/// Arena of [`TableMeta`] in registration order, keyed by entity and table name
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    tables: Vec<TableMeta>,
    by_entity: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Register `tables`, checking cross-table invariants
    pub fn new(tables: Vec<TableMeta>) -> Result<Self, MetaError> {
        let mut by_entity = HashMap::new();
        let mut by_name = HashMap::new();
        for (i, table) in tables.iter().enumerate() {
            if by_entity.insert(table.entity().to_string(), i).is_some() {
                return Err(MetaError::table(table.entity(), "entity registered twice"));
            }
            if by_name.insert(table.name().to_lowercase(), i).is_some() {
                return Err(MetaError::table(
                    table.entity(),
                    format!("table name '{}' registered twice", table.name()),
                ));
            }
        }
        let registry = Self {
            tables,
            by_entity,
            by_name,
        };
        registry.check_hierarchy()?;
        log::debug!("Schema registry holds {} tables", registry.tables.len());
        Ok(registry)
    }

    fn check_hierarchy(&self) -> Result<(), MetaError> {
        let mut codes: HashMap<(&str, i32), &str> = HashMap::new();
        for table in &self.tables {
            if let Inheritance::Child {
                parent,
                discriminator_value,
            } = table.inheritance()
            {
                let parent_table = self.get(parent).ok_or_else(|| {
                    MetaError::table(
                        table.entity(),
                        format!("parent entity '{parent}' is not registered"),
                    )
                })?;
                if !matches!(parent_table.inheritance(), Inheritance::Parent { .. }) {
                    return Err(MetaError::table(
                        table.entity(),
                        format!("entity '{parent}' is not declared as a parent"),
                    ));
                }
                if parent_table.primary_key().host_type() != table.primary_key().host_type() {
                    return Err(MetaError::definition(
                        table.entity(),
                        table.primary_key().property(),
                        format!("id type differs from parent '{parent}'"),
                    ));
                }
                if let Some(other) = codes.insert((parent.as_str(), *discriminator_value), table.entity())
                {
                    return Err(MetaError::table(
                        table.entity(),
                        format!(
                            "discriminator value {} already used by '{}'",
                            discriminator_value, other
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Table of `entity`
    pub fn get(&self, entity: &str) -> Option<&TableMeta> {
        self.by_entity.get(entity).map(|&i| &self.tables[i])
    }

    /// Table by SQL name, ignoring case
    pub fn table_by_name(&self, name: &str) -> Option<&TableMeta> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&i| &self.tables[i])
    }

    /// Tables in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TableMeta> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Parent table of a child table
    pub fn parent_of(&self, table: &TableMeta) -> Option<&TableMeta> {
        table.parent_entity().and_then(|p| self.get(p))
    }

    /// Child tables of a parent table, in registration order
    pub fn children_of<'a>(&'a self, table: &'a TableMeta) -> impl Iterator<Item = &'a TableMeta> {
        self.tables
            .iter()
            .filter(move |t| t.parent_entity() == Some(table.entity()))
    }
}
