//! Dependency ordering for table creation
//!
//! Child tables share their primary key with the parent entity's table, so a
//! parent must be created first. This module:
//! - Builds dependency nodes from a schema registry
//! - Topologically sorts tables, dependencies first
//! - Validates that every dependency names a known table

use harbor::SchemaRegistry;
use std::collections::{HashMap, HashSet, VecDeque};

/// Table name and the tables it depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNode {
    pub name: String,
    pub dependencies: Vec<String>,
}

/// One node per registered table, in registration order
pub fn nodes_from_registry(registry: &SchemaRegistry) -> Vec<TableNode> {
    registry
        .iter()
        .map(|table| TableNode {
            name: table.name().to_string(),
            dependencies: registry
                .parent_of(table)
                .map(|parent| vec![parent.name().to_string()])
                .unwrap_or_default(),
        })
        .collect()
}

/// Topologically sort tables by their dependencies.
///
/// Returns table names with dependencies first. Tables that are ready at the
/// same time keep their input order.
pub fn topological_sort(tables: &[TableNode]) -> Result<Vec<String>, String> {
    // For each table, the tables depending on it
    let mut reverse_graph: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut in_degree: HashMap<&str, usize> = HashMap::new();

    for table in tables {
        in_degree.insert(&table.name, table.dependencies.len());
        reverse_graph.entry(&table.name).or_default();
    }
    for table in tables {
        for dep in &table.dependencies {
            if let Some(dependents) = reverse_graph.get_mut(dep.as_str()) {
                dependents.push(&table.name);
            }
        }
    }

    let mut queue: VecDeque<&str> = tables
        .iter()
        .filter(|t| t.dependencies.is_empty())
        .map(|t| t.name.as_str())
        .collect();
    let mut result = Vec::with_capacity(tables.len());

    while let Some(current) = queue.pop_front() {
        result.push(current.to_string());
        if let Some(dependents) = reverse_graph.get(current) {
            for dependent in dependents {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }
    }

    if result.len() != tables.len() {
        return Err("Circular dependency detected between tables".to_string());
    }
    Ok(result)
}

/// Validate that every dependency points to a table in `tables`
pub fn validate_references(tables: &[TableNode]) -> Result<(), String> {
    let names: HashSet<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    let errors: Vec<String> = tables
        .iter()
        .flat_map(|table| {
            table
                .dependencies
                .iter()
                .filter(|dep| !names.contains(dep.as_str()))
                .map(move |dep| {
                    format!(
                        "Table '{}' depends on '{}' which is not part of this schema",
                        table.name, dep
                    )
                })
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("\n"))
    }
}
