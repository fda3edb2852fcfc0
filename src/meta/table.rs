//! Table metadata and its validating builder

use super::field::{
    is_reserved, FieldBuilder, FieldMeta, UpdateMode, CREATE_TIME, ID, UPDATE_TIME, VERSION,
    VISIBLE,
};
use super::host_type::HostType;
use crate::error::MetaError;
use std::collections::HashSet;

/// Position of a table in a single-table-per-class inheritance tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inheritance {
    /// Standalone table
    Simple,
    /// Root of a hierarchy; `discriminator` is the property holding the child code
    Parent { discriminator: String },
    /// Table sharing its primary key with the parent entity's table
    Child {
        parent: String,
        discriminator_value: i32,
    },
}

/// Declared index over one or more properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMeta {
    pub name: String,
    pub unique: bool,
    /// Property names in index column order
    pub properties: Vec<String>,
}

/// Immutable description of one mapped table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMeta {
    entity: String,
    name: String,
    comment: String,
    charset: Option<String>,
    immutable: bool,
    versioned: bool,
    soft_delete: bool,
    fields: Vec<FieldMeta>,
    primary_key: usize,
    indexes: Vec<IndexMeta>,
    inheritance: Inheritance,
}

impl TableMeta {
    /// Start describing the table `name` backing `entity`
    pub fn builder(entity: impl Into<String>, name: impl Into<String>) -> TableBuilder {
        TableBuilder {
            entity: entity.into(),
            name: name.into(),
            comment: String::new(),
            charset: None,
            immutable: false,
            versioned: false,
            soft_delete: false,
            fields: Vec::new(),
            indexes: Vec::new(),
            inheritance: Inheritance::Simple,
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub fn immutable(&self) -> bool {
        self.immutable
    }

    /// Whether rows carry an optimistic-lock `version`
    pub fn versioned(&self) -> bool {
        self.versioned
    }

    /// Whether rows carry a `visible` flag
    pub fn soft_delete(&self) -> bool {
        self.soft_delete
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    pub fn field(&self, property: &str) -> Option<&FieldMeta> {
        self.fields.iter().find(|f| f.property == property)
    }

    /// Field by column name, ignoring case
    pub fn field_by_column(&self, column: &str) -> Option<&FieldMeta> {
        self.fields
            .iter()
            .find(|f| f.column.eq_ignore_ascii_case(column))
    }

    pub fn primary_key(&self) -> &FieldMeta {
        &self.fields[self.primary_key]
    }

    pub fn indexes(&self) -> &[IndexMeta] {
        &self.indexes
    }

    pub fn inheritance(&self) -> &Inheritance {
        &self.inheritance
    }

    /// Discriminator field of a parent table
    pub fn discriminator(&self) -> Option<&FieldMeta> {
        match &self.inheritance {
            Inheritance::Parent { discriminator } => self.field(discriminator),
            _ => None,
        }
    }

    /// Parent entity of a child table
    pub fn parent_entity(&self) -> Option<&str> {
        match &self.inheritance {
            Inheritance::Child { parent, .. } => Some(parent),
            _ => None,
        }
    }

    /// Column names of an index, in index order
    pub fn index_columns(&self, index: &IndexMeta) -> Vec<&str> {
        index
            .properties
            .iter()
            .filter_map(|p| self.field(p))
            .map(FieldMeta::column)
            .collect()
    }

    /// Copy of this table whose fields follow `order` (property names).
    ///
    /// Properties missing from `order` keep their relative position after the
    /// listed ones.
    pub fn reordered(&self, order: &[&str]) -> Result<TableMeta, MetaError> {
        let mut seen = HashSet::with_capacity(order.len());
        for property in order {
            if self.field(property).is_none() {
                return Err(MetaError::table(
                    &self.entity,
                    format!("cannot reorder unknown property '{property}'"),
                ));
            }
            if !seen.insert(*property) {
                return Err(MetaError::table(
                    &self.entity,
                    format!("property '{property}' listed twice in reorder"),
                ));
            }
        }
        let mut fields: Vec<FieldMeta> = order
            .iter()
            .filter_map(|p| self.field(p).cloned())
            .collect();
        fields.extend(
            self.fields
                .iter()
                .filter(|f| !order.contains(&f.property.as_str()))
                .cloned(),
        );
        let primary_key = fields
            .iter()
            .position(|f| f.primary_key)
            .unwrap_or(self.primary_key);
        Ok(TableMeta {
            fields,
            primary_key,
            ..self.clone()
        })
    }
}

/// Collects table metadata and validates it on [`build`](TableBuilder::build)
#[derive(Debug, Clone)]
pub struct TableBuilder {
    entity: String,
    name: String,
    comment: String,
    charset: Option<String>,
    immutable: bool,
    versioned: bool,
    soft_delete: bool,
    fields: Vec<FieldBuilder>,
    indexes: Vec<IndexMeta>,
    inheritance: Inheritance,
}

impl TableBuilder {
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Rows are never updated
    pub fn immutable(mut self, immutable: bool) -> Self {
        self.immutable = immutable;
        self
    }

    pub fn versioned(mut self, versioned: bool) -> Self {
        self.versioned = versioned;
        self
    }

    pub fn soft_delete(mut self, soft_delete: bool) -> Self {
        self.soft_delete = soft_delete;
        self
    }

    pub fn field(mut self, field: FieldBuilder) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a non-unique index; an empty name is generated from the table and properties
    pub fn index(self, name: &str, properties: &[&str]) -> Self {
        self.push_index(name, false, properties)
    }

    /// Add a unique index; an empty name is generated from the table and properties
    pub fn unique(self, name: &str, properties: &[&str]) -> Self {
        self.push_index(name, true, properties)
    }

    /// Make this table the root of an inheritance tree
    pub fn parent(mut self, discriminator: impl Into<String>) -> Self {
        self.inheritance = Inheritance::Parent {
            discriminator: discriminator.into(),
        };
        self
    }

    /// Make this table a child of `parent_entity`
    pub fn child_of(mut self, parent_entity: impl Into<String>, discriminator_value: i32) -> Self {
        self.inheritance = Inheritance::Child {
            parent: parent_entity.into(),
            discriminator_value,
        };
        self
    }

    fn push_index(mut self, name: &str, unique: bool, properties: &[&str]) -> Self {
        let name = if name.is_empty() {
            let prefix = if unique { "uni" } else { "idx" };
            format!("{}_{}_{}", prefix, self.name, properties.join("_"))
        } else {
            name.to_string()
        };
        self.indexes.push(IndexMeta {
            name,
            unique,
            properties: properties.iter().map(|p| p.to_string()).collect(),
        });
        self
    }

    /// Validate and freeze the table
    pub fn build(self) -> Result<TableMeta, MetaError> {
        let entity = self.entity.clone();
        if self.name.trim().is_empty() {
            return Err(MetaError::table(&entity, "table name is empty"));
        }
        if self.fields.is_empty() {
            return Err(MetaError::table(&entity, "table has no fields"));
        }

        let mut properties = HashSet::new();
        let mut columns = HashSet::new();
        for field in &self.fields {
            if !properties.insert(field.property.as_str()) {
                return Err(MetaError::definition(
                    &entity,
                    &field.property,
                    "duplicate property",
                ));
            }
            if !columns.insert(field.column_name().to_lowercase()) {
                return Err(MetaError::definition(
                    &entity,
                    &field.property,
                    format!("duplicate column '{}'", field.column_name()),
                ));
            }
            if field.auto_increment && field.property != ID {
                return Err(MetaError::definition(
                    &entity,
                    &field.property,
                    "only the primary key can auto increment",
                ));
            }
            check_precision_pair(&entity, field)?;
            check_reserved_host_type(&entity, field)?;
        }

        self.check_required_fields(&properties)?;
        self.check_inheritance()?;
        self.check_indexes(&properties)?;

        let fields: Vec<FieldMeta> = self
            .fields
            .iter()
            .map(|field| self.freeze_field(field))
            .collect();
        let primary_key = fields
            .iter()
            .position(|f| f.primary_key)
            .ok_or_else(|| MetaError::table(&entity, "table has no primary key field"))?;

        log::debug!(
            "Built table meta {} for entity {} with {} fields",
            self.name,
            entity,
            fields.len()
        );

        Ok(TableMeta {
            entity: self.entity,
            name: self.name,
            comment: self.comment,
            charset: self.charset,
            immutable: self.immutable,
            versioned: self.versioned,
            soft_delete: self.soft_delete,
            fields,
            primary_key,
            indexes: self.indexes,
            inheritance: self.inheritance,
        })
    }

    fn check_required_fields(&self, properties: &HashSet<&str>) -> Result<(), MetaError> {
        if !properties.contains(ID) {
            return Err(MetaError::table(&self.entity, "missing required field 'id'"));
        }
        let is_child = matches!(self.inheritance, Inheritance::Child { .. });
        if is_child {
            if let Some(extra) = [CREATE_TIME, UPDATE_TIME, VERSION, VISIBLE]
                .into_iter()
                .find(|p| properties.contains(p))
            {
                return Err(MetaError::definition(
                    &self.entity,
                    extra,
                    "child table must not redeclare a field owned by its parent",
                ));
            }
            return Ok(());
        }

        let mut required = vec![CREATE_TIME];
        if !self.immutable {
            required.push(UPDATE_TIME);
        }
        if self.versioned {
            required.push(VERSION);
        }
        if self.soft_delete {
            required.push(VISIBLE);
        }
        for property in required {
            if !properties.contains(property) {
                return Err(MetaError::table(
                    &self.entity,
                    format!("missing required field '{property}'"),
                ));
            }
        }
        if !self.versioned && properties.contains(VERSION) {
            return Err(MetaError::definition(
                &self.entity,
                VERSION,
                "version field declared on a table that is not versioned",
            ));
        }
        if !self.soft_delete && properties.contains(VISIBLE) {
            return Err(MetaError::definition(
                &self.entity,
                VISIBLE,
                "visible field declared on a table without soft delete",
            ));
        }
        Ok(())
    }

    fn check_inheritance(&self) -> Result<(), MetaError> {
        match &self.inheritance {
            Inheritance::Simple => Ok(()),
            Inheritance::Parent { discriminator } => {
                let field = self
                    .fields
                    .iter()
                    .find(|f| &f.property == discriminator)
                    .ok_or_else(|| {
                        MetaError::table(
                            &self.entity,
                            format!("discriminator property '{discriminator}' not found"),
                        )
                    })?;
                if !field.host_type.is_integer() {
                    return Err(MetaError::definition(
                        &self.entity,
                        discriminator,
                        "discriminator must be an integer code",
                    ));
                }
                if field.nullable {
                    return Err(MetaError::definition(
                        &self.entity,
                        discriminator,
                        "discriminator must not be nullable",
                    ));
                }
                Ok(())
            }
            Inheritance::Child { parent, .. } => {
                if parent == &self.entity {
                    return Err(MetaError::table(&self.entity, "table cannot be its own parent"));
                }
                let id_generated = self
                    .fields
                    .iter()
                    .any(|f| f.property == ID && f.auto_increment);
                if id_generated {
                    return Err(MetaError::definition(
                        &self.entity,
                        ID,
                        "child id is assigned from the parent and cannot auto increment",
                    ));
                }
                Ok(())
            }
        }
    }

    fn check_indexes(&self, properties: &HashSet<&str>) -> Result<(), MetaError> {
        let mut names = HashSet::new();
        for index in &self.indexes {
            if !names.insert(index.name.to_lowercase()) {
                return Err(MetaError::table(
                    &self.entity,
                    format!("duplicate index name '{}'", index.name),
                ));
            }
            if index.properties.is_empty() {
                return Err(MetaError::table(
                    &self.entity,
                    format!("index '{}' has no properties", index.name),
                ));
            }
            if let Some(missing) = index
                .properties
                .iter()
                .find(|p| !properties.contains(p.as_str()))
            {
                return Err(MetaError::table(
                    &self.entity,
                    format!("index '{}' references unknown property '{}'", index.name, missing),
                ));
            }
        }
        Ok(())
    }

    fn freeze_field(&self, field: &FieldBuilder) -> FieldMeta {
        let in_index = |unique: bool| {
            self.indexes
                .iter()
                .any(|i| i.unique == unique && i.properties.iter().any(|p| p == &field.property))
        };
        let update_mode = match field.property.as_str() {
            ID | CREATE_TIME => UpdateMode::Immutable,
            UPDATE_TIME | VERSION => UpdateMode::Updatable,
            _ if self.immutable => UpdateMode::Immutable,
            _ => field.update_mode,
        };
        FieldMeta {
            table: self.name.clone(),
            entity: self.entity.clone(),
            property: field.property.clone(),
            column: field.column_name().to_string(),
            host_type: field.host_type,
            sql_types: field.sql_types.clone(),
            nullable: field.nullable && !is_reserved(&field.property),
            insertable: field.insertable,
            update_mode,
            precision: field.precision,
            scale: field.scale,
            comment: field.comment.clone(),
            default_value: field.default_value.clone(),
            unique: in_index(true),
            indexed: in_index(false),
            primary_key: field.property == ID,
            auto_increment: field.auto_increment,
        }
    }
}

fn check_precision_pair(entity: &str, field: &FieldBuilder) -> Result<(), MetaError> {
    if let (Some(p), Some(s)) = (field.precision, field.scale) {
        if s > p {
            return Err(MetaError::definition(
                entity,
                &field.property,
                format!("scale {s} exceeds precision {p}"),
            ));
        }
    }
    Ok(())
}

fn check_reserved_host_type(entity: &str, field: &FieldBuilder) -> Result<(), MetaError> {
    let host = field.host_type;
    let ok = match field.property.as_str() {
        ID => host.is_integer() || host == HostType::String,
        CREATE_TIME | UPDATE_TIME => host.is_date_time(),
        VERSION => matches!(host, HostType::I32 | HostType::I64),
        VISIBLE => host == HostType::Bool,
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(MetaError::definition(
            entity,
            &field.property,
            format!("host type {host} is not allowed for this reserved field"),
        ))
    }
}
