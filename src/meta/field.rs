//! Column metadata.
//!
//! A [`FieldMeta`] is created by [`TableBuilder::build`](super::table::TableBuilder::build)
//! from a [`FieldBuilder`] and never changes afterwards.

use super::host_type::HostType;
use super::sql_type::SqlType;
use serde::Deserialize;

/// Primary key property
pub const ID: &str = "id";
/// Row creation timestamp property
pub const CREATE_TIME: &str = "create_time";
/// Last modification timestamp property
pub const UPDATE_TIME: &str = "update_time";
/// Optimistic lock counter property
pub const VERSION: &str = "version";
/// Soft-delete visibility flag property
pub const VISIBLE: &str = "visible";

/// Properties with framework-mandated default semantics
pub const RESERVED_PROPS: [&str; 5] = [ID, CREATE_TIME, UPDATE_TIME, VERSION, VISIBLE];

/// Whether `property` is one of [`RESERVED_PROPS`]
#[must_use]
pub fn is_reserved(property: &str) -> bool {
    RESERVED_PROPS.contains(&property)
}

/// How an UPDATE statement may touch a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Always updatable
    #[default]
    Updatable,
    /// Updatable only while the stored value is NULL
    OnlyNull,
    /// Never updated after insert
    Immutable,
}

/// Immutable description of one mapped column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub(crate) table: String,
    pub(crate) entity: String,
    pub(crate) property: String,
    pub(crate) column: String,
    pub(crate) host_type: HostType,
    pub(crate) sql_types: Vec<SqlType>,
    pub(crate) nullable: bool,
    pub(crate) insertable: bool,
    pub(crate) update_mode: UpdateMode,
    pub(crate) precision: Option<u32>,
    pub(crate) scale: Option<u32>,
    pub(crate) comment: String,
    pub(crate) default_value: Option<String>,
    pub(crate) unique: bool,
    pub(crate) indexed: bool,
    pub(crate) primary_key: bool,
    pub(crate) auto_increment: bool,
}

impl FieldMeta {
    /// Start describing a field
    pub fn builder(property: impl Into<String>, host_type: HostType) -> FieldBuilder {
        FieldBuilder::new(property, host_type)
    }

    /// `id` primary key field
    pub fn id(host_type: HostType) -> FieldBuilder {
        FieldBuilder::new(ID, host_type)
            .update_mode(UpdateMode::Immutable)
            .comment("primary key")
    }

    /// `create_time` field
    pub fn create_time() -> FieldBuilder {
        FieldBuilder::new(CREATE_TIME, HostType::LocalDateTime)
            .update_mode(UpdateMode::Immutable)
            .comment("create time")
    }

    /// `update_time` field
    pub fn update_time() -> FieldBuilder {
        FieldBuilder::new(UPDATE_TIME, HostType::LocalDateTime).comment("update time")
    }

    /// `version` field
    pub fn version() -> FieldBuilder {
        FieldBuilder::new(VERSION, HostType::I32).comment("version for optimistic lock")
    }

    /// `visible` field
    pub fn visible() -> FieldBuilder {
        FieldBuilder::new(VISIBLE, HostType::Bool).comment("visible for soft delete")
    }

    /// Name of the owning table
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Entity identifier of the owning table
    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    /// Explicit SQL type overrides, at most one per database
    pub fn sql_types(&self) -> &[SqlType] {
        &self.sql_types
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn insertable(&self) -> bool {
        self.insertable
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Declared default expression text, possibly a symbolic placeholder
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn unique(&self) -> bool {
        self.unique
    }

    pub fn indexed(&self) -> bool {
        self.indexed
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn auto_increment(&self) -> bool {
        self.auto_increment
    }

    pub fn is_reserved(&self) -> bool {
        is_reserved(&self.property)
    }
}

/// Declarative input for one field of a [`TableBuilder`](super::table::TableBuilder)
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    pub(crate) property: String,
    pub(crate) column: Option<String>,
    pub(crate) host_type: HostType,
    pub(crate) sql_types: Vec<SqlType>,
    pub(crate) nullable: bool,
    pub(crate) insertable: bool,
    pub(crate) update_mode: UpdateMode,
    pub(crate) precision: Option<u32>,
    pub(crate) scale: Option<u32>,
    pub(crate) comment: String,
    pub(crate) default_value: Option<String>,
    pub(crate) auto_increment: bool,
}

impl FieldBuilder {
    pub fn new(property: impl Into<String>, host_type: HostType) -> Self {
        Self {
            property: property.into(),
            column: None,
            host_type,
            sql_types: Vec::new(),
            nullable: false,
            insertable: true,
            update_mode: UpdateMode::default(),
            precision: None,
            scale: None,
            comment: String::new(),
            default_value: None,
            auto_increment: false,
        }
    }

    /// Column name; defaults to the property name
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Explicit SQL type for the type's database, replacing the host type mapping
    pub fn sql_type(mut self, sql_type: impl Into<SqlType>) -> Self {
        let sql_type = sql_type.into();
        self.sql_types.retain(|t| t.database() != sql_type.database());
        self.sql_types.push(sql_type);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn insertable(mut self, insertable: bool) -> Self {
        self.insertable = insertable;
        self
    }

    pub fn update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = auto_increment;
        self
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub(crate) fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.property)
    }
}
