//! # Table Definition Module
//!
//! This module provides the schema definition types insert planning consumes:
//! tables and their ordered, typed columns.
//!
//! ## Overview
//!
//! - **Tables**: Named, identified collections of columns
//! - **Columns**: Typed fields with nullability and an optional typed default
//!
//! Defaults are stored as already-typed [`Value`]s. The planner never casts a
//! declared default; whoever registers the table in the catalog is expected
//! to have resolved it to the column's type.
//!
//! ## Table Definition Example
//!
//! ```rust,ignore
//! use rowplan::schema::{ColumnDef, TableDef};
//! use rowplan::types::{DataType, Value};
//!
//! let columns = vec![
//!     ColumnDef::new("id", DataType::Int8).not_null(),
//!     ColumnDef::new("name", DataType::Text),
//!     ColumnDef::new("active", DataType::Bool).with_default(Value::Bool(true)),
//! ];
//! let table = TableDef::new(1, "users", columns);
//! ```
//!
//! ## Thread Safety
//!
//! Definitions are immutable after construction; plans hold them behind
//! `Arc<TableDef>` and never mutate them.

use crate::types::{DataType, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    name: String,
    data_type: DataType,
    nullable: bool,
    default_value: Option<Value>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            default_value: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default_value = Some(default);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }
}

/// Immutable table definition: identity plus ordered columns.
///
/// The `id` is the catalog-assigned table identity and participates in plan
/// hashing, so it must be stable for the lifetime of a cached plan.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDef {
    id: u64,
    name: String,
    columns: Vec<ColumnDef>,
}

impl TableDef {
    pub fn new(id: u64, name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            id,
            name: name.into(),
            columns,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn get_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }
}
