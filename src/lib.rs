//! # rowplan - INSERT Statement Planning
//!
//! rowplan is the INSERT-planning component of an embedded SQL engine. It
//! turns a parsed INSERT statement (target table, optional column list, row
//! tuples of value expressions) into an executable plan node that knows,
//! for every table column, where its value comes from, and that can be
//! re-resolved cheaply across repeated executions of a prepared statement.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rowplan::plan::InsertPlan;
//! use rowplan::schema::{ColumnDef, TableDef};
//! use rowplan::types::{DataType, Value};
//! use rowplan::ValueExpr;
//! use std::sync::Arc;
//!
//! let table = Arc::new(TableDef::new(1, "users", vec![
//!     ColumnDef::new("id", DataType::Int8).not_null(),
//!     ColumnDef::new("name", DataType::Text),
//! ]));
//!
//! // INSERT INTO users (id, name) VALUES (?, ?)
//! let rows = vec![vec![ValueExpr::Parameter, ValueExpr::Parameter]];
//! let mut plan = InsertPlan::new(table, &["id", "name"], &rows)?;
//!
//! // Per execution of the prepared statement:
//! plan.set_parameter_values(&[Value::Int(1), Value::Text("alice".into())])?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Parser / Binder (external)        │
//! ├─────────────────────────────────────┤
//! │   Insert Planning (this crate)      │
//! │   resolution table · value buffer   │
//! │   plan identity · param export      │
//! ├─────────────────────────────────────┤
//! │   Execution / Codegen (external)    │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`types`]: `DataType` and the owned runtime `Value` with casting
//! - [`schema`]: table and column definitions the planner consumes
//! - [`expr`]: the three-way insert value expression
//! - [`plan`]: the plan tree, binding context, and `InsertPlan` itself
//!
//! ## What This Crate Is Not
//!
//! No SQL parsing, no storage or transactions, no tuple materialization,
//! no cost-based optimization. Those live in the surrounding engine.

pub mod expr;
pub mod plan;
pub mod schema;
pub mod types;

pub use expr::ValueExpr;
pub use plan::{
    AttributeRef, BindingContext, ColumnResolution, InsertPlan, ParameterDesc, ParameterMap,
    PlanKind, PlanNode, PlanRef, TableScan, ValueBuffer,
};
pub use schema::{ColumnDef, TableDef};
pub use types::{DataType, Value};
