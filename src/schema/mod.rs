//! # Schema Module
//!
//! Table and column definitions consumed by the planner. The catalog that
//! produces these definitions lives outside this crate; plans only read them.

mod table;

pub use table::{ColumnDef, TableDef};
