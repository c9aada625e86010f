//! # Table Scan Child Plan
//!
//! The row-producing child used when an INSERT sources its rows from a query
//! instead of literal tuples. The scan's only planning-level responsibility
//! here is to describe its output columns and register them with the shared
//! [`BindingContext`] so the parent insert can pin physical attribute slots.

use super::{
    base_plan_eq, base_plan_hash, combine_hashes, hash_one, BindingContext, ColumnId, PlanKind,
    PlanNode, PlanRef,
};
use crate::schema::TableDef;
use eyre::Result;
use std::any::Any;
use std::sync::Arc;

/// Sequential scan producing one output row per table row.
#[derive(Debug)]
pub struct TableScan {
    table: Arc<TableDef>,
    output: Vec<ColumnId>,
}

impl TableScan {
    pub fn new(table: Arc<TableDef>, output: Vec<ColumnId>) -> Self {
        Self { table, output }
    }

    pub fn table(&self) -> &TableDef {
        &self.table
    }
}

impl PlanNode for TableScan {
    fn kind(&self) -> PlanKind {
        PlanKind::TableScan
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn children(&self) -> &[PlanRef] {
        &[]
    }

    fn output_columns(&self) -> &[ColumnId] {
        &self.output
    }

    fn plan_hash(&self) -> u64 {
        combine_hashes(
            hash_one(&(self.table.id(), self.table.name())),
            base_plan_hash(self),
        )
    }

    fn plan_eq(&self, other: &dyn PlanNode) -> bool {
        let Some(other) = other.as_any().downcast_ref::<TableScan>() else {
            return false;
        };
        *self.table == *other.table && base_plan_eq(self, other)
    }

    fn bind(&self, ctx: &mut BindingContext) -> Result<()> {
        for &column in &self.output {
            ctx.bind_column(column);
        }
        Ok(())
    }
}
