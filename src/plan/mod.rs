//! # Plan Tree Infrastructure
//!
//! This module provides the narrow plan-tree surface insert planning needs:
//! a dyn-safe [`PlanNode`] trait with base hash/equality over construction
//! state, the execution-time [`BindingContext`], and parameter export types
//! for a compiling execution backend.
//!
//! ## Plan Identity
//!
//! Plan hash and equality exist for plan-cache lookup. They are pure
//! functions of immutable construction-time state (kind, table identity,
//! children, output columns) and deliberately never read per-execution
//! value buffers. The contract is the usual one: `a == b` implies
//! `hash(a) == hash(b)`.
//!
//! ## Module Structure
//!
//! - `insert`: INSERT plan construction, parameter binding, value export
//! - `table_scan`: row-producing child plan used for INSERT ... SELECT
//! - `binding`: column-to-physical-slot resolution shared across a tree
//! - `params`: compiled-parameter descriptors for the codegen backend

pub mod binding;
pub mod insert;
pub mod params;
pub mod table_scan;

pub use binding::{AttributeRef, BindingContext};
pub use insert::{ColumnResolution, InsertPlan, ValueBuffer};
pub use params::{ParameterDesc, ParameterMap};
pub use table_scan::TableScan;

use crate::types::Value;
use eyre::Result;
use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Index of a column in a plan's output row.
pub type ColumnId = u32;

/// Shared handle to a node in a plan tree.
pub type PlanRef = Arc<dyn PlanNode>;

/// Discriminant identifying the concrete plan node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanKind {
    Insert,
    TableScan,
}

/// A node in the plan tree.
///
/// Hash and equality default to the base combination of kind, children, and
/// output columns; nodes with extra identity state (target table, bulk row
/// count) override and fold the base result in.
pub trait PlanNode: fmt::Debug + Send + Sync {
    fn kind(&self) -> PlanKind;

    fn as_any(&self) -> &dyn Any;

    fn children(&self) -> &[PlanRef] {
        &[]
    }

    /// Columns this node produces, as positions in its output row.
    fn output_columns(&self) -> &[ColumnId] {
        &[]
    }

    /// Order-sensitive hash of construction-time state.
    fn plan_hash(&self) -> u64;

    fn plan_eq(&self, other: &dyn PlanNode) -> bool;

    /// Registers or resolves physical attribute slots for this subtree.
    ///
    /// Scans register their outputs; most nodes have nothing to do.
    fn bind(&self, _ctx: &mut BindingContext) -> Result<()> {
        Ok(())
    }

    /// Exports compiled-parameter descriptors and concrete values for the
    /// codegen backend. Leaf inserts walk their value buffer; nodes with a
    /// child delegate.
    fn export_parameters(&self, _map: &mut ParameterMap, _values: &mut Vec<Value>) {}
}

/// Base plan hash: kind combined with every child's hash in order.
pub fn base_plan_hash(plan: &dyn PlanNode) -> u64 {
    let mut hash = hash_one(&plan.kind());
    for child in plan.children() {
        hash = combine_hashes(hash, child.plan_hash());
    }
    hash
}

/// Base plan equality: kind, output columns, and children pairwise.
pub fn base_plan_eq(lhs: &dyn PlanNode, rhs: &dyn PlanNode) -> bool {
    lhs.kind() == rhs.kind()
        && lhs.output_columns() == rhs.output_columns()
        && lhs.children().len() == rhs.children().len()
        && lhs
            .children()
            .iter()
            .zip(rhs.children())
            .all(|(a, b)| a.plan_eq(b.as_ref()))
}

/// Hashes a single value with the standard hasher.
pub fn hash_one<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Order-sensitive hash combination.
pub fn combine_hashes(seed: u64, other: u64) -> u64 {
    seed ^ other
        .wrapping_add(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}
