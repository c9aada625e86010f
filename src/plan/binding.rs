//! # Execution Binding Context
//!
//! Before a plan tree with a row-producing child can execute, every column
//! the child exposes must be pinned to a physical slot in the execution
//! engine's row layout. The binding context is the shared table for that
//! resolution: scans register their output columns in order, and consumers
//! look the slots back up by column id.
//!
//! Binding runs once per compiled plan, single-threaded, between plan
//! construction and first execution.

use super::ColumnId;
use hashbrown::HashMap;

/// Physical attribute reference: a column pinned to an execution row slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRef {
    pub column: ColumnId,
    pub slot: usize,
}

/// Shared column-to-slot table for one plan tree.
#[derive(Debug, Default)]
pub struct BindingContext {
    slots: HashMap<ColumnId, AttributeRef>,
    next_slot: usize,
}

impl BindingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a column, assigning it the next physical slot. Registering
    /// the same column twice keeps the original slot.
    pub fn bind_column(&mut self, column: ColumnId) -> AttributeRef {
        if let Some(attr) = self.slots.get(&column) {
            return *attr;
        }
        let attr = AttributeRef {
            column,
            slot: self.next_slot,
        };
        self.next_slot += 1;
        self.slots.insert(column, attr);
        attr
    }

    pub fn find(&self, column: ColumnId) -> Option<AttributeRef> {
        self.slots.get(&column).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
