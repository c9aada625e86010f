//! # INSERT Plan
//!
//! This module turns a parsed INSERT statement into an executable plan node
//! that knows, for every table column, where its value comes from: a literal
//! constant, a supplied parameter, the declared default, or a child plan's
//! output column.
//!
//! ## Value Resolution
//!
//! Construction reconciles four sources into one flat row-major buffer:
//!
//! - explicit column order (`INSERT INTO t (c, a) ...`),
//! - positional defaulting (columns the statement does not cover),
//! - literal constants, cast to the declared column type at build time,
//! - parameter placeholders, filled per execution.
//!
//! ```text
//!   INSERT INTO t (d, b, a) VALUES (?, 5, ?)     schema: (a, b, c, d)
//!
//!   reverse index   [d, b, a] -> schema [3, 1, 0]
//!   resolution      a: param @1   b: const 5   c: default   d: param @0
//!                         ^ dense index after stripping constant b
//! ```
//!
//! ## Literal vs Template Plans
//!
//! Whether the statement is a prepared statement is only known after every
//! row has been classified, so the builder accumulates speculatively and
//! finalizes into one of two buffer variants: [`ValueBuffer::Literal`]
//! (all rows resolved at build time, plan reusable verbatim) or
//! [`ValueBuffer::Template`] (at least one placeholder; stable resolution
//! metadata plus a per-execution buffer refilled by
//! [`InsertPlan::set_parameter_values`]).
//!
//! ## Thread Safety
//!
//! Construction and identity are synchronous and side-effect free. A
//! template plan's buffer is mutated in place by `set_parameter_values`, so
//! callers owning a prepared plan must serialize executions on it (or clone
//! the plan per execution; the resolution metadata is cheap to share).

use super::{
    base_plan_eq, base_plan_hash, combine_hashes, hash_one, AttributeRef, BindingContext,
    ParameterDesc, ParameterMap, PlanKind, PlanNode, PlanRef,
};
use crate::expr::ValueExpr;
use crate::schema::TableDef;
use crate::types::{DataType, Value};
use eyre::{bail, Result, WrapErr};
use smallvec::{smallvec, SmallVec};
use std::any::Any;
use std::sync::Arc;

/// Where one schema column's value comes from.
///
/// Exactly one of three states holds: the column is not covered by the
/// statement (defaults apply), it resolved to a constant at build time, or
/// it is covered and waits for a parameter at `value_index`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnResolution {
    in_insert_columns: bool,
    value_index: usize,
    constant: Option<Value>,
    data_type: DataType,
}

impl ColumnResolution {
    fn new(data_type: DataType) -> Self {
        Self {
            in_insert_columns: false,
            value_index: 0,
            constant: None,
            data_type,
        }
    }

    /// True if the statement's column list (or positional mapping) covers
    /// this schema column.
    pub fn in_insert_columns(&self) -> bool {
        self.in_insert_columns
    }

    /// Index into the row tuple (literal path) or the dense parameter
    /// vector (template path). Meaningful only when `in_insert_columns`.
    pub fn value_index(&self) -> usize {
        self.value_index
    }

    /// True if the source expression was a literal constant; the cached
    /// value never comes from a later parameter vector.
    pub fn is_resolved_constant(&self) -> bool {
        self.constant.is_some()
    }

    pub fn constant(&self) -> Option<&Value> {
        self.constant.as_ref()
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

/// Resolved values of an insert plan, finalized into one of two modes.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueBuffer {
    /// Every value was known at build time; holds `bulk_insert_count *
    /// schema_column_count` values, row-major, for the plan's lifetime.
    Literal(Vec<Value>),
    /// The statement holds placeholders; emptied at build, refilled one
    /// row per `set_parameter_values` call.
    Template(Vec<Value>),
}

impl ValueBuffer {
    pub fn values(&self) -> &[Value] {
        match self {
            ValueBuffer::Literal(values) | ValueBuffer::Template(values) => values,
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, ValueBuffer::Template(_))
    }
}

/// Executable plan node for an INSERT statement.
#[derive(Debug)]
pub struct InsertPlan {
    table: Arc<TableDef>,
    children: Vec<PlanRef>,
    resolution: SmallVec<[ColumnResolution; 8]>,
    reverse_index: SmallVec<[usize; 8]>,
    bulk_insert_count: usize,
    values: ValueBuffer,
    attribute_refs: Vec<AttributeRef>,
}

impl InsertPlan {
    /// Builds a plan from literal/parameter row tuples.
    ///
    /// An empty `columns` slice selects positional mode: row position `i`
    /// maps directly to schema column `i`. Otherwise every name in
    /// `columns` must exist in the table, and each row tuple supplies one
    /// expression per listed column.
    ///
    /// Fails without constructing a plan if a column name is unknown or a
    /// constant cannot be cast to its declared column type.
    pub fn new(table: Arc<TableDef>, columns: &[&str], rows: &[Vec<ValueExpr>]) -> Result<Self> {
        tracing::trace!(
            table = table.name(),
            rows = rows.len(),
            columns = columns.len(),
            "planning insert"
        );
        let mut builder = InsertPlanBuilder::new(&table);

        if columns.is_empty() {
            for row in rows {
                assert!(
                    row.len() <= table.column_count(),
                    "row tuple wider than table '{}'",
                    table.name()
                );
                for idx in 0..table.column_count() {
                    if idx < row.len() {
                        // No column specification: direct mapping between
                        // schema columns and the value vector.
                        builder.resolution[idx].in_insert_columns = true;
                        builder.resolution[idx].value_index = idx;
                        builder.process_value_expr(&row[idx], idx)?;
                    } else {
                        builder.push_default(idx);
                    }
                }
            }
        } else {
            assert!(
                columns.len() <= table.column_count(),
                "column list wider than table '{}'",
                table.name()
            );
            builder.process_column_spec(columns)?;
            for row in rows {
                assert!(
                    row.len() == columns.len(),
                    "row tuple does not match column list of table '{}'",
                    table.name()
                );
                for idx in 0..table.column_count() {
                    if builder.resolution[idx].in_insert_columns {
                        let value_index = builder.resolution[idx].value_index;
                        builder.process_value_expr(&row[value_index], idx)?;
                    } else {
                        builder.push_default(idx);
                    }
                }
            }
            if builder.deferred {
                builder.adjust_parameter_indexes();
            }
        }

        Ok(builder.finish(Arc::clone(&table), rows.len()))
    }

    /// Builds a plan whose rows come from a child plan instead of literal
    /// tuples. Value resolution is bypassed entirely; the plan relies on
    /// the attribute references produced by [`Self::perform_binding`].
    pub fn new_from_child(table: Arc<TableDef>, child: PlanRef) -> Self {
        Self {
            table,
            children: vec![child],
            resolution: smallvec![],
            reverse_index: smallvec![],
            bulk_insert_count: 0,
            values: ValueBuffer::Literal(Vec::new()),
            attribute_refs: Vec::new(),
        }
    }

    pub fn table(&self) -> &TableDef {
        &self.table
    }

    /// Number of row tuples seen at construction.
    pub fn bulk_insert_count(&self) -> usize {
        self.bulk_insert_count
    }

    pub fn resolution(&self) -> &[ColumnResolution] {
        &self.resolution
    }

    pub fn values(&self) -> &ValueBuffer {
        &self.values
    }

    pub fn is_template(&self) -> bool {
        self.values.is_template()
    }

    /// Attribute references for a child-sourced insert, one per child
    /// output column. Empty until `perform_binding` runs.
    pub fn attribute_refs(&self) -> &[AttributeRef] {
        &self.attribute_refs
    }

    /// Resolves one row of parameter values for a template plan.
    ///
    /// `params` holds one value per parameterized column, ordered by the
    /// dense index computed at construction (resolved constants are not
    /// re-supplied). Appends exactly one full row to the buffer; callers
    /// wanting single-row semantics must [`Self::clear_values`] between
    /// executions. Concurrent calls on one plan instance require external
    /// serialization.
    pub fn set_parameter_values(&mut self, params: &[Value]) -> Result<()> {
        tracing::trace!(
            table = self.table.name(),
            params = params.len(),
            "binding insert parameters"
        );
        assert!(
            params.len() <= self.table.column_count(),
            "parameter vector wider than table '{}'",
            self.table.name()
        );
        let ValueBuffer::Template(buffer) = &mut self.values else {
            panic!("set_parameter_values called on a literal insert plan");
        };

        let mut row = Vec::with_capacity(self.table.column_count());
        for (idx, res) in self.resolution.iter().enumerate() {
            let column = &self.table.columns()[idx];
            if let Some(constant) = &res.constant {
                row.push(constant.clone());
            } else if res.in_insert_columns {
                let Some(supplied) = params.get(res.value_index) else {
                    bail!(
                        "no parameter at index {} for column '{}'",
                        res.value_index,
                        column.name()
                    );
                };
                let value = supplied.cast_to(res.data_type).wrap_err_with(|| {
                    format!("cannot bind parameter for column '{}'", column.name())
                })?;
                row.push(value);
            } else {
                match column.default_value() {
                    Some(default) => row.push(default.clone()),
                    None => row.push(Value::Null),
                }
            }
        }
        buffer.extend(row);
        Ok(())
    }

    /// Clears the per-execution rows of a template plan. No-op on a
    /// literal plan, whose buffer is fixed construction state.
    pub fn clear_values(&mut self) {
        if let ValueBuffer::Template(buffer) = &mut self.values {
            buffer.clear();
        }
    }

    /// Pins each child output column to its physical attribute slot in the
    /// shared binding context. No-op for leaf plans.
    pub fn perform_binding(&mut self, ctx: &mut BindingContext) -> Result<()> {
        let Some(child) = self.children.first().cloned() else {
            return Ok(());
        };
        child.bind(ctx)?;

        self.attribute_refs.clear();
        for &column in child.output_columns() {
            let Some(attr) = ctx.find(column) else {
                bail!("no binding for child output column {}", column);
            };
            self.attribute_refs.push(attr);
        }
        Ok(())
    }
}

impl PlanNode for InsertPlan {
    fn kind(&self) -> PlanKind {
        PlanKind::Insert
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn children(&self) -> &[PlanRef] {
        &self.children
    }

    /// Pure function of construction-time state. Never reads the value
    /// buffer, which varies per execution on template plans.
    fn plan_hash(&self) -> u64 {
        let mut hash = hash_one(&self.kind());
        hash = combine_hashes(hash, hash_one(&(self.table.id(), self.table.name())));
        if self.children.is_empty() {
            hash = combine_hashes(hash, hash_one(&self.bulk_insert_count));
        }
        combine_hashes(hash, base_plan_hash(self))
    }

    fn plan_eq(&self, other: &dyn PlanNode) -> bool {
        let Some(other) = other.as_any().downcast_ref::<InsertPlan>() else {
            return false;
        };
        if *self.table != *other.table {
            return false;
        }
        // Bulk row count only identifies leaf plans; with a child the row
        // count is dynamic.
        if self.children.is_empty() {
            if !other.children.is_empty() {
                return false;
            }
            if self.bulk_insert_count != other.bulk_insert_count {
                return false;
            }
        }
        base_plan_eq(self, other)
    }

    fn export_parameters(&self, map: &mut ParameterMap, values: &mut Vec<Value>) {
        if let Some(child) = self.children.first() {
            child.export_parameters(map, values);
            return;
        }

        let column_count = self.table.column_count();
        for (index, value) in self.values.values().iter().enumerate() {
            let column = &self.table.columns()[index % column_count];
            map.register(ParameterDesc {
                data_type: value.data_type().unwrap_or_else(|| column.data_type()),
                nullable: column.is_nullable(),
            });
            values.push(value.clone());
        }
    }
}

/// Provisional resolution state, finalized into a literal or template plan.
struct InsertPlanBuilder<'a> {
    table: &'a TableDef,
    resolution: SmallVec<[ColumnResolution; 8]>,
    reverse_index: SmallVec<[usize; 8]>,
    buffer: Vec<Value>,
    deferred: bool,
}

impl<'a> InsertPlanBuilder<'a> {
    fn new(table: &'a TableDef) -> Self {
        let resolution = table
            .columns()
            .iter()
            .map(|c| ColumnResolution::new(c.data_type()))
            .collect();
        Self {
            table,
            resolution,
            reverse_index: smallvec![],
            buffer: Vec::new(),
            deferred: false,
        }
    }

    /// Maps each user-listed column name to its schema position, recording
    /// both directions of the mapping.
    fn process_column_spec(&mut self, columns: &[&str]) -> Result<()> {
        self.reverse_index = smallvec![0; columns.len()];
        for (user_index, name) in columns.iter().enumerate() {
            let Some(idx) = self.table.column_index(name) else {
                bail!("column '{}' not found in table '{}'", name, self.table.name());
            };
            self.resolution[idx].in_insert_columns = true;
            self.resolution[idx].value_index = user_index;
            self.reverse_index[user_index] = idx;
        }
        Ok(())
    }

    /// Classifies one row-tuple expression destined for `schema_idx`.
    ///
    /// Constants are cast to the declared type, cached for template reuse,
    /// and appended to the speculative buffer. Parameters mark the plan
    /// deferred. DEFAULT falls through to the default-value rule.
    fn process_value_expr(&mut self, expr: &ValueExpr, schema_idx: usize) -> Result<()> {
        match expr {
            ValueExpr::Default => self.push_default(schema_idx),
            ValueExpr::Constant(value) => {
                let column = &self.table.columns()[schema_idx];
                let cast = value.cast_to(column.data_type()).wrap_err_with(|| {
                    format!("cannot resolve value for column '{}'", column.name())
                })?;
                self.resolution[schema_idx].constant = Some(cast.clone());
                self.buffer.push(cast);
            }
            ValueExpr::Parameter => self.deferred = true,
        }
        Ok(())
    }

    /// Appends the declared default for `schema_idx`, or NULL if none.
    fn push_default(&mut self, schema_idx: usize) {
        match self.table.columns()[schema_idx].default_value() {
            Some(default) => self.buffer.push(default.clone()),
            None => self.buffer.push(Value::Null),
        }
    }

    /// Rewrites `value_index` for parameterized columns from user-column
    /// positions to dense positions in the future parameter vector.
    ///
    /// A prepared statement's parameter vector omits resolved constants, so
    /// each parameterized column's index drops by the number of constant
    /// columns listed before it. Walks user-column order; the resolution
    /// table itself is schema-ordered, which is why this is a separate pass.
    fn adjust_parameter_indexes(&mut self) {
        let mut adjust = 0usize;
        for &schema_idx in &self.reverse_index {
            if self.resolution[schema_idx].constant.is_some() {
                adjust += 1;
            } else {
                self.resolution[schema_idx].value_index -= adjust;
            }
        }
    }

    /// Finalizes into a literal plan, or a template plan with the
    /// speculative constant accumulation discarded.
    fn finish(self, table: Arc<TableDef>, bulk_insert_count: usize) -> InsertPlan {
        let values = if self.deferred {
            tracing::debug!(
                table = table.name(),
                "insert holds placeholders; finalizing as template plan"
            );
            ValueBuffer::Template(Vec::new())
        } else {
            ValueBuffer::Literal(self.buffer)
        };
        InsertPlan {
            table,
            children: Vec::new(),
            resolution: self.resolution,
            reverse_index: self.reverse_index,
            bulk_insert_count,
            values,
            attribute_refs: Vec::new(),
        }
    }
}
