//! # Insert Plan Integration Test Suite
//!
//! End-to-end coverage of insert planning: positional and named resolution,
//! default application, prepared-statement parameter binding with dense
//! index adjustment, plan identity for cache reuse, and parameter export
//! for the compiling backend.
//!
//! ## Test Categories
//!
//! 1. **Resolution**: positional mapping, named mapping, defaults
//! 2. **Prepared statements**: template finalization, binding, idempotence
//! 3. **Plan identity**: hash/equality over construction-time state
//! 4. **Export**: row-major descriptor/value pairs, child delegation

use rowplan::{
    BindingContext, ColumnDef, DataType, InsertPlan, ParameterMap, PlanNode, TableDef, TableScan,
    Value, ValueExpr,
};
use std::sync::Arc;

fn inventory_table() -> Arc<TableDef> {
    Arc::new(TableDef::new(
        42,
        "inventory",
        vec![
            ColumnDef::new("a", DataType::Int8).not_null(),
            ColumnDef::new("b", DataType::Int8),
            ColumnDef::new("c", DataType::Int8).with_default(Value::Int(-1)),
            ColumnDef::new("d", DataType::Int8),
        ],
    ))
}

fn const_row(values: &[i64]) -> Vec<ValueExpr> {
    values
        .iter()
        .map(|v| ValueExpr::Constant(Value::Int(*v)))
        .collect()
}

mod resolution_tests {
    use super::*;

    #[test]
    fn positional_insert_maps_every_row_directly() {
        let rows = vec![const_row(&[1, 2, 3, 4]), const_row(&[5, 6, 7, 8])];
        let plan = InsertPlan::new(inventory_table(), &[], &rows).unwrap();

        assert_eq!(plan.bulk_insert_count(), 2);
        for (idx, res) in plan.resolution().iter().enumerate() {
            assert!(res.in_insert_columns());
            assert_eq!(res.value_index(), idx);
        }
        let expected: Vec<Value> = (1..=8).map(Value::Int).collect();
        assert_eq!(plan.values().values(), expected.as_slice());
    }

    #[test]
    fn unlisted_columns_always_resolve_to_default_or_null() {
        let plan =
            InsertPlan::new(inventory_table(), &["b"], &[const_row(&[7])]).unwrap();

        // a has no default and is unlisted: typed slot filled with NULL.
        // c carries its declared default.
        assert_eq!(
            plan.values().values(),
            &[Value::Null, Value::Int(7), Value::Int(-1), Value::Null]
        );
    }

    #[test]
    fn explicit_default_expression_applies_the_declared_default() {
        let rows = vec![vec![
            ValueExpr::Constant(Value::Int(7)),
            ValueExpr::Default,
        ]];
        let plan = InsertPlan::new(inventory_table(), &["a", "c"], &rows).unwrap();

        assert_eq!(
            plan.values().values(),
            &[Value::Int(7), Value::Null, Value::Int(-1), Value::Null]
        );
    }

    #[test]
    fn unknown_column_yields_no_plan() {
        let result = InsertPlan::new(
            inventory_table(),
            &["a", "ghost"],
            &[const_row(&[1, 2])],
        );
        let err = result.unwrap_err();
        assert!(err
            .to_string()
            .contains("column 'ghost' not found in table 'inventory'"));
    }

    #[test]
    fn constants_are_cast_to_declared_types_at_build() {
        let table = Arc::new(TableDef::new(
            9,
            "typed",
            vec![
                ColumnDef::new("n", DataType::Int2),
                ColumnDef::new("f", DataType::Float8),
            ],
        ));
        let rows = vec![vec![
            ValueExpr::Constant(Value::Text("12".into())),
            ValueExpr::Constant(Value::Int(3)),
        ]];
        let plan = InsertPlan::new(table, &[], &rows).unwrap();
        assert_eq!(plan.values().values(), &[Value::Int(12), Value::Float(3.0)]);
    }
}

mod prepared_statement_tests {
    use super::*;

    /// Schema (a, b, c, d), insert columns (d, b, a), values (?, 5, ?).
    /// The dense parameter index for d must be 0 and for a must be 1:
    /// constant b is excluded from the runtime parameter vector.
    #[test]
    fn dense_indexes_skip_resolved_constants() {
        let rows = vec![vec![
            ValueExpr::Parameter,
            ValueExpr::Constant(Value::Int(5)),
            ValueExpr::Parameter,
        ]];
        let mut plan =
            InsertPlan::new(inventory_table(), &["d", "b", "a"], &rows).unwrap();
        assert!(plan.is_template());

        plan.set_parameter_values(&[Value::Int(100), Value::Int(200)])
            .unwrap();

        // a = params[1], b = cached constant, c = default, d = params[0].
        assert_eq!(
            plan.values().values(),
            &[Value::Int(200), Value::Int(5), Value::Int(-1), Value::Int(100)]
        );
    }

    #[test]
    fn rebinding_after_clear_is_idempotent() {
        let rows = vec![vec![ValueExpr::Parameter, ValueExpr::Parameter]];
        let mut plan = InsertPlan::new(inventory_table(), &["a", "d"], &rows).unwrap();

        plan.set_parameter_values(&[Value::Int(1), Value::Int(2)])
            .unwrap();
        let first: Vec<Value> = plan.values().values().to_vec();

        plan.clear_values();
        plan.set_parameter_values(&[Value::Int(1), Value::Int(2)])
            .unwrap();
        assert_eq!(plan.values().values(), first.as_slice());
    }

    #[test]
    fn repeated_binds_without_clear_accumulate_rows() {
        let rows = vec![vec![ValueExpr::Parameter]];
        let mut plan = InsertPlan::new(inventory_table(), &["a"], &rows).unwrap();

        plan.set_parameter_values(&[Value::Int(1)]).unwrap();
        plan.set_parameter_values(&[Value::Int(2)]).unwrap();

        let width = plan.table().column_count();
        assert_eq!(plan.values().values().len(), 2 * width);
        assert_eq!(plan.values().values()[0], Value::Int(1));
        assert_eq!(plan.values().values()[width], Value::Int(2));
    }

    #[test]
    fn bind_cast_failure_propagates_and_leaves_no_partial_row() {
        let rows = vec![vec![ValueExpr::Parameter, ValueExpr::Parameter]];
        let mut plan = InsertPlan::new(inventory_table(), &["a", "b"], &rows).unwrap();

        let err = plan
            .set_parameter_values(&[Value::Int(1), Value::Blob(vec![0])])
            .unwrap_err();
        assert!(err.to_string().contains("column 'b'"));
        assert!(plan.values().values().is_empty());
    }

    #[test]
    fn positional_placeholders_also_finalize_as_template() {
        let rows = vec![vec![
            ValueExpr::Constant(Value::Int(1)),
            ValueExpr::Parameter,
        ]];
        let mut plan = InsertPlan::new(inventory_table(), &[], &rows).unwrap();
        assert!(plan.is_template());

        // Positional mode has no column list, so no index adjustment: the
        // parameter keeps its row position.
        plan.set_parameter_values(&[Value::Int(0), Value::Int(33)])
            .unwrap();
        assert_eq!(
            plan.values().values(),
            &[Value::Int(1), Value::Int(33), Value::Int(-1), Value::Null]
        );
    }
}

mod plan_identity_tests {
    use super::*;

    fn leaf_plan(rows: usize) -> InsertPlan {
        let tuples: Vec<_> = (0..rows).map(|_| const_row(&[1, 2, 3, 4])).collect();
        InsertPlan::new(inventory_table(), &[], &tuples).unwrap()
    }

    #[test]
    fn equal_leaf_plans_are_hash_equal() {
        let a = leaf_plan(3);
        let b = leaf_plan(3);
        assert!(a.plan_eq(&b));
        assert_eq!(a.plan_hash(), b.plan_hash());
    }

    #[test]
    fn differing_bulk_counts_make_leaf_plans_unequal() {
        let a = leaf_plan(1);
        let b = leaf_plan(2);
        assert!(!a.plan_eq(&b));
    }

    #[test]
    fn differing_tables_make_plans_unequal() {
        let other = Arc::new(TableDef::new(
            43,
            "other",
            vec![ColumnDef::new("a", DataType::Int8)],
        ));
        let a = leaf_plan(1);
        let b = InsertPlan::new(other, &[], &[const_row(&[1])]).unwrap();
        assert!(!a.plan_eq(&b));
    }

    #[test]
    fn bulk_count_is_irrelevant_with_a_child() {
        let table = inventory_table();
        let scan = Arc::new(TableScan::new(table.clone(), vec![0, 1, 2, 3]));
        let a = InsertPlan::new_from_child(table.clone(), scan.clone());
        let b = InsertPlan::new_from_child(table, scan);
        assert!(a.plan_eq(&b));
        assert_eq!(a.plan_hash(), b.plan_hash());
    }

    #[test]
    fn leaf_and_child_plans_are_unequal() {
        let table = inventory_table();
        let scan = Arc::new(TableScan::new(table.clone(), vec![0]));
        let with_child = InsertPlan::new_from_child(table, scan);
        let leaf = leaf_plan(1);
        assert!(!leaf.plan_eq(&with_child));
        assert!(!with_child.plan_eq(&leaf));
    }

    #[test]
    fn identity_ignores_bound_parameter_values() {
        let rows = vec![vec![ValueExpr::Parameter]];
        let mut a = InsertPlan::new(inventory_table(), &["a"], &rows).unwrap();
        let b = InsertPlan::new(inventory_table(), &["a"], &rows).unwrap();

        a.set_parameter_values(&[Value::Int(77)]).unwrap();
        assert!(a.plan_eq(&b));
        assert_eq!(a.plan_hash(), b.plan_hash());
    }
}

mod export_tests {
    use super::*;

    #[test]
    fn export_walks_the_buffer_row_major() {
        let rows = vec![const_row(&[1, 2, 3, 4]), const_row(&[5, 6, 7, 8])];
        let plan = InsertPlan::new(inventory_table(), &[], &rows).unwrap();

        let mut map = ParameterMap::new();
        let mut values = Vec::new();
        plan.export_parameters(&mut map, &mut values);

        assert_eq!(map.len(), 8);
        assert_eq!(values.len(), 8);
        // Column for slot i is i % column_count; nullability follows it.
        let column_count = plan.table().column_count();
        for (i, desc) in map.descriptors().iter().enumerate() {
            let column = &plan.table().columns()[i % column_count];
            assert_eq!(desc.nullable, column.is_nullable());
            assert_eq!(desc.data_type, DataType::Int8);
        }
        assert_eq!(values[4], Value::Int(5));
    }

    #[test]
    fn null_slots_export_the_declared_column_type() {
        let plan =
            InsertPlan::new(inventory_table(), &["b"], &[const_row(&[7])]).unwrap();

        let mut map = ParameterMap::new();
        let mut values = Vec::new();
        plan.export_parameters(&mut map, &mut values);

        // Column a resolved to NULL; its descriptor carries int8 anyway.
        assert_eq!(map.descriptors()[0].data_type, DataType::Int8);
        assert!(!map.descriptors()[0].nullable);
        assert_eq!(values[0], Value::Null);
    }

    #[test]
    fn plans_with_a_child_delegate_export() {
        let table = inventory_table();
        let scan = Arc::new(TableScan::new(table.clone(), vec![0, 1]));
        let plan = InsertPlan::new_from_child(table, scan);

        let mut map = ParameterMap::new();
        let mut values = Vec::new();
        plan.export_parameters(&mut map, &mut values);

        // The scan exports nothing; crucially the insert's own (empty)
        // buffer is not walked.
        assert!(map.is_empty());
        assert!(values.is_empty());
    }
}

mod binding_tests {
    use super::*;

    #[test]
    fn binding_pins_child_output_columns_to_slots() {
        let table = inventory_table();
        let scan = Arc::new(TableScan::new(table.clone(), vec![0, 1, 3]));
        let mut plan = InsertPlan::new_from_child(table, scan);

        let mut ctx = BindingContext::new();
        plan.perform_binding(&mut ctx).unwrap();

        let refs = plan.attribute_refs();
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].column, 0);
        assert_eq!(refs[0].slot, 0);
        assert_eq!(refs[2].column, 3);
        assert_eq!(refs[2].slot, 2);
    }

    #[test]
    fn binding_is_a_no_op_for_leaf_plans() {
        let mut plan =
            InsertPlan::new(inventory_table(), &[], &[const_row(&[1])]).unwrap();
        let mut ctx = BindingContext::new();
        plan.perform_binding(&mut ctx).unwrap();
        assert!(plan.attribute_refs().is_empty());
        assert!(ctx.is_empty());
    }
}
