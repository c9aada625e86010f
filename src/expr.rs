//! # Insert Value Expressions
//!
//! The parser hands the planner one expression per supplied column position.
//! Only three shapes can reach insert planning: a literal constant, a
//! parameter placeholder, or an explicit DEFAULT. Anything richer is
//! evaluated upstream before the plan is built.
//!
//! Classification is an exhaustive match over this enum, so there is no
//! "unknown expression kind" failure mode at this layer.

use crate::types::Value;

/// A value expression in an INSERT row tuple.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpr {
    /// A literal constant, resolved at plan-build time.
    Constant(Value),
    /// A parameter placeholder; the value arrives at execution time.
    Parameter,
    /// Explicit DEFAULT: the column takes its declared default.
    Default,
}

impl ValueExpr {
    pub fn is_constant(&self) -> bool {
        matches!(self, ValueExpr::Constant(_))
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, ValueExpr::Parameter)
    }
}

impl From<Value> for ValueExpr {
    fn from(value: Value) -> Self {
        ValueExpr::Constant(value)
    }
}
