//! # Type System for rowplan
//!
//! This module provides the type system shared by schema definitions and
//! insert plans.
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `DataType` | Declared column type discriminant |
//! | `Value` | Owned runtime value with casting |

mod data_type;
mod value;

pub use data_type::DataType;
pub use value::Value;
