//! # Data Type System
//!
//! This module provides the canonical `DataType` enum for rowplan, used across
//! schema definitions, value casting, and parameter descriptors.
//!
//! ## Design Principles
//!
//! 1. **Single source of truth**: One DataType enum used everywhere
//! 2. **Storage-efficient**: `#[repr(u8)]` for single-byte discriminant
//! 3. **Metadata-free**: Nullability and defaults live in `ColumnDef`, not here
//!
//! ## Discriminant Values
//!
//! Discriminants are grouped by category:
//! - 0-7: Fixed-width primitives (bool, int, float, datetime)
//! - 20-21: Variable-length text/binary
//! - 30: Numeric types

use std::fmt;

/// Canonical data type enum for all rowplan operations.
///
/// Uses `#[repr(u8)]` for an efficient single-byte discriminant.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool = 0,
    Int2 = 1,
    Int4 = 2,
    Int8 = 3,
    Float4 = 4,
    Float8 = 5,
    Date = 6,
    Timestamp = 7,

    Text = 20,
    Blob = 21,

    Decimal = 30,
}

impl DataType {
    /// Returns the lowercase SQL-ish name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Bool => "bool",
            DataType::Int2 => "int2",
            DataType::Int4 => "int4",
            DataType::Int8 => "int8",
            DataType::Float4 => "float4",
            DataType::Float8 => "float8",
            DataType::Date => "date",
            DataType::Timestamp => "timestamp",
            DataType::Text => "text",
            DataType::Blob => "blob",
            DataType::Decimal => "decimal",
        }
    }

    /// Returns true if this is an integer type.
    pub fn is_integer(&self) -> bool {
        matches!(self, DataType::Int2 | DataType::Int4 | DataType::Int8)
    }

    /// Returns true if this is a numeric type (integer, float, or decimal).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Int2
                | DataType::Int4
                | DataType::Int8
                | DataType::Float4
                | DataType::Float8
                | DataType::Decimal
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
