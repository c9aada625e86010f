//! # Owned Value Representation
//!
//! This module provides `Value`, the fully-owned runtime representation for
//! SQL values inside insert plans. Plan values must outlive the statement
//! they were parsed from, so every variant owns its data on the heap.
//!
//! ## Value Variants
//!
//! | Variant | Rust Type | Description |
//! |---------|-----------|-------------|
//! | Null | - | SQL NULL |
//! | Bool | bool | Boolean |
//! | Int | i64 | Signed integer (int2/int4/int8 storage) |
//! | Float | f64 | Floating point (float4/float8 storage) |
//! | Text | String | UTF-8 string |
//! | Blob | Vec<u8> | Binary data |
//! | Date | i32 | Days since epoch |
//! | Timestamp | i64 | Microseconds since epoch |
//! | Decimal | (i128, i16) | Scaled integer digits |
//!
//! ## Casting
//!
//! `cast_to` converts a value to a declared column type, with range checks
//! for narrowing integer casts and parse errors for text conversions. A
//! failed cast is a recoverable error and surfaces to whoever supplied the
//! value (plan construction or parameter binding).
//!
//! NULL casts to anything: the typed identity of a NULL slot is carried by
//! the schema column it fills, not by the value itself.

use super::DataType;
use eyre::{bail, Result};

/// Owned runtime value for plan construction and parameter binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    Date(i32),
    Timestamp(i64),
    Decimal(i128, i16),
}

impl Value {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the runtime type of this value, or None for NULL.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(DataType::Bool),
            Value::Int(_) => Some(DataType::Int8),
            Value::Float(_) => Some(DataType::Float8),
            Value::Text(_) => Some(DataType::Text),
            Value::Blob(_) => Some(DataType::Blob),
            Value::Date(_) => Some(DataType::Date),
            Value::Timestamp(_) => Some(DataType::Timestamp),
            Value::Decimal(_, _) => Some(DataType::Decimal),
        }
    }

    /// Casts this value to the target data type.
    ///
    /// Narrowing integer casts are range-checked. Text values are parsed
    /// for numeric targets. Unsupported combinations fail with an error
    /// naming both sides.
    pub fn cast_to(&self, target: DataType) -> Result<Value> {
        match self {
            Value::Null => Ok(Value::Null),
            Value::Bool(b) => match target {
                DataType::Bool => Ok(Value::Bool(*b)),
                t if t.is_integer() => Ok(Value::Int(i64::from(*b))),
                DataType::Text => Ok(Value::Text(if *b { "true" } else { "false" }.to_string())),
                _ => bail!("cannot cast bool to {}", target),
            },
            Value::Int(i) => match target {
                DataType::Int2 => {
                    check_int_range(*i, i16::MIN as i64, i16::MAX as i64, target)?;
                    Ok(Value::Int(*i))
                }
                DataType::Int4 => {
                    check_int_range(*i, i32::MIN as i64, i32::MAX as i64, target)?;
                    Ok(Value::Int(*i))
                }
                DataType::Int8 => Ok(Value::Int(*i)),
                DataType::Float4 | DataType::Float8 => Ok(Value::Float(*i as f64)),
                DataType::Bool => match i {
                    0 => Ok(Value::Bool(false)),
                    1 => Ok(Value::Bool(true)),
                    _ => bail!("cannot cast integer {} to bool", i),
                },
                DataType::Text => Ok(Value::Text(i.to_string())),
                DataType::Decimal => Ok(Value::Decimal(*i as i128, 0)),
                _ => bail!("cannot cast int8 to {}", target),
            },
            Value::Float(f) => match target {
                DataType::Float4 | DataType::Float8 => Ok(Value::Float(*f)),
                t if t.is_integer() => {
                    let truncated = f.trunc();
                    if !truncated.is_finite()
                        || truncated < i64::MIN as f64
                        || truncated > i64::MAX as f64
                    {
                        bail!("float {} out of range for {}", f, t);
                    }
                    Value::Int(truncated as i64).cast_to(t)
                }
                DataType::Text => Ok(Value::Text(f.to_string())),
                _ => bail!("cannot cast float8 to {}", target),
            },
            Value::Text(s) => match target {
                DataType::Text => Ok(Value::Text(s.clone())),
                t if t.is_integer() => {
                    let parsed = s.trim().parse::<i64>().map_err(|e| {
                        eyre::eyre!("cannot cast text '{}' to {}: {}", s, t, e)
                    })?;
                    Value::Int(parsed).cast_to(t)
                }
                DataType::Float4 | DataType::Float8 => {
                    let parsed = s.trim().parse::<f64>().map_err(|e| {
                        eyre::eyre!("cannot cast text '{}' to {}: {}", s, target, e)
                    })?;
                    Ok(Value::Float(parsed))
                }
                DataType::Bool => match s.trim() {
                    "true" | "TRUE" | "t" => Ok(Value::Bool(true)),
                    "false" | "FALSE" | "f" => Ok(Value::Bool(false)),
                    other => bail!("cannot cast text '{}' to bool", other),
                },
                DataType::Decimal => parse_decimal(s.trim()),
                DataType::Blob => Ok(Value::Blob(s.as_bytes().to_vec())),
                _ => bail!("cannot cast text '{}' to {}", s, target),
            },
            Value::Blob(b) => match target {
                DataType::Blob => Ok(Value::Blob(b.clone())),
                DataType::Text => {
                    let s = std::str::from_utf8(b)
                        .map_err(|e| eyre::eyre!("cannot cast blob to text: {}", e))?;
                    Ok(Value::Text(s.to_string()))
                }
                _ => bail!("cannot cast blob to {}", target),
            },
            Value::Date(d) => match target {
                DataType::Date => Ok(Value::Date(*d)),
                DataType::Int4 | DataType::Int8 => Ok(Value::Int(*d as i64)),
                DataType::Text => Ok(Value::Text(format!("date:{}", d))),
                _ => bail!("cannot cast date to {}", target),
            },
            Value::Timestamp(ts) => match target {
                DataType::Timestamp => Ok(Value::Timestamp(*ts)),
                DataType::Int8 => Ok(Value::Int(*ts)),
                DataType::Text => Ok(Value::Text(format!("ts:{}", ts))),
                _ => bail!("cannot cast timestamp to {}", target),
            },
            Value::Decimal(digits, scale) => match target {
                DataType::Decimal => Ok(Value::Decimal(*digits, *scale)),
                DataType::Text => Ok(Value::Text(format_decimal(*digits, *scale))),
                DataType::Float4 | DataType::Float8 => {
                    let divisor = 10f64.powi(*scale as i32);
                    Ok(Value::Float(*digits as f64 / divisor))
                }
                t if t.is_integer() && *scale == 0 => {
                    let narrowed = i64::try_from(*digits)
                        .map_err(|_| eyre::eyre!("decimal {} out of range for {}", digits, t))?;
                    Value::Int(narrowed).cast_to(t)
                }
                _ => bail!("cannot cast decimal to {}", target),
            },
        }
    }

    /// Formats the value as a display string.
    pub fn display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::Blob(b) => format!("\\x{}", hex_encode(b)),
            Value::Date(d) => format!("date:{}", d),
            Value::Timestamp(ts) => format!("ts:{}", ts),
            Value::Decimal(digits, scale) => format_decimal(*digits, *scale),
        }
    }
}

fn check_int_range(value: i64, min: i64, max: i64, target: DataType) -> Result<()> {
    if value < min || value > max {
        bail!("integer {} out of range for {}", value, target);
    }
    Ok(())
}

fn parse_decimal(s: &str) -> Result<Value> {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    let digits_str: String = format!("{}{}", int_part, frac_part);
    let digits = digits_str
        .parse::<i128>()
        .map_err(|e| eyre::eyre!("cannot cast text '{}' to decimal: {}", s, e))?;
    Ok(Value::Decimal(digits, frac_part.len() as i16))
}

fn format_decimal(digits: i128, scale: i16) -> String {
    if scale <= 0 {
        format!("{}", digits)
    } else {
        let divisor = 10i128.pow(scale as u32);
        let int_part = digits / divisor;
        let frac_part = (digits % divisor).abs();
        format!(
            "{}.{:0>width$}",
            int_part,
            frac_part,
            width = scale as usize
        )
    }
}

fn hex_encode(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}
