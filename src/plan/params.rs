//! # Compiled Parameter Export
//!
//! A compiling execution backend needs the shape of every literal and
//! parameter slot ahead of time: the runtime type and whether the target
//! column tolerates NULL. Plans export one [`ParameterDesc`] per buffered
//! value, in row-major order, paired with the concrete value for
//! constant-folded execution.

use crate::types::DataType;

/// Type and nullability of one compiled parameter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterDesc {
    pub data_type: DataType,
    pub nullable: bool,
}

/// Ordered collection of compiled parameter descriptors.
#[derive(Debug, Default)]
pub struct ParameterMap {
    descriptors: Vec<ParameterDesc>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, desc: ParameterDesc) {
        self.descriptors.push(desc);
    }

    pub fn descriptors(&self) -> &[ParameterDesc] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
