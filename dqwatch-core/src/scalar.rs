//! Reference scalar stores: single float, int, or string values.
//!
//! Scalars render with the tagged prefixes `f=`, `i=`, and `s=` so a
//! transport layer can recover the value type from the string alone.

use dqwatch_types::{Axis, BinIndex};

use crate::error::DqmError;
use crate::store::ContentStore;

const SCALAR_UNSUPPORTED: &str = "scalar";
const TEXT_UNSUPPORTED: &str = "text";

/// A single floating-point value.
///
/// `fill(x)` overwrites the value; the entry count tracks how many fills
/// happened. Soft reset subtracts the snapshot value and entry count.
#[derive(Debug, Clone, Default)]
pub struct FloatScalar {
    value: f64,
    entries: f64,
    baseline: Option<(f64, f64)>,
}

impl FloatScalar {
    /// Create an empty float scalar.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current (baseline-adjusted) value.
    pub fn value(&self) -> f64 {
        self.value - self.baseline.map_or(0.0, |(v, _)| v)
    }
}

impl ContentStore for FloatScalar {
    fn kind(&self) -> &'static str {
        "float scalar"
    }

    fn fill(&mut self, x: f64) -> Result<(), DqmError> {
        self.value = x;
        self.entries += 1.0;
        Ok(())
    }

    fn fill2(&mut self, _x: f64, _y: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill2", SCALAR_UNSUPPORTED))
    }

    fn fill3(&mut self, _x: f64, _y: f64, _z: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill3", SCALAR_UNSUPPORTED))
    }

    fn fill4(&mut self, _x: f64, _y: f64, _z: f64, _w: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill4", SCALAR_UNSUPPORTED))
    }

    fn fill_text(&mut self, _value: &str) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill_text", SCALAR_UNSUPPORTED))
    }

    fn value_string(&self) -> Result<String, DqmError> {
        Ok(format!("f={}", self.value()))
    }

    fn mean(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("mean", SCALAR_UNSUPPORTED))
    }

    fn mean_error(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("mean_error", SCALAR_UNSUPPORTED))
    }

    fn rms(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("rms", SCALAR_UNSUPPORTED))
    }

    fn rms_error(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("rms_error", SCALAR_UNSUPPORTED))
    }

    fn bin_content(&self, _bin: BinIndex) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("bin_content", SCALAR_UNSUPPORTED))
    }

    fn bin_error(&self, _bin: BinIndex) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("bin_error", SCALAR_UNSUPPORTED))
    }

    fn set_bin_content(&mut self, _bin: BinIndex, _value: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_bin_content", SCALAR_UNSUPPORTED))
    }

    fn set_bin_error(&mut self, _bin: BinIndex, _error: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_bin_error", SCALAR_UNSUPPORTED))
    }

    fn entries(&self) -> f64 {
        self.entries - self.baseline.map_or(0.0, |(_, e)| e)
    }

    fn set_entries(&mut self, entries: f64) {
        self.entries = entries;
    }

    fn bin_entries(&self, _bin: usize) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("bin_entries", SCALAR_UNSUPPORTED))
    }

    fn y_min(&self) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("y_min", SCALAR_UNSUPPORTED))
    }

    fn y_max(&self) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("y_max", SCALAR_UNSUPPORTED))
    }

    fn set_bin_label(&mut self, _bin: usize, _label: &str, _axis: Axis) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_bin_label", SCALAR_UNSUPPORTED))
    }

    fn set_axis_range(&mut self, _min: f64, _max: f64, _axis: Axis) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_axis_range", SCALAR_UNSUPPORTED))
    }

    fn reset(&mut self) {
        self.value = 0.0;
        self.entries = 0.0;
    }

    fn take_baseline(&mut self) {
        self.baseline = Some((self.value, self.entries));
    }

    fn clear_baseline(&mut self) {
        self.baseline = None;
    }
}

/// A single integer value.
///
/// Fills truncate toward zero, matching the float-argument fill surface.
#[derive(Debug, Clone, Default)]
pub struct IntScalar {
    value: i64,
    entries: f64,
    baseline: Option<(i64, f64)>,
}

impl IntScalar {
    /// Create an empty int scalar.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current (baseline-adjusted) value.
    pub fn value(&self) -> i64 {
        self.value - self.baseline.map_or(0, |(v, _)| v)
    }
}

impl ContentStore for IntScalar {
    fn kind(&self) -> &'static str {
        "int scalar"
    }

    fn fill(&mut self, x: f64) -> Result<(), DqmError> {
        self.value = x as i64;
        self.entries += 1.0;
        Ok(())
    }

    fn fill2(&mut self, _x: f64, _y: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill2", SCALAR_UNSUPPORTED))
    }

    fn fill3(&mut self, _x: f64, _y: f64, _z: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill3", SCALAR_UNSUPPORTED))
    }

    fn fill4(&mut self, _x: f64, _y: f64, _z: f64, _w: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill4", SCALAR_UNSUPPORTED))
    }

    fn fill_text(&mut self, _value: &str) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill_text", SCALAR_UNSUPPORTED))
    }

    fn value_string(&self) -> Result<String, DqmError> {
        Ok(format!("i={}", self.value()))
    }

    fn mean(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("mean", SCALAR_UNSUPPORTED))
    }

    fn mean_error(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("mean_error", SCALAR_UNSUPPORTED))
    }

    fn rms(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("rms", SCALAR_UNSUPPORTED))
    }

    fn rms_error(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("rms_error", SCALAR_UNSUPPORTED))
    }

    fn bin_content(&self, _bin: BinIndex) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("bin_content", SCALAR_UNSUPPORTED))
    }

    fn bin_error(&self, _bin: BinIndex) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("bin_error", SCALAR_UNSUPPORTED))
    }

    fn set_bin_content(&mut self, _bin: BinIndex, _value: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_bin_content", SCALAR_UNSUPPORTED))
    }

    fn set_bin_error(&mut self, _bin: BinIndex, _error: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_bin_error", SCALAR_UNSUPPORTED))
    }

    fn entries(&self) -> f64 {
        self.entries - self.baseline.map_or(0.0, |(_, e)| e)
    }

    fn set_entries(&mut self, entries: f64) {
        self.entries = entries;
    }

    fn bin_entries(&self, _bin: usize) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("bin_entries", SCALAR_UNSUPPORTED))
    }

    fn y_min(&self) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("y_min", SCALAR_UNSUPPORTED))
    }

    fn y_max(&self) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("y_max", SCALAR_UNSUPPORTED))
    }

    fn set_bin_label(&mut self, _bin: usize, _label: &str, _axis: Axis) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_bin_label", SCALAR_UNSUPPORTED))
    }

    fn set_axis_range(&mut self, _min: f64, _max: f64, _axis: Axis) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_axis_range", SCALAR_UNSUPPORTED))
    }

    fn reset(&mut self) {
        self.value = 0;
        self.entries = 0.0;
    }

    fn take_baseline(&mut self) {
        self.baseline = Some((self.value, self.entries));
    }

    fn clear_baseline(&mut self) {
        self.baseline = None;
    }
}

/// A single string value.
///
/// Text carries no numeric content, so the soft-reset baseline is a
/// no-op here.
#[derive(Debug, Clone, Default)]
pub struct TextScalar {
    value: String,
    entries: f64,
}

impl TextScalar {
    /// Create an empty text scalar.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl ContentStore for TextScalar {
    fn kind(&self) -> &'static str {
        "text"
    }

    fn fill(&mut self, _x: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill", TEXT_UNSUPPORTED))
    }

    fn fill2(&mut self, _x: f64, _y: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill2", TEXT_UNSUPPORTED))
    }

    fn fill3(&mut self, _x: f64, _y: f64, _z: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill3", TEXT_UNSUPPORTED))
    }

    fn fill4(&mut self, _x: f64, _y: f64, _z: f64, _w: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill4", TEXT_UNSUPPORTED))
    }

    fn fill_text(&mut self, value: &str) -> Result<(), DqmError> {
        self.value = value.to_string();
        self.entries += 1.0;
        Ok(())
    }

    fn value_string(&self) -> Result<String, DqmError> {
        Ok(format!("s={}", self.value))
    }

    fn mean(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("mean", TEXT_UNSUPPORTED))
    }

    fn mean_error(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("mean_error", TEXT_UNSUPPORTED))
    }

    fn rms(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("rms", TEXT_UNSUPPORTED))
    }

    fn rms_error(&self, _axis: Axis) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("rms_error", TEXT_UNSUPPORTED))
    }

    fn bin_content(&self, _bin: BinIndex) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("bin_content", TEXT_UNSUPPORTED))
    }

    fn bin_error(&self, _bin: BinIndex) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("bin_error", TEXT_UNSUPPORTED))
    }

    fn set_bin_content(&mut self, _bin: BinIndex, _value: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_bin_content", TEXT_UNSUPPORTED))
    }

    fn set_bin_error(&mut self, _bin: BinIndex, _error: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_bin_error", TEXT_UNSUPPORTED))
    }

    fn entries(&self) -> f64 {
        self.entries
    }

    fn set_entries(&mut self, entries: f64) {
        self.entries = entries;
    }

    fn bin_entries(&self, _bin: usize) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("bin_entries", TEXT_UNSUPPORTED))
    }

    fn y_min(&self) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("y_min", TEXT_UNSUPPORTED))
    }

    fn y_max(&self) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("y_max", TEXT_UNSUPPORTED))
    }

    fn set_bin_label(&mut self, _bin: usize, _label: &str, _axis: Axis) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_bin_label", TEXT_UNSUPPORTED))
    }

    fn set_axis_range(&mut self, _min: f64, _max: f64, _axis: Axis) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_axis_range", TEXT_UNSUPPORTED))
    }

    fn reset(&mut self) {
        self.value.clear();
        self.entries = 0.0;
    }

    fn take_baseline(&mut self) {}

    fn clear_baseline(&mut self) {}
}
