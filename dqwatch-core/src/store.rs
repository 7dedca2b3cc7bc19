//! Content-storage capability contract.
//!
//! A monitoring element delegates all numeric work to a store that
//! implements [`ContentStore`]. The element owns the lock and the
//! lifecycle state; the store owns bins, moments, and the soft-reset
//! baseline. Operations a given store cannot express return
//! [`DqmError::Unsupported`] rather than silently doing nothing.

use dqwatch_types::{Axis, BinIndex};

use crate::error::DqmError;

/// The capability surface a backend store realizes for its element.
///
/// Fill arity is positional, matching histogram conventions: two
/// arguments mean 2-D `(x, y)` or weighted 1-D `(x, w)` depending on the
/// store; three mean 3-D or weighted 2-D; four mean weighted 3-D.
///
/// Stores also implement the content half of soft reset: after
/// [`take_baseline`](ContentStore::take_baseline) every read accessor
/// reports content minus the snapshot, until
/// [`clear_baseline`](ContentStore::clear_baseline) restores raw
/// reporting.
pub trait ContentStore: Send {
    /// Short label for this store kind, used in diagnostics.
    fn kind(&self) -> &'static str;

    /// Fill with a single sample (scalar value or 1-D x).
    fn fill(&mut self, x: f64) -> Result<(), DqmError>;

    /// Fill with two values (2-D `(x, y)` or weighted 1-D `(x, w)`).
    fn fill2(&mut self, x: f64, y: f64) -> Result<(), DqmError>;

    /// Fill with three values (3-D `(x, y, z)` or weighted 2-D).
    fn fill3(&mut self, x: f64, y: f64, z: f64) -> Result<(), DqmError>;

    /// Fill with four values (weighted 3-D).
    fn fill4(&mut self, x: f64, y: f64, z: f64, w: f64) -> Result<(), DqmError>;

    /// Fill with a string value (text stores only).
    fn fill_text(&mut self, value: &str) -> Result<(), DqmError>;

    /// Value in string form, e.g. `f=3.14` (scalar and text stores only).
    fn value_string(&self) -> Result<String, DqmError>;

    /// Mean along the given axis.
    fn mean(&self, axis: Axis) -> Result<f64, DqmError>;

    /// Uncertainty on the mean along the given axis.
    fn mean_error(&self, axis: Axis) -> Result<f64, DqmError>;

    /// RMS along the given axis.
    fn rms(&self, axis: Axis) -> Result<f64, DqmError>;

    /// Uncertainty on the RMS along the given axis.
    fn rms_error(&self, axis: Axis) -> Result<f64, DqmError>;

    /// Content of one bin.
    fn bin_content(&self, bin: BinIndex) -> Result<f64, DqmError>;

    /// Uncertainty on the content of one bin.
    fn bin_error(&self, bin: BinIndex) -> Result<f64, DqmError>;

    /// Overwrite the content of one bin.
    fn set_bin_content(&mut self, bin: BinIndex, value: f64) -> Result<(), DqmError>;

    /// Overwrite the uncertainty of one bin.
    fn set_bin_error(&mut self, bin: BinIndex, error: f64) -> Result<(), DqmError>;

    /// Number of entries.
    fn entries(&self) -> f64;

    /// Overwrite the entry count.
    fn set_entries(&mut self, entries: f64);

    /// Number of entries in one bin (profiles only).
    fn bin_entries(&self, bin: usize) -> Result<f64, DqmError>;

    /// Lower y limit (profiles only).
    fn y_min(&self) -> Result<f64, DqmError>;

    /// Upper y limit (profiles only).
    fn y_max(&self) -> Result<f64, DqmError>;

    /// Label one bin on the given axis.
    fn set_bin_label(&mut self, bin: usize, label: &str, axis: Axis) -> Result<(), DqmError>;

    /// Restrict the displayed range of the given axis.
    fn set_axis_range(&mut self, min: f64, max: f64, axis: Axis) -> Result<(), DqmError>;

    /// Discard all content, keeping binning, labels, and ranges.
    fn reset(&mut self);

    /// Snapshot current content as the soft-reset baseline.
    ///
    /// Calling again while a baseline is held refreshes the snapshot.
    fn take_baseline(&mut self);

    /// Drop the soft-reset baseline, restoring raw reporting.
    fn clear_baseline(&mut self);
}

/// Read-only view of element content, handed to quality tests.
///
/// The view borrows the store while the element's guard is held, so a
/// test observes content and state in sync. Only read accessors are
/// exposed; all values reflect the active soft-reset baseline.
#[derive(Clone, Copy)]
pub struct ContentView<'a> {
    store: &'a dyn ContentStore,
}

impl<'a> ContentView<'a> {
    pub(crate) fn new(store: &'a dyn ContentStore) -> Self {
        Self { store }
    }

    /// Short label for the underlying store kind.
    pub fn kind(&self) -> &'static str {
        self.store.kind()
    }

    /// Value in string form (scalar and text stores only).
    pub fn value_string(&self) -> Result<String, DqmError> {
        self.store.value_string()
    }

    /// Mean along the given axis.
    pub fn mean(&self, axis: Axis) -> Result<f64, DqmError> {
        self.store.mean(axis)
    }

    /// Uncertainty on the mean along the given axis.
    pub fn mean_error(&self, axis: Axis) -> Result<f64, DqmError> {
        self.store.mean_error(axis)
    }

    /// RMS along the given axis.
    pub fn rms(&self, axis: Axis) -> Result<f64, DqmError> {
        self.store.rms(axis)
    }

    /// Uncertainty on the RMS along the given axis.
    pub fn rms_error(&self, axis: Axis) -> Result<f64, DqmError> {
        self.store.rms_error(axis)
    }

    /// Content of one bin.
    pub fn bin_content(&self, bin: BinIndex) -> Result<f64, DqmError> {
        self.store.bin_content(bin)
    }

    /// Uncertainty on the content of one bin.
    pub fn bin_error(&self, bin: BinIndex) -> Result<f64, DqmError> {
        self.store.bin_error(bin)
    }

    /// Number of entries.
    pub fn entries(&self) -> f64 {
        self.store.entries()
    }

    /// Number of entries in one bin (profiles only).
    pub fn bin_entries(&self, bin: usize) -> Result<f64, DqmError> {
        self.store.bin_entries(bin)
    }

    /// Lower y limit (profiles only).
    pub fn y_min(&self) -> Result<f64, DqmError> {
        self.store.y_min()
    }

    /// Upper y limit (profiles only).
    pub fn y_max(&self) -> Result<f64, DqmError> {
        self.store.y_max()
    }
}

impl std::fmt::Debug for ContentView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentView")
            .field("kind", &self.kind())
            .field("entries", &self.entries())
            .finish()
    }
}
