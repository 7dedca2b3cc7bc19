//! Monitoring elements: the public abstraction over guarded content,
//! lifecycle state, and quality reports.
//!
//! An element is either a [`ContentElement`] (statistical content plus
//! the state machine and report set, all behind one mutex) or a
//! [`FolderElement`] (a named grouping node with no content of its own).
//! [`MonitoringElement`] is the tagged union over the two; content
//! operations on a folder fail with [`DqmError::FolderOperation`].

use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use dqwatch_types::{Axis, BinIndex, QReport, QStatus};

use crate::error::DqmError;
use crate::histogram::{Hist1d, Profile1d};
use crate::qtest::{QualityTest, StatusAggregate};
use crate::reports::ReportSet;
use crate::scalar::{FloatScalar, IntScalar, TextScalar};
use crate::state::ElementState;
use crate::store::{ContentStore, ContentView};

/// The single aggregate record protected by a content element's guard.
///
/// Content, state, and reports mutate together under one lock so a
/// consumer never observes them out of sync.
struct Guarded {
    store: Box<dyn ContentStore>,
    state: ElementState,
    reports: ReportSet,
}

struct ContentInner {
    name: String,
    guarded: Mutex<Guarded>,
}

/// Summary returned by [`ContentElement::end_cycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Whether content varied during the cycle that just ended.
    pub was_updated: bool,
    /// Number of quality tests run.
    pub tests_run: usize,
    /// Whether content was reset by the end-of-cycle policy.
    pub content_reset: bool,
}

/// A monitoring element with statistical content.
///
/// Handles are cheap to clone and share one underlying element, so a
/// producer thread can fill while driver and consumer threads read
/// state, run quality tests, or trigger resets. Every operation is
/// synchronous; the only blocking is acquiring the element's guard.
///
/// # Example
///
/// ```rust
/// use dqwatch_core::ContentElement;
///
/// let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
/// h1.fill(1.0).unwrap();
/// h1.fill(2.0).unwrap();
///
/// assert!(h1.was_updated());
/// h1.clear_updated();
/// assert!(!h1.was_updated());
/// ```
#[derive(Clone)]
pub struct ContentElement {
    inner: Arc<ContentInner>,
}

impl ContentElement {
    /// Create an element around any content store.
    pub fn new(name: impl Into<String>, store: impl ContentStore + 'static) -> Self {
        Self {
            inner: Arc::new(ContentInner {
                name: name.into(),
                guarded: Mutex::new(Guarded {
                    store: Box::new(store),
                    state: ElementState::new(),
                    reports: ReportSet::new(),
                }),
            }),
        }
    }

    /// Element holding a single float value.
    pub fn float_scalar(name: impl Into<String>) -> Self {
        Self::new(name, FloatScalar::new())
    }

    /// Element holding a single integer value.
    pub fn int_scalar(name: impl Into<String>) -> Self {
        Self::new(name, IntScalar::new())
    }

    /// Element holding a single string value.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, TextScalar::new())
    }

    /// Element holding a 1-D histogram.
    pub fn hist1d(name: impl Into<String>, nbins: usize, x_min: f64, x_max: f64) -> Self {
        Self::new(name, Hist1d::new(nbins, x_min, x_max))
    }

    /// Element holding a 1-D profile.
    pub fn profile1d(name: impl Into<String>, nbins: usize, x_min: f64, x_max: f64) -> Self {
        Self::new(name, Profile1d::new(nbins, x_min, x_max))
    }

    /// Set the accumulate policy and return the element (builder form).
    pub fn with_accumulate(self, flag: bool) -> Self {
        self.set_accumulate(flag);
        self
    }

    /// Set the end-of-cycle reset policy and return the element.
    pub fn with_reset_on_cycle_end(self, flag: bool) -> Self {
        self.set_reset_on_cycle_end(flag);
        self
    }

    /// Element name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Store kind label, e.g. `hist1d`.
    pub fn kind(&self) -> &'static str {
        self.inner.guarded.lock().store.kind()
    }

    /// When the element was created.
    pub fn created_at(&self) -> SystemTime {
        self.inner.guarded.lock().state.created_at()
    }

    fn mutate<R>(
        &self,
        op: impl FnOnce(&mut dyn ContentStore) -> Result<R, DqmError>,
    ) -> Result<R, DqmError> {
        let mut g = self.inner.guarded.lock();
        let out = op(&mut *g.store)?;
        g.state.mark_updated();
        Ok(out)
    }

    /// Fill with a single sample.
    pub fn fill(&self, x: f64) -> Result<(), DqmError> {
        self.mutate(|store| store.fill(x))
    }

    /// Fill with two values (2-D `(x, y)` or weighted 1-D `(x, w)`).
    pub fn fill2(&self, x: f64, y: f64) -> Result<(), DqmError> {
        self.mutate(|store| store.fill2(x, y))
    }

    /// Fill with three values (3-D or weighted 2-D).
    pub fn fill3(&self, x: f64, y: f64, z: f64) -> Result<(), DqmError> {
        self.mutate(|store| store.fill3(x, y, z))
    }

    /// Fill with four values (weighted 3-D).
    pub fn fill4(&self, x: f64, y: f64, z: f64, w: f64) -> Result<(), DqmError> {
        self.mutate(|store| store.fill4(x, y, z, w))
    }

    /// Fill with a string value (text elements only).
    pub fn fill_text(&self, value: &str) -> Result<(), DqmError> {
        self.mutate(|store| store.fill_text(value))
    }

    /// Value in string form, e.g. `f=3.14` (scalar and text elements).
    pub fn value_string(&self) -> Result<String, DqmError> {
        self.inner.guarded.lock().store.value_string()
    }

    /// Tagged value string, `<name>value</name>`.
    pub fn tag_string(&self) -> Result<String, DqmError> {
        let g = self.inner.guarded.lock();
        let value = g.store.value_string()?;
        Ok(format!("<{0}>{1}</{0}>", self.inner.name, value))
    }

    /// Mean along the given axis.
    pub fn mean(&self, axis: Axis) -> Result<f64, DqmError> {
        self.inner.guarded.lock().store.mean(axis)
    }

    /// Uncertainty on the mean along the given axis.
    pub fn mean_error(&self, axis: Axis) -> Result<f64, DqmError> {
        self.inner.guarded.lock().store.mean_error(axis)
    }

    /// RMS along the given axis.
    pub fn rms(&self, axis: Axis) -> Result<f64, DqmError> {
        self.inner.guarded.lock().store.rms(axis)
    }

    /// Uncertainty on the RMS along the given axis.
    pub fn rms_error(&self, axis: Axis) -> Result<f64, DqmError> {
        self.inner.guarded.lock().store.rms_error(axis)
    }

    /// Content of one bin.
    pub fn bin_content(&self, bin: BinIndex) -> Result<f64, DqmError> {
        self.inner.guarded.lock().store.bin_content(bin)
    }

    /// Uncertainty on the content of one bin.
    pub fn bin_error(&self, bin: BinIndex) -> Result<f64, DqmError> {
        self.inner.guarded.lock().store.bin_error(bin)
    }

    /// Overwrite the content of one bin.
    pub fn set_bin_content(&self, bin: BinIndex, value: f64) -> Result<(), DqmError> {
        self.mutate(|store| store.set_bin_content(bin, value))
    }

    /// Overwrite the uncertainty of one bin.
    pub fn set_bin_error(&self, bin: BinIndex, error: f64) -> Result<(), DqmError> {
        self.mutate(|store| store.set_bin_error(bin, error))
    }

    /// Number of entries.
    pub fn entries(&self) -> f64 {
        self.inner.guarded.lock().store.entries()
    }

    /// Overwrite the entry count.
    pub fn set_entries(&self, entries: f64) {
        let mut g = self.inner.guarded.lock();
        g.store.set_entries(entries);
        g.state.mark_updated();
    }

    /// Number of entries in one bin (profile elements).
    pub fn bin_entries(&self, bin: usize) -> Result<f64, DqmError> {
        self.inner.guarded.lock().store.bin_entries(bin)
    }

    /// Lower y limit (profile elements).
    pub fn y_min(&self) -> Result<f64, DqmError> {
        self.inner.guarded.lock().store.y_min()
    }

    /// Upper y limit (profile elements).
    pub fn y_max(&self) -> Result<f64, DqmError> {
        self.inner.guarded.lock().store.y_max()
    }

    /// Label one bin on the given axis.
    pub fn set_bin_label(&self, bin: usize, label: &str, axis: Axis) -> Result<(), DqmError> {
        self.mutate(|store| store.set_bin_label(bin, label, axis))
    }

    /// Restrict the displayed range of the given axis.
    pub fn set_axis_range(&self, min: f64, max: f64, axis: Axis) -> Result<(), DqmError> {
        self.mutate(|store| store.set_axis_range(min, max, axis))
    }

    /// Discard content, unless the accumulate policy is on.
    ///
    /// Does not touch the update flag; that is the cycle driver's call
    /// via [`clear_updated`](Self::clear_updated).
    pub fn reset(&self) {
        let mut g = self.inner.guarded.lock();
        if g.state.accumulate() {
            debug!(element = %self.inner.name, "reset skipped while accumulating");
            return;
        }
        g.store.reset();
        debug!(element = %self.inner.name, "content reset");
    }

    /// Snapshot current content as a baseline; read accessors report
    /// content minus baseline until [`disable_soft_reset`](Self::disable_soft_reset).
    ///
    /// Calling again while enabled refreshes the baseline.
    pub fn soft_reset(&self) {
        let mut g = self.inner.guarded.lock();
        let refreshed = g.state.soft_reset_enabled();
        g.store.take_baseline();
        g.state.set_soft_reset_enabled(true);
        debug!(element = %self.inner.name, refreshed, "soft reset baseline taken");
    }

    /// Drop the soft-reset baseline, restoring raw content reporting.
    pub fn disable_soft_reset(&self) {
        let mut g = self.inner.guarded.lock();
        g.store.clear_baseline();
        g.state.set_soft_reset_enabled(false);
        debug!(element = %self.inner.name, "soft reset disabled");
    }

    /// True if content changed since the last `clear_updated`.
    pub fn was_updated(&self) -> bool {
        self.inner.guarded.lock().state.was_updated()
    }

    /// Clear the update flag. Called by the cycle driver after it has
    /// observed the flag, never by the producer.
    pub fn clear_updated(&self) {
        self.inner.guarded.lock().state.clear_updated();
    }

    /// End-of-cycle reset policy.
    pub fn reset_on_cycle_end(&self) -> bool {
        self.inner.guarded.lock().state.reset_on_cycle_end()
    }

    /// Set the end-of-cycle reset policy.
    pub fn set_reset_on_cycle_end(&self, flag: bool) {
        self.inner.guarded.lock().state.set_reset_on_cycle_end(flag);
    }

    /// Accumulate policy.
    pub fn accumulate(&self) -> bool {
        self.inner.guarded.lock().state.accumulate()
    }

    /// Set the accumulate policy. While on, content resets are no-ops.
    pub fn set_accumulate(&self, flag: bool) {
        self.inner.guarded.lock().state.set_accumulate(flag);
    }

    /// Whether a soft-reset baseline is active.
    pub fn soft_reset_enabled(&self) -> bool {
        self.inner.guarded.lock().state.soft_reset_enabled()
    }

    /// Run a battery of quality tests against current content.
    ///
    /// The whole battery runs inside one critical section, each test
    /// seeing baseline-adjusted content. Verdicts replace earlier
    /// reports with the same test name; a test that fails internally is
    /// recorded as an "other" report and does not abort the batch.
    pub fn run_qtests(&self, tests: &[Arc<dyn QualityTest>]) {
        let mut g = self.inner.guarded.lock();
        run_battery(&self.inner.name, &mut g, tests);
    }

    /// Standard cycle-boundary sequence: observe the update flag, run
    /// the battery, apply the reset policy, clear the update flag.
    pub fn end_cycle(&self, tests: &[Arc<dyn QualityTest>]) -> CycleOutcome {
        let mut g = self.inner.guarded.lock();
        let was_updated = g.state.was_updated();
        run_battery(&self.inner.name, &mut g, tests);

        let content_reset = g.state.reset_on_cycle_end() && !g.state.accumulate();
        if content_reset {
            g.store.reset();
        }
        g.state.clear_updated();

        let outcome = CycleOutcome {
            was_updated,
            tests_run: tests.len(),
            content_reset,
        };
        debug!(
            element = %self.inner.name,
            was_updated,
            tests = tests.len(),
            content_reset,
            "cycle ended"
        );
        outcome
    }

    /// Report for one test. `None` if the test never ran here.
    pub fn qreport(&self, name: &str) -> Option<QReport> {
        self.inner.guarded.lock().reports.get(name).cloned()
    }

    /// All reports, including `Ok` ones.
    pub fn qreports(&self) -> Vec<QReport> {
        self.inner.guarded.lock().reports.all()
    }

    /// Warning reports from the last runs.
    pub fn qwarnings(&self) -> Vec<QReport> {
        self.inner.guarded.lock().reports.warnings()
    }

    /// Error reports from the last runs.
    pub fn qerrors(&self) -> Vec<QReport> {
        self.inner.guarded.lock().reports.errors()
    }

    /// Non-ok, non-warning, non-error reports from the last runs.
    pub fn qothers(&self) -> Vec<QReport> {
        self.inner.guarded.lock().reports.others()
    }

    /// True if at least one quality test reported an error.
    pub fn has_error(&self) -> bool {
        self.inner.guarded.lock().reports.has_error()
    }

    /// True if at least one quality test reported a warning.
    pub fn has_warning(&self) -> bool {
        self.inner.guarded.lock().reports.has_warning()
    }

    /// True if at least one test reported some other non-ok status.
    pub fn has_other_report(&self) -> bool {
        self.inner.guarded.lock().reports.has_other()
    }
}

impl std::fmt::Debug for ContentElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentElement")
            .field("name", &self.inner.name)
            .finish()
    }
}

fn run_battery(element: &str, guarded: &mut Guarded, tests: &[Arc<dyn QualityTest>]) {
    let mut batch = Vec::with_capacity(tests.len());
    for test in tests {
        let test_name = test.name().to_string();
        let report = match test.check(ContentView::new(&*guarded.store)) {
            Ok(verdict) => QReport {
                test_name,
                status: verdict.status,
                message: verdict.message,
                aux: verdict.aux,
            },
            Err(err) => {
                warn!(element, test = %test_name, error = %err, "quality test failed");
                QReport::new(test_name, QStatus::Other, format!("quality test failed: {err}"))
            }
        };
        batch.push(report);
    }
    guarded.reports.extend(batch);
}

struct FolderInner {
    name: String,
    created_at: SystemTime,
    aggregate: RwLock<Option<Box<dyn StatusAggregate>>>,
}

/// A folder element: a named grouping node with no content of its own.
///
/// Folders answer `has_error`/`has_warning`/`has_other_report` through
/// an installed [`StatusAggregate`] (false while none is installed); an
/// external registry is expected to install one that inspects the
/// folder's entire subtree.
#[derive(Clone)]
pub struct FolderElement {
    inner: Arc<FolderInner>,
}

impl FolderElement {
    /// Create a folder element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(FolderInner {
                name: name.into(),
                created_at: SystemTime::now(),
                aggregate: RwLock::new(None),
            }),
        }
    }

    /// Install an aggregate and return the folder (builder form).
    pub fn with_aggregate(self, aggregate: Box<dyn StatusAggregate>) -> Self {
        self.set_aggregate(aggregate);
        self
    }

    /// Folder name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// When the folder was created.
    pub fn created_at(&self) -> SystemTime {
        self.inner.created_at
    }

    /// Install the subtree status aggregate.
    pub fn set_aggregate(&self, aggregate: Box<dyn StatusAggregate>) {
        *self.inner.aggregate.write() = Some(aggregate);
    }

    /// Remove the subtree status aggregate.
    pub fn clear_aggregate(&self) {
        *self.inner.aggregate.write() = None;
    }

    /// True if any element below this folder has an error report.
    pub fn has_error(&self) -> bool {
        self.inner
            .aggregate
            .read()
            .as_ref()
            .map_or(false, |a| a.has_error())
    }

    /// True if any element below this folder has a warning report.
    pub fn has_warning(&self) -> bool {
        self.inner
            .aggregate
            .read()
            .as_ref()
            .map_or(false, |a| a.has_warning())
    }

    /// True if any element below this folder has an "other" report.
    pub fn has_other_report(&self) -> bool {
        self.inner
            .aggregate
            .read()
            .as_ref()
            .map_or(false, |a| a.has_other_report())
    }
}

impl std::fmt::Debug for FolderElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderElement")
            .field("name", &self.inner.name)
            .finish()
    }
}

/// A monitoring element: content or folder.
///
/// The enum gives registries a uniform handle; content operations on the
/// `Folder` variant fail with [`DqmError::FolderOperation`] instead of
/// being silently ignored. Code that knows it holds content should work
/// with [`ContentElement`] directly and skip the fallible layer.
#[derive(Debug, Clone)]
pub enum MonitoringElement {
    /// Element with statistical content.
    Content(ContentElement),
    /// Grouping node without content.
    Folder(FolderElement),
}

impl MonitoringElement {
    /// Create a content element around any store.
    pub fn content(name: impl Into<String>, store: impl ContentStore + 'static) -> Self {
        MonitoringElement::Content(ContentElement::new(name, store))
    }

    /// Create a folder element.
    pub fn folder(name: impl Into<String>) -> Self {
        MonitoringElement::Folder(FolderElement::new(name))
    }

    /// Element name.
    pub fn name(&self) -> &str {
        match self {
            MonitoringElement::Content(c) => c.name(),
            MonitoringElement::Folder(f) => f.name(),
        }
    }

    /// When the element was created.
    pub fn created_at(&self) -> SystemTime {
        match self {
            MonitoringElement::Content(c) => c.created_at(),
            MonitoringElement::Folder(f) => f.created_at(),
        }
    }

    /// True if this is a folder element.
    pub fn is_folder(&self) -> bool {
        matches!(self, MonitoringElement::Folder(_))
    }

    /// Opposite of [`is_folder`](Self::is_folder).
    pub fn is_not_folder(&self) -> bool {
        !self.is_folder()
    }

    /// The content element, if this is one.
    pub fn as_content(&self) -> Option<&ContentElement> {
        match self {
            MonitoringElement::Content(c) => Some(c),
            MonitoringElement::Folder(_) => None,
        }
    }

    /// The folder element, if this is one.
    pub fn as_folder(&self) -> Option<&FolderElement> {
        match self {
            MonitoringElement::Folder(f) => Some(f),
            MonitoringElement::Content(_) => None,
        }
    }

    fn require_content(&self, op: &'static str) -> Result<&ContentElement, DqmError> {
        match self {
            MonitoringElement::Content(c) => Ok(c),
            MonitoringElement::Folder(f) => Err(DqmError::folder_op(f.name(), op)),
        }
    }

    /// Fill with a single sample.
    pub fn fill(&self, x: f64) -> Result<(), DqmError> {
        self.require_content("fill")?.fill(x)
    }

    /// Fill with two values.
    pub fn fill2(&self, x: f64, y: f64) -> Result<(), DqmError> {
        self.require_content("fill2")?.fill2(x, y)
    }

    /// Fill with three values.
    pub fn fill3(&self, x: f64, y: f64, z: f64) -> Result<(), DqmError> {
        self.require_content("fill3")?.fill3(x, y, z)
    }

    /// Fill with four values.
    pub fn fill4(&self, x: f64, y: f64, z: f64, w: f64) -> Result<(), DqmError> {
        self.require_content("fill4")?.fill4(x, y, z, w)
    }

    /// Fill with a string value.
    pub fn fill_text(&self, value: &str) -> Result<(), DqmError> {
        self.require_content("fill_text")?.fill_text(value)
    }

    /// Value in string form (scalar and text elements).
    pub fn value_string(&self) -> Result<String, DqmError> {
        self.require_content("value_string")?.value_string()
    }

    /// Tagged value string, `<name>value</name>`.
    pub fn tag_string(&self) -> Result<String, DqmError> {
        self.require_content("tag_string")?.tag_string()
    }

    /// Mean along the given axis.
    pub fn mean(&self, axis: Axis) -> Result<f64, DqmError> {
        self.require_content("mean")?.mean(axis)
    }

    /// Uncertainty on the mean along the given axis.
    pub fn mean_error(&self, axis: Axis) -> Result<f64, DqmError> {
        self.require_content("mean_error")?.mean_error(axis)
    }

    /// RMS along the given axis.
    pub fn rms(&self, axis: Axis) -> Result<f64, DqmError> {
        self.require_content("rms")?.rms(axis)
    }

    /// Uncertainty on the RMS along the given axis.
    pub fn rms_error(&self, axis: Axis) -> Result<f64, DqmError> {
        self.require_content("rms_error")?.rms_error(axis)
    }

    /// Content of one bin.
    pub fn bin_content(&self, bin: BinIndex) -> Result<f64, DqmError> {
        self.require_content("bin_content")?.bin_content(bin)
    }

    /// Uncertainty on the content of one bin.
    pub fn bin_error(&self, bin: BinIndex) -> Result<f64, DqmError> {
        self.require_content("bin_error")?.bin_error(bin)
    }

    /// Overwrite the content of one bin.
    pub fn set_bin_content(&self, bin: BinIndex, value: f64) -> Result<(), DqmError> {
        self.require_content("set_bin_content")?
            .set_bin_content(bin, value)
    }

    /// Overwrite the uncertainty of one bin.
    pub fn set_bin_error(&self, bin: BinIndex, error: f64) -> Result<(), DqmError> {
        self.require_content("set_bin_error")?
            .set_bin_error(bin, error)
    }

    /// Number of entries.
    pub fn entries(&self) -> Result<f64, DqmError> {
        Ok(self.require_content("entries")?.entries())
    }

    /// Overwrite the entry count.
    pub fn set_entries(&self, entries: f64) -> Result<(), DqmError> {
        self.require_content("set_entries")?.set_entries(entries);
        Ok(())
    }

    /// Number of entries in one bin (profile elements).
    pub fn bin_entries(&self, bin: usize) -> Result<f64, DqmError> {
        self.require_content("bin_entries")?.bin_entries(bin)
    }

    /// Lower y limit (profile elements).
    pub fn y_min(&self) -> Result<f64, DqmError> {
        self.require_content("y_min")?.y_min()
    }

    /// Upper y limit (profile elements).
    pub fn y_max(&self) -> Result<f64, DqmError> {
        self.require_content("y_max")?.y_max()
    }

    /// Label one bin on the given axis.
    pub fn set_bin_label(&self, bin: usize, label: &str, axis: Axis) -> Result<(), DqmError> {
        self.require_content("set_bin_label")?
            .set_bin_label(bin, label, axis)
    }

    /// Restrict the displayed range of the given axis.
    pub fn set_axis_range(&self, min: f64, max: f64, axis: Axis) -> Result<(), DqmError> {
        self.require_content("set_axis_range")?
            .set_axis_range(min, max, axis)
    }

    /// Discard content, unless the accumulate policy is on.
    pub fn reset(&self) -> Result<(), DqmError> {
        self.require_content("reset")?.reset();
        Ok(())
    }

    /// Take a soft-reset baseline snapshot.
    pub fn soft_reset(&self) -> Result<(), DqmError> {
        self.require_content("soft_reset")?.soft_reset();
        Ok(())
    }

    /// Drop the soft-reset baseline.
    pub fn disable_soft_reset(&self) -> Result<(), DqmError> {
        self.require_content("disable_soft_reset")?.disable_soft_reset();
        Ok(())
    }

    /// True if content changed since the last `clear_updated`. Folders
    /// carry no content and always answer false.
    pub fn was_updated(&self) -> bool {
        match self {
            MonitoringElement::Content(c) => c.was_updated(),
            MonitoringElement::Folder(_) => false,
        }
    }

    /// Clear the update flag.
    pub fn clear_updated(&self) -> Result<(), DqmError> {
        self.require_content("clear_updated")?.clear_updated();
        Ok(())
    }

    /// End-of-cycle reset policy.
    pub fn reset_on_cycle_end(&self) -> Result<bool, DqmError> {
        Ok(self.require_content("reset_on_cycle_end")?.reset_on_cycle_end())
    }

    /// Set the end-of-cycle reset policy.
    pub fn set_reset_on_cycle_end(&self, flag: bool) -> Result<(), DqmError> {
        self.require_content("set_reset_on_cycle_end")?
            .set_reset_on_cycle_end(flag);
        Ok(())
    }

    /// Accumulate policy.
    pub fn accumulate(&self) -> Result<bool, DqmError> {
        Ok(self.require_content("accumulate")?.accumulate())
    }

    /// Set the accumulate policy. Folders reject this call.
    pub fn set_accumulate(&self, flag: bool) -> Result<(), DqmError> {
        self.require_content("set_accumulate")?.set_accumulate(flag);
        Ok(())
    }

    /// Whether a soft-reset baseline is active.
    pub fn soft_reset_enabled(&self) -> Result<bool, DqmError> {
        Ok(self.require_content("soft_reset_enabled")?.soft_reset_enabled())
    }

    /// Run a battery of quality tests. Folders reject this call.
    pub fn run_qtests(&self, tests: &[Arc<dyn QualityTest>]) -> Result<(), DqmError> {
        self.require_content("run_qtests")?.run_qtests(tests);
        Ok(())
    }

    /// Standard cycle-boundary sequence. Folders reject this call.
    pub fn end_cycle(&self, tests: &[Arc<dyn QualityTest>]) -> Result<CycleOutcome, DqmError> {
        Ok(self.require_content("end_cycle")?.end_cycle(tests))
    }

    /// Report for one test. `None` if the test never ran here; folders
    /// never have reports.
    pub fn qreport(&self, name: &str) -> Option<QReport> {
        self.as_content().and_then(|c| c.qreport(name))
    }

    /// All reports. Always empty for folders.
    pub fn qreports(&self) -> Vec<QReport> {
        self.as_content().map_or_else(Vec::new, |c| c.qreports())
    }

    /// Warning reports. Always empty for folders.
    pub fn qwarnings(&self) -> Vec<QReport> {
        self.as_content().map_or_else(Vec::new, |c| c.qwarnings())
    }

    /// Error reports. Always empty for folders.
    pub fn qerrors(&self) -> Vec<QReport> {
        self.as_content().map_or_else(Vec::new, |c| c.qerrors())
    }

    /// "Other" reports. Always empty for folders.
    pub fn qothers(&self) -> Vec<QReport> {
        self.as_content().map_or_else(Vec::new, |c| c.qothers())
    }

    /// True if any quality test reported an error; folders delegate to
    /// their installed aggregate.
    pub fn has_error(&self) -> bool {
        match self {
            MonitoringElement::Content(c) => c.has_error(),
            MonitoringElement::Folder(f) => f.has_error(),
        }
    }

    /// True if any quality test reported a warning; folders delegate to
    /// their installed aggregate.
    pub fn has_warning(&self) -> bool {
        match self {
            MonitoringElement::Content(c) => c.has_warning(),
            MonitoringElement::Folder(f) => f.has_warning(),
        }
    }

    /// True if any test reported some other non-ok status; folders
    /// delegate to their installed aggregate.
    pub fn has_other_report(&self) -> bool {
        match self {
            MonitoringElement::Content(c) => c.has_other_report(),
            MonitoringElement::Folder(f) => f.has_other_report(),
        }
    }
}

impl From<ContentElement> for MonitoringElement {
    fn from(element: ContentElement) -> Self {
        MonitoringElement::Content(element)
    }
}

impl From<FolderElement> for MonitoringElement {
    fn from(folder: FolderElement) -> Self {
        MonitoringElement::Folder(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qtest::{QtestError, Verdict};

    /// Test passing iff the element has at least `min` entries.
    struct EntriesAtLeast {
        min: f64,
    }

    impl QualityTest for EntriesAtLeast {
        fn name(&self) -> &str {
            "entriesAtLeast"
        }

        fn check(&self, content: ContentView<'_>) -> Result<Verdict, QtestError> {
            if content.entries() >= self.min {
                Ok(Verdict::ok())
            } else {
                Ok(Verdict::error(format!(
                    "{} entries, need {}",
                    content.entries(),
                    self.min
                )))
            }
        }
    }

    struct AlwaysFails;

    impl QualityTest for AlwaysFails {
        fn name(&self) -> &str {
            "brokenTest"
        }

        fn check(&self, _content: ContentView<'_>) -> Result<Verdict, QtestError> {
            Err(QtestError::new("reference histogram missing"))
        }
    }

    struct AlwaysWarns;

    impl QualityTest for AlwaysWarns {
        fn name(&self) -> &str {
            "noisyBins"
        }

        fn check(&self, _content: ContentView<'_>) -> Result<Verdict, QtestError> {
            Ok(Verdict::warning("2 noisy bins").with_flagged_bins(vec![3, 7]))
        }
    }

    fn battery(tests: Vec<Box<dyn QualityTest>>) -> Vec<Arc<dyn QualityTest>> {
        tests.into_iter().map(Arc::from).collect()
    }

    #[test]
    fn fill_sets_update_flag_until_cleared() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        h1.clear_updated();

        h1.fill(1.0).unwrap();
        h1.fill(2.0).unwrap();
        assert!(h1.was_updated());

        h1.clear_updated();
        assert!(!h1.was_updated());
    }

    #[test]
    fn fresh_element_counts_as_updated() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        assert!(h1.was_updated());
    }

    #[test]
    fn every_mutating_entry_point_marks_updated() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);

        let mutations: Vec<Box<dyn Fn(&ContentElement)>> = vec![
            Box::new(|e| e.fill(1.0).unwrap()),
            Box::new(|e| e.fill2(1.0, 2.0).unwrap()),
            Box::new(|e| e.set_bin_content(BinIndex::D1(1), 3.0).unwrap()),
            Box::new(|e| e.set_bin_error(BinIndex::D1(1), 0.5).unwrap()),
            Box::new(|e| e.set_entries(7.0)),
            Box::new(|e| e.set_bin_label(1, "first", Axis::X).unwrap()),
            Box::new(|e| e.set_axis_range(0.0, 5.0, Axis::X).unwrap()),
        ];

        for mutate in mutations {
            h1.clear_updated();
            mutate(&h1);
            assert!(h1.was_updated());
        }
    }

    #[test]
    fn failed_mutation_does_not_mark_updated() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        h1.clear_updated();

        assert!(h1.set_bin_content(BinIndex::D1(99), 1.0).is_err());
        assert!(h1.fill3(1.0, 2.0, 3.0).is_err());
        assert!(!h1.was_updated());
    }

    #[test]
    fn reset_with_accumulate_preserves_content() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0).with_accumulate(true);
        for _ in 0..10 {
            h1.fill(5.0).unwrap();
        }
        assert_eq!(h1.entries(), 10.0);

        h1.reset();
        assert_eq!(h1.entries(), 10.0);

        h1.set_accumulate(false);
        h1.reset();
        assert_eq!(h1.entries(), 0.0);
    }

    #[test]
    fn reset_does_not_clear_update_flag() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        h1.fill(1.0).unwrap();
        h1.reset();
        assert!(h1.was_updated());
    }

    #[test]
    fn soft_reset_reports_post_baseline_content() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        for _ in 0..5 {
            h1.fill(2.5).unwrap();
        }

        h1.soft_reset();
        assert!(h1.soft_reset_enabled());
        for _ in 0..3 {
            h1.fill(2.5).unwrap();
        }
        assert_eq!(h1.entries(), 3.0);

        h1.disable_soft_reset();
        assert!(!h1.soft_reset_enabled());
        assert_eq!(h1.entries(), 8.0);
    }

    #[test]
    fn soft_reset_roundtrip_has_no_drift() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        h1.fill(1.0).unwrap();
        h1.fill(4.0).unwrap();

        let entries = h1.entries();
        let mean = h1.mean(Axis::X).unwrap();
        let rms = h1.rms(Axis::X).unwrap();
        let bin = h1.bin_content(BinIndex::D1(2)).unwrap();

        h1.soft_reset();
        h1.disable_soft_reset();

        assert_eq!(h1.entries(), entries);
        assert_eq!(h1.mean(Axis::X).unwrap(), mean);
        assert_eq!(h1.rms(Axis::X).unwrap(), rms);
        assert_eq!(h1.bin_content(BinIndex::D1(2)).unwrap(), bin);
    }

    #[test]
    fn rerun_replaces_report_and_moves_views() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        let tests = battery(vec![Box::new(EntriesAtLeast { min: 1.0 })]);

        h1.run_qtests(&tests);
        assert!(h1.has_error());
        assert_eq!(h1.qreports().len(), 1);

        h1.fill(3.0).unwrap();
        h1.run_qtests(&tests);

        assert!(!h1.has_error());
        assert_eq!(h1.qreports().len(), 1);
        assert_eq!(h1.qreport("entriesAtLeast").unwrap().status, QStatus::Ok);
    }

    #[test]
    fn failing_test_becomes_other_report_and_does_not_abort_batch() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        h1.fill(1.0).unwrap();

        let tests = battery(vec![
            Box::new(AlwaysFails),
            Box::new(EntriesAtLeast { min: 1.0 }),
            Box::new(AlwaysWarns),
        ]);
        h1.run_qtests(&tests);

        assert_eq!(h1.qreports().len(), 3);
        assert!(h1.has_other_report());
        assert!(h1.has_warning());
        assert!(!h1.has_error());

        let broken = h1.qreport("brokenTest").unwrap();
        assert_eq!(broken.status, QStatus::Other);
        assert!(broken.message.contains("reference histogram missing"));

        let noisy = h1.qreport("noisyBins").unwrap();
        assert_eq!(noisy.flagged_bins(), Some(&[3, 7][..]));
    }

    #[test]
    fn unknown_qreport_lookup_is_none() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        assert!(h1.qreport("neverRan").is_none());
    }

    #[test]
    fn tag_string_wraps_value_in_name() {
        let f = ContentElement::float_scalar("eventRate");
        f.fill(3.5).unwrap();
        assert_eq!(f.value_string().unwrap(), "f=3.5");
        assert_eq!(f.tag_string().unwrap(), "<eventRate>f=3.5</eventRate>");

        let h = ContentElement::hist1d("h1", 2, 0.0, 1.0);
        assert!(h.tag_string().is_err());
    }

    #[test]
    fn end_cycle_runs_tests_applies_policy_and_clears_flag() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0).with_reset_on_cycle_end(true);
        h1.fill(1.0).unwrap();

        let tests = battery(vec![Box::new(EntriesAtLeast { min: 1.0 })]);
        let outcome = h1.end_cycle(&tests);

        assert!(outcome.was_updated);
        assert_eq!(outcome.tests_run, 1);
        assert!(outcome.content_reset);
        assert_eq!(h1.entries(), 0.0);
        assert!(!h1.was_updated());
        // verdict reflects pre-reset content
        assert_eq!(h1.qreport("entriesAtLeast").unwrap().status, QStatus::Ok);
    }

    #[test]
    fn end_cycle_respects_accumulate() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0)
            .with_reset_on_cycle_end(true)
            .with_accumulate(true);
        h1.fill(1.0).unwrap();

        let outcome = h1.end_cycle(&[]);
        assert!(!outcome.content_reset);
        assert_eq!(h1.entries(), 1.0);
        assert!(!h1.was_updated());
    }

    #[test]
    fn folder_rejects_content_operations() {
        let folder = MonitoringElement::folder("Tracker");
        assert!(folder.is_folder());
        assert!(!folder.is_not_folder());

        let err = folder.fill(1.0).unwrap_err();
        assert_eq!(
            err,
            DqmError::FolderOperation {
                name: "Tracker".to_string(),
                op: "fill",
            }
        );
        assert!(folder.soft_reset().is_err());
        assert!(folder.set_accumulate(true).is_err());
        assert!(folder.run_qtests(&[]).is_err());
        assert!(folder.entries().is_err());

        assert!(folder.qreports().is_empty());
        assert!(folder.qreport("any").is_none());
        assert!(!folder.was_updated());
    }

    #[test]
    fn folder_status_delegates_to_aggregate() {
        struct FixedAggregate;

        impl StatusAggregate for FixedAggregate {
            fn has_error(&self) -> bool {
                true
            }
            fn has_warning(&self) -> bool {
                false
            }
            fn has_other_report(&self) -> bool {
                true
            }
        }

        let folder = FolderElement::new("Tracker");
        assert!(!folder.has_error());

        folder.set_aggregate(Box::new(FixedAggregate));
        assert!(folder.has_error());
        assert!(!folder.has_warning());
        assert!(folder.has_other_report());

        folder.clear_aggregate();
        assert!(!folder.has_error());
    }

    #[test]
    fn enum_dispatches_to_content() {
        let me = MonitoringElement::content("h1", Hist1d::new(10, 0.0, 10.0));
        assert!(me.is_not_folder());

        me.fill(2.0).unwrap();
        assert_eq!(me.entries().unwrap(), 1.0);
        assert!(me.was_updated());
        me.clear_updated().unwrap();
        assert!(!me.was_updated());

        me.set_accumulate(true).unwrap();
        assert!(me.accumulate().unwrap());
        me.reset().unwrap();
        assert_eq!(me.entries().unwrap(), 1.0);
    }

    #[test]
    fn clone_shares_the_same_element() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        let h2 = h1.clone();

        h1.fill(1.0).unwrap();
        h2.fill(2.0).unwrap();
        assert_eq!(h1.entries(), 2.0);
    }

    #[test]
    fn concurrent_fills_and_qtests_are_thread_safe() {
        use std::thread;

        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        h1.clear_updated();

        let mut handles = vec![];
        for t in 0..4 {
            let element = h1.clone();
            handles.push(thread::spawn(move || {
                for i in 0..250 {
                    element.fill((t * 250 + i) as f64 % 10.0).unwrap();
                }
            }));
        }

        let driver = h1.clone();
        let tests = battery(vec![Box::new(EntriesAtLeast { min: 0.0 })]);
        let driver_handle = thread::spawn(move || {
            for _ in 0..20 {
                driver.run_qtests(&tests);
                let _ = driver.was_updated();
            }
        });

        for h in handles {
            h.join().unwrap();
        }
        driver_handle.join().unwrap();

        assert_eq!(h1.entries(), 1000.0);
        assert!(h1.was_updated());
        assert_eq!(h1.qreport("entriesAtLeast").unwrap().status, QStatus::Ok);
    }

    #[test]
    fn handles_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContentElement>();
        assert_send_sync::<FolderElement>();
        assert_send_sync::<MonitoringElement>();
    }

    #[test]
    fn qtests_see_baseline_adjusted_content() {
        let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
        for _ in 0..5 {
            h1.fill(1.0).unwrap();
        }
        h1.soft_reset();

        let tests = battery(vec![Box::new(EntriesAtLeast { min: 1.0 })]);
        h1.run_qtests(&tests);
        // post-baseline content has zero entries
        assert!(h1.has_error());
    }

    #[test]
    fn text_element_roundtrip() {
        let me = MonitoringElement::content("runInfo", TextScalar::new());
        me.fill_text("collisions").unwrap();
        assert_eq!(me.value_string().unwrap(), "s=collisions");
        assert_eq!(me.tag_string().unwrap(), "<runInfo>s=collisions</runInfo>");
        assert!(me.fill(1.0).is_err());
    }

    #[test]
    fn int_element_value_string() {
        let me = ContentElement::int_scalar("eventCount");
        me.fill(41.7).unwrap();
        assert_eq!(me.value_string().unwrap(), "i=41");
    }

    #[test]
    fn profile_element_surface() {
        let p = ContentElement::profile1d("chargeVsChannel", 4, 0.0, 4.0);
        p.fill2(0.5, 10.0).unwrap();
        p.fill2(0.5, 20.0).unwrap();

        assert_eq!(p.bin_content(BinIndex::D1(1)).unwrap(), 15.0);
        assert_eq!(p.bin_entries(1).unwrap(), 2.0);
        assert!(p.y_min().is_err());

        p.set_axis_range(0.0, 100.0, Axis::Y).unwrap();
        assert_eq!(p.y_min().unwrap(), 0.0);
        assert_eq!(p.y_max().unwrap(), 100.0);
    }
}
