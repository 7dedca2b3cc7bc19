//! Pluggable quality tests.
//!
//! A quality test is a named evaluator that inspects element content and
//! returns a [`Verdict`]. Which tests apply to which element is external
//! policy: the caller hands `run_qtests` the battery it selected.

use dqwatch_types::{QStatus, ReportAux};
use thiserror::Error;

use crate::store::ContentView;

/// Internal failure of a quality test.
///
/// Failures are isolated per test: the runner records the message as an
/// "other"-classified report and moves on to the next test.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct QtestError {
    message: String,
}

impl QtestError {
    /// Create a failure with the given diagnostic message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for QtestError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

/// What a quality test produces: a status, a message, and optional
/// auxiliary data. The report name is supplied by the runner from
/// [`QualityTest::name`], so a test cannot mislabel its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Verdict status.
    pub status: QStatus,
    /// Human-readable message.
    pub message: String,
    /// Optional auxiliary data.
    pub aux: Option<ReportAux>,
}

impl Verdict {
    /// Create a verdict with an explicit status.
    pub fn new(status: QStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            aux: None,
        }
    }

    /// Passing verdict.
    pub fn ok() -> Self {
        Self::new(QStatus::Ok, "ok")
    }

    /// Warning verdict.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(QStatus::Warning, message)
    }

    /// Error verdict.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(QStatus::Error, message)
    }

    /// Attach flagged bin indices.
    pub fn with_flagged_bins(mut self, bins: Vec<usize>) -> Self {
        self.aux = Some(ReportAux::FlaggedBins(bins));
        self
    }
}

/// A pluggable quality test.
///
/// Implementations must not block: the runner holds the element's guard
/// for the whole battery, and fills are locked out meanwhile.
///
/// # Example
///
/// ```rust
/// use dqwatch_core::{Axis, ContentView, QtestError, QualityTest, Verdict};
///
/// struct MeanWithin {
///     expected: f64,
///     tolerance: f64,
/// }
///
/// impl QualityTest for MeanWithin {
///     fn name(&self) -> &str {
///         "meanWithin"
///     }
///
///     fn check(&self, content: ContentView<'_>) -> Result<Verdict, QtestError> {
///         let mean = content
///             .mean(Axis::X)
///             .map_err(|e| QtestError::new(e.to_string()))?;
///         if (mean - self.expected).abs() <= self.tolerance {
///             Ok(Verdict::ok())
///         } else {
///             Ok(Verdict::error(format!("mean {mean} outside tolerance")))
///         }
///     }
/// }
/// ```
pub trait QualityTest: Send + Sync {
    /// Unique test name; reports are keyed by it.
    fn name(&self) -> &str;

    /// Evaluate element content and produce a verdict.
    ///
    /// Return `Err` for internal failures (missing reference, content
    /// the test cannot interpret); the runner converts it into an
    /// "other" report rather than letting it escape the batch.
    fn check(&self, content: ContentView<'_>) -> Result<Verdict, QtestError>;
}

/// Override point for composite status aggregation.
///
/// A leaf element answers `has_error`/`has_warning`/`has_other_report`
/// from its own report views. A folder element delegates to an installed
/// `StatusAggregate`; implementations are expected to aggregate over the
/// folder's entire subtree, not a single level.
pub trait StatusAggregate: Send + Sync {
    /// True if any element below the folder has an error report.
    fn has_error(&self) -> bool;

    /// True if any element below the folder has a warning report.
    fn has_warning(&self) -> bool;

    /// True if any element below the folder has an "other" report.
    fn has_other_report(&self) -> bool;
}
