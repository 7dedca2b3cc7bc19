//! Quality reports - the immutable verdict records produced by quality tests.

use alloc::string::String;
use alloc::vec::Vec;

use crate::QStatus;

/// Auxiliary payload attached to a quality report.
///
/// Tests that inspect binned content typically flag the offending bins;
/// anything else goes into a free-form note.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub enum ReportAux {
    /// 1-based indices of the bins the test flagged.
    #[cfg_attr(feature = "minicbor", n(0))]
    FlaggedBins(#[cfg_attr(feature = "minicbor", n(0))] Vec<usize>),

    /// Free-form diagnostic attachment.
    #[cfg_attr(feature = "minicbor", n(1))]
    Note(#[cfg_attr(feature = "minicbor", n(0))] String),
}

/// The verdict of one quality test on one monitoring element.
///
/// Reports are immutable values; identity is the test name. Re-running a
/// test on the same element replaces its earlier report.
///
/// # Example
///
/// ```rust
/// use dqwatch_types::{QReport, QStatus};
///
/// let report = QReport::builder("rangeCheck")
///     .status(QStatus::Error)
///     .message("3 bins outside tolerance")
///     .flagged_bins(vec![2, 7, 9])
///     .build();
///
/// assert!(report.is_error());
/// assert_eq!(report.test_name, "rangeCheck");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct QReport {
    /// Name of the quality test that produced this report.
    #[cfg_attr(feature = "minicbor", n(0))]
    pub test_name: String,

    /// Verdict status.
    #[cfg_attr(feature = "minicbor", n(1))]
    pub status: QStatus,

    /// Human-readable message describing the verdict.
    #[cfg_attr(feature = "minicbor", n(2))]
    pub message: String,

    /// Optional auxiliary data, e.g. flagged bin indices.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "minicbor", n(3))]
    pub aux: Option<ReportAux>,
}

impl QReport {
    /// Create a report with no auxiliary data.
    pub fn new(
        test_name: impl Into<String>,
        status: QStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            test_name: test_name.into(),
            status,
            message: message.into(),
            aux: None,
        }
    }

    /// Create a builder for a report from the named test.
    pub fn builder(test_name: impl Into<String>) -> QReportBuilder {
        QReportBuilder::new(test_name)
    }

    /// True if the status is `Ok` (appears in no classified view).
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    /// True if this report belongs in the warnings view.
    pub fn is_warning(&self) -> bool {
        self.status == QStatus::Warning
    }

    /// True if this report belongs in the errors view.
    pub fn is_error(&self) -> bool {
        self.status == QStatus::Error
    }

    /// True if this report belongs in the "other" view.
    pub fn is_other(&self) -> bool {
        self.status.is_other_class()
    }

    /// The flagged bin indices, if the auxiliary payload carries any.
    pub fn flagged_bins(&self) -> Option<&[usize]> {
        match &self.aux {
            Some(ReportAux::FlaggedBins(bins)) => Some(bins),
            _ => None,
        }
    }
}

/// Builder for `QReport`.
#[derive(Debug)]
pub struct QReportBuilder {
    test_name: String,
    status: QStatus,
    message: String,
    aux: Option<ReportAux>,
}

impl QReportBuilder {
    /// Create a new builder for the named test.
    ///
    /// The status defaults to `DidNotRun` and the message to empty.
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            status: QStatus::DidNotRun,
            message: String::new(),
            aux: None,
        }
    }

    /// Set the verdict status.
    pub fn status(mut self, status: QStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the verdict message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach flagged bin indices.
    pub fn flagged_bins(mut self, bins: Vec<usize>) -> Self {
        self.aux = Some(ReportAux::FlaggedBins(bins));
        self
    }

    /// Attach a free-form note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.aux = Some(ReportAux::Note(note.into()));
        self
    }

    /// Build the report.
    pub fn build(self) -> QReport {
        QReport {
            test_name: self.test_name,
            status: self.status,
            message: self.message,
            aux: self.aux,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn new_has_no_aux() {
        let r = QReport::new("meanCheck", QStatus::Ok, "ok");
        assert!(r.is_ok());
        assert!(r.aux.is_none());
        assert!(r.flagged_bins().is_none());
    }

    #[test]
    fn builder_all_fields() {
        let r = QReport::builder("contentsInRange")
            .status(QStatus::Warning)
            .message("2 bins near tolerance")
            .flagged_bins(vec![3, 5])
            .build();

        assert!(r.is_warning());
        assert_eq!(r.message, "2 bins near tolerance");
        assert_eq!(r.flagged_bins(), Some(&[3, 5][..]));
    }

    #[test]
    fn builder_defaults_to_did_not_run() {
        let r = QReport::builder("pending").build();
        assert_eq!(r.status, QStatus::DidNotRun);
        assert!(r.is_other());
        assert!(r.message.is_empty());
    }

    #[test]
    fn note_aux_does_not_expose_bins() {
        let r = QReport::builder("deadChannels")
            .status(QStatus::Other)
            .note("reference histogram missing")
            .build();
        assert!(r.flagged_bins().is_none());
        assert_eq!(r.aux, Some(ReportAux::Note("reference histogram missing".into())));
    }

    #[test]
    fn classification_helpers_partition() {
        let error = QReport::new("t", QStatus::Error, "");
        let warning = QReport::new("t", QStatus::Warning, "");
        let ok = QReport::new("t", QStatus::Ok, "");
        let other = QReport::new("t", QStatus::InsufficientData, "");

        for r in [&error, &warning, &ok, &other] {
            let count = [r.is_ok(), r.is_warning(), r.is_error(), r.is_other()]
                .iter()
                .filter(|c| **c)
                .count();
            assert_eq!(count, 1);
        }
        assert!(error.is_error());
        assert!(warning.is_warning());
        assert!(other.is_other());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let r = QReport::builder("rangeCheck")
            .status(QStatus::Error)
            .message("out of range")
            .flagged_bins(vec![1, 2])
            .build();

        let json = serde_json::to_string(&r).unwrap();
        let parsed: QReport = serde_json::from_str(&json).unwrap();
        assert_eq!(r, parsed);
    }

    #[cfg(feature = "minicbor")]
    #[test]
    fn minicbor_roundtrip() {
        let r = QReport::builder("rangeCheck")
            .status(QStatus::Warning)
            .note("low statistics")
            .build();

        let bytes = minicbor::to_vec(&r).unwrap();
        let parsed: QReport = minicbor::decode(&bytes).unwrap();
        assert_eq!(r, parsed);
    }
}
