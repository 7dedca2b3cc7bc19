//! Quality-test status codes and their classification.

use core::fmt;

/// Outcome of a quality test run against a monitoring element.
///
/// `Error` and `Warning` feed the corresponding report views on an
/// element; `Ok` reports stay out of every view; all remaining variants
/// are grouped into the "other" view. Every status belongs to exactly
/// one of those four classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
#[cfg_attr(feature = "minicbor", cbor(index_only))]
pub enum QStatus {
    /// Test passed.
    #[cfg_attr(feature = "minicbor", n(0))]
    Ok,

    /// Content is suspicious but not conclusively bad.
    #[cfg_attr(feature = "minicbor", n(1))]
    Warning,

    /// Content violates the test's acceptance criteria.
    #[cfg_attr(feature = "minicbor", n(2))]
    Error,

    /// Non-ok outcome that is neither a warning nor an error.
    #[cfg_attr(feature = "minicbor", n(3))]
    Other,

    /// Test was disabled for this element.
    #[cfg_attr(feature = "minicbor", n(4))]
    Disabled,

    /// Not enough statistics to produce a meaningful verdict.
    #[cfg_attr(feature = "minicbor", n(5))]
    InsufficientData,

    /// Content could not be interpreted by the test.
    #[cfg_attr(feature = "minicbor", n(6))]
    Invalid,

    /// Test has not run yet.
    #[cfg_attr(feature = "minicbor", n(7))]
    DidNotRun,
}

impl QStatus {
    /// Stable numeric code for this status.
    ///
    /// Codes do not change across releases; consumers may persist them.
    pub const fn code(&self) -> u16 {
        match self {
            QStatus::Ok => 100,
            QStatus::Warning => 200,
            QStatus::Error => 300,
            QStatus::Other => 400,
            QStatus::Disabled => 500,
            QStatus::InsufficientData => 600,
            QStatus::Invalid => 700,
            QStatus::DidNotRun => 800,
        }
    }

    /// Returns a short symbol for display.
    pub const fn symbol(&self) -> &'static str {
        match self {
            QStatus::Ok => "OK",
            QStatus::Warning => "WARN",
            QStatus::Error => "ERROR",
            QStatus::Other => "OTHER",
            QStatus::Disabled => "DISABLED",
            QStatus::InsufficientData => "INSUF_STAT",
            QStatus::Invalid => "INVALID",
            QStatus::DidNotRun => "DID_NOT_RUN",
        }
    }

    /// True for `Ok` only.
    pub const fn is_ok(&self) -> bool {
        matches!(self, QStatus::Ok)
    }

    /// True for every status classified into the "other" view:
    /// anything that is not `Ok`, `Warning`, or `Error`.
    pub const fn is_other_class(&self) -> bool {
        !matches!(self, QStatus::Ok | QStatus::Warning | QStatus::Error)
    }
}

impl fmt::Display for QStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
