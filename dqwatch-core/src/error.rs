//! Error types for element and store operations.

use dqwatch_types::{Axis, BinIndex};
use thiserror::Error;

/// Errors surfaced by monitoring-element operations.
///
/// Folder misuse and range/arity misuse indicate caller defects and are
/// returned to the immediate caller. Quality-test failures never appear
/// here; they are folded into "other"-classified reports by the test
/// runner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DqmError {
    /// A content operation was invoked on a folder element.
    #[error("`{op}` is not valid on folder element `{name}`")]
    FolderOperation { name: String, op: &'static str },

    /// The backend store cannot express this operation.
    #[error("`{op}` is not supported by {kind} content")]
    Unsupported { op: &'static str, kind: &'static str },

    /// Bin address outside the store's binning.
    #[error("bin {bin} is out of range for {kind} content with {nbins} bins")]
    BinOutOfRange {
        bin: BinIndex,
        nbins: usize,
        kind: &'static str,
    },

    /// Axis not present in the store's dimensionality.
    #[error("axis {axis} is out of range for {kind} content")]
    AxisOutOfRange { axis: Axis, kind: &'static str },
}

impl DqmError {
    pub(crate) fn folder_op(name: &str, op: &'static str) -> Self {
        DqmError::FolderOperation {
            name: name.to_string(),
            op,
        }
    }

    pub(crate) fn unsupported(op: &'static str, kind: &'static str) -> Self {
        DqmError::Unsupported { op, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = DqmError::folder_op("Tracker", "fill");
        assert_eq!(err.to_string(), "`fill` is not valid on folder element `Tracker`");

        let err = DqmError::unsupported("value_string", "hist1d");
        assert_eq!(err.to_string(), "`value_string` is not supported by hist1d content");

        let err = DqmError::BinOutOfRange {
            bin: BinIndex::D1(11),
            nbins: 10,
            kind: "hist1d",
        };
        assert_eq!(
            err.to_string(),
            "bin (11) is out of range for hist1d content with 10 bins"
        );
    }
}
