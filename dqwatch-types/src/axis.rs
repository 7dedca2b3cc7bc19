//! Typed axis and bin addressing for binned content.

use core::fmt;

/// Histogram axis selector.
///
/// Replaces the `axis = 1, 2, 3` integer convention: summary statistics
/// and axis mutations name the axis they apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
#[cfg_attr(feature = "minicbor", cbor(index_only))]
pub enum Axis {
    #[cfg_attr(feature = "minicbor", n(0))]
    X,
    #[cfg_attr(feature = "minicbor", n(1))]
    Y,
    #[cfg_attr(feature = "minicbor", n(2))]
    Z,
}

impl Axis {
    /// 1-based axis number (X=1, Y=2, Z=3).
    pub const fn index(&self) -> usize {
        match self {
            Axis::X => 1,
            Axis::Y => 2,
            Axis::Z => 3,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Address of a single bin in 1-, 2-, or 3-dimensional content.
///
/// Indices are 1-based, matching the numbering quality reports use when
/// flagging bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub enum BinIndex {
    /// Bin in 1-D content.
    #[cfg_attr(feature = "minicbor", n(0))]
    D1(#[cfg_attr(feature = "minicbor", n(0))] usize),

    /// Bin in 2-D content.
    #[cfg_attr(feature = "minicbor", n(1))]
    D2(
        #[cfg_attr(feature = "minicbor", n(0))] usize,
        #[cfg_attr(feature = "minicbor", n(1))] usize,
    ),

    /// Bin in 3-D content.
    #[cfg_attr(feature = "minicbor", n(2))]
    D3(
        #[cfg_attr(feature = "minicbor", n(0))] usize,
        #[cfg_attr(feature = "minicbor", n(1))] usize,
        #[cfg_attr(feature = "minicbor", n(2))] usize,
    ),
}

impl BinIndex {
    /// Dimensionality of the addressed content (1, 2, or 3).
    pub const fn dim(&self) -> usize {
        match self {
            BinIndex::D1(..) => 1,
            BinIndex::D2(..) => 2,
            BinIndex::D3(..) => 3,
        }
    }
}

impl fmt::Display for BinIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinIndex::D1(x) => write!(f, "({x})"),
            BinIndex::D2(x, y) => write!(f, "({x}, {y})"),
            BinIndex::D3(x, y, z) => write!(f, "({x}, {y}, {z})"),
        }
    }
}
