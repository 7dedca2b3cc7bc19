//! # dqwatch-types
//!
//! Core types for data-quality monitoring. This crate defines the
//! quality-test statuses and reports that dqwatch elements produce and
//! that display or transport layers consume.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable `serde` and/or `minicbor` features as needed
//! - **Typed addressing**: Axes and bins are enums, not magic integers
//! - **Ergonomic builders**: Fluent API for constructing reports
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON/MessagePack/etc. serialization via serde
//! - `minicbor`: Compact binary serialization via CBOR
//! - `all`: Enable all serialization formats
//!
//! ## Example
//!
//! ```rust
//! use dqwatch_types::{QReport, QStatus};
//!
//! let report = QReport::builder("noisyChannels")
//!     .status(QStatus::Warning)
//!     .message("2 channels above noise threshold")
//!     .flagged_bins(vec![12, 47])
//!     .build();
//!
//! assert!(report.is_warning());
//! assert_eq!(report.status.code(), 200);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod axis;
mod report;
mod status;

pub use axis::*;
pub use report::*;
pub use status::*;
