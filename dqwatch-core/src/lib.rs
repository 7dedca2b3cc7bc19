//! # dqwatch-core
//!
//! Lifecycle and quality evaluation for monitoring elements: named,
//! periodically updated statistical objects (histograms, profiles,
//! scalars) produced by a data-processing pipeline and inspected by
//! automated quality checks.
//!
//! The crate owns the part that is easy to get wrong: when an element's
//! content counts as fresh, how it resets between monitoring cycles, how
//! it stays consistent under concurrent fill and read, and how a battery
//! of quality tests runs against it with verdicts classified into
//! warning/error/other views.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use dqwatch_core::{ContentElement, ContentView, QtestError, QualityTest, Verdict};
//!
//! struct MinEntries(f64);
//!
//! impl QualityTest for MinEntries {
//!     fn name(&self) -> &str {
//!         "minEntries"
//!     }
//!
//!     fn check(&self, content: ContentView<'_>) -> Result<Verdict, QtestError> {
//!         if content.entries() >= self.0 {
//!             Ok(Verdict::ok())
//!         } else {
//!             Ok(Verdict::error("too few entries"))
//!         }
//!     }
//! }
//!
//! // A producer fills during the monitoring cycle...
//! let h1 = ContentElement::hist1d("h1", 10, 0.0, 10.0);
//! h1.fill(1.0).unwrap();
//! h1.fill(2.0).unwrap();
//!
//! // ...and at the cycle boundary a driver evaluates quality.
//! let tests: Vec<Arc<dyn QualityTest>> = vec![Arc::new(MinEntries(1.0))];
//! let outcome = h1.end_cycle(&tests);
//!
//! assert!(outcome.was_updated);
//! assert!(!h1.has_error());
//! ```
//!
//! ## Features
//!
//! - **One guard per element**: content, lifecycle state, and quality
//!   reports mutate together under a single mutex
//! - **Folder/content split at the type level**: content operations on a
//!   folder fail explicitly, never silently
//! - **Pluggable stores**: implement [`ContentStore`] to back an element
//!   with any statistical representation
//! - **Isolated test failures**: a quality test that fails internally
//!   becomes an "other"-classified report, never a batch abort
//! - **Soft reset**: reversible baseline subtraction for elements that
//!   are never hard-reset

mod element;
mod error;
mod histogram;
mod qtest;
mod reports;
mod scalar;
mod state;
mod store;

pub use element::{ContentElement, CycleOutcome, FolderElement, MonitoringElement};
pub use error::DqmError;
pub use histogram::{Hist1d, Profile1d};
pub use qtest::{QtestError, QualityTest, StatusAggregate, Verdict};
pub use reports::ReportSet;
pub use scalar::{FloatScalar, IntScalar, TextScalar};
pub use state::ElementState;
pub use store::{ContentStore, ContentView};

// Re-export types for convenience
pub use dqwatch_types::{Axis, BinIndex, QReport, QStatus, ReportAux};
