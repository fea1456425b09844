//! Run orchestration
//!
//! This module provides the run driver for Campdoc, including:
//! - Per-camp pipeline sequencing and pacing
//! - Summary and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use summary::{ExportError, ExportErrorType, ExportSummary};
