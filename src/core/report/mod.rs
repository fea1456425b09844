//! CSV summary reports
//!
//! - [`rows`] - Row projections of a camp view
//! - [`exporter`] - Row accumulation and the `camps.csv` / `chefs.csv` writers

pub mod exporter;
pub mod rows;

pub use exporter::ReportExporter;
pub use rows::{CampSummaryRow, StaffSummaryRow};
