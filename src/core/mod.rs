//! Core business logic for Campdoc.
//!
//! This module contains the pipeline that turns remote camp records into
//! documents and reports.
//!
//! # Modules
//!
//! - [`export`] - Run orchestration and the run summary
//! - [`state`] - Run metadata and change detection
//! - [`aggregate`] - Module fetch-and-merge into a camp view
//! - [`assets`] - Attached file downloads
//! - [`report`] - CSV summary reports
//! - [`format`] - Date and string formatting for templates and reports
//!
//! # Export Workflow
//!
//! For each selected camp:
//!
//! 1. **Header**: Fetch the `ENTETE` module
//! 2. **Change check**: Compare its modification time with the camp's `metadata.json`
//! 3. **Aggregate**: Fetch the baseline and active modules into a view
//! 4. **Assets**: Download attached files by category
//! 5. **Render**: Produce the camp's document
//! 6. **Commit**: Write `metadata.json` and keep the camp's report rows
//!
//! The reports are written once every camp has been handled.
//!
//! # Example
//!
//! ```rust,no_run
//! use campdoc::config::load_config;
//! use campdoc::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("campdoc.toml")?;
//!
//! let coordinator = ExportCoordinator::new(config).await?;
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Processed: {}", summary.processed_camps);
//! println!("Skipped: {}", summary.skipped_camps);
//! println!("Failed: {}", summary.failed_camps);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod assets;
pub mod export;
pub mod format;
pub mod report;
pub mod state;
