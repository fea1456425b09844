// Campdoc - Camp dossier and report generator
// Copyright (c) 2025 Campdoc Contributors
// Licensed under the MIT License

//! # Campdoc - Camp dossiers and reports
//!
//! Campdoc pulls camp records from the camp administration API, merges each
//! camp's modules into a single view, and produces one PDF dossier per camp
//! plus two CSV reports covering every camp and every staff member.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Authenticating** against the API with a member number and password
//! - **Detecting** camps unchanged since their last generation
//! - **Aggregating** the header, baseline and active modules of a camp
//! - **Downloading** attached files into category directories
//! - **Rendering** a Handlebars template to HTML, then PDF
//! - **Reporting** camps and staff to `camps.csv` and `chefs.csv`
//!
//! ## Architecture
//!
//! Campdoc follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export, aggregation, assets, reports, state)
//! - [`adapters`] - External integrations (API, document renderer)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use campdoc::config::load_config;
//! use campdoc::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("campdoc.toml")?;
//!
//!     // Log in and load the template
//!     let coordinator = ExportCoordinator::new(config).await?;
//!
//!     // Process every configured camp
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Processed {} camps", summary.processed_camps);
//!     Ok(())
//! }
//! ```
//!
//! ## Incremental Runs
//!
//! Each generated camp gets a `metadata.json` recording when it was
//! generated. On the next run a camp whose header reports an older
//! modification time is skipped unless `--force` is given:
//!
//! ```rust,no_run
//! use campdoc::core::state::StateManager;
//! use campdoc::domain::{Camp, CampId};
//! use std::str::FromStr;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = StateManager::new("./output");
//! let camp = Camp::new(CampId::from_str("42")?, "Camp-Alpha");
//!
//! if let Some(metadata) = state.load_metadata(&camp).await {
//!     println!("Last generated {}", metadata.creation_date);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Campdoc uses the [`domain::CampdocError`] type for all errors:
//!
//! ```rust,no_run
//! use campdoc::domain::CampdocError;
//!
//! fn example() -> Result<(), CampdocError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = campdoc::config::load_config("campdoc.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Campdoc uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(camp_id = "42", "Camp unchanged since last run");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
