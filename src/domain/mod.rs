//! Domain models and types for Campdoc.
//!
//! The domain layer provides:
//! - **Identifiers and input records** ([`CampId`], [`Camp`])
//! - **Module descriptors** ([`ModuleKind`], [`ModuleSpec`])
//! - **The composite view** ([`View`]) and typed payload projections ([`models`])
//! - **Error types** ([`CampdocError`], [`ApiError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CampdocError>`]:
//!
//! ```rust,no_run
//! use campdoc::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = campdoc::config::load_config("campdoc.toml")?;
//!     println!("{}", config.output.directory);
//!     Ok(())
//! }
//! ```

pub mod camp;
pub mod errors;
pub mod ids;
pub mod models;
pub mod modules;
pub mod result;
pub mod view;

pub use camp::Camp;
pub use errors::{ApiError, CampdocError};
pub use ids::CampId;
pub use modules::{ModuleKind, ModuleSpec};
pub use result::Result;
pub use view::{Branche, FileRef, ModulePayload, View};
