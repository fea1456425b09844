//! Configuration management for Campdoc.
//!
//! Campdoc uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CAMPDOC_*` environment overrides
//! - Default values for optional settings
//! - Validation with precise messages
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! login = "${CAMPDOC_LOGIN}"
//! password = "${CAMPDOC_PASSWORD}"
//!
//! [input]
//! camps_file = "camps.json"
//!
//! [output]
//! directory = "./dossiers"
//!
//! [fetch]
//! camp_delay_ms = 2000
//!
//! [render]
//! template = "dossier.html.hbs"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use campdoc::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("campdoc.toml")?;
//! println!("API: {}", config.api.base_url);
//! println!("Camps: {}", config.camps.len());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_camps_file, load_config, parse_config};
pub use schema::{
    ApiConfig, ApplicationConfig, CampdocConfig, FetchConfig, InputConfig, LoggingConfig,
    OutputConfig, RenderConfig, RetryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
