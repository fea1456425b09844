//! External system integrations for Campdoc.
//!
//! This module provides adapters for integrating with external systems:
//!
//! - [`api`] - The camp administration API (login, modules, attached files)
//! - [`renderer`] - Document rendering (Handlebars template, external PDF converter)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. The pipeline only sees the
//! [`api::CampApi`] and [`renderer::DocumentRenderer`] traits.
//!
//! # API Adapter
//!
//! ```rust,no_run
//! use campdoc::adapters::api::{ApiClient, CampApi, Session};
//! use campdoc::config::{secret_string, ApiConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig {
//!     login: "123456".to_string(),
//!     password: Some(secret_string("pass".to_string())),
//!     ..Default::default()
//! };
//!
//! let client = ApiClient::new(&config)?;
//! let session = Session::authenticate(client, &config.login, config.password.as_ref().unwrap()).await?;
//! let header = session.get_json("/api/camps/42?module=ENTETE").await?;
//! println!("{}", header["statut"]);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod renderer;
