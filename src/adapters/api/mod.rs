//! Camp administration API adapter
//!
//! - [`client`] - HTTP transport with fixed-delay retry and streaming downloads
//! - [`session`] - Login and bearer-token authorization
//! - [`traits`] - The [`CampApi`] seam used by the pipeline

pub mod client;
pub mod models;
pub mod session;
pub mod traits;

pub use client::ApiClient;
pub use session::Session;
pub use traits::CampApi;
