//! Authorized access to camp resources
//!
//! The pipeline talks to the API through this trait so it can run against
//! any authenticated source of module payloads and files.

use crate::domain::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

#[async_trait]
pub trait CampApi: Send + Sync {
    /// GET a JSON resource
    async fn get_json(&self, path: &str) -> Result<Value>;

    /// GET a binary resource into `destination`, returning the byte count
    async fn download(&self, path: &str, destination: &Path) -> Result<u64>;
}
