//! Document renderer trait

use crate::domain::{Result, View};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Turns a camp view into a document
///
/// `output_stem` is the document path without extension; implementations
/// add their own and return the final path.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, view: &View, output_stem: &Path) -> Result<PathBuf>;
}
