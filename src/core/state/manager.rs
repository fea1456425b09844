//! Per-camp run metadata stored next to the camp's outputs
//!
//! Each processed camp gets a `metadata.json` in its output directory
//! recording when it was last generated. The change detector compares the
//! camp header's modification time against it.

use crate::domain::{Camp, CampdocError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const METADATA_FILE: &str = "metadata.json";

/// Contents of `metadata.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// When the camp's outputs were last generated
    #[serde(rename = "creationDate")]
    pub creation_date: DateTime<Utc>,
}

impl RunMetadata {
    pub fn now() -> Self {
        Self {
            creation_date: Utc::now(),
        }
    }
}

/// Reads and writes run metadata under the output root
#[derive(Debug, Clone)]
pub struct StateManager {
    output_root: PathBuf,
}

impl StateManager {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Output directory of one camp
    pub fn camp_dir(&self, camp: &Camp) -> PathBuf {
        self.output_root.join(camp.directory_name())
    }

    pub fn metadata_path(&self, camp: &Camp) -> PathBuf {
        self.camp_dir(camp).join(METADATA_FILE)
    }

    /// Loads the metadata of a camp
    ///
    /// Returns `None` when the file is missing. An unreadable or malformed
    /// file is logged and also treated as missing, so the camp is
    /// regenerated.
    pub async fn load_metadata(&self, camp: &Camp) -> Option<RunMetadata> {
        let path = self.metadata_path(camp);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(camp_id = %camp.id, "No run metadata yet");
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    camp_id = %camp.id,
                    path = %path.display(),
                    error = %e,
                    "Could not read run metadata, treating camp as new"
                );
                return None;
            }
        };

        match serde_json::from_str::<RunMetadata>(&content) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                tracing::warn!(
                    camp_id = %camp.id,
                    path = %path.display(),
                    error = %e,
                    "Malformed run metadata, treating camp as new"
                );
                None
            }
        }
    }

    /// Writes the metadata of a camp, replacing any previous file
    ///
    /// # Errors
    ///
    /// Returns a state error if the file cannot be written.
    pub async fn save_metadata(&self, camp: &Camp, metadata: &RunMetadata) -> Result<()> {
        let path = self.metadata_path(camp);
        let dir = self.camp_dir(camp);

        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            CampdocError::State(format!("Failed to create {}: {e}", dir.display()))
        })?;

        let json = serde_json::to_string_pretty(metadata)?;
        let temp = dir.join(format!("{METADATA_FILE}.tmp"));
        tokio::fs::write(&temp, json).await.map_err(|e| {
            CampdocError::State(format!("Failed to write {}: {e}", temp.display()))
        })?;
        tokio::fs::rename(&temp, &path).await.map_err(|e| {
            CampdocError::State(format!("Failed to replace {}: {e}", path.display()))
        })?;

        tracing::debug!(
            camp_id = %camp.id,
            creation_date = %metadata.creation_date.to_rfc3339(),
            "Saved run metadata"
        );

        Ok(())
    }
}
