//! Camp input records

use super::ids::CampId;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A camp to process, as listed in the run's input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camp {
    /// Remote identifier
    pub id: CampId,

    /// Display name, also used as the output directory name
    pub name: String,

    /// Modification time reported by the camp header during this run
    #[serde(skip)]
    pub last_modified: Option<DateTime<FixedOffset>>,
}

impl Camp {
    /// Creates a camp record with no known modification time
    pub fn new(id: CampId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            last_modified: None,
        }
    }

    /// Name reduced to a single path component, safe to join onto the output directory
    pub fn directory_name(&self) -> String {
        sanitize_component(&self.name)
    }
}

/// Replaces path separators so a remote-supplied name stays one path component
pub fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '-',
            other => other,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}
