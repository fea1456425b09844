//! Decides whether a camp needs regenerating

use super::manager::RunMetadata;
use crate::core::format::parse_timestamp;
use crate::domain::models::Entete;
use crate::domain::Camp;

/// Returns `true` when the camp must be processed
///
/// A camp is skipped only when its header reports a modification time
/// strictly older than the last generation and `force` is off. The header's
/// modification time is recorded on the camp either way.
pub fn should_process(
    camp: &mut Camp,
    header: &Entete,
    metadata: Option<&RunMetadata>,
    force: bool,
) -> bool {
    let raw = header
        .histo_derniere_modification
        .date_heure_modification
        .as_deref();
    camp.last_modified = raw.and_then(parse_timestamp);

    if let (Some(raw), None) = (raw, camp.last_modified) {
        tracing::warn!(camp_id = %camp.id, modified = %raw, "Unparsable modification time in header");
    }

    if force {
        tracing::debug!(camp_id = %camp.id, "Forced regeneration");
        return true;
    }

    match (camp.last_modified, metadata) {
        (Some(modified), Some(metadata)) => {
            let changed = modified.with_timezone(&chrono::Utc) >= metadata.creation_date;
            if !changed {
                tracing::info!(
                    camp_id = %camp.id,
                    modified = %modified.to_rfc3339(),
                    generated = %metadata.creation_date.to_rfc3339(),
                    "Camp unchanged since last run"
                );
            }
            changed
        }
        (None, _) => {
            tracing::debug!(camp_id = %camp.id, "No modification time in header");
            true
        }
        (_, None) => true,
    }
}
