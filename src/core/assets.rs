//! Downloads a camp's attached files into category directories

use crate::adapters::api::CampApi;
use crate::domain::camp::sanitize_component;
use crate::domain::models::{project, InfoGenerale};
use crate::domain::{FileRef, Result, View};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Retrieves the files listed in `info_generale.campFichiers`
pub struct AssetFetcher {
    api: Arc<dyn CampApi>,
    excluded_ids: Vec<String>,
}

impl AssetFetcher {
    pub fn new(api: Arc<dyn CampApi>, excluded_ids: &[u64]) -> Self {
        Self {
            api,
            excluded_ids: excluded_ids.iter().map(u64::to_string).collect(),
        }
    }

    /// Downloads every non-excluded file under `camp_dir/{category}/` and
    /// records it in `view.files`
    ///
    /// Returns the number of files downloaded. Files are fetched one at a
    /// time; the first failed download aborts the camp. A name already used
    /// in the same category during this call is prefixed with the file id.
    pub async fn fetch_assets(&self, view: &mut View, camp_dir: &Path) -> Result<usize> {
        let info: InfoGenerale = project(view.module("info_generale"));
        let mut downloaded = 0;
        let mut written: HashSet<PathBuf> = HashSet::new();

        for fichier in info.camp_fichiers {
            let Some(id) = fichier.id.filter(|id| !id.is_empty()) else {
                tracing::warn!(name = ?fichier.nom, "Attached file without id, skipping");
                continue;
            };

            if self.excluded_ids.contains(&id) {
                tracing::debug!(file_id = %id, "Excluded file id");
                continue;
            }

            let category = sanitize_component(
                &fichier.categorie.unwrap_or_default().to_lowercase(),
            );
            let mut name = sanitize_component(&fichier.nom.unwrap_or_else(|| id.clone()));

            let mut destination = camp_dir.join(&category).join(&name);
            if written.contains(&destination) {
                let renamed = sanitize_component(&format!("{id}-{name}"));
                tracing::warn!(
                    file_id = %id,
                    category = %category,
                    name = %name,
                    renamed = %renamed,
                    "Duplicate file name in category, keeping both"
                );
                name = renamed;
                destination = camp_dir.join(&category).join(&name);
            }
            written.insert(destination.clone());

            let bytes = self
                .api
                .download(&format!("/api/camp-fichiers/{id}"), &destination)
                .await?;

            tracing::debug!(
                file_id = %id,
                category = %category,
                name = %name,
                bytes,
                "Downloaded attached file"
            );

            view.add_file(
                &category,
                FileRef {
                    url: format!("{category}/{name}"),
                    name,
                },
            );
            downloaded += 1;
        }

        Ok(downloaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModuleKind;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingApi {
        downloads: Mutex<Vec<(String, PathBuf)>>,
    }

    #[async_trait]
    impl CampApi for RecordingApi {
        async fn get_json(&self, _path: &str) -> Result<Value> {
            Ok(json!({}))
        }

        async fn download(&self, path: &str, destination: &Path) -> Result<u64> {
            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(destination, b"data")?;
            self.downloads
                .lock()
                .unwrap()
                .push((path.to_string(), destination.to_path_buf()));
            Ok(4)
        }
    }

    fn view_with_files(files: Value) -> View {
        let mut view = View::default();
        view.insert_module(
            "info_generale".into(),
            ModuleKind::InfoGenerale,
            json!({ "campFichiers": files }),
        );
        view
    }

    #[tokio::test]
    async fn test_fetch_assets_buckets_by_category() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(RecordingApi::default());
        let fetcher = AssetFetcher::new(api.clone(), &[6]);
        let mut view = view_with_files(json!([
            {"id": 10, "nom": "a.jpg", "categorie": "PHOTOS"},
            {"id": 6, "nom": "skipped.pdf", "categorie": "DOCS"},
            {"id": 11, "nom": "b.jpg", "categorie": "Photos"},
            {"id": 12, "nom": "plan.pdf", "categorie": "CARTES"}
        ]));

        let count = fetcher.fetch_assets(&mut view, dir.path()).await.unwrap();

        assert_eq!(count, 3);
        let photos = &view.files["photos"];
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].url, "photos/a.jpg");
        assert_eq!(photos[1].name, "b.jpg");
        assert_eq!(view.files["cartes"][0].url, "cartes/plan.pdf");
        assert!(!view.files.contains_key("docs"));
        assert!(dir.path().join("photos/b.jpg").exists());

        let downloads = api.downloads.lock().unwrap();
        assert_eq!(downloads[0].0, "/api/camp-fichiers/10");
    }

    #[tokio::test]
    async fn test_same_name_in_category_keeps_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(RecordingApi::default());
        let fetcher = AssetFetcher::new(api.clone(), &[]);
        let mut view = view_with_files(json!([
            {"id": 20, "nom": "autorisation.pdf", "categorie": "DOCS"},
            {"id": 21, "nom": "autorisation.pdf", "categorie": "docs"},
            {"id": 22, "nom": "autorisation.pdf", "categorie": "CARTES"}
        ]));

        let count = fetcher.fetch_assets(&mut view, dir.path()).await.unwrap();

        assert_eq!(count, 3);
        let docs = &view.files["docs"];
        assert_eq!(docs[0].url, "docs/autorisation.pdf");
        assert_eq!(docs[1].url, "docs/21-autorisation.pdf");
        assert_eq!(view.files["cartes"][0].url, "cartes/autorisation.pdf");

        let downloads = api.downloads.lock().unwrap();
        let targets: HashSet<&PathBuf> = downloads.iter().map(|(_, p)| p).collect();
        assert_eq!(targets.len(), 3);
        assert!(dir.path().join("docs/21-autorisation.pdf").exists());
    }

    #[tokio::test]
    async fn test_fetch_assets_without_files_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = AssetFetcher::new(Arc::new(RecordingApi::default()), &[6]);

        let mut view = view_with_files(Value::Null);
        assert_eq!(fetcher.fetch_assets(&mut view, dir.path()).await.unwrap(), 0);

        let mut empty = View::default();
        assert_eq!(fetcher.fetch_assets(&mut empty, dir.path()).await.unwrap(), 0);
        assert!(empty.files.is_empty());
    }

    #[tokio::test]
    async fn test_file_names_stay_inside_camp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = AssetFetcher::new(Arc::new(RecordingApi::default()), &[]);
        let mut view = view_with_files(json!([
            {"id": 1, "nom": "../../etc/passwd", "categorie": "../x"}
        ]));

        fetcher.fetch_assets(&mut view, dir.path()).await.unwrap();

        let entry = &view.files["..-x"][0];
        assert_eq!(entry.name, "..-..-etc-passwd");
        assert!(dir.path().join("..-x").join("..-..-etc-passwd").exists());
    }
}
