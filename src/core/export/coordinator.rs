//! Export coordinator - main orchestrator for a run
//!
//! This module sequences the per-camp pipeline: change detection, module
//! aggregation, asset download, rendering, run metadata and report rows.

use crate::adapters::api::{ApiClient, CampApi, Session};
use crate::adapters::renderer::{DocumentRenderer, HtmlPdfRenderer};
use crate::config::CampdocConfig;
use crate::core::aggregate::ModuleAggregator;
use crate::core::assets::AssetFetcher;
use crate::core::export::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::core::report::ReportExporter;
use crate::core::state::{should_process, RunMetadata, StateManager};
use crate::domain::models::{project, Entete};
use crate::domain::{Camp, CampdocError, Result, View};
use crate::log_error_with_context;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

/// Result of one camp's pipeline
enum CampOutcome {
    Skipped,
    Processed(Box<ProcessedCamp>),
}

struct ProcessedCamp {
    camp: Camp,
    view: View,
    assets: usize,
    document: Option<PathBuf>,
}

/// Export coordinator
pub struct ExportCoordinator {
    config: CampdocConfig,
    api: Arc<dyn CampApi>,
    renderer: Option<Arc<dyn DocumentRenderer>>,
    state: StateManager,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    ///
    /// Loads the template (when rendering is enabled) and logs in. Both
    /// happen before any camp is touched, so a failure here leaves the
    /// output directory unchanged.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unloadable template or a
    /// missing password, and an authentication error when the login
    /// response carries no token.
    pub async fn new(config: CampdocConfig) -> Result<Self> {
        let renderer: Option<Arc<dyn DocumentRenderer>> = if config.render.enabled {
            Some(Arc::new(HtmlPdfRenderer::from_config(&config.render)?))
        } else {
            tracing::info!("Rendering disabled");
            None
        };

        let password = config.api.password.as_ref().ok_or_else(|| {
            CampdocError::Configuration("api.password is not set".to_string())
        })?;

        let client = ApiClient::new(&config.api)?;
        let session = Session::authenticate(client, &config.api.login, password).await?;

        Ok(Self::with_components(config, Arc::new(session), renderer))
    }

    /// Create a coordinator over an already authorized API and renderer
    pub fn with_components(
        config: CampdocConfig,
        api: Arc<dyn CampApi>,
        renderer: Option<Arc<dyn DocumentRenderer>>,
    ) -> Self {
        let state = StateManager::new(&config.output.directory);
        Self {
            config,
            api,
            renderer,
            state,
        }
    }

    /// Execute the export
    ///
    /// This is the main entry point for a run. It:
    /// 1. Processes the selected camps one after another, pausing between them
    /// 2. Records a camp's report rows only once its whole pipeline succeeded
    /// 3. Logs and records a failed camp, then moves on to the next one
    /// 4. Writes `camps.csv` and `chefs.csv`
    /// 5. Generates the run summary
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        let camps = self.config.selected_camps();
        summary.total_camps = camps.len();

        if camps.is_empty() {
            tracing::warn!(
                camp_id = ?self.config.input.camp_id,
                "No camp matches the selection"
            );
        }

        tracing::info!(
            camps = camps.len(),
            force = self.config.fetch.force,
            output = %self.config.output.directory,
            "Starting export"
        );

        let aggregator = ModuleAggregator::new(self.api.clone(), &self.config.fetch);
        let assets = AssetFetcher::new(self.api.clone(), &self.config.fetch.excluded_file_ids);
        let mut report = ReportExporter::new();
        let delay = Duration::from_millis(self.config.fetch.camp_delay_ms);

        for (index, camp) in camps.into_iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let camp_id = camp.id.clone();
            let span = tracing::info_span!("camp", camp_id = %camp_id, name = %camp.name);

            match self
                .process_camp(camp, &aggregator, &assets)
                .instrument(span)
                .await
            {
                Ok(CampOutcome::Skipped) => {
                    summary.skipped_camps += 1;
                }
                Ok(CampOutcome::Processed(processed)) => {
                    let ProcessedCamp {
                        camp,
                        view,
                        assets,
                        document,
                    } = *processed;

                    report.add_camp_row(&camp, &view);
                    summary.staff_rows += report.add_staff_rows(&camp, &view);
                    summary.assets_downloaded += assets;
                    if document.is_some() {
                        summary.documents_rendered += 1;
                    }
                    summary.processed_camps += 1;

                    tracing::info!(camp_id = %camp.id, assets, "Camp processed");
                }
                Err(e) => {
                    let context = format!("camp_id={camp_id}");
                    log_error_with_context!(e, context);
                    summary.failed_camps += 1;
                    summary.add_error(ExportError::from(&e).with_context(context));
                }
            }
        }

        if let Err(e) = report.flush(self.state.output_root()) {
            log_error_with_context!(e, "reports");
            summary.add_error(ExportError::new(ExportErrorType::Report, e.to_string()));
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    /// Runs the pipeline for one camp
    ///
    /// Nothing is recorded for the camp unless every step succeeds.
    async fn process_camp(
        &self,
        mut camp: Camp,
        aggregator: &ModuleAggregator,
        assets: &AssetFetcher,
    ) -> Result<CampOutcome> {
        // Taken before the first fetch so edits made during the run are
        // picked up next time
        let metadata = RunMetadata::now();

        let header = aggregator.fetch_header(&camp.id).await?;
        let entete: Entete = project(Some(&header));
        let previous = self.state.load_metadata(&camp).await;

        if !should_process(&mut camp, &entete, previous.as_ref(), self.config.fetch.force) {
            return Ok(CampOutcome::Skipped);
        }

        let camp_dir = self.state.camp_dir(&camp);
        let view = View::new(
            camp_dir.clone(),
            camp.directory_name(),
            self.config.output.include_personal_data,
        );

        let mut view = aggregator.build_view(&camp, header, view).await?;
        let downloaded = assets.fetch_assets(&mut view, &camp_dir).await?;

        let document = match &self.renderer {
            Some(renderer) => {
                let stem = camp_dir.join(&view.output_name);
                Some(renderer.render(&view, &stem).await?)
            }
            None => None,
        };

        self.state.save_metadata(&camp, &metadata).await?;

        Ok(CampOutcome::Processed(Box::new(ProcessedCamp {
            camp,
            view,
            assets: downloaded,
            document,
        })))
    }
}
