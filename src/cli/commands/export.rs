//! Export command implementation
//!
//! This module implements the `export` command, which generates the camp
//! documents and the CSV reports.

use crate::config::{load_config, CampdocConfig};
use crate::core::export::ExportCoordinator;
use crate::domain::{CampId, CampdocError};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Regenerate every camp even when unchanged since the last run
    #[arg(short, long)]
    pub force: bool,

    /// Process only this camp
    #[arg(long)]
    pub camp_id: Option<String>,

    /// Override the number of module requests in flight per camp
    #[arg(long, value_name = "N")]
    pub parallel_modules: Option<usize>,

    /// Skip document rendering; reports and assets are still produced
    #[arg(long)]
    pub no_render: bool,
}

impl ExportArgs {
    /// Applies command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut CampdocConfig) {
        if self.force {
            tracing::info!("Forcing regeneration from CLI");
            config.fetch.force = true;
        }

        if let Some(camp_id) = &self.camp_id {
            tracing::info!(camp_id = %camp_id, "Overriding camp selection from CLI");
            config.input.camp_id = Some(camp_id.clone());
        }

        if let Some(parallel) = self.parallel_modules {
            tracing::info!(parallel_modules = parallel, "Overriding module fan-out from CLI");
            config.fetch.parallel_modules = parallel;
        }

        if self.no_render {
            tracing::info!("Disabling rendering from CLI");
            config.render.enabled = false;
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        if let Some(camp_id) = config.input.camp_id() {
            if !config.camps.iter().any(|c| c.id == camp_id) {
                eprintln!("Camp {camp_id} is not in the camp list");
                return Ok(2);
            }
        }

        println!("Export Configuration:");
        println!("  API: {}", config.api.base_url);
        println!("  Output: {}", config.output.directory);
        println!(
            "  Camps: {}",
            match config.input.camp_id() {
                Some(id) => id.to_string(),
                None => format!("all ({})", config.camps.len()),
            }
        );
        println!("  Force: {}", config.fetch.force);
        println!(
            "  Rendering: {}",
            if config.render.enabled {
                config.render.template.as_str()
            } else {
                "disabled"
            }
        );
        println!();

        // Create export coordinator
        tracing::info!("Creating export coordinator");
        let coordinator = match ExportCoordinator::new(config).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(init_exit_code(&e));
            }
        };

        tracing::info!("Executing export");
        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("📊 Export Summary:");
        println!("  Total Camps: {}", summary.total_camps);
        println!("  Processed: {}", summary.processed_camps);
        println!("  Skipped (unchanged): {}", summary.skipped_camps);
        println!("  Failed: {}", summary.failed_camps);
        println!("  Documents: {}", summary.documents_rendered);
        println!("  Files Downloaded: {}", summary.assets_downloaded);
        println!("  Staff Rows: {}", summary.staff_rows);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - {:?}: {}", error.error_type, error.message);
                if let Some(context) = &error.context {
                    println!("    Context: {context}");
                }
            }
            println!();
        }

        let exit_code = if summary.is_successful() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }
}

/// Exit code for a failure before the first camp
fn init_exit_code(error: &CampdocError) -> i32 {
    match error {
        CampdocError::Configuration(_) => 2,
        CampdocError::Authentication(_) | CampdocError::Api(_) => 4,
        _ => 5,
    }
}
