//! Status command implementation
//!
//! This module implements the `status` command, which lists when each
//! configured camp was last generated.

use crate::config::load_config;
use crate::core::state::StateManager;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Filter by camp id
    #[arg(long)]
    pub camp_id: Option<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        println!("📊 Export Status");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let state = StateManager::new(&config.output.directory);

        let camps: Vec<_> = config
            .camps
            .iter()
            .filter(|c| match &self.camp_id {
                Some(id) => c.id.as_str() == id,
                None => true,
            })
            .collect();

        if camps.is_empty() {
            println!("No camps match the specified filters.");
            return Ok(0);
        }

        println!("{:<12} {:<40} {:<25}", "Camp", "Name", "Last Generated");
        println!("{}", "-".repeat(80));

        let mut generated = 0;
        for camp in camps {
            let last = match state.load_metadata(camp).await {
                Some(metadata) => {
                    generated += 1;
                    format!(
                        "✅ {}",
                        metadata.creation_date.format("%Y-%m-%d %H:%M:%S")
                    )
                }
                None => "⏸️  Never".to_string(),
            };

            println!("{:<12} {:<40} {:<25}", camp.id.as_str(), camp.name, last);
        }

        println!();
        if generated == 0 {
            println!("No export history found.");
            println!("Run 'campdoc export' to generate the camp documents.");
        }

        Ok(0)
    }
}
