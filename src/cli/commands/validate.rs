//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Campdoc configuration file.

use crate::config::load_config;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration; this also validates it
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  API: {}", config.api.base_url);
        println!("  Login: {}", config.api.login);
        println!(
            "  Retry: {} after {}ms",
            config.api.retry.max_retries, config.api.retry.delay_ms
        );
        println!("  Camps: {}", config.camps.len());
        if let Some(camp_id) = &config.input.camp_id {
            println!("  Selected Camp: {camp_id}");
        }
        println!("  Output: {}", config.output.directory);
        println!("  Parallel Modules: {}", config.fetch.parallel_modules);
        println!("  Camp Delay: {}ms", config.fetch.camp_delay_ms);

        if config.render.enabled {
            println!("  Template: {}", config.render.template);
            println!("  Converter: {}", config.render.converter);
            if !Path::new(&config.render.template).exists() {
                println!("⚠️  Template file not found: {}", config.render.template);
            }
        } else {
            println!("  Rendering: disabled");
        }
        println!();

        Ok(0)
    }
}
