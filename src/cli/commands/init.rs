//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "campdoc.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Campdoc configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} and list your camps", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set CAMPDOC_API_LOGIN and CAMPDOC_API_PASSWORD");
                println!("  3. Put your document template next to the configuration");
                println!("  4. Validate configuration: campdoc validate-config");
                println!("  5. Run export: campdoc export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Campdoc Configuration File

[api]
login = "${CAMPDOC_API_LOGIN}"
password = "${CAMPDOC_API_PASSWORD}"

[output]
directory = "./output"

[[camps]]
id = 42
name = "Camp-Alpha"

[render]
template = "dossier.html.hbs"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Campdoc Configuration File
#
# This file contains all configuration options with examples and explanations.
# Any value may reference an environment variable as ${NAME}; CAMPDOC_*
# variables override the matching settings.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# API Configuration
# ============================================================================
[api]
# Base URL of the camp administration API
base_url = "https://monprojet.sgdf.fr"

# Member number and password (use environment variables)
login = "${CAMPDOC_API_LOGIN}"
password = "${CAMPDOC_API_PASSWORD}"

# Timeouts in seconds
timeout_seconds = 60
connect_timeout_seconds = 30

[api.retry]
# Extra attempts for a failed JSON request (0-5); downloads are never retried
max_retries = 1

# Pause before each retry in milliseconds
delay_ms = 5000

# ============================================================================
# Camps
# ============================================================================
[input]
# Optional JSON file holding [{ "id": 42, "name": "Camp-Alpha" }, ...]
# camps_file = "camps.json"

# Process a single camp
# camp_id = "42"

[[camps]]
id = 42
name = "Camp-Alpha"

# ============================================================================
# Output
# ============================================================================
[output]
# Root directory: one sub-directory per camp plus camps.csv and chefs.csv
directory = "./output"

# Exposed to the template as includePersonalData
include_personal_data = false

# ============================================================================
# Fetching
# ============================================================================
[fetch]
# Module requests in flight per camp (1 = sequential, max 16)
parallel_modules = 1

# Pause between camps in milliseconds
camp_delay_ms = 2000

# Regenerate camps even when unchanged since the last run
force = false

# Payload key copied to `camp` in every module
camp_alias_key = "camp817"

# Attached file ids that are never downloaded
excluded_file_ids = [6]

# ============================================================================
# Rendering
# ============================================================================
[render]
enabled = true

# Handlebars template
template = "dossier.html.hbs"

# HTML to PDF converter; called as: converter [args...] input.html output.pdf
converter = "wkhtmltopdf"
converter_args = [
    "--quiet",
    "--enable-local-file-access",
    "--margin-top", "10mm",
    "--margin-bottom", "10mm",
    "--margin-left", "0",
    "--margin-right", "0",
]

# Keep the intermediate HTML next to the PDF
keep_html = false

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}
