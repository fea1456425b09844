//! Configuration schema types

use crate::config::SecretString;
use crate::domain::{Camp, CampId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Main Campdoc configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampdocConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Remote API connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the camp list comes from
    #[serde(default)]
    pub input: InputConfig,

    /// Inline camp list; entries from `input.camps_file` are appended on load
    #[serde(default)]
    pub camps: Vec<Camp>,

    /// Output location
    pub output: OutputConfig,

    /// Fetch pacing and change detection
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Document rendering
    #[serde(default)]
    pub render: RenderConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CampdocConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.input.validate()?;
        self.output.validate()?;
        self.fetch.validate()?;
        self.render.validate()?;
        self.logging.validate()?;

        if self.camps.is_empty() {
            return Err(
                "no camps configured: add [[camps]] entries or set input.camps_file".to_string(),
            );
        }

        let mut seen = HashSet::new();
        for camp in &self.camps {
            if !seen.insert(camp.id.as_str()) {
                return Err(format!("duplicate camp id in camp list: {}", camp.id));
            }
            if camp.name.trim().is_empty() {
                return Err(format!("camp {} has an empty name", camp.id));
            }
        }

        Ok(())
    }

    /// Camps selected for this run, honoring `input.camp_id`
    pub fn selected_camps(&self) -> Vec<Camp> {
        match self.input.camp_id() {
            Some(id) => self
                .camps
                .iter()
                .filter(|c| c.id == id)
                .cloned()
                .collect(),
            None => self.camps.clone(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry policy for JSON requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Extra attempts after the first failure
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Fixed pause before each retry, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Member number used to log in
    #[serde(default)]
    pub login: String,

    /// Password used to log in
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    #[serde(default)]
    pub retry: RetryConfig,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if self.login.trim().is_empty() {
            return Err("api.login cannot be empty".to_string());
        }

        if self
            .password
            .as_ref()
            .map(|s| s.expose_secret().is_empty())
            .unwrap_or(true)
        {
            return Err("api.password cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 || self.connect_timeout_seconds == 0 {
            return Err("api timeouts must be > 0".to_string());
        }

        if self.retry.max_retries > 5 {
            return Err(format!(
                "api.retry.max_retries must be <= 5, got {}",
                self.retry.max_retries
            ));
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login: String::new(),
            password: None,
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Camp list sources and selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// JSON file holding `[{ "id": ..., "name": ... }]`
    #[serde(default)]
    pub camps_file: Option<String>,

    /// Process only this camp
    #[serde(default)]
    pub camp_id: Option<String>,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(id) = &self.camp_id {
            CampId::new(id.clone()).map_err(|e| format!("input.camp_id: {e}"))?;
        }
        Ok(())
    }

    pub fn camp_id(&self) -> Option<CampId> {
        self.camp_id.as_ref().and_then(|id| CampId::new(id.clone()).ok())
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for camp directories and the CSV reports
    pub directory: String,

    /// Exposed to templates as `includePersonalData`
    #[serde(default)]
    pub include_personal_data: bool,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.trim().is_empty() {
            return Err("output.directory cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Fetch pacing and change detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Module requests in flight per camp; 1 fetches sequentially
    #[serde(default = "default_parallel_modules")]
    pub parallel_modules: usize,

    /// Pause between consecutive camps, in milliseconds
    #[serde(default = "default_camp_delay_ms")]
    pub camp_delay_ms: u64,

    /// Regenerate camps even when unmodified since the last run
    #[serde(default)]
    pub force: bool,

    /// Payload key aliased to `camp` in every module
    #[serde(default = "default_camp_alias_key")]
    pub camp_alias_key: String,

    /// Attached file ids never downloaded
    #[serde(default = "default_excluded_file_ids")]
    pub excluded_file_ids: Vec<u64>,
}

impl FetchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.parallel_modules == 0 || self.parallel_modules > 16 {
            return Err(format!(
                "fetch.parallel_modules must be between 1 and 16, got {}",
                self.parallel_modules
            ));
        }
        if self.camp_alias_key.trim().is_empty() {
            return Err("fetch.camp_alias_key cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            parallel_modules: default_parallel_modules(),
            camp_delay_ms: default_camp_delay_ms(),
            force: false,
            camp_alias_key: default_camp_alias_key(),
            excluded_file_ids: default_excluded_file_ids(),
        }
    }
}

/// Document rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Render one document per camp
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Handlebars template file
    #[serde(default = "default_template")]
    pub template: String,

    /// HTML to PDF converter executable
    #[serde(default = "default_converter")]
    pub converter: String,

    /// Arguments placed before the input and output paths
    #[serde(default = "default_converter_args")]
    pub converter_args: Vec<String>,

    /// Keep the intermediate `.html` next to the PDF
    #[serde(default)]
    pub keep_html: bool,
}

impl RenderConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled {
            if self.template.trim().is_empty() {
                return Err("render.template cannot be empty when rendering is enabled".to_string());
            }
            if self.converter.trim().is_empty() {
                return Err(
                    "render.converter cannot be empty when rendering is enabled".to_string(),
                );
            }
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            template: default_template(),
            converter: default_converter(),
            converter_args: default_converter_args(),
            keep_html: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://monprojet.sgdf.fr".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_connect_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> usize {
    1
}

fn default_retry_delay_ms() -> u64 {
    5000
}

fn default_parallel_modules() -> usize {
    1
}

fn default_camp_delay_ms() -> u64 {
    2000
}

fn default_camp_alias_key() -> String {
    "camp817".to_string()
}

fn default_excluded_file_ids() -> Vec<u64> {
    vec![6]
}

fn default_template() -> String {
    "dossier.html.hbs".to_string()
}

fn default_converter() -> String {
    "wkhtmltopdf".to_string()
}

fn default_converter_args() -> Vec<String> {
    [
        "--quiet",
        "--enable-local-file-access",
        "--margin-top",
        "10mm",
        "--margin-bottom",
        "10mm",
        "--margin-left",
        "0",
        "--margin-right",
        "0",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
