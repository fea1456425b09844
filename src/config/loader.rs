//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CampdocConfig;
use super::secret_string;
use crate::domain::errors::CampdocError;
use crate::domain::result::Result;
use crate::domain::Camp;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`CampdocConfig`]
/// 4. Applies environment variable overrides (`CAMPDOC_*` prefix)
/// 5. Appends the camps listed in `input.camps_file`
/// 6. Validates the configuration
///
/// # Errors
///
/// Returns [`CampdocError::Configuration`] if any step fails.
///
/// # Examples
///
/// ```no_run
/// use campdoc::config::loader::load_config;
///
/// let config = load_config("campdoc.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CampdocConfig> {
    let mut config = parse_config(path)?;

    if let Some(camps_file) = config.input.camps_file.clone() {
        let extra = load_camps_file(&camps_file)?;
        tracing::debug!(camps_file = %camps_file, count = extra.len(), "Loaded camp list");
        config.camps.extend(extra);
    }

    config.validate().map_err(|e| {
        CampdocError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Reads, substitutes and parses a configuration file without validating it
pub fn parse_config(path: impl AsRef<Path>) -> Result<CampdocConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CampdocError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CampdocError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CampdocConfig = toml::from_str(&contents)
        .map_err(|e| CampdocError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Reads a JSON camp list: `[{ "id": 42, "name": "Camp-Alpha" }, ...]`
pub fn load_camps_file(path: impl AsRef<Path>) -> Result<Vec<Camp>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        CampdocError::Configuration(format!(
            "Failed to read camps file {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        CampdocError::Configuration(format!(
            "Failed to parse camps file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CampdocError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(CampdocError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the `CAMPDOC_*` prefix
///
/// Variables follow the pattern `CAMPDOC_<SECTION>_<KEY>`,
/// for example `CAMPDOC_API_LOGIN` or `CAMPDOC_FETCH_FORCE`.
fn apply_env_overrides(config: &mut CampdocConfig) {
    let var = |name: &str| std::env::var(name).ok();

    if let Some(val) = var("CAMPDOC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API
    if let Some(val) = var("CAMPDOC_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Some(val) = var("CAMPDOC_API_LOGIN") {
        config.api.login = val;
    }
    if let Some(val) = var("CAMPDOC_API_PASSWORD") {
        config.api.password = Some(secret_string(val));
    }
    if let Some(Ok(secs)) = var("CAMPDOC_API_TIMEOUT_SECONDS").map(|v| v.parse()) {
        config.api.timeout_seconds = secs;
    }
    if let Some(Ok(retries)) = var("CAMPDOC_API_RETRY_MAX_RETRIES").map(|v| v.parse()) {
        config.api.retry.max_retries = retries;
    }
    if let Some(Ok(delay)) = var("CAMPDOC_API_RETRY_DELAY_MS").map(|v| v.parse()) {
        config.api.retry.delay_ms = delay;
    }

    // Input
    if let Some(val) = var("CAMPDOC_INPUT_CAMPS_FILE") {
        config.input.camps_file = Some(val);
    }
    if let Some(val) = var("CAMPDOC_INPUT_CAMP_ID") {
        config.input.camp_id = Some(val);
    }

    // Output
    if let Some(val) = var("CAMPDOC_OUTPUT_DIRECTORY") {
        config.output.directory = val;
    }
    if let Some(val) = var("CAMPDOC_OUTPUT_INCLUDE_PERSONAL_DATA") {
        config.output.include_personal_data = val.parse().unwrap_or(false);
    }

    // Fetch
    if let Some(val) = var("CAMPDOC_FETCH_FORCE") {
        config.fetch.force = val.parse().unwrap_or(false);
    }
    if let Some(Ok(parallel)) = var("CAMPDOC_FETCH_PARALLEL_MODULES").map(|v| v.parse()) {
        config.fetch.parallel_modules = parallel;
    }
    if let Some(Ok(delay)) = var("CAMPDOC_FETCH_CAMP_DELAY_MS").map(|v| v.parse()) {
        config.fetch.camp_delay_ms = delay;
    }

    // Render
    if let Some(val) = var("CAMPDOC_RENDER_ENABLED") {
        config.render.enabled = val.parse().unwrap_or(true);
    }
    if let Some(val) = var("CAMPDOC_RENDER_TEMPLATE") {
        config.render.template = val;
    }
    if let Some(val) = var("CAMPDOC_RENDER_CONVERTER") {
        config.render.converter = val;
    }
    if let Some(val) = var("CAMPDOC_RENDER_KEEP_HTML") {
        config.render.keep_html = val.parse().unwrap_or(false);
    }

    // Logging
    if let Some(val) = var("CAMPDOC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = var("CAMPDOC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
