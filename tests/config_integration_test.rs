//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use campdoc::config::load_config;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("CAMPDOC_APPLICATION_LOG_LEVEL");
    std::env::remove_var("CAMPDOC_API_LOGIN");
    std::env::remove_var("CAMPDOC_API_PASSWORD");
    std::env::remove_var("CAMPDOC_INPUT_CAMP_ID");
    std::env::remove_var("CAMPDOC_OUTPUT_DIRECTORY");
    std::env::remove_var("CAMPDOC_FETCH_FORCE");
    std::env::remove_var("CAMPDOC_FETCH_PARALLEL_MODULES");
    std::env::remove_var("CAMPDOC_RENDER_ENABLED");
    std::env::remove_var("TEST_CAMPDOC_PASSWORD");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"

[api]
base_url = "https://camps.example.org"
login = "123456"
password = "secret"
timeout_seconds = 10
connect_timeout_seconds = 5

[api.retry]
max_retries = 2
delay_ms = 250

[input]
camp_id = "42"

[[camps]]
id = 42
name = "Camp-Alpha"

[[camps]]
id = "43"
name = "Camp-Beta"

[output]
directory = "/tmp/campdoc"
include_personal_data = true

[fetch]
parallel_modules = 4
camp_delay_ms = 0
force = true
camp_alias_key = "camp900"
excluded_file_ids = [6, 7]

[render]
enabled = true
template = "custom.hbs"
converter = "weasyprint"
converter_args = []
keep_html = true

[logging]
local_enabled = false
local_path = "/tmp/campdoc-logs"
local_rotation = "hourly"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");

    assert_eq!(config.api.base_url, "https://camps.example.org");
    assert_eq!(config.api.login, "123456");
    assert_eq!(
        config.api.password.as_ref().unwrap().expose_secret().as_ref(),
        "secret"
    );
    assert_eq!(config.api.timeout_seconds, 10);
    assert_eq!(config.api.retry.max_retries, 2);
    assert_eq!(config.api.retry.delay_ms, 250);

    assert_eq!(config.camps.len(), 2);
    assert_eq!(config.camps[1].id.as_str(), "43");
    let selected = config.selected_camps();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].name, "Camp-Alpha");

    assert_eq!(config.output.directory, "/tmp/campdoc");
    assert!(config.output.include_personal_data);

    assert_eq!(config.fetch.parallel_modules, 4);
    assert_eq!(config.fetch.camp_delay_ms, 0);
    assert!(config.fetch.force);
    assert_eq!(config.fetch.camp_alias_key, "camp900");
    assert_eq!(config.fetch.excluded_file_ids, vec![6, 7]);

    assert_eq!(config.render.template, "custom.hbs");
    assert_eq!(config.render.converter, "weasyprint");
    assert!(config.render.converter_args.is_empty());
    assert!(config.render.keep_html);

    assert_eq!(config.logging.local_path, "/tmp/campdoc-logs");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[api]
login = "123456"
password = "pass"

[output]
directory = "out"

[[camps]]
id = 42
name = "Camp-Alpha"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify defaults are applied
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.api.base_url, "https://monprojet.sgdf.fr");
    assert_eq!(config.api.retry.max_retries, 1);
    assert_eq!(config.api.retry.delay_ms, 5000);
    assert_eq!(config.fetch.parallel_modules, 1);
    assert_eq!(config.fetch.camp_delay_ms, 2000);
    assert!(!config.fetch.force);
    assert_eq!(config.fetch.camp_alias_key, "camp817");
    assert_eq!(config.fetch.excluded_file_ids, vec![6]);
    assert!(config.render.enabled);
    assert_eq!(config.render.converter, "wkhtmltopdf");
    assert!(!config.output.include_personal_data);
    assert!(!config.logging.local_enabled);
    assert_eq!(config.selected_camps().len(), 1);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_CAMPDOC_PASSWORD", "secret_pass");

    let toml_content = r#"
[api]
login = "123456"
password = "${TEST_CAMPDOC_PASSWORD}"

[output]
directory = "out"

[[camps]]
id = 42
name = "Camp-Alpha"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(
        config.api.password.as_ref().unwrap().expose_secret().as_ref(),
        "secret_pass"
    );

    std::env::remove_var("TEST_CAMPDOC_PASSWORD");
}

#[test]
fn test_missing_substitution_variable_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[api]
login = "123456"
password = "${TEST_CAMPDOC_PASSWORD}"

[output]
directory = "out"

[[camps]]
id = 42
name = "Camp-Alpha"
"#;

    let temp_file = write_config(toml_content);
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_CAMPDOC_PASSWORD"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CAMPDOC_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("CAMPDOC_API_LOGIN", "654321");
    std::env::set_var("CAMPDOC_API_PASSWORD", "from-env");
    std::env::set_var("CAMPDOC_FETCH_FORCE", "true");
    std::env::set_var("CAMPDOC_FETCH_PARALLEL_MODULES", "8");
    std::env::set_var("CAMPDOC_RENDER_ENABLED", "false");

    let toml_content = r#"
[application]
log_level = "info"

[api]
login = "123456"

[output]
directory = "out"

[fetch]
parallel_modules = 2

[[camps]]
id = 42
name = "Camp-Alpha"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify env var overrides took effect
    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.api.login, "654321");
    assert_eq!(
        config.api.password.as_ref().unwrap().expose_secret().as_ref(),
        "from-env"
    );
    assert!(config.fetch.force);
    assert_eq!(config.fetch.parallel_modules, 8);
    assert!(!config.render.enabled);

    cleanup_env_vars();
}

#[test]
fn test_camps_file_is_appended() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let camps_file = write_config(r#"[{"id": 43, "name": "Camp-Beta"}, {"id": 44, "name": "Camp-Gamma"}]"#);
    let toml_content = format!(
        r#"
[api]
login = "123456"
password = "pass"

[input]
camps_file = "{}"

[output]
directory = "out"

[[camps]]
id = 42
name = "Camp-Alpha"
"#,
        camps_file.path().display()
    );

    let temp_file = write_config(&toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    let ids: Vec<&str> = config.camps.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["42", "43", "44"]);
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let cases = [
        // Unknown log level
        r#"
[application]
log_level = "invalid_level"
[api]
login = "1"
password = "p"
[output]
directory = "out"
[[camps]]
id = 1
name = "A"
"#,
        // No camps at all
        r#"
[api]
login = "1"
password = "p"
[output]
directory = "out"
"#,
        // Duplicate camp ids
        r#"
[api]
login = "1"
password = "p"
[output]
directory = "out"
[[camps]]
id = 1
name = "A"
[[camps]]
id = "1"
name = "B"
"#,
        // Missing password
        r#"
[api]
login = "1"
[output]
directory = "out"
[[camps]]
id = 1
name = "A"
"#,
        // Parallelism out of range
        r#"
[api]
login = "1"
password = "p"
[output]
directory = "out"
[fetch]
parallel_modules = 0
[[camps]]
id = 1
name = "A"
"#,
    ];

    for content in cases {
        let temp_file = write_config(content);
        let result = load_config(temp_file.path());
        assert!(result.is_err(), "expected rejection of:\n{content}");
    }
}
