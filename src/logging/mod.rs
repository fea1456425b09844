//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with `RUST_LOG` filtering
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use campdoc::logging::init_logging;
//! use campdoc::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(camp_id = "42", "Processing camp");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use campdoc::log_error_with_context;
/// use campdoc::domain::CampdocError;
///
/// let error = CampdocError::Render("converter exited with status 1".to_string());
/// log_error_with_context!(&error, "camp_id=42");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use campdoc::log_retry_attempt;
///
/// log_retry_attempt!(1, 1, "connection reset");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
