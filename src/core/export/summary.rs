//! Run summary and reporting
//!
//! This module defines structures for tracking and reporting run results.

use crate::domain::CampdocError;
use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Camps selected for this run
    pub total_camps: usize,

    /// Camps fully processed
    pub processed_camps: usize,

    /// Camps unchanged since their last generation
    pub skipped_camps: usize,

    /// Camps abandoned after an error
    pub failed_camps: usize,

    /// Documents produced by the renderer
    pub documents_rendered: usize,

    /// Attached files downloaded
    pub assets_downloaded: usize,

    /// Rows written to the staff report
    pub staff_rows: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Errors encountered during the run
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Check if the run was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failed_camps == 0 && self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_camps = self.total_camps,
            processed = self.processed_camps,
            skipped = self.skipped_camps,
            failed = self.failed_camps,
            documents = self.documents_rendered,
            assets = self.assets_downloaded,
            staff_rows = self.staff_rows,
            duration_secs = self.duration.as_secs(),
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = ?error.context,
                    "Export error"
                );
            }
        }
    }
}

/// Type of export error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Network or HTTP error talking to the API
    Connection,
    /// Login rejected
    Authentication,
    /// Document rendering error
    Render,
    /// Report writing error
    Report,
    /// Run metadata error
    State,
    /// Configuration error
    Configuration,
    /// Unknown error
    Unknown,
}

impl From<&CampdocError> for ExportErrorType {
    fn from(error: &CampdocError) -> Self {
        match error {
            CampdocError::Api(_) => ExportErrorType::Connection,
            CampdocError::Authentication(_) => ExportErrorType::Authentication,
            CampdocError::Render(_) => ExportErrorType::Render,
            CampdocError::Report(_) => ExportErrorType::Report,
            CampdocError::State(_) => ExportErrorType::State,
            CampdocError::Configuration(_) => ExportErrorType::Configuration,
            _ => ExportErrorType::Unknown,
        }
    }
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., camp id)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}

impl From<&CampdocError> for ExportError {
    fn from(error: &CampdocError) -> Self {
        Self::new(ExportErrorType::from(error), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiError;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert_eq!(summary.total_camps, 0);
        assert_eq!(summary.processed_camps, 0);
        assert_eq!(summary.skipped_camps, 0);
        assert_eq!(summary.failed_camps, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.errors.is_empty());
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_export_summary_is_successful() {
        let mut summary = ExportSummary::new();
        summary.total_camps = 3;
        summary.processed_camps = 2;
        summary.skipped_camps = 1;

        assert!(summary.is_successful());

        summary.failed_camps = 1;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_export_error_with_context() {
        let error = ExportError::new(ExportErrorType::Render, "converter failed".to_string())
            .with_context("camp_id=42".to_string());

        assert_eq!(error.error_type, ExportErrorType::Render);
        assert_eq!(error.context, Some("camp_id=42".to_string()));
    }

    #[test]
    fn test_export_error_from_campdoc_error() {
        let error = ExportError::from(&CampdocError::Api(ApiError::Timeout("slow".into())));
        assert_eq!(error.error_type, ExportErrorType::Connection);
        assert!(error.message.contains("slow"));

        let error = ExportError::from(&CampdocError::Io("disk full".into()));
        assert_eq!(error.error_type, ExportErrorType::Unknown);
    }

    #[test]
    fn test_export_summary_add_error() {
        let mut summary = ExportSummary::new();

        summary.add_error(ExportError::new(
            ExportErrorType::State,
            "Failed to write".to_string(),
        ));

        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].error_type, ExportErrorType::State);
    }
}
