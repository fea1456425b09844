//! Result type alias for Campdoc

use super::errors::CampdocError;

/// Result type alias for Campdoc operations
///
/// # Examples
///
/// ```
/// use campdoc::domain::result::Result;
/// use campdoc::domain::errors::CampdocError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CampdocError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CampdocError>;
