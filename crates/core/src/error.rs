//! Error types for the FoodieDelight client
//!
//! This module provides unified error handling across the client,
//! covering form validation, transport failures, application-level
//! API errors, and local file reads.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the FoodieDelight client
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single form field failed validation
    #[error("Validation failed for '{field}': {message}")]
    FieldValidation { field: String, message: String },

    /// A rule spanning more than one field failed
    #[error("Cross-field validation failed on '{field}': {message}")]
    CrossFieldValidation { field: String, message: String },

    // ========================================================================
    // Network Errors
    // ========================================================================
    /// Network unreachable, connection refused, or other transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered but reported a failure, either through the HTTP
    /// status or through the embedded `status` field in the response body
    #[error("API error{}: {message}", fmt_status(.status))]
    Api { status: Option<u16>, message: String },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    // ========================================================================
    // Local Errors
    // ========================================================================
    /// A selected file could not be read for encoding
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// A time label was not of the form "hh:mm AM|PM"
    #[error("Invalid time label: '{0}'")]
    InvalidTimeLabel(String),

    /// A referenced restaurant id is not present in the cached collection
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),
}

impl ClientError {
    /// Create a general validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ClientError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        ClientError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a cross-field validation error
    pub fn cross_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        ClientError::CrossFieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        ClientError::Transport(msg.into())
    }

    /// Create an application-level API error
    pub fn api(status: Option<u16>, msg: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        ClientError::Parse(msg.into())
    }

    /// Create a file read error
    pub fn file_read(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        ClientError::FileRead {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation error (field or cross-field)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_)
                | ClientError::FieldValidation { .. }
                | ClientError::CrossFieldValidation { .. }
        )
    }

    /// Check if this error is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// Check if this error carries a server-provided message
    pub fn is_api(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }

    /// Get the message to surface in a user notification.
    ///
    /// Server-provided detail is preferred when available; transport and
    /// parse failures map to generic wording since their internals are
    /// not actionable for the user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Transport(_) => {
                "Unable to reach the server. Please check your connection.".to_string()
            }
            ClientError::Parse(_) => "The server returned an unexpected response.".to_string(),
            other => other.to_string(),
        }
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(s) => format!(" (status {s})"),
        None => String::new(),
    }
}

/// Result type alias using ClientError
pub type ClientResult<T> = Result<T, ClientError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = ClientError::validation("Description is required");
        assert!(err.is_validation());
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "Validation error: Description is required");
    }

    #[test]
    fn test_field_validation_error() {
        let err = ClientError::field_validation("contact", "Contact must be a number");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation failed for 'contact': Contact must be a number"
        );
    }

    #[test]
    fn test_cross_field_error() {
        let err = ClientError::cross_field(
            "openTo",
            "Open To time should be greater than Open From time",
        );
        assert!(err.is_validation());
        assert!(err.to_string().contains("openTo"));
    }

    #[test]
    fn test_api_error_display() {
        let err = ClientError::api(Some(500), "Internal server error");
        assert!(err.is_api());
        assert_eq!(err.to_string(), "API error (status 500): Internal server error");

        let err = ClientError::api(None, "No data");
        assert_eq!(err.to_string(), "API error: No data");
    }

    #[test]
    fn test_user_message_prefers_server_detail() {
        let err = ClientError::api(Some(422), "Restaurant name already taken");
        assert_eq!(err.user_message(), "Restaurant name already taken");
    }

    #[test]
    fn test_user_message_hides_transport_detail() {
        let err = ClientError::transport("dns error: failed to lookup");
        assert_eq!(
            err.user_message(),
            "Unable to reach the server. Please check your connection."
        );
    }

    #[test]
    fn test_file_read_error() {
        let err = ClientError::file_read("/tmp/pic.png", "permission denied");
        assert!(err.to_string().contains("/tmp/pic.png"));
        assert!(err.to_string().contains("permission denied"));
    }
}
