// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors to the host's error object
// - The wire shape is always { error: true, message, data: [] }
// - Full errors are logged, hosts get a short message

use serde::Serialize;

use crate::domain::ResolvedItem;
use crate::error::AppError;

/// Error object returned to the host in place of an item array
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
    pub data: Vec<ResolvedItem>,

    #[serde(skip)]
    pub error_type: ErrorType,
}

/// Error categories, kept for logging and host-side branching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Missing or malformed caller parameter
    Validation,

    /// Source catalog unreachable or returned an unusable page
    Upstream,

    /// Bad or unreadable configuration
    Configuration,

    /// Local I/O failure
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: Vec::new(),
            error_type,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Validation(message) => Self::new(ErrorType::Validation, message),

            AppError::Fetch { url, attempts, message } => {
                log::error!("Fetch of {} failed after {} attempt(s): {}", url, attempts, message);
                Self::new(ErrorType::Upstream, "Failed to fetch list from source")
            }

            AppError::Http(message) | AppError::Payload(message) => {
                log::error!("Upstream error: {}", message);
                Self::new(ErrorType::Upstream, "Source returned an unusable response")
            }

            AppError::Config(message) => {
                log::error!("Configuration error: {}", message);
                Self::new(ErrorType::Configuration, message)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(ErrorType::Internal, io_error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::from_app_error(AppError::Validation(
            "Missing required parameter: list url".to_string(),
        ));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Missing required parameter: list url");
        assert!(error.error);
    }

    #[test]
    fn test_fetch_error_is_upstream() {
        let error = ErrorResponse::from_app_error(AppError::Fetch {
            url: "https://m.douban.com/rexxar/api/v2/movie/suggestion".to_string(),
            attempts: 3,
            message: "status 403".to_string(),
        });
        assert_eq!(error.error_type, ErrorType::Upstream);
        assert!(error.data.is_empty());
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::from_app_error(AppError::Payload("expected value".to_string()));
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "error": true,
                "message": "Source returned an unusable response",
                "data": []
            })
        );
    }
}
