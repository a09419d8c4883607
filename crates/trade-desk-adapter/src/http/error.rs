/*
[INPUT]:  Error sources (configuration, validation, transport, API, serialization)
[OUTPUT]: Structured error types with status and message context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::OrderError;

/// Prefix used when rendering errors for humans.
pub const ERROR_PREFIX: &str = "trade-desk";

/// Main error type for the trade desk adapter
#[derive(Error, Debug)]
pub enum TradeDeskError {
    /// Transport failure, passed through untouched
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The exchange answered with a status above 299
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Order request rejected before any network call
    #[error("trade-desk: {0}")]
    InvalidOrder(#[from] OrderError),

    /// API secret is not standard base64
    #[error("trade-desk: secret is not a valid base64 string: {0}")]
    InvalidSecret(#[from] base64::DecodeError),

    /// Configuration error
    #[error("trade-desk: invalid configuration: {0}")]
    Config(String),

    /// URL parsing failed
    #[error("trade-desk: invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Success body did not match the expected payload
    #[error("trade-desk: failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Request body could not be serialized
    #[error("trade-desk: failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// Request body could not be buffered for signing
    #[error("trade-desk: failed to read request body: {0}")]
    Body(#[from] std::io::Error),
}

impl TradeDeskError {
    /// Create an API error from status code and optional message
    pub fn api_error(status: StatusCode, message: Option<String>) -> Self {
        TradeDeskError::Api(ApiError { status, message })
    }

    /// HTTP status carried by the error, if the exchange produced one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TradeDeskError::Api(err) => Some(err.status),
            TradeDeskError::Http(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TradeDeskError::Http(err) if err.is_timeout())
    }
}

/// Non-2xx response decoded from `{"message": "..."}`.
///
/// `message` is absent when the body was empty or not the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = self.status.canonical_reason().unwrap_or("Unknown Status");
        match &self.message {
            Some(message) => write!(f, "{ERROR_PREFIX}: {reason} - {message}"),
            None => write!(f, "{ERROR_PREFIX}: {reason}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Result type alias for trade desk operations
pub type Result<T> = std::result::Result<T, TradeDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_rendering() {
        let err = TradeDeskError::api_error(
            StatusCode::BAD_REQUEST,
            Some("Invalid Price".to_string()),
        );
        assert_eq!(err.to_string(), "trade-desk: Bad Request - Invalid Price");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_api_error_without_message() {
        let err = TradeDeskError::api_error(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(err.to_string(), "trade-desk: Internal Server Error");
    }

    #[test]
    fn test_invalid_order_is_prefixed() {
        let err = TradeDeskError::from(OrderError::MissingProductId);
        assert_eq!(err.to_string(), "trade-desk: order requires ProductID");
        assert_eq!(err.status(), None);
        assert!(!err.is_timeout());
    }
}
