//! Error types for the zarinpal library

use thiserror::Error;

/// Result type alias for zarinpal operations
pub type Result<T> = std::result::Result<T, ZarinpalError>;

/// Main error type for zarinpal operations
#[derive(Error, Debug)]
pub enum ZarinpalError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// The caller's cancellation signal fired before the exchange completed
    #[error("Request cancelled")]
    Cancelled,

    /// The response body is not a `{data, errors}` envelope, or its errors
    /// region could not be read
    #[error("Malformed envelope: {message}")]
    MalformedEnvelope { message: String },

    /// The gateway reported an error in the envelope
    #[error("error code: {code}, error: {message}")]
    Gateway { code: i32, message: String },

    /// The data region does not match the expected response type
    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    /// JSON serialization error while encoding a request
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ZarinpalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        Self::Http(err)
    }
}

impl ZarinpalError {
    /// Create a malformed envelope error
    pub fn malformed_envelope(message: impl Into<String>) -> Self {
        Self::MalformedEnvelope {
            message: message.into(),
        }
    }

    /// Create a malformed payload error
    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
        }
    }

    /// Create a gateway-reported error
    pub fn gateway(code: i32, message: impl Into<String>) -> Self {
        Self::Gateway {
            code,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the gateway itself rejected the request
    pub fn is_gateway_error(&self) -> bool {
        matches!(self, Self::Gateway { .. })
    }

    /// The gateway's error code, if this is a gateway-reported error
    pub fn gateway_code(&self) -> Option<i32> {
        match self {
            Self::Gateway { code, .. } => Some(*code),
            _ => None,
        }
    }
}
