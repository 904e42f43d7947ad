//! Error types for the OnePay integration

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for OnePay operations
pub type Result<T> = std::result::Result<T, OnePayError>;

/// A single violated checkout constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending field
    pub field: &'static str,
    /// Human-readable description of the constraint
    pub message: String,
}

impl FieldViolation {
    /// Create a new field violation
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by the OnePay client
#[derive(Debug, Error)]
pub enum OnePayError {
    /// One or more checkout fields violate their constraints
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// Malformed or missing merchant configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inbound signature did not match the recomputed one
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A verified field could not be converted to its expected type
    #[error("Decode error: {0}")]
    Decode(String),

    /// Network failure talking to the gateway
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-success status
    #[error("Gateway returned HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// The gateway body was not the expected JSON document
    #[error("Invalid gateway response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl OnePayError {
    /// Create a validation error from collected violations
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation(violations)
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Field violations carried by a validation error
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Validation(violations) => violations,
            _ => &[],
        }
    }

    /// Whether the caller may reasonably retry the operation later
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<hex::FromHexError> for OnePayError {
    fn from(err: hex::FromHexError) -> Self {
        Self::config(format!("Secure secret is not valid hex: {}", err))
    }
}

impl From<url::ParseError> for OnePayError {
    fn from(err: url::ParseError) -> Self {
        Self::config(format!("Invalid gateway URL: {}", err))
    }
}
