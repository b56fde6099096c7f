//! Unified application error types for Folio.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. HTTP failures keep the response
//! status and body so callers can classify them; display strings for end
//! users come from [`AppError::user_message`].

use std::fmt;
use thiserror::Error;

/// Fallback text when nothing more specific is known.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Message used when a request never produced a response.
pub const NO_RESPONSE_MESSAGE: &str =
    "No response from server. Please check your internet connection.";

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The request never reached the server or no response came back.
    Network,
    /// The request timed out.
    Timeout,
    /// The server answered with a 4xx status.
    Client,
    /// The server answered with a 5xx status.
    Server,
    /// The session could not be recovered (token refresh failed).
    Authentication,
    /// Client-side input validation failed. Never sent to the network.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// Reading or writing local session storage failed.
    Storage,
    /// Anything else.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "NETWORK"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Client => write!(f, "CLIENT"),
            Self::Server => write!(f, "SERVER"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Folio.
///
/// `status` is the HTTP status of the failed response, or `0` when no
/// response was received. `data` carries the decoded response body (or
/// field-level validation details) when there is one.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// HTTP status code, `0` when not applicable.
    pub status: u16,
    /// A human-readable error message.
    pub message: String,
    /// Response body or structured details, if any.
    pub data: Option<serde_json::Value>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: 0,
            message: message.into(),
            data: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(kind, message)
        }
    }

    /// Create an error from a non-2xx HTTP response.
    ///
    /// The kind is derived from the status: 5xx is [`ErrorKind::Server`],
    /// everything else is [`ErrorKind::Client`].
    pub fn http(status: u16, message: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        let kind = if status >= 500 {
            ErrorKind::Server
        } else {
            ErrorKind::Client
        };
        Self {
            status,
            data,
            ..Self::new(kind, message)
        }
    }

    /// Create a network error (no response received).
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Attach structured details.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// No response was received (status `0`).
    pub fn is_network_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Network | ErrorKind::Timeout)
    }

    /// The request timed out.
    pub fn is_timeout_error(&self) -> bool {
        self.kind == ErrorKind::Timeout || self.message.contains("timeout")
    }

    /// The server answered with 5xx.
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// The server answered with 4xx.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Whether retrying the same request might succeed.
    pub fn is_transient(&self) -> bool {
        self.is_network_error() || self.is_server_error()
    }

    /// Map the error onto the text shown to the user.
    pub fn user_message(&self) -> String {
        let fixed = match self.status {
            400 => Some("Invalid request. Please check your input."),
            401 => Some("You are not authorized to perform this action."),
            403 => Some("Access denied. You don't have permission for this action."),
            404 => Some("The requested resource was not found."),
            409 => Some("This resource already exists."),
            422 => Some("Validation failed. Please check your input."),
            429 => Some("Too many requests. Please try again later."),
            500 => Some("Server error. Please try again later."),
            503 => Some("Service temporarily unavailable. Please try again later."),
            _ => None,
        };
        match fixed {
            Some(msg) => msg.to_string(),
            None if self.message.is_empty() => UNEXPECTED_ERROR_MESSAGE.to_string(),
            None => self.message.clone(),
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            status: self.status,
            message: self.message.clone(),
            data: self.data.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
