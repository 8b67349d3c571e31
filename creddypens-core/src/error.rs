//! Error types for the CreddyPens client library.
//!
//! All backend failures observed by this client collapse into a small
//! taxonomy: configuration problems, missing organization context, HTTP
//! request failures, streaming failures, and local validation errors.
//! Nothing here retries automatically; every retry is a user action.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E1001-E1099 | Config | Config file, environment, and validation errors |
//! | E2001-E2099 | Org | Organization context and sign-in errors |
//! | E3001-E3099 | Api | HTTP status, transport, and decode errors |
//! | E4001-E4099 | Stream | SSE setup and mid-stream errors |
//! | E5001-E5099 | Validation | Client-side input validation |
//! | E9001-E9099 | General | IO, serialization, internal errors |

use std::fmt;

use thiserror::Error;
use tracing::{error, warn};

/// The main error type for the CreddyPens client library.
#[derive(Debug, Error)]
pub enum CreddyError {
    // ========================================================================
    // Configuration Errors (E1001-E1099)
    // ========================================================================
    /// Configuration file or environment parse error
    #[error("[E1001] Failed to parse configuration: {0}")]
    ConfigParse(String),

    /// Invalid configuration value
    #[error("[E1002] Invalid configuration value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    // ========================================================================
    // Organization Errors (E2001-E2099)
    // ========================================================================
    /// An organization-scoped call was attempted without an organization id
    #[error("[E2001] Sign in required: no organization id is configured")]
    SignInRequired,

    // ========================================================================
    // API Errors (E3001-E3099)
    // ========================================================================
    /// The backend answered with a non-2xx status
    #[error("[E3001] API returned {status}: {detail}")]
    ApiStatus { status: u16, detail: String },

    /// The request never completed (connect failure, DNS, dropped socket)
    #[error("[E3002] API unreachable: {0}")]
    ApiUnreachable(String),

    /// The request timed out
    #[error("[E3003] API request timed out")]
    ApiTimeout,

    /// A 2xx response body did not decode into the expected schema
    #[error("[E3004] Failed to decode API response: {0}")]
    ApiDecode(String),

    /// Any other transport-level request failure
    #[error("[E3005] API request failed: {0}")]
    ApiRequest(String),

    // ========================================================================
    // Streaming Errors (E4001-E4099)
    // ========================================================================
    /// The backend reported a failure through an SSE `error` event
    #[error("[E4001] Stream error: {0}")]
    StreamFailed(String),

    /// The response body ended before a terminal `done`/`error` event
    #[error("[E4002] Stream closed before completion")]
    StreamClosed,

    // ========================================================================
    // Validation Errors (E5001-E5099)
    // ========================================================================
    /// Client-side input validation failed; no request was issued
    #[error("[E5001] Validation error: {0}")]
    Validation(String),

    // ========================================================================
    // General Errors (E9001-E9099)
    // ========================================================================
    /// IO error
    #[error("[E9001] IO error: {0}")]
    Io(String),

    /// Serialization/deserialization error
    #[error("[E9002] Serialization error: {0}")]
    Serialization(String),

    /// Internal error (catch-all for unexpected conditions)
    #[error("[E9003] Internal error: {0}")]
    Internal(String),
}

/// Result type alias for CreddyPens client operations.
pub type CreddyResult<T> = Result<T, CreddyError>;

impl From<reqwest::Error> for CreddyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CreddyError::ApiTimeout
        } else if err.is_connect() {
            CreddyError::ApiUnreachable(err.to_string())
        } else if err.is_decode() {
            CreddyError::ApiDecode(err.to_string())
        } else {
            CreddyError::ApiRequest(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CreddyError {
    fn from(err: serde_json::Error) -> Self {
        CreddyError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for CreddyError {
    fn from(err: std::io::Error) -> Self {
        CreddyError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for CreddyError {
    fn from(err: config::ConfigError) -> Self {
        CreddyError::ConfigParse(err.to_string())
    }
}

impl CreddyError {
    /// Shorthand for a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CreddyError::Validation(message.into())
    }

    /// Returns true if this error came from the HTTP layer.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            CreddyError::ApiStatus { .. }
                | CreddyError::ApiUnreachable(_)
                | CreddyError::ApiTimeout
                | CreddyError::ApiDecode(_)
                | CreddyError::ApiRequest(_)
        )
    }

    /// Returns true if this error is transient and the same request might
    /// succeed when the user retries it.
    pub fn is_transient(&self) -> bool {
        match self {
            CreddyError::ApiUnreachable(_)
            | CreddyError::ApiTimeout
            | CreddyError::StreamClosed => true,
            CreddyError::ApiStatus { status, .. } => {
                *status == 429 || *status == 502 || *status == 503 || *status == 504
            }
            _ => false,
        }
    }

    /// Returns an error code suitable for logging or external reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            CreddyError::ConfigParse(_) => "E1001",
            CreddyError::InvalidConfigValue { .. } => "E1002",
            CreddyError::SignInRequired => "E2001",
            CreddyError::ApiStatus { .. } => "E3001",
            CreddyError::ApiUnreachable(_) => "E3002",
            CreddyError::ApiTimeout => "E3003",
            CreddyError::ApiDecode(_) => "E3004",
            CreddyError::ApiRequest(_) => "E3005",
            CreddyError::StreamFailed(_) => "E4001",
            CreddyError::StreamClosed => "E4002",
            CreddyError::Validation(_) => "E5001",
            CreddyError::Io(_) => "E9001",
            CreddyError::Serialization(_) => "E9002",
            CreddyError::Internal(_) => "E9003",
        }
    }

    /// Returns a user-friendly suggestion for how to resolve this error.
    pub fn user_suggestion(&self) -> Option<&'static str> {
        match self {
            CreddyError::SignInRequired => {
                Some("Run 'creddypens login' or set CREDDYPENS_ORG_ID")
            }
            CreddyError::ApiUnreachable(_) => {
                Some("Check that the backend is running and api.base_url is correct")
            }
            CreddyError::ApiTimeout => Some("The backend is slow or down. Try again"),
            CreddyError::ApiStatus { status, .. } if *status == 403 => {
                Some("The agent may not be hired for this organization yet")
            }
            CreddyError::ApiStatus { status, .. } if *status == 429 => {
                Some("Rate limited. Wait a moment before retrying")
            }
            CreddyError::StreamClosed => Some("The connection dropped mid-stream. Resend"),
            _ => None,
        }
    }

    /// Log this error with appropriate severity level.
    pub fn log(&self) {
        let code = self.error_code();
        if self.is_transient() {
            warn!(error_code = %code, "Transient error occurred: {}", self);
        } else {
            error!(error_code = %code, "Error occurred: {}", self);
        }
    }
}

/// Format an error for CLI display with the code and suggestion attached.
pub struct CliErrorDisplay<'a> {
    error: &'a CreddyError,
    show_suggestion: bool,
}

impl<'a> CliErrorDisplay<'a> {
    pub fn new(error: &'a CreddyError) -> Self {
        Self {
            error,
            show_suggestion: true,
        }
    }

    pub fn without_suggestion(mut self) -> Self {
        self.show_suggestion = false;
        self
    }
}

impl<'a> fmt::Display for CliErrorDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.error)?;

        if self.show_suggestion {
            if let Some(suggestion) = self.error.user_suggestion() {
                writeln!(f)?;
                writeln!(f, "  Suggestion: {}", suggestion)?;
            }
        }

        if self.error.is_transient() {
            writeln!(f)?;
            writeln!(f, "  This error may be temporary. Try again.")?;
        }

        Ok(())
    }
}
