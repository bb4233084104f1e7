//! Error taxonomy for the auth client.
//!
//! Every failure a caller can see is an [`AuthError`]. Variants carry a
//! grepable code through [`ErrorCode`] so CLI output and logs can be matched
//! without parsing the message text.

use crate::store::StoreError;

/// Grepable error code for structured error output.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No token is cached; raised before any network call.
    #[error("No authentication token available")]
    MissingToken,

    /// The server answered 401. Cached credentials have been cleared.
    #[error("Authentication expired")]
    SessionExpired,

    /// The profile update was rejected with 400.
    #[error("Invalid strategy data")]
    InvalidStrategy,

    /// The profile update target does not exist (404).
    #[error("User not found")]
    UserNotFound,

    /// Any other non-success status.
    #[error("Failed to {action}: {status}")]
    Status { action: &'static str, status: u16 },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// A success body could not be decoded as the expected JSON shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// A request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// The token or a caller header cannot be encoded as a header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// Writing to the credential store failed.
    #[error("credential store error: {0}")]
    Storage(#[from] StoreError),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A configuration value could not be used.
    #[error("config error: {0}")]
    Config(String),
}

impl AuthError {
    /// Status code the server answered with, when the failure came from one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::SessionExpired => Some(401),
            Self::InvalidStrategy => Some(400),
            Self::UserNotFound => Some(404),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl ErrorCode for AuthError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken => "E_MISSING_TOKEN",
            Self::SessionExpired => "E_SESSION_EXPIRED",
            Self::InvalidStrategy => "E_INVALID_STRATEGY",
            Self::UserNotFound => "E_USER_NOT_FOUND",
            Self::Status { .. } => "E_HTTP_STATUS",
            Self::Transport(_) => "E_TRANSPORT",
            Self::Decode(_) => "E_DECODE",
            Self::Encode(_) => "E_ENCODE",
            Self::InvalidHeader(_) => "E_INVALID_HEADER",
            Self::Storage(_) => "E_STORAGE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Config(_) => "E_CONFIG",
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
