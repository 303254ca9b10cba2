//! Error types for the API client.

use std::fmt;

use crate::response_codes::SESSION_TOKEN_EXPIRED;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The response envelope was missing or empty.
    #[error("{0}")]
    InvalidResponse(String),
    /// The response body was not the JSON shape we expected.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The client configuration is incomplete.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// The API rejected the request for a reason with no more specific kind.
    #[error("{0}")]
    Client(ClientError),
    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(ClientError),
    /// The credentials or session were rejected.
    #[error("Permission denied: {0}")]
    PermissionDenied(ClientError),
    /// The HTTP method is not allowed on the resource.
    #[error("Not allowed: {0}")]
    NotAllowed(ClientError),
    /// The request itself was malformed or conflicted with server data.
    #[error("Bad resource request: {0}")]
    BadResourceRequest(ClientError),
}

impl Error {
    pub(crate) fn invalid_response() -> Self {
        Error::InvalidResponse("The server response could not be understood".to_string())
    }

    /// Picks the error kind for a failed HTTP status.
    pub fn from_status(status: u16, err: ClientError) -> Self {
        match status {
            400 | 409 | 500 => Error::BadResourceRequest(err),
            401 | 403 => Error::PermissionDenied(err),
            404 => Error::NotFound(err),
            405 => Error::NotAllowed(err),
            _ => Error::Client(err),
        }
    }

    /// The API error payload, for every kind in the client family.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Error::Client(e)
            | Error::NotFound(e)
            | Error::PermissionDenied(e)
            | Error::NotAllowed(e)
            | Error::BadResourceRequest(e) => Some(e),
            _ => None,
        }
    }

    /// API-level code (e.g. 1020), distinct from the HTTP status.
    pub fn code(&self) -> Option<i64> {
        self.client_error().and_then(|e| e.code)
    }

    /// HTTP status the error was built from.
    pub fn status(&self) -> Option<u16> {
        self.client_error().and_then(|e| e.status)
    }

    /// True only for a permission failure caused by an expired session token.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::PermissionDenied(e) if e.code == Some(SESSION_TOKEN_EXPIRED))
    }
}

/// Payload shared by every error in the client family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientError {
    pub message: Option<String>,
    pub code: Option<i64>,
    pub status: Option<u16>,
}

/// Structured form accepted by [`ClientError::from_options`].
#[derive(Debug, Clone, Default)]
pub struct ClientErrorOptions {
    pub message: Option<String>,
    pub code: Option<i64>,
    pub status: Option<u16>,
}

impl ClientError {
    /// Builds an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn from_options(options: ClientErrorOptions) -> Self {
        Self {
            message: options.message,
            code: options.code,
            status: options.status,
        }
    }
}

impl From<&str> for ClientError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ClientError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<ClientErrorOptions> for ClientError {
    fn from(options: ClientErrorOptions) -> Self {
        Self::from_options(options)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_deref().unwrap_or("API request failed"))?;
        match (self.code, self.status) {
            (Some(code), Some(status)) => write!(f, " (code {}, status {})", code, status),
            (Some(code), None) => write!(f, " (code {})", code),
            (None, Some(status)) => write!(f, " (status {})", status),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for ClientError {}
