//! Session handling and transport seam used by [`crate::Client`].

use std::future::Future;

use reqwest::Method;
use serde_json::Value;

use crate::{options::RequestOptions, types::ApiResponse, Error};

mod api_auth;
pub use self::api_auth::ApiAuth;

mod session;
pub use self::session::Session;

/// Owns the session token and sends signed requests.
///
/// The client does no locking of its own: implementations shared between
/// tasks must make token refresh safe themselves.
pub trait Authenticator {
    /// True when a usable session is held.
    fn is_authenticated(&self) -> bool;

    /// Starts a new session, replacing any existing one.
    fn authenticate(&self) -> impl Future<Output = Result<(), Error>> + Send;

    /// Sends one request. `path` already carries the version prefix and
    /// `body` is the serialized envelope, if any.
    ///
    /// Failures are reported as the matching [`Error`] kind; an expired
    /// session must surface as `PermissionDenied` with code 1020.
    fn request(
        &self,
        method: &Method,
        path: &str,
        body: Option<&str>,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<RawResponse, Error>> + Send;
}

/// A successful HTTP response with its body parsed as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Decodes the `{"D": {...}}` envelope.
    pub fn api_response(&self) -> Result<ApiResponse, Error> {
        ApiResponse::from_value(&self.body)
    }
}
