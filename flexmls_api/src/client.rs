//! Request dispatcher for the flexmls API.

use std::time::Instant;

use reqwest::Method;
use serde::Serialize;

use crate::{
    auth::{ApiAuth, Authenticator},
    config::Config,
    options::RequestOptions,
    paginate::normalize,
    types::Results,
    Error,
};

/// Re-authentications allowed per call after an expired session token.
const MAX_SESSION_RETRIES: u32 = 1;

/// Request body wrapper: every body goes over the wire as `{"D": body}`.
#[derive(Serialize)]
struct RequestEnvelope<B> {
    #[serde(rename = "D")]
    d: B,
}

/// Authenticated client for the flexmls API.
///
/// Paths are given without the version segment (e.g. `/listings`). Every
/// call authenticates first if needed, and an expired session token is
/// answered with one re-authentication and one retry.
pub struct Client<A = ApiAuth> {
    authenticator: A,
    version: String,
}

impl Client<ApiAuth> {
    /// Creates a client using key/secret authentication.
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self::with_authenticator(
            ApiAuth::new(config)?,
            config.version.as_str(),
        ))
    }

    /// Creates a client from `FLEXMLS_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(&Config::from_env()?)
    }
}

impl<A: Authenticator> Client<A> {
    pub fn with_authenticator(authenticator: A, version: &str) -> Self {
        Self {
            authenticator,
            version: version.to_string(),
        }
    }

    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Performs an HTTP GET request.
    pub async fn get(&self, path: &str, options: &RequestOptions) -> Result<Results, Error> {
        self.request::<()>(Method::GET, path, None, options).await
    }

    /// Performs an HTTP POST request; `body` is sent inside the `D` envelope.
    pub async fn post<B>(&self, path: &str, body: &B, options: &RequestOptions) -> Result<Results, Error>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), options).await
    }

    /// Performs an HTTP PUT request; `body` is sent inside the `D` envelope.
    pub async fn put<B>(&self, path: &str, body: &B, options: &RequestOptions) -> Result<Results, Error>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body), options).await
    }

    /// Performs an HTTP DELETE request.
    pub async fn delete(&self, path: &str, options: &RequestOptions) -> Result<Results, Error> {
        self.request::<()>(Method::DELETE, path, None, options).await
    }

    async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<Results, Error>
    where
        B: Serialize + ?Sized,
    {
        if !self.authenticator.is_authenticated() {
            self.authenticator.authenticate().await?;
        }
        let request_path = format!("/{}{}", self.version, path);
        let post_data = match body {
            Some(d) => Some(serde_json::to_string(&RequestEnvelope { d })?),
            None => None,
        };

        let mut attempts = 0u32;
        let response = loop {
            let start = Instant::now();
            tracing::debug!("{} Request:  {}", method, request_path);
            if let Some(data) = &post_data {
                tracing::debug!("{} Data:   {}", method, data);
            }
            match self
                .authenticator
                .request(&method, &request_path, post_data.as_deref(), options)
                .await
            {
                Ok(response) => {
                    tracing::info!(
                        "[{}ms] Api: {} {}",
                        start.elapsed().as_millis(),
                        method,
                        request_path
                    );
                    break response;
                }
                Err(err @ Error::PermissionDenied(_)) => {
                    if err.is_session_expired() {
                        attempts += 1;
                        if attempts <= MAX_SESSION_RETRIES {
                            tracing::debug!("Retrying authentication");
                            match self.authenticator.authenticate().await {
                                Ok(()) => continue,
                                Err(auth_err) => {
                                    tracing::debug!("Re-authentication failed: {}", auth_err)
                                }
                            }
                        }
                    }
                    tracing::error!(
                        "Authentication failed or server is sending us expired tokens, nothing we can do here."
                    );
                    return Err(err);
                }
                Err(err) => return Err(err),
            }
        };

        let api_response = response.api_response()?;
        normalize(api_response, options)
    }
}
