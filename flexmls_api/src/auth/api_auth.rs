//! Key/secret authentication against the `/session` resource, with MD5
//! request signing.

use std::sync::Mutex;

use md5::{Digest, Md5};
use reqwest::{header, Method};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{Authenticator, RawResponse, Session};
use crate::{
    config::Config,
    errors::{ClientError, ClientErrorOptions},
    options::RequestOptions,
    response_codes::SESSION_TOKEN_EXPIRED,
    types::ApiResponse,
    Error,
};

/// Default [`Authenticator`]: holds one session and signs every request with
/// the API secret.
pub struct ApiAuth {
    http: reqwest::Client,
    endpoint: String,
    version: String,
    api_key: String,
    api_secret: String,
    session: Mutex<Option<Session>>,
}

impl ApiAuth {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            version: config.version.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            session: Mutex::new(None),
        })
    }

    /// The session currently held, if any.
    pub fn session(&self) -> Option<Session> {
        self.session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap_or_else(|e| e.into_inner()) = session;
    }

    fn sign(&self, data: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(self.api_secret.as_bytes());
        hasher.update(data.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn session_signature(&self) -> String {
        self.sign(&format!("ApiKey{}", self.api_key))
    }

    /// Signature over the path, the sorted parameters (AuthToken included)
    /// and the body.
    fn request_signature(&self, path: &str, params: &RequestOptions, body: Option<&str>) -> String {
        let mut data = format!("ApiKey{}ServicePath{}", self.api_key, path);
        for (key, value) in params.params() {
            data.push_str(key);
            data.push_str(value);
        }
        data.push_str(body.unwrap_or_default());
        self.sign(&data)
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", self.endpoint, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    async fn send(&self, method: Method, url: Url, body: Option<&str>) -> Result<(u16, String), Error> {
        let mut req = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            req = req
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }
        let resp = req.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed
        })?;
        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;
        Ok((status, text))
    }
}

impl Authenticator for ApiAuth {
    fn is_authenticated(&self) -> bool {
        self.session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|session| !session.is_expired())
    }

    async fn authenticate(&self) -> Result<(), Error> {
        let mut url = self.url(&format!("/{}/session", self.version))?;
        url.query_pairs_mut()
            .append_pair("ApiKey", &self.api_key)
            .append_pair("ApiSig", &self.session_signature());

        let (status, text) = self.send(Method::POST, url, None).await?;
        let raw = handle_response(status, &text)?;
        let resp = raw.api_response()?;
        let record = match &resp.results {
            Value::Array(items) => items.first(),
            _ => None,
        };
        let session = match record {
            Some(record) => Session::deserialize(record)?,
            None => {
                tracing::error!("Session response carried no session: {}", raw.body);
                return Err(Error::InvalidResponse(
                    "The session response carried no session".to_string(),
                ));
            }
        };
        tracing::debug!("Authenticated, session expires {:?}", session.expires);
        self.set_session(Some(session));
        Ok(())
    }

    async fn request(
        &self,
        method: &Method,
        path: &str,
        body: Option<&str>,
        options: &RequestOptions,
    ) -> Result<RawResponse, Error> {
        let token = match self.session() {
            Some(session) => session.auth_token,
            None => {
                return Err(Error::PermissionDenied(ClientError {
                    code: Some(SESSION_TOKEN_EXPIRED),
                    ..ClientError::new("No active session")
                }))
            }
        };
        let params = options.clone().with_param("AuthToken", token);
        let signature = self.request_signature(path, &params, body);

        let mut url = self.url(path)?;
        url.query_pairs_mut().append_pair("ApiSig", &signature);
        let url = params.add_to_url(&url);

        let (status, text) = self.send(method.clone(), url, body).await?;
        let result = handle_response(status, &text);
        if let Err(err) = &result {
            if err.is_session_expired() {
                self.set_session(None);
            }
        }
        result
    }
}

/// Parses the body and turns failure statuses into the matching error kind.
fn handle_response(status: u16, text: &str) -> Result<RawResponse, Error> {
    let parsed = serde_json::from_str::<Value>(text);
    if (200..300).contains(&status) {
        return match parsed {
            Ok(body) => Ok(RawResponse::new(status, body)),
            Err(e) => {
                tracing::error!("Failed to parse response: {} | body: {}", e, truncate_body(text));
                Err(Error::Decode(e))
            }
        };
    }

    let envelope = parsed.ok().and_then(|body| ApiResponse::from_value(&body).ok());
    let options = match envelope {
        Some(resp) => ClientErrorOptions {
            message: resp.message,
            code: resp.code,
            status: Some(status),
        },
        None => ClientErrorOptions {
            message: Some(truncate_body(text)),
            code: None,
            status: Some(status),
        },
    };
    tracing::warn!(
        "Request failed with status {}: {}",
        status,
        options.message.as_deref().unwrap_or_default()
    );
    Err(Error::from_status(status, options.into()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
