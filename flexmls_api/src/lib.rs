//! Authenticated client for the flexmls real-estate listing API.
//!
//! Requests and responses travel in a `{"D": ...}` envelope. The [`Client`]
//! authenticates on demand, re-authenticates once when the session token
//! expires, and hands back either a [`types::ResponseCollection`] or a row
//! count.

pub mod auth;
mod client;
mod config;
mod errors;
mod options;
mod paginate;
pub mod response_codes;
pub mod types;
mod user_agent;
#[cfg(test)]
mod test_support;
pub use self::auth::{ApiAuth, Authenticator, RawResponse, Session};
pub use self::client::Client;
pub use self::config::{Config, DEFAULT_ENDPOINT, DEFAULT_VERSION};
pub use self::errors::{ClientError, ClientErrorOptions, Error};
pub use self::options::RequestOptions;
pub use self::paginate::{normalize, paginate_response};
pub use reqwest::Method;
