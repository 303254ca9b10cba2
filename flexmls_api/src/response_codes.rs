//! Numeric codes the API reports in the `Code` field of a response envelope.
//!
//! These are API-level codes and are distinct from the HTTP status.

pub const NOT_FOUND: i64 = 404;
pub const METHOD_NOT_ALLOWED: i64 = 405;
pub const INVALID_KEY: i64 = 1000;
pub const DISABLED_KEY: i64 = 1010;
pub const API_USER_REQUIRED: i64 = 1015;
/// The only code that makes the client re-authenticate and retry.
pub const SESSION_TOKEN_EXPIRED: i64 = 1020;
pub const SSL_REQUIRED: i64 = 1030;
pub const INVALID_JSON: i64 = 1035;
pub const INVALID_FIELD: i64 = 1040;
pub const MISSING_PARAMETER: i64 = 1050;
pub const INVALID_PARAMETER: i64 = 1053;
pub const CONFLICTING_DATA: i64 = 1055;
pub const NOT_AVAILABLE: i64 = 1500;
pub const RATE_LIMIT_EXCEEDED: i64 = 1550;
