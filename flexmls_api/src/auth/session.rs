use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Session returned by the `/session` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Session {
    pub auth_token: String,
    #[serde(default)]
    pub expires: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Session {
    /// A session without an expiry never expires on the client side; the
    /// server still reports code 1020 when it does.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires {
            Some(expires) => expires.with_timezone(&Utc) <= now,
            None => false,
        }
    }
}
