use serde::Deserialize;
use serde_json::Value;

use crate::Error;

/// Decoded `{"D": {...}}` response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub message: Option<String>,
    pub code: Option<i64>,
    pub results: Value,
    pub success: bool,
    pub pagination: Option<Value>,
    pub details: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Envelope {
    message: Option<String>,
    code: Option<i64>,
    #[serde(default)]
    results: Value,
    #[serde(default)]
    success: Option<bool>,
    pagination: Option<Value>,
    details: Option<Vec<Value>>,
}

impl ApiResponse {
    /// Decodes a parsed response body.
    ///
    /// Fails with [`Error::InvalidResponse`] when `D` is absent or empty. Any
    /// failure is logged together with the offending payload.
    pub fn from_value(d: &Value) -> Result<Self, Error> {
        Self::decode(d).map_err(|e| {
            tracing::error!("Unable to understand the response! {}", d);
            e
        })
    }

    fn decode(d: &Value) -> Result<Self, Error> {
        let hash = match d.get("D") {
            None => return Err(Error::invalid_response()),
            Some(hash) if is_empty(hash) => return Err(Error::invalid_response()),
            Some(hash) if !hash.is_object() => return Err(Error::invalid_response()),
            Some(hash) => hash,
        };
        let envelope = Envelope::deserialize(hash)?;
        Ok(Self {
            message: envelope.message,
            code: envelope.code,
            results: envelope.results,
            success: envelope.success.unwrap_or(false),
            pagination: envelope.pagination,
            details: envelope.details.unwrap_or_default(),
        })
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::CapturedLogs;

    #[test]
    fn missing_or_empty_envelope_is_invalid() {
        for body in [
            json!({}),
            json!({"D": null}),
            json!({"D": {}}),
            json!({"D": []}),
            json!({"D": ""}),
            json!({"Results": []}),
        ] {
            let logs = CapturedLogs::default();
            let err = tracing::subscriber::with_default(logs.subscriber(), || {
                ApiResponse::from_value(&body).unwrap_err()
            });
            assert!(matches!(err, Error::InvalidResponse(_)), "{}", body);
            assert_eq!(err.to_string(), "The server response could not be understood");

            let line = logs.line_containing("Unable to understand the response!");
            assert!(line.contains("ERROR"), "{}", line);
            assert!(line.contains(&body.to_string()), "{}", line);
        }
    }

    #[test]
    fn well_formed_envelope_logs_nothing() {
        let logs = CapturedLogs::default();
        tracing::subscriber::with_default(logs.subscriber(), || {
            ApiResponse::from_value(&json!({"D": {"Success": true}})).unwrap()
        });
        assert!(logs.contents().is_empty(), "{}", logs.contents());
    }

    #[test]
    fn non_object_envelope_is_invalid() {
        let err = ApiResponse::from_value(&json!({"D": [1, 2]})).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[test]
    fn decodes_every_field() {
        let body = json!({"D": {
            "Message": "Ok",
            "Code": 0,
            "Success": true,
            "Results": [{"Id": 1}, {"Id": 2}],
            "Pagination": {"TotalRows": 2, "PageSize": 10, "TotalPages": 1, "CurrentPage": 1},
            "Details": [{"Warning": "slow"}]
        }});
        let resp = ApiResponse::from_value(&body).unwrap();
        assert_eq!(resp.message.as_deref(), Some("Ok"));
        assert_eq!(resp.code, Some(0));
        assert!(resp.is_success());
        assert_eq!(resp.results, json!([{"Id": 1}, {"Id": 2}]));
        assert_eq!(resp.pagination.unwrap()["TotalRows"], 2);
        assert_eq!(resp.details, vec![json!({"Warning": "slow"})]);
    }

    #[test]
    fn details_default_to_empty() {
        let resp = ApiResponse::from_value(&json!({"D": {"Success": true}})).unwrap();
        assert!(resp.details.is_empty());
        assert!(resp.pagination.is_none());
        assert_eq!(resp.results, Value::Null);

        let resp =
            ApiResponse::from_value(&json!({"D": {"Success": false, "Details": null}})).unwrap();
        assert!(resp.details.is_empty());
        assert!(!resp.is_success());
    }

    #[test]
    fn structural_failures_propagate_unchanged() {
        let err = ApiResponse::from_value(&json!({"D": {"Code": "not a number"}})).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
