use std::ops::Index;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::Paging;

/// Result records of one call, with the envelope's `Details` attached.
///
/// `paging` is set only when the server sent a pagination descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseCollection {
    pub records: Vec<Value>,
    pub details: Vec<Value>,
    pub paging: Option<Paging>,
}

impl ResponseCollection {
    /// Wraps a `Results` value. `null` is empty and a lone record becomes a
    /// one-element collection.
    pub fn new(results: Value) -> Self {
        let records = match results {
            Value::Null => Vec::new(),
            Value::Array(items) => items,
            other => vec![other],
        };
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn with_details(mut self, details: Vec<Value>) -> Self {
        self.details = details;
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.records.iter()
    }

    pub fn first(&self) -> Option<&Value> {
        self.records.first()
    }

    /// Deserializes every record into `T`.
    pub fn records_as<T: DeserializeOwned>(&self) -> Result<Vec<T>, serde_json::Error> {
        self.records
            .iter()
            .map(|record| T::deserialize(record))
            .collect()
    }
}

impl Index<usize> for ResponseCollection {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.records[index]
    }
}

impl IntoIterator for ResponseCollection {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResponseCollection {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// What a request hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Results {
    /// Materialized records, paginated or not.
    Collection(ResponseCollection),
    /// Total row count, returned for `_pagination=count` requests.
    Count(u64),
}

impl Results {
    pub fn collection(&self) -> Option<&ResponseCollection> {
        match self {
            Results::Collection(c) => Some(c),
            Results::Count(_) => None,
        }
    }

    pub fn into_collection(self) -> Option<ResponseCollection> {
        match self {
            Results::Collection(c) => Some(c),
            Results::Count(_) => None,
        }
    }

    pub fn count(&self) -> Option<u64> {
        match self {
            Results::Count(n) => Some(*n),
            Results::Collection(_) => None,
        }
    }
}
