//! Per-request options. Every entry is sent to the API as a query parameter.

use std::collections::BTreeMap;

use url::Url;

const PAGINATION: &str = "_pagination";

/// Ordered set of request parameters.
///
/// Keys are kept sorted, which is also the order the request signature
/// expects them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    params: BTreeMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary parameter, replacing any previous value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Asks for the total row count instead of the records.
    pub fn with_pagination_count(self) -> Self {
        self.with_param(PAGINATION, "count")
    }

    /// Asks the server to include a pagination descriptor.
    pub fn with_pagination(self) -> Self {
        self.with_param(PAGINATION, "1")
    }

    /// Page number (1-indexed).
    pub fn with_page(self, page: u64) -> Self {
        self.with_param("_page", page.to_string())
    }

    /// Results per page.
    pub fn with_limit(self, limit: u64) -> Self {
        self.with_param("_limit", limit.to_string())
    }

    /// Filter expression, e.g. `PropertyType Eq 'A'`.
    pub fn with_filter(self, filter: &str) -> Self {
        self.with_param("_filter", filter)
    }

    /// Comma separated list of fields to return.
    pub fn with_select(self, fields: &str) -> Self {
        self.with_param("_select", fields)
    }

    pub fn with_expand(self, expand: &str) -> Self {
        self.with_param("_expand", expand)
    }

    pub fn with_order_by(self, order_by: &str) -> Self {
        self.with_param("_orderby", order_by)
    }

    /// True when `_pagination=count` was requested.
    pub fn is_count(&self) -> bool {
        self.get(PAGINATION) == Some("count")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Appends every parameter to the URL, returning the modified URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.params.iter());
        }
        url
    }
}

impl<K, V> FromIterator<(K, V)> for RequestOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
