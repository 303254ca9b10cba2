//! Turns decoded results plus an optional pagination descriptor into [`Results`].

use serde::Deserialize;
use serde_json::Value;

use crate::{
    options::RequestOptions,
    types::{ApiResponse, Paging, ResponseCollection, Results},
    Error,
};

/// Decorates `results` with the paging metadata in `pagination`.
pub fn paginate_response(
    results: Value,
    pagination: &Value,
    details: Vec<Value>,
) -> Result<ResponseCollection, Error> {
    let paging = Paging::deserialize(pagination).map_err(|e| {
        tracing::error!("Unable to understand the pagination block! {}", pagination);
        e
    })?;
    let mut collection = ResponseCollection::new(results).with_details(details);
    collection.paging = Some(paging);
    Ok(collection)
}

/// Chooses between a plain collection, a paginated collection, and a bare
/// count. Presence of the descriptor, not its content, selects the branch.
pub fn normalize(response: ApiResponse, options: &RequestOptions) -> Result<Results, Error> {
    let ApiResponse {
        results,
        pagination,
        details,
        ..
    } = response;
    match pagination {
        None => Ok(Results::Collection(
            ResponseCollection::new(results).with_details(details),
        )),
        Some(paging) if options.is_count() => total_rows(&paging).map(Results::Count),
        Some(paging) => paginate_response(results, &paging, details).map(Results::Collection),
    }
}

fn total_rows(pagination: &Value) -> Result<u64, Error> {
    pagination
        .get("TotalRows")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            tracing::error!("Pagination block has no TotalRows: {}", pagination);
            Error::InvalidResponse("The pagination block has no TotalRows".to_string())
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::CapturedLogs;

    fn response(body: Value) -> ApiResponse {
        ApiResponse::from_value(&body).unwrap()
    }

    #[test]
    fn no_pagination_yields_plain_collection() {
        let resp = response(json!({"D": {
            "Success": true,
            "Results": [{"Id": 1}, {"Id": 2}],
            "Details": [{"Warning": "partial"}]
        }}));
        let results = normalize(resp, &RequestOptions::new()).unwrap();
        let c = results.into_collection().unwrap();
        assert_eq!(c.records, vec![json!({"Id": 1}), json!({"Id": 2})]);
        assert_eq!(c.details, vec![json!({"Warning": "partial"})]);
        assert!(c.paging.is_none());
    }

    #[test]
    fn no_pagination_ignores_count_mode() {
        let resp = response(json!({"D": {"Success": true, "Results": [{"Id": 1}]}}));
        let results = normalize(resp, &RequestOptions::new().with_pagination_count()).unwrap();
        assert_eq!(results.collection().unwrap().len(), 1);
    }

    #[test]
    fn count_mode_returns_total_rows() {
        let resp = response(json!({"D": {
            "Success": true,
            "Results": [{"Id": 1}],
            "Pagination": {"TotalRows": 57, "PageSize": 1, "TotalPages": 57, "CurrentPage": 1}
        }}));
        let results = normalize(resp, &RequestOptions::new().with_pagination_count()).unwrap();
        assert_eq!(results, Results::Count(57));
    }

    #[test]
    fn count_mode_honored_with_empty_results() {
        let resp = response(json!({"D": {
            "Success": true,
            "Results": [],
            "Pagination": {"TotalRows": 0}
        }}));
        let results = normalize(resp, &RequestOptions::new().with_pagination_count()).unwrap();
        assert_eq!(results.count(), Some(0));
    }

    #[test]
    fn count_mode_without_total_rows_is_invalid() {
        let resp = response(json!({"D": {"Success": true, "Pagination": {"PageSize": 10}}}));
        let err = normalize(resp, &RequestOptions::new().with_pagination_count()).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[test]
    fn pagination_yields_decorated_collection() {
        let resp = response(json!({"D": {
            "Success": true,
            "Results": [{"Id": 3}, {"Id": 1}],
            "Pagination": {"TotalRows": 4, "PageSize": 2, "TotalPages": 2, "CurrentPage": 1},
            "Details": [{"Note": "x"}]
        }}));
        let c = normalize(resp, &RequestOptions::new().with_pagination())
            .unwrap()
            .into_collection()
            .unwrap();
        assert_eq!(c.records, vec![json!({"Id": 3}), json!({"Id": 1})]);
        assert_eq!(c.details, vec![json!({"Note": "x"})]);
        let paging = c.paging.unwrap();
        assert_eq!(paging.total_rows, Some(4));
        assert_eq!(paging.next_page(), Some(2));
    }

    #[test]
    fn empty_results_with_descriptor_take_paginated_path() {
        let resp = response(json!({"D": {
            "Success": true,
            "Results": [],
            "Pagination": {"TotalRows": 0, "PageSize": 25, "TotalPages": 0, "CurrentPage": 1}
        }}));
        let c = normalize(resp, &RequestOptions::new())
            .unwrap()
            .into_collection()
            .unwrap();
        assert!(c.is_empty());
        assert!(c.paging.is_some());
    }

    #[test]
    fn descriptor_without_total_rows_keeps_results() {
        let resp = response(json!({"D": {
            "Success": true,
            "Results": [{"Id": 1}],
            "Pagination": {"PageSize": 25, "CurrentPage": 1}
        }}));
        let c = normalize(resp, &RequestOptions::new())
            .unwrap()
            .into_collection()
            .unwrap();
        assert_eq!(c.records, vec![json!({"Id": 1})]);
        let paging = c.paging.unwrap();
        assert_eq!(paging.total_rows, None);
        assert_eq!(paging.page_size, Some(25));
        assert_eq!(paging.current_page, Some(1));
    }

    #[test]
    fn malformed_descriptor_is_logged_and_returned() {
        let logs = CapturedLogs::default();
        let err = tracing::subscriber::with_default(logs.subscriber(), || {
            paginate_response(json!([{"Id": 1}]), &json!({"TotalRows": "many"}), vec![])
                .unwrap_err()
        });
        assert!(matches!(err, Error::Decode(_)));
        let line = logs.line_containing("Unable to understand the pagination block!");
        assert!(line.contains("ERROR"), "{}", line);
        assert!(line.contains(r#""TotalRows":"many""#), "{}", line);
    }
}
