use crate::document::FIELD_CREATED_AT;
use crate::engine::Engine;
use crate::errors::DbError;
use serde::Serialize;

use super::exec::{count_docs, find_docs};
use super::parse::{RawQuery, parse_list_params};
use super::populate;
use super::types::{FindOptions, MAX_PROJECTION_FIELDS, Order, SortSpec};

/// Offset-based window reference in pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub page: u64,
    pub limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

/// One page of list results plus its metadata; serializes to the wire shape
/// `{"success":true,"total":N,"pagination":{...},"data":[...]}`.
#[derive(Debug, Serialize)]
pub struct ListResult {
    pub success: bool,
    pub total: u64,
    pub pagination: Pagination,
    pub data: Vec<bson::Document>,
}

/// Translates raw list parameters into one result page.
///
/// The match count and the page fetch are two independent reads; a write
/// landing between them can skew `total` against `data`.
///
/// # Errors
/// `QueryError` for malformed operators or fields outside the collection
/// schema; `NoSuchCollection` for an unknown collection or populate target.
pub fn run_list(
    engine: &Engine,
    collection: &str,
    raw: &RawQuery,
    populate: &[String],
) -> Result<ListResult, DbError> {
    let col = engine
        .get_collection(collection)
        .ok_or_else(|| DbError::NoSuchCollection(collection.to_string()))?;
    let params = parse_list_params(raw)?;

    let total = count_docs(&col, &params.filter)?;

    let skip = (params.page - 1).saturating_mul(params.limit as u64).min(usize::MAX as u64);
    let sort = params
        .sort
        .clone()
        .unwrap_or_else(|| vec![SortSpec { field: FIELD_CREATED_AT.into(), order: Order::Desc }]);
    let opts = FindOptions {
        projection: None,
        sort: Some(sort),
        limit: Some(params.limit),
        skip: Some(skip as usize),
    };
    let docs = find_docs(&col, &params.filter, &opts)?.to_vec();

    let mut data = Vec::with_capacity(docs.len());
    for d in &docs {
        let mut record = match &params.select {
            Some(fields) => {
                let fields = &fields[..fields.len().min(MAX_PROJECTION_FIELDS)];
                d.to_projected_record(fields)
            }
            None => d.to_record(),
        };
        populate::expand(engine, col.as_ref(), &mut record, populate)?;
        data.push(record);
    }

    let mut pagination = Pagination::default();
    if params.page.saturating_mul(params.limit as u64) < total {
        pagination.next = Some(PageRef { page: params.page + 1, limit: params.limit });
    }
    if params.page > 1 {
        pagination.prev = Some(PageRef { page: params.page - 1, limit: params.limit });
    }

    Ok(ListResult { success: true, total, pagination, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use bson::doc;
    use serde_json::json;

    fn raw(v: serde_json::Value) -> RawQuery {
        v.as_object().cloned().unwrap()
    }

    fn engine_with(n: usize) -> Engine {
        let engine = Engine::new();
        let col = engine.create_collection("recipes");
        for i in 0..n {
            col.insert_document(Document::new(doc! {"name": format!("recipe-{i}"), "n": i as i64}));
        }
        engine
    }

    #[test]
    fn middle_page_has_both_links() {
        let engine = engine_with(30);
        let out =
            run_list(&engine, "recipes", &raw(json!({"page": "2", "limit": "10"})), &[]).unwrap();
        assert_eq!(out.total, 30);
        assert_eq!(out.data.len(), 10);
        assert_eq!(out.pagination.next, Some(PageRef { page: 3, limit: 10 }));
        assert_eq!(out.pagination.prev, Some(PageRef { page: 1, limit: 10 }));
    }

    #[test]
    fn single_page_has_no_links() {
        let engine = engine_with(5);
        let out = run_list(&engine, "recipes", &raw(json!({})), &[]).unwrap();
        assert_eq!(out.total, 5);
        assert_eq!(out.data.len(), 5);
        assert_eq!(out.pagination, Pagination::default());
    }

    #[test]
    fn page_past_end_is_empty_with_prev() {
        let engine = engine_with(5);
        let out =
            run_list(&engine, "recipes", &raw(json!({"page": "4", "limit": "5"})), &[]).unwrap();
        assert!(out.data.is_empty());
        assert_eq!(out.total, 5);
        assert!(out.pagination.next.is_none());
        assert_eq!(out.pagination.prev, Some(PageRef { page: 3, limit: 5 }));
    }

    #[test]
    fn unknown_collection_errors() {
        let engine = Engine::new();
        let e = run_list(&engine, "nope", &raw(json!({})), &[]).unwrap_err();
        assert!(matches!(e, DbError::NoSuchCollection(_)));
    }

    #[test]
    fn wire_shape_omits_absent_links() {
        let engine = engine_with(1);
        let out = run_list(&engine, "recipes", &raw(json!({})), &[]).unwrap();
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["success"], json!(true));
        assert_eq!(v["total"], json!(1));
        assert_eq!(v["pagination"], json!({}));
        assert_eq!(v["data"].as_array().unwrap().len(), 1);
    }
}
