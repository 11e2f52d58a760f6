use crate::collection::Collection;
use crate::document::Document;
use crate::errors::DbError;
use crate::types::DocumentId;
use std::sync::Arc;

use super::cursor::Cursor;
use super::eval::{Matcher, compare_records, project_fields};
use super::types::{Filter, FindOptions, MAX_LIMIT, MAX_PROJECTION_FIELDS, MAX_SORT_FIELDS};

/// Runs a filtered find against a collection.
///
/// # Errors
/// Returns `DbError::QueryError` when the filter references a field outside
/// the collection's declared schema.
pub fn find_docs(
    col: &Arc<Collection>,
    filter: &Filter,
    opts: &FindOptions,
) -> Result<Cursor, DbError> {
    validate_schema(col, filter)?;
    let matcher = Matcher::new(filter);

    let skip = opts.skip.unwrap_or(0);
    let limit = opts.limit.unwrap_or(usize::MAX).min(MAX_LIMIT);

    // Without sort or projection only the matching ids are needed.
    if opts.projection.is_none() && opts.sort.is_none() {
        let mut ids: Vec<DocumentId> = col.list_ids();
        ids.retain(|id| col.find_document(id).is_some_and(|d| matcher.matches(&d, filter)));
        let end = (skip + limit).min(ids.len());
        let ids = if skip >= ids.len() { Vec::new() } else { ids[skip..end].to_vec() };
        return Ok(Cursor { collection: col.clone(), ids, pos: 0, docs: None });
    }

    let mut docs: Vec<Document> = col
        .list_ids()
        .into_iter()
        .filter_map(|id| col.find_document(&id))
        .filter(|d| matcher.matches(d, filter))
        .collect();

    if let Some(sort) = &opts.sort {
        if sort.len() > MAX_SORT_FIELDS {
            log::warn!("sort spec too long: {}", sort.len());
        }
        docs.sort_by(|a, b| compare_records(a, b, sort));
    }

    if let Some(fields) = &opts.projection {
        let fields: Vec<String> = fields.iter().take(MAX_PROJECTION_FIELDS).cloned().collect();
        for d in &mut docs {
            d.data = project_fields(&d.data, &fields);
        }
    }

    let end = (skip + limit).min(docs.len());
    let docs = if skip >= docs.len() { Vec::new() } else { docs[skip..end].to_vec() };
    Ok(Cursor { collection: col.clone(), ids: Vec::new(), pos: 0, docs: Some(docs) })
}

/// Counts filter matches, independent of any pagination window.
///
/// # Errors
/// Same schema validation as [`find_docs`].
pub fn count_docs(col: &Arc<Collection>, filter: &Filter) -> Result<u64, DbError> {
    validate_schema(col, filter)?;
    let matcher = Matcher::new(filter);
    let mut n = 0u64;
    for id in col.list_ids() {
        if col.find_document(&id).is_some_and(|d| matcher.matches(&d, filter)) {
            n += 1;
        }
    }
    Ok(n)
}

fn validate_schema(col: &Arc<Collection>, filter: &Filter) -> Result<(), DbError> {
    let Some(schema) = col.schema() else {
        return Ok(());
    };
    let mut paths = Vec::new();
    filter.paths(&mut paths);
    for p in paths {
        if !schema.contains(p) {
            return Err(DbError::QueryError(format!(
                "field `{p}` is not filterable on collection `{}`",
                col.name_str()
            )));
        }
    }
    Ok(())
}
