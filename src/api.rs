//! Thin facade over the engine: query helpers and the list-handler factory
//! consumed by a routing layer.

use crate::engine::Engine;
use crate::errors::DbError;
use crate::query::{self, Filter, FindOptions, ListResult, RawQuery};
use std::sync::Arc;

pub fn find(
    engine: &Engine,
    collection: &str,
    filter: &Filter,
    opts: &FindOptions,
) -> Result<Vec<bson::Document>, DbError> {
    let col = engine
        .get_collection(collection)
        .ok_or_else(|| DbError::NoSuchCollection(collection.to_string()))?;
    let cur = query::find_docs(&col, filter, opts)?;
    Ok(cur.to_vec().into_iter().map(|d| d.to_record()).collect())
}

pub fn count(engine: &Engine, collection: &str, filter: &Filter) -> Result<u64, DbError> {
    let col = engine
        .get_collection(collection)
        .ok_or_else(|| DbError::NoSuchCollection(collection.to_string()))?;
    query::count_docs(&col, filter)
}

pub fn list(
    engine: &Engine,
    collection: &str,
    raw: &RawQuery,
    populate: &[String],
) -> Result<ListResult, DbError> {
    query::run_list(engine, collection, raw, populate)
}

/// Pre-bound list handler: built once per route from a collection name and
/// an optional populate spec, then invoked per request with the decoded
/// query parameters. Returns the page as a value for the caller to
/// serialize; there is no shared response slot.
pub struct Lister {
    engine: Arc<Engine>,
    collection: String,
    populate: Vec<String>,
}

impl Lister {
    pub fn new(engine: Arc<Engine>, collection: impl Into<String>) -> Self {
        Self { engine, collection: collection.into(), populate: Vec::new() }
    }

    /// Declares reference fields to expand in every page this handler serves.
    #[must_use]
    pub fn with_populate<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.populate = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn handle(&self, raw: &RawQuery) -> Result<ListResult, DbError> {
        query::run_list(&self.engine, &self.collection, raw, &self.populate)
    }
}
