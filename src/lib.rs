pub mod api;
pub mod collection;
pub mod document;
pub mod engine;
pub mod errors;
pub mod logger;
pub mod models;
pub mod query;
pub mod types;

use crate::collection::Collection;
use crate::document::Document;
use crate::engine::Engine;
use crate::errors::DbError;
use crate::types::DocumentId;
use std::sync::Arc;

/// The main database struct: an in-memory store of named collections with
/// the list-query engine layered on top.
pub struct Database {
    engine: Arc<Engine>,
}

impl Database {
    /// Creates a new in-memory database instance.
    #[must_use]
    pub fn new() -> Self {
        Self { engine: Arc::new(Engine::new()) }
    }

    /// Shared handle to the underlying engine, for pre-bound handlers.
    #[must_use]
    pub fn engine(&self) -> Arc<Engine> {
        self.engine.clone()
    }

    /// Creates a new collection with the given name.
    pub fn create_collection(&self, name: &str) -> Arc<Collection> {
        self.engine.create_collection(name)
    }

    /// Retrieves a collection by its name.
    pub fn get_collection(&self, name: &str) -> Option<Arc<Collection>> {
        self.engine.get_collection(name)
    }

    /// Deletes a collection by its name.
    pub fn delete_collection(&self, name: &str) -> bool {
        self.engine.delete_collection(name)
    }

    /// Lists the names of all collections.
    pub fn list_collection_names(&self) -> Vec<String> {
        self.engine.list_collection_names()
    }

    /// Rename a collection.
    pub fn rename_collection(&self, old: &str, new: &str) -> Result<(), DbError> {
        self.engine.rename_collection(old, new)
    }

    /// Inserts a document into the specified collection.
    pub fn insert_document(
        &self,
        collection_name: &str,
        document: Document,
    ) -> Result<DocumentId, DbError> {
        let collection = self
            .engine
            .get_collection(collection_name)
            .ok_or_else(|| DbError::NoSuchCollection(collection_name.to_string()))?;
        Ok(collection.insert_document(document))
    }

    /// Fetches a document from the specified collection by its ID.
    ///
    /// # Errors
    /// `NoSuchCollection` or `NoSuchDocument` when either lookup misses.
    pub fn get_document(
        &self,
        collection_name: &str,
        document_id: &DocumentId,
    ) -> Result<Document, DbError> {
        let collection = self
            .engine
            .get_collection(collection_name)
            .ok_or_else(|| DbError::NoSuchCollection(collection_name.to_string()))?;
        collection
            .find_document(document_id)
            .ok_or_else(|| DbError::NoSuchDocument(document_id.to_string()))
    }

    /// Replaces a document's body in the specified collection.
    pub fn update_document(
        &self,
        collection_name: &str,
        document_id: &DocumentId,
        new_data: bson::Document,
    ) -> Result<bool, DbError> {
        let collection = self
            .engine
            .get_collection(collection_name)
            .ok_or_else(|| DbError::NoSuchCollection(collection_name.to_string()))?;
        Ok(collection.update_document(document_id, new_data))
    }

    /// Deletes a document from the specified collection by its ID.
    pub fn delete_document(
        &self,
        collection_name: &str,
        document_id: &DocumentId,
    ) -> Result<bool, DbError> {
        let collection = self
            .engine
            .get_collection(collection_name)
            .ok_or_else(|| DbError::NoSuchCollection(collection_name.to_string()))?;
        Ok(collection.delete_document(document_id))
    }

    // --- Query API (facade over the query module) ---

    pub fn find(
        &self,
        collection_name: &str,
        filter: &query::Filter,
        opts: &query::FindOptions,
    ) -> Result<Vec<bson::Document>, DbError> {
        api::find(&self.engine, collection_name, filter, opts)
    }

    pub fn count(&self, collection_name: &str, filter: &query::Filter) -> Result<u64, DbError> {
        api::count(&self.engine, collection_name, filter)
    }

    /// Runs a list request: filter, sort, select, paginate, populate.
    pub fn list(
        &self,
        collection_name: &str,
        raw: &query::RawQuery,
        populate: &[String],
    ) -> Result<query::ListResult, DbError> {
        api::list(&self.engine, collection_name, raw, populate)
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

/// Initializes the database system.
///
/// Sets up the logger from `log4rs.yaml`; call once before other operations.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
