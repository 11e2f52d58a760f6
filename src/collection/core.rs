use crate::document::Document;
use crate::types::{CollectionName, DocumentId};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A named set of documents with an optional filterable-field schema and a
/// registry of reference fields used for relation expansion.
pub struct Collection {
    pub name: Arc<RwLock<String>>,
    pub(crate) store: RwLock<HashMap<DocumentId, Document>>,
    pub(crate) schema: RwLock<Option<HashSet<String>>>,
    pub(crate) relations: RwLock<HashMap<String, CollectionName>>,
}

impl Collection {
    pub fn new(name: String) -> Self {
        Self {
            name: Arc::new(RwLock::new(name)),
            store: RwLock::new(HashMap::new()),
            schema: RwLock::new(None),
            relations: RwLock::new(HashMap::new()),
        }
    }

    pub fn set_name(&self, new_name: String) {
        *self.name.write() = new_name;
    }

    /// Returns the collection's name as a String (cloned), hiding the `RwLock`.
    pub fn name_str(&self) -> String {
        self.name.read().clone()
    }

    /// Declares the set of top-level fields that filters may reference.
    /// Without a schema every field is filterable.
    pub fn set_schema<I, S>(&self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.schema.write() = Some(fields.into_iter().map(Into::into).collect());
    }

    pub fn schema(&self) -> Option<HashSet<String>> {
        self.schema.read().clone()
    }

    /// Declares `field` as a reference into `target` for relation expansion.
    pub fn relate(&self, field: impl Into<String>, target: impl Into<CollectionName>) {
        self.relations.write().insert(field.into(), target.into());
    }

    pub fn relation_target(&self, field: &str) -> Option<CollectionName> {
        self.relations.read().get(field).cloned()
    }
}
