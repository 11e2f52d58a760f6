use crate::collection::Collection;
use crate::errors::DbError;
use crate::types::CollectionName;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// The in-memory engine: a registry of named collections.
///
/// All query operations are plain reads; the engine holds no state beyond
/// the collections themselves.
#[derive(Default)]
pub struct Engine {
    collections: RwLock<HashMap<CollectionName, Arc<Collection>>>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection if it doesn't exist; returns a handle either way.
    pub fn create_collection(&self, name: impl Into<String>) -> Arc<Collection> {
        let name = name.into();
        let mut cols = self.collections.write();
        cols.entry(name.clone()).or_insert_with(|| Arc::new(Collection::new(name))).clone()
    }

    pub fn get_collection(&self, name: &str) -> Option<Arc<Collection>> {
        self.collections.read().get(name).cloned()
    }

    pub fn delete_collection(&self, name: &str) -> bool {
        self.collections.write().remove(name).is_some()
    }

    pub fn list_collection_names(&self) -> Vec<CollectionName> {
        let mut names: Vec<CollectionName> = self.collections.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn rename_collection(&self, old: &str, new: &str) -> Result<(), DbError> {
        let mut cols = self.collections.write();
        if cols.contains_key(new) {
            return Err(DbError::CollectionAlreadyExists(new.to_string()));
        }
        let col = cols.remove(old).ok_or_else(|| DbError::NoSuchCollection(old.to_string()))?;
        col.set_name(new.to_string());
        cols.insert(new.to_string(), col);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_is_idempotent() {
        let engine = Engine::new();
        let a = engine.create_collection("recipes");
        let b = engine.create_collection("recipes");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(engine.list_collection_names(), vec!["recipes".to_string()]);
    }

    #[test]
    fn rename_moves_handle_and_guards_collisions() {
        let engine = Engine::new();
        engine.create_collection("cookbooks");
        engine.create_collection("library");
        assert!(matches!(
            engine.rename_collection("cookbooks", "library"),
            Err(DbError::CollectionAlreadyExists(_))
        ));
        engine.rename_collection("cookbooks", "books").unwrap();
        assert!(engine.get_collection("cookbooks").is_none());
        assert_eq!(engine.get_collection("books").unwrap().name_str(), "books");
        assert!(matches!(
            engine.rename_collection("missing", "x"),
            Err(DbError::NoSuchCollection(_))
        ));
    }
}
