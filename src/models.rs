//! The recipe-service document shapes and their collection wiring.
//!
//! These mirror the REST backend's schemas: recipes and cookbooks owned by
//! a user, a library of recipe-to-cookbook pairings, and a flat ingredient
//! catalog. Reference fields hold the string form of a [`DocumentId`]
//! (crate::types::DocumentId) and are declared as relations so list queries
//! can expand them.

use crate::document::{FIELD_CREATED_AT, FIELD_ID, FIELD_UPDATED_AT};
use crate::engine::Engine;
use crate::errors::DbError;
use serde::{Deserialize, Serialize};

pub const RECIPES: &str = "recipes";
pub const COOKBOOKS: &str = "cookbooks";
pub const LIBRARY: &str = "library";
pub const INGREDIENTS: &str = "ingredients";

/// Fields the store injects into every record; always filterable.
const STORE_FIELDS: [&str; 3] = [FIELD_ID, FIELD_CREATED_AT, FIELD_UPDATED_AT];

fn default_image() -> String {
    "no-photo.jpg".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Free-form details (difficulty, cuisine, prep time, ...).
    #[serde(default)]
    pub details: bson::Document,
    /// Owner reference.
    pub user: String,
}

impl Recipe {
    pub const FIELDS: [&'static str; 7] =
        ["name", "image", "description", "ingredients", "instructions", "details", "user"];

    pub fn into_document(self) -> Result<bson::Document, DbError> {
        Ok(bson::to_document(&self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookBook {
    pub name: String,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user: String,
}

impl CookBook {
    pub const FIELDS: [&'static str; 4] = ["name", "image", "description", "user"];

    pub fn into_document(self) -> Result<bson::Document, DbError> {
        Ok(bson::to_document(&self)?)
    }
}

/// One recipe filed into one cookbook; the pair is meant to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub recipe: String,
    pub cookbook: String,
}

impl LibraryEntry {
    pub const FIELDS: [&'static str; 2] = ["recipe", "cookbook"];

    pub fn into_document(self) -> Result<bson::Document, DbError> {
        Ok(bson::to_document(&self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Ingredient {
    pub const FIELDS: [&'static str; 2] = ["name", "category"];

    pub fn into_document(self) -> Result<bson::Document, DbError> {
        Ok(bson::to_document(&self)?)
    }
}

/// Creates the service's collections with their filterable-field schemas
/// and the library's reference relations wired for populate.
pub fn register_collections(engine: &Engine) {
    let schema = |fields: &[&str]| {
        fields.iter().chain(STORE_FIELDS.iter()).map(|s| s.to_string()).collect::<Vec<_>>()
    };

    engine.create_collection(RECIPES).set_schema(schema(&Recipe::FIELDS));
    engine.create_collection(COOKBOOKS).set_schema(schema(&CookBook::FIELDS));
    engine.create_collection(INGREDIENTS).set_schema(schema(&Ingredient::FIELDS));

    let library = engine.create_collection(LIBRARY);
    library.set_schema(schema(&LibraryEntry::FIELDS));
    library.relate("recipe", RECIPES);
    library.relate("cookbook", COOKBOOKS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_image_defaults() {
        let r: Recipe = serde_json::from_value(serde_json::json!({
            "name": "Pancakes",
            "ingredients": ["flour", "milk"],
            "instructions": ["mix", "fry"],
            "user": "u-1"
        }))
        .unwrap();
        assert_eq!(r.image, "no-photo.jpg");
        let doc = r.into_document().unwrap();
        assert_eq!(doc.get_str("name").unwrap(), "Pancakes");
        assert!(doc.get("description").is_none());
    }

    #[test]
    fn register_wires_schemas_and_relations() {
        let engine = Engine::new();
        register_collections(&engine);
        assert_eq!(
            engine.list_collection_names(),
            vec![COOKBOOKS, INGREDIENTS, LIBRARY, RECIPES]
        );
        let library = engine.get_collection(LIBRARY).unwrap();
        assert_eq!(library.relation_target("recipe").as_deref(), Some(RECIPES));
        assert_eq!(library.relation_target("cookbook").as_deref(), Some(COOKBOOKS));
        let recipes = engine.get_collection(RECIPES).unwrap();
        let schema = recipes.schema().unwrap();
        assert!(schema.contains("name"));
        assert!(schema.contains("createdAt"));
        assert!(!schema.contains("password"));
    }
}
