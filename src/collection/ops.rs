use super::core::Collection;
use crate::document::Document;
use crate::types::DocumentId;

impl Collection {
    pub fn insert_document(&self, document: Document) -> DocumentId {
        let doc_id = document.id.clone();
        self.store.write().insert(doc_id.clone(), document);
        doc_id
    }

    pub fn find_document(&self, id: &DocumentId) -> Option<Document> {
        self.store.read().get(id).cloned()
    }

    /// Looks a document up by the string form of its id, as stored in
    /// reference fields.
    pub fn find_by_id_str(&self, id: &str) -> Option<Document> {
        let id = DocumentId::parse_str(id).ok()?;
        self.find_document(&id)
    }

    pub fn update_document(&self, id: &DocumentId, new_data: bson::Document) -> bool {
        let mut store = self.store.write();
        match store.get_mut(id) {
            Some(doc) => {
                doc.update(new_data);
                true
            }
            None => false,
        }
    }

    pub fn delete_document(&self, id: &DocumentId) -> bool {
        self.store.write().remove(id).is_some()
    }

    pub fn get_all_documents(&self) -> Vec<Document> {
        self.store.read().values().cloned().collect()
    }

    /// Return only the IDs of all documents without cloning each document.
    pub fn list_ids(&self) -> Vec<DocumentId> {
        self.store.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn insert_find_update_delete() {
        let col = Collection::new("recipes".into());
        let id = col.insert_document(Document::new(doc! {"name": "Pancakes"}));
        assert!(col.find_document(&id).is_some());
        assert!(col.update_document(&id, doc! {"name": "Crepes"}));
        assert_eq!(col.find_document(&id).unwrap().data.get_str("name").unwrap(), "Crepes");
        assert!(col.delete_document(&id));
        assert!(col.find_document(&id).is_none());
        assert!(!col.delete_document(&id));
    }

    #[test]
    fn find_by_id_str_rejects_garbage() {
        let col = Collection::new("recipes".into());
        let id = col.insert_document(Document::new(doc! {"name": "Toast"}));
        assert!(col.find_by_id_str(&id.to_string()).is_some());
        assert!(col.find_by_id_str("not-a-uuid").is_none());
    }

    #[test]
    fn relations_and_schema_round_trip() {
        let col = Collection::new("library".into());
        col.relate("recipe", "recipes");
        assert_eq!(col.relation_target("recipe").as_deref(), Some("recipes"));
        assert_eq!(col.relation_target("cookbook"), None);

        assert!(col.schema().is_none());
        col.set_schema(["recipe", "cookbook"]);
        assert!(col.schema().unwrap().contains("recipe"));
    }
}
