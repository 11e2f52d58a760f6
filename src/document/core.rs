use crate::document::types::Metadata;
use crate::types::DocumentId;
use bson::{Bson, Document as BsonDocument};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Reserved field names the store injects into outward-facing records.
pub(crate) const FIELD_ID: &str = "_id";
pub(crate) const FIELD_CREATED_AT: &str = "createdAt";
pub(crate) const FIELD_UPDATED_AT: &str = "updatedAt";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub data: BsonDocument,
    pub metadata: Metadata,
}

impl Document {
    #[must_use]
    pub fn new(data: BsonDocument) -> Self {
        Self { id: DocumentId::new(), data, metadata: Metadata::new() }
    }

    pub fn update(&mut self, new_data: BsonDocument) {
        self.data = new_data;
        self.metadata.updated_at = crate::types::SerializableDateTime(Utc::now());
    }

    /// Assembles the outward-facing record: all body fields plus the
    /// identity field and the store-managed timestamps.
    #[must_use]
    pub fn to_record(&self) -> BsonDocument {
        let mut out = BsonDocument::new();
        out.insert(FIELD_ID, self.id.to_string());
        for (k, v) in &self.data {
            out.insert(k.clone(), v.clone());
        }
        out.insert(FIELD_CREATED_AT, Bson::DateTime(self.metadata.created_at.0.into()));
        out.insert(FIELD_UPDATED_AT, Bson::DateTime(self.metadata.updated_at.0.into()));
        out
    }

    /// Like [`to_record`](Self::to_record) but restricted to `fields`. The
    /// identity field is always included; timestamps only when asked for.
    #[must_use]
    pub fn to_projected_record(&self, fields: &[String]) -> BsonDocument {
        let mut out = BsonDocument::new();
        out.insert(FIELD_ID, self.id.to_string());
        for f in fields {
            match f.as_str() {
                FIELD_CREATED_AT => {
                    out.insert(f.clone(), Bson::DateTime(self.metadata.created_at.0.into()));
                }
                FIELD_UPDATED_AT => {
                    out.insert(f.clone(), Bson::DateTime(self.metadata.updated_at.0.into()));
                }
                _ => {
                    if let Some(v) = self.data.get(f) {
                        out.insert(f.clone(), v.clone());
                    }
                }
            }
        }
        out
    }
}
