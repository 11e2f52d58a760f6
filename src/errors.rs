use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("BSON encode: {0}")]
    BsonEncode(#[from] bson::ser::Error),

    #[error("Collection not found: {0}")]
    NoSuchCollection(String),

    #[error("Collection already exists: {0}")]
    CollectionAlreadyExists(String),

    #[error("Document not found: {0}")]
    NoSuchDocument(String),

    #[error("Invalid document ID: {0}")]
    InvalidDocumentId(String),

    #[error("Query error: {0}")]
    QueryError(String),
}
