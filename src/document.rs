mod core;
mod types;

pub use self::core::Document;
pub use self::types::Metadata;

pub(crate) use self::core::{FIELD_CREATED_AT, FIELD_ID, FIELD_UPDATED_AT};
