use crate::collection::Collection;
use crate::engine::Engine;
use crate::errors::DbError;
use bson::Bson;

/// Replaces declared reference fields in `record` with the referenced
/// record. A reference that cannot be resolved is left as the stored id;
/// a populate target naming an unknown collection is an error.
pub(crate) fn expand(
    engine: &Engine,
    col: &Collection,
    record: &mut bson::Document,
    fields: &[String],
) -> Result<(), DbError> {
    for field in fields {
        let Some(target) = col.relation_target(field) else {
            log::warn!(
                "populate: no relation declared for field `{field}` on `{}`",
                col.name_str()
            );
            continue;
        };
        let target_col = engine
            .get_collection(&target)
            .ok_or_else(|| DbError::NoSuchCollection(target.clone()))?;
        let id = match record.get(field) {
            Some(Bson::String(s)) => s.clone(),
            // Projected out, absent, or already expanded.
            _ => continue,
        };
        match target_col.find_by_id_str(&id) {
            Some(doc) => {
                record.insert(field.clone(), Bson::Document(doc.to_record()));
            }
            None => log::warn!(
                "populate: unresolved reference `{id}` from `{}`.`{field}` into `{target}`",
                col.name_str()
            ),
        }
    }
    Ok(())
}
