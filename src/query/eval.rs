use bson::{Bson, Document as BsonDocument};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::document::{Document, FIELD_CREATED_AT, FIELD_ID, FIELD_UPDATED_AT};

use super::types::{CmpOp, Filter, MAX_IN_SET, MAX_PATH_DEPTH, MAX_SORT_FIELDS, Order, SortSpec};

/// Per-query compiled filter: `like` patterns are built into regexes once
/// here, not per document.
pub(crate) struct Matcher {
    regexes: HashMap<String, Regex>,
}

impl Matcher {
    pub(crate) fn new(filter: &Filter) -> Self {
        let mut regexes = HashMap::new();
        collect_patterns(filter, &mut regexes);
        Self { regexes }
    }

    /// Evaluates against the whole record: the identity field and the
    /// store-managed timestamps resolve from document metadata, everything
    /// else from the body.
    pub(crate) fn matches(&self, doc: &Document, filter: &Filter) -> bool {
        self.eval(filter, &|path| record_value(doc, path))
    }

    fn matches_body(&self, doc: &BsonDocument, filter: &Filter) -> bool {
        self.eval(filter, &|path| get_path(doc, path).cloned())
    }

    fn eval(&self, filter: &Filter, lookup: &dyn Fn(&str) -> Option<Bson>) -> bool {
        match filter {
            Filter::True => true,
            Filter::And(fs) => fs.iter().all(|f| self.eval(f, lookup)),
            Filter::In { path, values } => lookup(path).is_some_and(|v| is_in_set(&v, values)),
            Filter::Cmp { path, op, value } => match lookup(path) {
                Some(v) => {
                    let c = compare_bson(&v, value);
                    match op {
                        CmpOp::Eq => c == Ordering::Equal,
                        CmpOp::Gt => c == Ordering::Greater,
                        CmpOp::Gte => c != Ordering::Less,
                        CmpOp::Lt => c == Ordering::Less,
                        CmpOp::Lte => c != Ordering::Greater,
                    }
                }
                None => false,
            },
            Filter::Like { path, pattern } => match lookup(path) {
                Some(Bson::String(s)) => {
                    self.regexes.get(pattern).is_some_and(|r| r.is_match(&s))
                }
                _ => false,
            },
        }
    }
}

// The pattern is a literal substring, not regex syntax.
fn collect_patterns(filter: &Filter, out: &mut HashMap<String, Regex>) {
    match filter {
        Filter::And(fs) => fs.iter().for_each(|f| collect_patterns(f, out)),
        Filter::Like { pattern, .. } => {
            if !out.contains_key(pattern) {
                let built = regex::RegexBuilder::new(&regex::escape(pattern))
                    .case_insensitive(true)
                    .build();
                if let Ok(re) = built {
                    out.insert(pattern.clone(), re);
                }
            }
        }
        _ => {}
    }
}

/// Resolves a filter path against the full record, metadata fields included.
fn record_value(doc: &Document, path: &str) -> Option<Bson> {
    match path {
        FIELD_ID => Some(Bson::String(doc.id.to_string())),
        FIELD_CREATED_AT => Some(Bson::DateTime(doc.metadata.created_at.0.into())),
        FIELD_UPDATED_AT => Some(Bson::DateTime(doc.metadata.updated_at.0.into())),
        _ => get_path(&doc.data, path).cloned(),
    }
}

/// Evaluates a filter against a bare document body. Store queries go through
/// [`Matcher::matches`], which also resolves metadata fields.
pub fn eval_filter(doc: &BsonDocument, filter: &Filter) -> bool {
    Matcher::new(filter).matches_body(doc, filter)
}

/// Sort comparison over whole documents: the store-managed timestamp fields
/// order by metadata, everything else by body field.
pub fn compare_records(a: &Document, b: &Document, sort: &[SortSpec]) -> Ordering {
    for s in sort.iter().take(MAX_SORT_FIELDS) {
        let ord = match s.field.as_str() {
            FIELD_CREATED_AT => a.metadata.created_at.cmp(&b.metadata.created_at),
            FIELD_UPDATED_AT => a.metadata.updated_at.cmp(&b.metadata.updated_at),
            field => {
                let va = get_path(&a.data, field);
                let vb = get_path(&b.data, field);
                match (va, vb) {
                    (Some(x), Some(y)) => compare_bson(x, y),
                    (Some(_), None) => Ordering::Greater,
                    (None, Some(_)) => Ordering::Less,
                    (None, None) => Ordering::Equal,
                }
            }
        };
        if ord != Ordering::Equal {
            return if matches!(s.order, Order::Asc) { ord } else { ord.reverse() };
        }
    }
    Ordering::Equal
}

fn is_in_set(v: &Bson, set: &[Bson]) -> bool {
    set.iter().take(MAX_IN_SET).any(|x| compare_bson(x, v) == Ordering::Equal)
}

fn get_path<'a>(doc: &'a BsonDocument, path: &str) -> Option<&'a Bson> {
    if path.is_empty() || path.len() > 1024 {
        return None;
    }
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() > MAX_PATH_DEPTH {
        return None;
    }
    let mut cur = doc;
    for (i, part) in parts.iter().enumerate() {
        match cur.get(part) {
            Some(v) if i + 1 == parts.len() => return Some(v),
            Some(Bson::Document(d)) => cur = d,
            _ => return None,
        }
    }
    None
}

pub fn compare_bson(a: &Bson, b: &Bson) -> Ordering {
    use bson::Bson as T;
    fn is_num(x: &T) -> bool {
        matches!(x, T::Int32(_) | T::Int64(_) | T::Double(_))
    }
    fn as_f64_num(x: &T) -> f64 {
        match x {
            T::Int32(i) => f64::from(*i),
            T::Int64(i) => *i as f64,
            T::Double(f) => *f,
            _ => f64::NAN,
        }
    }
    if is_num(a) && is_num(b) {
        return as_f64_num(a).total_cmp(&as_f64_num(b));
    }
    match (a, b) {
        (T::String(x), T::String(y)) => x.cmp(y),
        (T::Boolean(x), T::Boolean(y)) => x.cmp(y),
        (T::DateTime(x), T::DateTime(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &Bson) -> u8 {
    use bson::Bson as T;
    match v {
        T::Null => 0,
        T::Boolean(_) => 1,
        T::Int32(_) => 2,
        T::Int64(_) => 3,
        T::Double(_) => 4,
        T::String(_) => 5,
        T::Array(_) => 6,
        T::Document(_) => 7,
        T::ObjectId(_) => 8,
        T::DateTime(_) => 9,
        _ => 255,
    }
}

/// Restricts a document body to `fields` (top-level names).
pub(crate) fn project_fields(doc: &BsonDocument, fields: &[String]) -> BsonDocument {
    let mut out = BsonDocument::new();
    for f in fields {
        if let Some(v) = doc.get(f) {
            out.insert(f.clone(), v.clone());
        }
    }
    out
}
