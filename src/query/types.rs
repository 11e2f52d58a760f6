use bson::Bson;
use serde::{Deserialize, Serialize};

// Safety limits to prevent resource abuse
pub(crate) const MAX_PATH_DEPTH: usize = 32;
pub(crate) const MAX_IN_SET: usize = 1000;
pub(crate) const MAX_SORT_FIELDS: usize = 8;
pub(crate) const MAX_PROJECTION_FIELDS: usize = 64;

/// Hard cap on a single page; `limit` values above this are clamped down.
pub const MAX_LIMIT: usize = 10_000;
/// Page size used when the request carries no usable `limit`.
pub const DEFAULT_LIMIT: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: Order,
}

/// Options for `find_docs`.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub projection: Option<Vec<String>>,
    pub sort: Option<Vec<SortSpec>>,
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// A per-field matching rule. List requests AND these together; there is no
/// OR/NOT surface in the query-string grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    True,
    And(Vec<Filter>),
    Cmp { path: String, op: CmpOp, value: Bson },
    In { path: String, values: Vec<Bson> },
    /// Case-insensitive substring match against a string field.
    Like { path: String, pattern: String },
}

impl Filter {
    /// Collapses a list of per-field rules into a single filter.
    #[must_use]
    pub fn all(mut rules: Vec<Filter>) -> Filter {
        match rules.len() {
            0 => Filter::True,
            1 => rules.remove(0),
            _ => Filter::And(rules),
        }
    }

    /// Top-level field names this filter touches, for schema validation.
    pub(crate) fn paths<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Filter::True => {}
            Filter::And(fs) => fs.iter().for_each(|f| f.paths(out)),
            Filter::Cmp { path, .. } | Filter::In { path, .. } | Filter::Like { path, .. } => {
                out.push(path.split('.').next().unwrap_or(path));
            }
        }
    }
}
