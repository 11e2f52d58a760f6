use crate::errors::DbError;
use bson::Bson;
use serde_json::Value;

use super::types::{CmpOp, DEFAULT_LIMIT, Filter, MAX_IN_SET, MAX_LIMIT, Order, SortSpec};

/// Decoded query-string parameters: one entry per parameter, scalar for
/// plain filters, object for operator-tagged ones (`price[gt]=10` arrives
/// as `{"price": {"gt": "10"}}`).
pub type RawQuery = serde_json::Map<String, Value>;

/// Keys that drive projection and pagination rather than filtering.
const RESERVED: [&str; 4] = ["select", "sort", "page", "limit"];

/// The parsed form of a list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub filter: Filter,
    pub select: Option<Vec<String>>,
    pub sort: Option<Vec<SortSpec>>,
    pub page: u64,
    pub limit: usize,
}

/// Translates raw parameters into [`ListParams`].
///
/// Filter rewriting is a structural transform over the value tree; operator
/// tokens are matched as object keys, never as substrings of a serialized
/// query.
///
/// # Errors
/// Returns `DbError::QueryError` when a filter object carries an unknown
/// operator key or an operand of an unusable shape.
pub fn parse_list_params(raw: &RawQuery) -> Result<ListParams, DbError> {
    let mut rules = Vec::new();
    for (field, value) in raw {
        if RESERVED.contains(&field.as_str()) {
            continue;
        }
        parse_field(field, value, &mut rules)?;
    }

    let select = match raw.get("select") {
        Some(v) => Some(split_csv("select", v)?),
        None => None,
    };
    let sort = match raw.get("sort") {
        Some(v) => Some(parse_sort(v)?),
        None => None,
    };
    let page = parse_count(raw.get("page"), 1).max(1) as u64;
    let limit = parse_count(raw.get("limit"), DEFAULT_LIMIT as i64).clamp(1, MAX_LIMIT as i64);

    Ok(ListParams {
        filter: Filter::all(rules),
        select,
        sort,
        page,
        limit: limit as usize,
    })
}

fn parse_field(field: &str, value: &Value, out: &mut Vec<Filter>) -> Result<(), DbError> {
    match value {
        Value::Object(ops) => {
            if ops.is_empty() {
                return Err(DbError::QueryError(format!(
                    "no operator provided for field `{field}`"
                )));
            }
            // Several operators on one field all apply, ANDed.
            for (op, operand) in ops {
                out.push(parse_operator(field, op, operand)?);
            }
            Ok(())
        }
        Value::Array(items) => {
            out.push(Filter::In { path: field.to_string(), values: coerce_list(field, items)? });
            Ok(())
        }
        scalar => {
            out.push(Filter::Cmp {
                path: field.to_string(),
                op: CmpOp::Eq,
                value: coerce_scalar(field, scalar)?,
            });
            Ok(())
        }
    }
}

fn parse_operator(field: &str, op: &str, operand: &Value) -> Result<Filter, DbError> {
    let path = field.to_string();
    match op {
        "like" => match operand {
            Value::String(s) => Ok(Filter::Like { path, pattern: s.clone() }),
            _ => Err(DbError::QueryError(format!("`like` on field `{field}` requires a string"))),
        },
        "gt" => Ok(Filter::Cmp { path, op: CmpOp::Gt, value: coerce_scalar(field, operand)? }),
        "gte" => Ok(Filter::Cmp { path, op: CmpOp::Gte, value: coerce_scalar(field, operand)? }),
        "lt" => Ok(Filter::Cmp { path, op: CmpOp::Lt, value: coerce_scalar(field, operand)? }),
        "lte" => Ok(Filter::Cmp { path, op: CmpOp::Lte, value: coerce_scalar(field, operand)? }),
        "in" => {
            let values = match operand {
                Value::Array(items) => coerce_list(field, items)?,
                Value::String(s) => {
                    s.split(',').map(str::trim).filter(|p| !p.is_empty()).map(coerce_str).collect()
                }
                _ => {
                    return Err(DbError::QueryError(format!(
                        "`in` on field `{field}` requires an array or comma-separated string"
                    )));
                }
            };
            Ok(Filter::In { path, values })
        }
        other => {
            Err(DbError::QueryError(format!("unsupported operator `{other}` on field `{field}`")))
        }
    }
}

fn coerce_list(field: &str, items: &[Value]) -> Result<Vec<Bson>, DbError> {
    if items.len() > MAX_IN_SET {
        return Err(DbError::QueryError(format!("`in` set too large on field `{field}`")));
    }
    items.iter().map(|v| coerce_scalar(field, v)).collect()
}

fn coerce_scalar(field: &str, v: &Value) -> Result<Bson, DbError> {
    match v {
        Value::Null => Ok(Bson::Null),
        Value::Bool(b) => Ok(Bson::Boolean(*b)),
        Value::Number(n) => Ok(n
            .as_i64()
            .map(Bson::Int64)
            .unwrap_or_else(|| Bson::Double(n.as_f64().unwrap_or(f64::NAN)))),
        Value::String(s) => Ok(coerce_str(s)),
        _ => Err(DbError::QueryError(format!("unusable operand for field `{field}`"))),
    }
}

/// Query-string operands arrive as text; numbers, booleans, and RFC 3339
/// timestamps are recovered here since a schemaless store cannot cast them
/// per-field.
fn coerce_str(s: &str) -> Bson {
    if let Ok(i) = s.parse::<i64>() {
        return Bson::Int64(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Bson::Double(f);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Bson::DateTime(dt.with_timezone(&chrono::Utc).into());
    }
    match s {
        "true" => Bson::Boolean(true),
        "false" => Bson::Boolean(false),
        _ => Bson::String(s.to_string()),
    }
}

fn split_csv(key: &str, v: &Value) -> Result<Vec<String>, DbError> {
    match v {
        Value::String(s) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()),
        _ => Err(DbError::QueryError(format!("`{key}` must be a comma-separated string"))),
    }
}

fn parse_sort(v: &Value) -> Result<Vec<SortSpec>, DbError> {
    Ok(split_csv("sort", v)?
        .into_iter()
        .map(|f| match f.strip_prefix('-') {
            Some(rest) => SortSpec { field: rest.to_string(), order: Order::Desc },
            None => SortSpec { field: f, order: Order::Asc },
        })
        .collect())
}

/// Lenient numeric parse for `page`/`limit`: unusable values fall back to
/// the default; out-of-range values are clamped by the caller.
fn parse_count(v: Option<&Value>, default: i64) -> i64 {
    match v {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(default),
        _ => default,
    }
}
