// Submodules for separation of concerns
mod cursor;
mod eval;
mod exec;
mod page;
mod parse;
mod populate;
mod types;

pub use self::cursor::Cursor;
pub use self::eval::{compare_bson, compare_records, eval_filter};
pub use self::exec::{count_docs, find_docs};
pub use self::page::{ListResult, PageRef, Pagination, run_list};
pub use self::parse::{ListParams, RawQuery, parse_list_params};
pub use self::types::{
    CmpOp, DEFAULT_LIMIT, Filter, FindOptions, MAX_LIMIT, Order, SortSpec,
};
