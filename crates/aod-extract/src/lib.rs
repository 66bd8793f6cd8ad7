//! aod-extract
//!
//! Schema-tolerant record extraction for upstream order payloads.
//!
//! Upstream order records arrive with inconsistent field names, casings and
//! nesting depths across API versions (`amazon_order_id` vs `AmazonOrderId`,
//! flat `amount` vs nested `OrderTotal.Amount`). This crate locates and
//! projects canonical fields out of that mess:
//!
//! - [`resolve`] — key normalization, dotted-path lookup, ordered fallback
//!   resolution against a single record
//! - [`graph`] — bounded breadth-first search over a record's nested
//!   object/array graph (last-resort fuzzy matching, money-pair detection)
//! - [`collection`] — payload shape normalization into a flat record slice
//! - [`project`] — per-record projection into display-ready canonical fields
//!
//! Deterministic, pure logic. No IO. No wall-clock. A field that cannot be
//! located is an *absence* (`None`), never an error: upstream payload shape
//! is explicitly untrusted and a missing field is an expected outcome.

pub mod collection;
pub mod graph;
pub mod project;
pub mod resolve;

pub use collection::extract_records;
pub use graph::{find_by_normalized_key, find_money_pair, MoneyPair};
pub use project::{
    display_value, format_timestamp, parse_timestamp, project_all, project_record,
    resolve_purchase_date, resolve_status, row_key, ProjectedOrder,
};
pub use resolve::{is_present, normalize_key, resolve_first, resolve_path};
