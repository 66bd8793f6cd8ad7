//! Per-record projection into display-ready canonical order fields.
//!
//! Each canonical attribute is derived independently through a fixed
//! strategy cascade that stops at the first resolver that succeeds:
//! ordered fallback lists first (exact keys and dotted paths, modern names
//! before legacy aliases), then last-resort graph search by normalized key.
//! Every miss degrades to a documented default — `"Unknown"` status, a
//! positional placeholder key, or plain absence — never an error.
//!
//! This module does **not**:
//! - fetch payloads (the presentation layer owns transport)
//! - aggregate across records (that is `aod-aggregate`)

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::graph::{find_by_normalized_key, find_money_pair, money_pair_on};
use crate::resolve::resolve_first;

// ---------------------------------------------------------------------------
// Candidate lists
// ---------------------------------------------------------------------------
//
// Two id lists with intentionally different priority: the row key favors a
// stable database id for list identity; the display id favors the
// human-facing marketplace order number.

const ROW_KEY_CANDIDATES: &[&str] = &["id", "order_id", "amazon_order_id", "AmazonOrderId"];
const DISPLAY_ID_CANDIDATES: &[&str] = &["amazon_order_id", "AmazonOrderId", "order_id", "id"];

const STATUS_CANDIDATES: &[&str] = &["status", "order_status", "OrderStatus"];

const PURCHASE_DATE_CANDIDATES: &[&str] =
    &["purchase_date", "PurchaseDate", "created_at", "createdAt"];

const BUYER_NAME_CANDIDATES: &[&str] = &[
    "buyer_name",
    "BuyerName",
    "buyer.name",
    "Buyer.Name",
    "BuyerInfo.BuyerName",
    "customer_name",
    "shipping_address.name",
    "ShippingAddress.Name",
];
const BUYER_NAME_SEARCH_KEYS: &[&str] =
    &["buyer_name", "customer_name", "recipient_name", "contact_name"];

const BUYER_EMAIL_CANDIDATES: &[&str] = &[
    "buyer_email",
    "BuyerEmail",
    "buyer.email",
    "BuyerInfo.BuyerEmail",
    "customer_email",
    "email",
];
const BUYER_EMAIL_SEARCH_KEYS: &[&str] = &["buyer_email", "customer_email", "email"];

const AMOUNT_CANDIDATES: &[&str] = &[
    "order_total.amount",
    "OrderTotal.Amount",
    "order_total",
    "OrderTotal",
    "total_amount",
    "amount",
    "Amount",
    "total",
];
const AMOUNT_SEARCH_KEYS: &[&str] = &["amount", "total_amount", "order_total", "order_amount"];

const CURRENCY_CANDIDATES: &[&str] = &[
    "order_total.currency_code",
    "OrderTotal.CurrencyCode",
    "currency_code",
    "CurrencyCode",
    "currencyCode",
    "currency",
];
const CURRENCY_SEARCH_KEYS: &[&str] = &["currency_code", "currency"];

/// Currency assumed when no currency field can be located anywhere.
const DEFAULT_CURRENCY: &str = "USD";

// ---------------------------------------------------------------------------
// Projected view
// ---------------------------------------------------------------------------

/// Canonical, display-ready view of one raw order record.
///
/// Computed on demand, never mutated. `None` in an optional field means the
/// attribute could not be located anywhere in the record ("Unavailable" in
/// the UI). The source record rides along for full-payload inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedOrder {
    /// Stable identity for list rendering; positional placeholder on miss.
    pub row_key: String,
    /// Human-facing order number; falls back to `row_key`.
    pub display_id: String,
    /// Raw status string; `"Unknown"` on miss.
    pub status: String,
    /// Formatted purchase timestamp, or the original string if unparsable.
    pub purchase_date: Option<String>,
    /// Buyer name, or email when no name-like field exists.
    pub buyer: Option<String>,
    /// Pre-formatted monetary amount (`"$42.50"`, `"EUR 10.00"`).
    pub amount: Option<String>,
    /// The untouched source record.
    pub raw: Value,
}

/// Project one raw record. `index` is the record's position in its sequence
/// and seeds the positional placeholder key when every id candidate misses.
pub fn project_record(record: &Value, index: usize) -> ProjectedOrder {
    let key = row_key(record, index);
    let display_id = resolve_first(record, DISPLAY_ID_CANDIDATES)
        .and_then(display_value)
        .unwrap_or_else(|| key.clone());

    ProjectedOrder {
        display_id,
        status: resolve_status(record).unwrap_or_else(|| "Unknown".to_string()),
        purchase_date: resolve_purchase_date(record).map(|raw| format_timestamp(&raw)),
        buyer: project_buyer(record),
        amount: project_amount(record),
        raw: record.clone(),
        row_key: key,
    }
}

/// Project an ordered record sequence. Order is preserved; records are
/// independent, so a defective record cannot poison its neighbors.
pub fn project_all(records: &[Value]) -> Vec<ProjectedOrder> {
    let projected: Vec<ProjectedOrder> = records
        .iter()
        .enumerate()
        .map(|(index, record)| project_record(record, index))
        .collect();
    debug!(count = projected.len(), "projected record sequence");
    projected
}

// ---------------------------------------------------------------------------
// Shared field accessors
// ---------------------------------------------------------------------------
//
// The aggregate crate resolves the same raw fields without paying for a
// full projection, so these are public.

/// Stable per-record identity: id-like fallback chain, then `order-{index}`.
pub fn row_key(record: &Value, index: usize) -> String {
    resolve_first(record, ROW_KEY_CANDIDATES)
        .and_then(display_value)
        .unwrap_or_else(|| format!("order-{index}"))
}

/// Raw status string via the status fallback chain.
pub fn resolve_status(record: &Value) -> Option<String> {
    resolve_first(record, STATUS_CANDIDATES).and_then(display_value)
}

/// Raw (unformatted) purchase-date string via the date fallback chain.
pub fn resolve_purchase_date(record: &Value) -> Option<String> {
    resolve_first(record, PURCHASE_DATE_CANDIDATES).and_then(display_value)
}

// ---------------------------------------------------------------------------
// Buyer cascade
// ---------------------------------------------------------------------------

fn project_buyer(record: &Value) -> Option<String> {
    resolve_first(record, BUYER_NAME_CANDIDATES)
        .and_then(display_value)
        .or_else(|| find_by_normalized_key(record, BUYER_NAME_SEARCH_KEYS).and_then(display_value))
        .or_else(|| resolve_first(record, BUYER_EMAIL_CANDIDATES).and_then(display_value))
        .or_else(|| {
            find_by_normalized_key(record, BUYER_EMAIL_SEARCH_KEYS).and_then(display_value)
        })
}

// ---------------------------------------------------------------------------
// Amount cascade
// ---------------------------------------------------------------------------

fn project_amount(record: &Value) -> Option<String> {
    // Stage 1: ordered fallback. A structured `{amount, currency_code}`
    // object is formatted directly; a scalar pairs with the separately
    // resolved currency.
    if let Some(value) = resolve_first(record, AMOUNT_CANDIDATES) {
        if value.is_object() {
            if let Some(pair) = money_pair_on(value) {
                let currency =
                    display_value(pair.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
                return Some(format_money(pair.amount, &currency));
            }
            // Object without a recognizable pair: keep searching below.
        } else {
            return Some(format_money(value, &resolved_currency(record)));
        }
    }

    // Stage 2: money pair anywhere in the record graph.
    if let Some(pair) = find_money_pair(record) {
        let currency =
            display_value(pair.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        return Some(format_money(pair.amount, &currency));
    }

    // Stage 3: amount-like scalar by normalized key, currency resolved
    // separately (USD when nothing currency-like exists).
    find_by_normalized_key(record, AMOUNT_SEARCH_KEYS)
        .map(|value| format_money(value, &resolved_currency(record)))
}

fn resolved_currency(record: &Value) -> String {
    resolve_first(record, CURRENCY_CANDIDATES)
        .or_else(|| find_by_normalized_key(record, CURRENCY_SEARCH_KEYS))
        .and_then(display_value)
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}

/// Two-decimal display with a currency-appropriate prefix. Values that do
/// not parse as numbers pass through unchanged under the same prefix rule —
/// upstream garbage stays visible instead of vanishing.
fn format_money(amount: &Value, currency: &str) -> String {
    match amount_as_f64(amount) {
        Some(n) if currency == "USD" => format!("${n:.2}"),
        Some(n) => format!("{currency} {n:.2}"),
        None => {
            let raw = display_value(amount).unwrap_or_default();
            if currency == "USD" {
                format!("${raw}")
            } else {
                format!("{currency} {raw}")
            }
        }
    }
}

fn amount_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Timestamp handling
// ---------------------------------------------------------------------------

/// Parse a raw timestamp string into UTC.
///
/// Accepted forms, in order: RFC 3339 (offset or `Z`), naive
/// `YYYY-MM-DD HH:MM:SS` (assumed UTC), bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_time(NaiveTime::MIN).and_utc());
    }
    None
}

/// Fixed locale-independent display form, minute precision, UTC.
///
/// An unparsable value is returned unchanged — a bad upstream date must stay
/// visible for inspection, never be discarded.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y %H:%M UTC").to_string(),
        None => raw.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Display coercion
// ---------------------------------------------------------------------------

/// Scalars become display strings; containers and absent values do not.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
