//! Aggregate dashboard summary over a record-sequence snapshot.
//!
//! One pass over the records yields totals, the pending/unshipped workload
//! counts, the today bucket, summed revenue, most-recent-sync detection and
//! the sentinel-date data-quality flags. The report is immutable; a new
//! snapshot means a new report.
//!
//! `build_summary` is pure — "today" is an explicit parameter so the result
//! is a deterministic function of its inputs. `build_summary_now` samples
//! the UTC clock once and delegates.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use aod_extract::{
    display_value, format_timestamp, parse_timestamp, resolve_first, resolve_purchase_date,
    resolve_status, row_key,
};

/// Sync-timestamp field aliases across upstream API versions.
const SYNC_CANDIDATES: &[&str] = &["synced_at", "SyncedAt", "last_synced_at", "lastSyncedAt"];

/// How many sentinel-date records are surfaced for inspection. The total
/// flagged count is always reported regardless.
const INVALID_DATE_SAMPLE_LIMIT: usize = 3;

/// A purchase date parsing into this UTC year marks an upstream data defect
/// (epoch-adjacent placeholder), not a real order from 1970.
const SENTINEL_YEAR: i32 = 1970;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// The most recent sync timestamp observed across the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestSync {
    /// Raw field value of the winning record (first encountered on ties).
    pub raw: String,
    /// Display form of the winning timestamp.
    pub display: String,
    /// Records whose raw sync field equals `raw` exactly (string equality,
    /// not instant equality).
    pub count: usize,
}

/// Sentinel-date data-quality flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidDates {
    /// Total flagged records.
    pub count: usize,
    /// Row keys of the first few flagged records, capped for display.
    pub samples: Vec<String>,
}

/// Summary statistics for one record-sequence snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub total_count: usize,
    /// Records whose status is `pending` (case/trim-insensitive).
    pub pending_count: usize,
    /// Records whose status is `unshipped` (case/trim-insensitive).
    pub unshipped_count: usize,
    /// Records whose raw purchase-date string starts with the given UTC
    /// calendar date (`YYYY-MM-DD` prefix match, no datetime parsing).
    pub today_count: usize,
    /// Sum of the numeric top-level `Amount` field; non-numeric and missing
    /// values coerce to zero.
    pub total_amount: f64,
    /// Absent when no record carries a parsable sync timestamp.
    pub latest_sync: Option<LatestSync>,
    pub invalid_dates: InvalidDates,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build the summary for `records` against an explicit UTC calendar date.
pub fn build_summary(records: &[Value], today: NaiveDate) -> AggregateSummary {
    let today_prefix = today.format("%Y-%m-%d").to_string();

    let mut pending_count = 0usize;
    let mut unshipped_count = 0usize;
    let mut today_count = 0usize;
    let mut total_amount = 0.0f64;
    let mut invalid_dates = InvalidDates::default();
    let mut latest: Option<(chrono::DateTime<Utc>, String)> = None;

    for (index, record) in records.iter().enumerate() {
        if let Some(status) = resolve_status(record) {
            let status = status.trim();
            if status.eq_ignore_ascii_case("pending") {
                pending_count += 1;
            } else if status.eq_ignore_ascii_case("unshipped") {
                unshipped_count += 1;
            }
        }

        if let Some(raw_date) = resolve_purchase_date(record) {
            if raw_date.starts_with(&today_prefix) {
                today_count += 1;
            }
            if let Some(parsed) = parse_timestamp(&raw_date) {
                if parsed.year() == SENTINEL_YEAR {
                    invalid_dates.count += 1;
                    if invalid_dates.samples.len() < INVALID_DATE_SAMPLE_LIMIT {
                        invalid_dates.samples.push(row_key(record, index));
                    }
                }
            }
        }

        total_amount += amount_field(record);

        if let Some(raw_sync) = sync_field(record) {
            if let Some(parsed) = parse_timestamp(&raw_sync) {
                // Strictly-greater update: the first record carrying the
                // maximal instant keeps its raw string on ties.
                match &latest {
                    Some((best, _)) if parsed <= *best => {}
                    _ => latest = Some((parsed, raw_sync)),
                }
            }
        }
    }

    let latest_sync = latest.map(|(_, raw)| {
        let count = records
            .iter()
            .filter(|record| sync_field(record).as_deref() == Some(raw.as_str()))
            .count();
        LatestSync {
            display: format_timestamp(&raw),
            raw,
            count,
        }
    });

    let summary = AggregateSummary {
        total_count: records.len(),
        pending_count,
        unshipped_count,
        today_count,
        total_amount,
        latest_sync,
        invalid_dates,
    };
    debug!(
        total = summary.total_count,
        pending = summary.pending_count,
        invalid_dates = summary.invalid_dates.count,
        "built aggregate summary"
    );
    summary
}

/// Convenience wrapper: today is the current UTC calendar date.
pub fn build_summary_now(records: &[Value]) -> AggregateSummary {
    build_summary(records, Utc::now().date_naive())
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Numeric top-level `Amount`; numbers and numeric strings count, anything
/// else coerces to zero.
fn amount_field(record: &Value) -> f64 {
    match record.get("Amount") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Raw sync-timestamp string via the alias fallback chain.
fn sync_field(record: &Value) -> Option<String> {
    resolve_first(record, SYNC_CANDIDATES).and_then(|v| display_value(v))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
