//! Status distribution: one segment per distinct normalized status value,
//! ordered by descending count, with a semantic display color.
//!
//! Statuses that differ only by case or surrounding whitespace share one
//! bucket. The *displayed* label for a merged bucket is the first
//! literal encountered in record order — deterministic because record
//! order is preserved end to end, and documented here rather than guessing
//! a canonical casing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use aod_extract::resolve_status;

/// Label applied when a record carries no resolvable status.
const UNKNOWN_LABEL: &str = "Unknown";

// ---------------------------------------------------------------------------
// Color tokens
// ---------------------------------------------------------------------------

/// Display color tokens understood by the presentation layer.
///
/// The first four are semantic; the rest form a fixed rotating palette for
/// statuses outside the semantic map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Warning,
    Primary,
    Success,
    Error,
    Slate,
    Teal,
    Indigo,
    Amber,
    Rose,
}

/// Fallback palette, cycled by segment rank.
const FALLBACK_PALETTE: &[ColorToken] = &[
    ColorToken::Slate,
    ColorToken::Teal,
    ColorToken::Indigo,
    ColorToken::Amber,
    ColorToken::Rose,
];

/// Semantic color for a bucket key (already lowercased and trimmed), or the
/// palette token for `rank` when the status has no semantic meaning.
fn color_for(bucket: &str, rank: usize) -> ColorToken {
    match bucket {
        "pending" => ColorToken::Warning,
        "unshipped" => ColorToken::Primary,
        "shipped" | "delivered" => ColorToken::Success,
        "cancelled" | "canceled" => ColorToken::Error,
        _ => FALLBACK_PALETTE[rank % FALLBACK_PALETTE.len()],
    }
}

// ---------------------------------------------------------------------------
// Segments
// ---------------------------------------------------------------------------

/// One slice of the status distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSegment {
    /// First-encountered literal casing of the status.
    pub label: String,
    /// Occurrence count within the record sequence.
    pub value: u64,
    pub color: ColorToken,
}

/// Group records by trimmed status (case-insensitively for bucketing, never
/// for the label), count occurrences, sort by descending count with ties in
/// first-seen order, and assign display colors.
pub fn status_segments(records: &[Value]) -> Vec<StatusSegment> {
    struct Bucket {
        key: String,
        label: String,
        count: u64,
    }

    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for record in records {
        let raw = resolve_status(record);
        let label = match raw.as_deref().map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
            _ => UNKNOWN_LABEL.to_string(),
        };
        let key = label.to_lowercase();

        match index_by_key.get(&key) {
            Some(&i) => buckets[i].count += 1,
            None => {
                index_by_key.insert(key.clone(), buckets.len());
                buckets.push(Bucket {
                    key,
                    label,
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    buckets.sort_by(|a, b| b.count.cmp(&a.count));

    buckets
        .into_iter()
        .enumerate()
        .map(|(rank, bucket)| StatusSegment {
            color: color_for(&bucket.key, rank),
            label: bucket.label,
            value: bucket.count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_status(status: &str) -> Value {
        json!({"status": status})
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(status_segments(&[]).is_empty());
    }

    #[test]
    fn case_variants_merge_under_first_seen_label() {
        let records = vec![
            with_status("Pending"),
            with_status("pending"),
            with_status("Shipped"),
        ];
        let segments = status_segments(&records);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].label, "Pending");
        assert_eq!(segments[0].value, 2);
        assert_eq!(segments[1].label, "Shipped");
        assert_eq!(segments[1].value, 1);
    }

    #[test]
    fn whitespace_is_trimmed_before_bucketing() {
        let records = vec![with_status("  Pending "), with_status("PENDING")];
        let segments = status_segments(&records);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].label, "Pending");
        assert_eq!(segments[0].value, 2);
    }

    #[test]
    fn missing_and_blank_statuses_bucket_as_unknown() {
        let records = vec![json!({}), with_status(""), with_status("   ")];
        let segments = status_segments(&records);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].label, "Unknown");
        assert_eq!(segments[0].value, 3);
    }

    #[test]
    fn segments_sorted_by_descending_count() {
        let records = vec![
            with_status("Shipped"),
            with_status("Pending"),
            with_status("Pending"),
            with_status("Pending"),
            with_status("Shipped"),
            with_status("Cancelled"),
        ];
        let counts: Vec<u64> = status_segments(&records).iter().map(|s| s.value).collect();
        assert_eq!(counts, [3, 2, 1]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let records = vec![with_status("Unshipped"), with_status("Shipped")];
        let labels: Vec<_> = status_segments(&records)
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, ["Unshipped", "Shipped"]);
    }

    #[test]
    fn semantic_colors_are_case_insensitive() {
        let records = vec![
            with_status("PENDING"),
            with_status("unshipped"),
            with_status("Shipped"),
            with_status("canceled"),
        ];
        let segments = status_segments(&records);
        let color_of = |label: &str| {
            segments
                .iter()
                .find(|s| s.label.eq_ignore_ascii_case(label))
                .unwrap()
                .color
        };
        assert_eq!(color_of("pending"), ColorToken::Warning);
        assert_eq!(color_of("unshipped"), ColorToken::Primary);
        assert_eq!(color_of("shipped"), ColorToken::Success);
        assert_eq!(color_of("canceled"), ColorToken::Error);
    }

    #[test]
    fn delivered_and_cancelled_spellings_map_semantically() {
        let records = vec![with_status("Delivered"), with_status("Cancelled")];
        let segments = status_segments(&records);
        assert_eq!(segments[0].color, ColorToken::Success);
        assert_eq!(segments[1].color, ColorToken::Error);
    }

    #[test]
    fn unmapped_statuses_rotate_through_the_palette() {
        let records = vec![
            with_status("Refunded"),
            with_status("Refunded"),
            with_status("Archived"),
        ];
        let segments = status_segments(&records);
        // Rank 0 and rank 1, both outside the semantic map.
        assert_eq!(segments[0].color, FALLBACK_PALETTE[0]);
        assert_eq!(segments[1].color, FALLBACK_PALETTE[1]);
    }

    #[test]
    fn status_aliases_resolve_before_bucketing() {
        let records = vec![json!({"OrderStatus": "Pending"}), json!({"order_status": "pending"})];
        let segments = status_segments(&records);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].value, 2);
    }
}
