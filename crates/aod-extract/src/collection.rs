//! Payload shape normalization.
//!
//! The upstream orders endpoint has shipped three container shapes over its
//! lifetime: a bare array, `{"orders": [...]}`, and `{"results": [...]}`.
//! This module flattens whichever arrives into one ordered record slice.

use serde_json::Value;
use tracing::debug;

/// Container keys probed when the payload is not itself an array, in fixed
/// priority order.
const CONTAINER_KEYS: &[&str] = &["orders", "results"];

/// Normalize a raw payload into an ordered record sequence.
///
/// Priority: the payload itself if it is an array, else the first of
/// `orders` / `results` that holds an array, else empty. Never fails —
/// an unrecognized shape is simply an empty sequence.
pub fn extract_records(payload: &Value) -> &[Value] {
    if let Some(records) = payload.as_array() {
        debug!(count = records.len(), container = "bare", "extracted records");
        return records;
    }

    for &key in CONTAINER_KEYS {
        if let Some(records) = payload.get(key).and_then(Value::as_array) {
            debug!(count = records.len(), container = key, "extracted records");
            return records;
        }
    }

    debug!("payload carries no recognizable record container");
    &[]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array_is_returned_unchanged() {
        let payload = json!([{"id": 1}, {"id": 2}]);
        let records = extract_records(&payload);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], json!({"id": 1}));
    }

    #[test]
    fn orders_container_is_unwrapped() {
        let payload = json!({"orders": [{"id": 1}]});
        assert_eq!(extract_records(&payload), &[json!({"id": 1})]);
    }

    #[test]
    fn results_container_is_unwrapped() {
        let payload = json!({"results": [{"id": 1}]});
        assert_eq!(extract_records(&payload), &[json!({"id": 1})]);
    }

    #[test]
    fn orders_takes_priority_over_results() {
        let payload = json!({
            "results": [{"id": "from_results"}],
            "orders": [{"id": "from_orders"}]
        });
        assert_eq!(extract_records(&payload), &[json!({"id": "from_orders"})]);
    }

    #[test]
    fn non_array_orders_falls_through_to_results() {
        let payload = json!({"orders": "not a list", "results": [{"id": 1}]});
        assert_eq!(extract_records(&payload), &[json!({"id": 1})]);
    }

    #[test]
    fn unrecognized_shapes_are_empty_not_errors() {
        assert!(extract_records(&json!({"data": [1, 2]})).is_empty());
        assert!(extract_records(&json!("just a string")).is_empty());
        assert!(extract_records(&json!(null)).is_empty());
        assert!(extract_records(&json!(42)).is_empty());
    }

    #[test]
    fn record_order_is_preserved() {
        let payload = json!({"orders": [{"id": "a"}, {"id": "b"}, {"id": "c"}]});
        let ids: Vec<_> = extract_records(&payload)
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
