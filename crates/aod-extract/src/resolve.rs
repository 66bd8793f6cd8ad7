//! Leaf resolvers: key normalization, dotted-path lookup, ordered fallback.
//!
//! These are the building blocks of every projection strategy. They operate
//! on borrowed `serde_json::Value` data and never allocate beyond the
//! normalized key string.
//!
//! This module does **not**:
//! - traverse nested structures speculatively (that is `graph.rs`)
//! - apply display defaults (that is the caller's job, see `project.rs`)

use serde_json::Value;

// ---------------------------------------------------------------------------
// Key normalization
// ---------------------------------------------------------------------------

/// Normalize a field name for fuzzy comparison: drop every character that is
/// not an ASCII letter or digit, lowercase the remainder.
///
/// Total over all strings and idempotent. Normalization strips punctuation
/// only — it does not split words — so `"AmazonOrderId"` and
/// `"amazon_order_id"` do **not** collapse to the same key. Fallback
/// candidate lists must still enumerate each casing variant explicitly;
/// normalized matching is reserved for last-resort graph search.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// A value counts as present when it is not `null` and not the empty string.
///
/// Upstream payloads routinely carry `""` where a field was cleared; treating
/// it as present would poison every downstream fallback chain.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

// ---------------------------------------------------------------------------
// Dotted-path lookup
// ---------------------------------------------------------------------------

/// Resolve `path` against `record` by splitting on `.` and descending
/// through object properties in order.
///
/// A path without `.` is a direct property lookup. Returns `None` if any
/// intermediate value is not an object or the final key is missing. No
/// wildcard or array-index syntax — plain object chaining only. Never
/// panics on malformed input; a non-object intermediate degrades to `None`.
pub fn resolve_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

// ---------------------------------------------------------------------------
// Ordered fallback
// ---------------------------------------------------------------------------

/// Try `candidates` (keys or dotted paths) in order against `record` and
/// return the first resolved value that is present per [`is_present`].
///
/// Ordering is significant and caller-controlled: more specific / modern
/// field names go first so newer payload shapes win when a record carries
/// both (which it should not, but the upstream API is not trusted to keep
/// that promise).
pub fn resolve_first<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|candidate| resolve_path(record, candidate))
        .find(|value| is_present(value))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // --- normalize_key ---

    #[test]
    fn normalize_strips_separators_and_lowercases() {
        assert_eq!(normalize_key("currency_code"), "currencycode");
        assert_eq!(normalize_key("CurrencyCode"), "currencycode");
        assert_eq!(normalize_key("currency-code"), "currencycode");
        assert_eq!(normalize_key("Currency Code!"), "currencycode");
    }

    #[test]
    fn normalize_does_not_merge_word_boundaries_by_itself() {
        // Identical here only because the underlying words match after
        // punctuation removal — casing variants must still be enumerated
        // explicitly in fallback lists.
        assert_eq!(normalize_key("AmazonOrderId"), normalize_key("amazon_order_id"));
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_key("Purchase_Date-2");
        assert_eq!(normalize_key(&once), once);
    }

    #[test]
    fn normalize_is_total_over_odd_input() {
        assert_eq!(normalize_key(""), "");
        assert_eq!(normalize_key("___"), "");
        assert_eq!(normalize_key("émoji🙂ok"), "mojiok");
    }

    // --- is_present ---

    #[test]
    fn null_and_empty_string_are_absent() {
        assert!(!is_present(&Value::Null));
        assert!(!is_present(&json!("")));
    }

    #[test]
    fn zero_and_false_are_present() {
        assert!(is_present(&json!(0)));
        assert!(is_present(&json!(false)));
        assert!(is_present(&json!([])));
        assert!(is_present(&json!({})));
    }

    // --- resolve_path ---

    #[test]
    fn direct_property_lookup() {
        let record = json!({"status": "Pending"});
        assert_eq!(resolve_path(&record, "status"), Some(&json!("Pending")));
    }

    #[test]
    fn dotted_descent_through_objects() {
        let record = json!({"OrderTotal": {"Amount": "42.50"}});
        assert_eq!(
            resolve_path(&record, "OrderTotal.Amount"),
            Some(&json!("42.50"))
        );
    }

    #[test]
    fn missing_key_is_absent() {
        let record = json!({"status": "Pending"});
        assert_eq!(resolve_path(&record, "state"), None);
        assert_eq!(resolve_path(&record, "a.b.c"), None);
    }

    #[test]
    fn descent_through_non_object_is_absent_not_a_panic() {
        let record = json!({"total": "19.99"});
        assert_eq!(resolve_path(&record, "total.amount"), None);

        let scalar_root = json!("not an object");
        assert_eq!(resolve_path(&scalar_root, "anything"), None);
    }

    #[test]
    fn arrays_are_not_descended() {
        let record = json!({"items": [{"amount": "5.00"}]});
        assert_eq!(resolve_path(&record, "items.amount"), None);
    }

    // --- resolve_first ---

    #[test]
    fn first_present_candidate_wins() {
        let record = json!({"order_id": "111-222", "id": 7});
        let v = resolve_first(&record, &["id", "order_id"]);
        assert_eq!(v, Some(&json!(7)));
    }

    #[test]
    fn empty_string_candidate_is_skipped() {
        let record = json!({"a": "", "b": "x"});
        assert_eq!(resolve_first(&record, &["a", "b"]), Some(&json!("x")));
    }

    #[test]
    fn null_candidate_is_skipped() {
        let record = json!({"a": null, "b": "x"});
        assert_eq!(resolve_first(&record, &["a", "b"]), Some(&json!("x")));
    }

    #[test]
    fn all_candidates_missing_is_absent() {
        let record = json!({"unrelated": true});
        assert_eq!(resolve_first(&record, &["a", "b.c"]), None);
    }

    #[test]
    fn dotted_candidates_participate_in_fallback() {
        let record = json!({"OrderTotal": {"Amount": "10.00"}});
        let v = resolve_first(&record, &["amount", "OrderTotal.Amount"]);
        assert_eq!(v, Some(&json!("10.00")));
    }
}
