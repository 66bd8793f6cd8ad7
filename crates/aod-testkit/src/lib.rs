//! aod-testkit
//!
//! Fixture payloads for scenario tests: the container shapes and record
//! shapes the upstream orders API has actually shipped, so extraction and
//! aggregation scenarios can be pinned against realistic inputs without
//! every test hand-rolling JSON.
//!
//! Dev-facing only. MUST NOT become a dependency of production crates.

use anyhow::{Context, Result};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Record shapes across API versions
// ---------------------------------------------------------------------------

/// Modern flat snake_case record (current API).
pub fn flat_order(id: &str, status: &str, purchase_date: &str, amount: &str) -> Value {
    json!({
        "id": id,
        "amazon_order_id": format!("111-000{id}"),
        "status": status,
        "purchase_date": purchase_date,
        "buyer_name": "Test Buyer",
        "amount": amount,
        "currency_code": "USD",
        "synced_at": "2024-05-01T12:00:00Z"
    })
}

/// Legacy PascalCase record with a nested `OrderTotal` money object.
pub fn pascal_order(order_id: &str, status: &str, purchase_date: &str, amount: &str) -> Value {
    json!({
        "AmazonOrderId": order_id,
        "OrderStatus": status,
        "PurchaseDate": purchase_date,
        "BuyerInfo": {"BuyerName": "Legacy Buyer", "BuyerEmail": "legacy@example.com"},
        "OrderTotal": {"Amount": amount, "CurrencyCode": "USD"}
    })
}

/// Record whose money pair is buried several container levels deep — only
/// graph search can find it.
pub fn deep_money_order(order_id: &str, amount: &str, currency: &str) -> Value {
    json!({
        "order_id": order_id,
        "status": "Shipped",
        "details": {
            "financial": {
                "charges": [
                    {"label": "principal", "value": {"amount": amount, "currency_code": currency}}
                ]
            }
        }
    })
}

/// Record carrying the epoch-adjacent sentinel date that marks an upstream
/// data defect.
pub fn sentinel_date_order(id: &str) -> Value {
    json!({
        "id": id,
        "status": "Pending",
        "purchase_date": "1970-01-01T00:00:00Z"
    })
}

/// Record with blank and missing fields everywhere a field could be blank
/// or missing.
pub fn degenerate_order() -> Value {
    json!({
        "id": "",
        "status": null,
        "purchase_date": "",
        "buyer_name": null
    })
}

// ---------------------------------------------------------------------------
// Container shapes
// ---------------------------------------------------------------------------

/// Bare-array payload.
pub fn bare_payload(records: Vec<Value>) -> Value {
    Value::Array(records)
}

/// `{"orders": [...]}` payload.
pub fn orders_payload(records: Vec<Value>) -> Value {
    json!({"orders": records})
}

/// `{"results": [...], "count": n}` payload (paginated API shape).
pub fn results_payload(records: Vec<Value>) -> Value {
    json!({"count": records.len(), "results": records})
}

/// A mixed-generation payload: one record per known API shape, wrapped in
/// the `orders` container.
pub fn mixed_generation_payload() -> Value {
    orders_payload(vec![
        flat_order("1", "Pending", "2024-05-01T08:00:00Z", "19.99"),
        pascal_order("902-3159896-1390416", "Unshipped", "2024-04-30T22:15:00Z", "42.50"),
        deep_money_order("777-555", "3.33", "GBP"),
        sentinel_date_order("99"),
        degenerate_order(),
    ])
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse a JSON fixture string. A malformed fixture is a genuine test-setup
/// error, not payload absence.
pub fn payload_from_str(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).context("parse fixture payload json")
}
