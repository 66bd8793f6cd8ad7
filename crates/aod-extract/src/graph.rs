//! Bounded breadth-first search over a record's nested object/array graph.
//!
//! Last-resort resolution for fields that the ordered fallback lists missed:
//! either a scalar whose *normalized* key matches a wanted name, or a
//! co-located amount/currency pair buried at an arbitrary depth.
//!
//! Traversal discipline:
//! - explicit queue, breadth-first, sibling properties in record order
//!   (first match wins — property order is contractual, see `preserve_order`
//!   on `serde_json` in the workspace manifest)
//! - visited set keyed by node pointer identity, so aliased or pathological
//!   structures cannot make the walk revisit a node
//! - absence of a match is a normal outcome (`None`), never an error

use std::collections::{HashSet, VecDeque};

use serde_json::Value;

use crate::resolve::{is_present, normalize_key};

/// Amount-like property names checked verbatim on each node.
const PAIR_AMOUNT_KEYS: &[&str] = &["amount", "Amount"];

/// Currency-like property names checked verbatim on each node.
const PAIR_CURRENCY_KEYS: &[&str] = &["currency_code", "CurrencyCode", "currencyCode"];

/// An amount value co-located with a currency value on a single node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoneyPair<'a> {
    pub amount: &'a Value,
    pub currency: &'a Value,
}

// ---------------------------------------------------------------------------
// Search by normalized key
// ---------------------------------------------------------------------------

/// Breadth-first search for a scalar property whose normalized key matches
/// one of `wanted_names` (normalized via [`normalize_key`]).
///
/// At each object node, properties are checked in record order; a matching
/// scalar returns immediately, container-valued properties are enqueued for
/// later levels. Scalars nested inside arrays carry no key and never match,
/// but container elements are still traversed.
pub fn find_by_normalized_key<'a>(root: &'a Value, wanted_names: &[&str]) -> Option<&'a Value> {
    let wanted: Vec<String> = wanted_names.iter().map(|n| normalize_key(n)).collect();

    let mut walk = Walk::new(root);
    while let Some(node) = walk.next_node() {
        if let Value::Object(map) = node {
            for (key, value) in map {
                if is_scalar(value) {
                    if is_present(value) && wanted.iter().any(|w| *w == normalize_key(key)) {
                        return Some(value);
                    }
                } else {
                    walk.enqueue(value);
                }
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Money-pair search
// ---------------------------------------------------------------------------

/// Breadth-first search for a node carrying both an amount-like and a
/// currency-like property, both present.
///
/// Child containers are enqueued even when the current node fails the pair
/// test, so a money object nested several levels deep is still found.
pub fn find_money_pair(root: &Value) -> Option<MoneyPair<'_>> {
    let mut walk = Walk::new(root);
    while let Some(node) = walk.next_node() {
        if let Value::Object(map) = node {
            if let Some(pair) = money_pair_on(node) {
                return Some(pair);
            }
            for value in map.values() {
                if !is_scalar(value) {
                    walk.enqueue(value);
                }
            }
        }
    }
    None
}

/// Check a single object node for the amount/currency sibling pair.
///
/// Exposed to the projector so an already-resolved `{amount, currency_code}`
/// object can be formatted directly without re-walking the record.
pub(crate) fn money_pair_on(node: &Value) -> Option<MoneyPair<'_>> {
    let map = node.as_object()?;
    let amount = PAIR_AMOUNT_KEYS
        .iter()
        .filter_map(|k| map.get(*k))
        .find(|v| is_present(v))?;
    let currency = PAIR_CURRENCY_KEYS
        .iter()
        .filter_map(|k| map.get(*k))
        .find(|v| is_present(v))?;
    Some(MoneyPair { amount, currency })
}

// ---------------------------------------------------------------------------
// Walk state
// ---------------------------------------------------------------------------

/// Queue + visited-set state for one traversal.
///
/// Nodes are identified by pointer, which is stable for the lifetime of the
/// borrowed payload. Array nodes are unpacked on dequeue: their container
/// elements feed straight back into the queue.
struct Walk<'a> {
    queue: VecDeque<&'a Value>,
    visited: HashSet<*const Value>,
}

impl<'a> Walk<'a> {
    fn new(root: &'a Value) -> Self {
        let mut walk = Walk {
            queue: VecDeque::new(),
            visited: HashSet::new(),
        };
        walk.enqueue(root);
        walk
    }

    fn enqueue(&mut self, node: &'a Value) {
        if self.visited.insert(node as *const Value) {
            self.queue.push_back(node);
        }
    }

    /// Pop the next object node, transparently unpacking array nodes.
    fn next_node(&mut self) -> Option<&'a Value> {
        while let Some(node) = self.queue.pop_front() {
            match node {
                Value::Array(items) => {
                    for item in items {
                        if !is_scalar(item) {
                            self.enqueue(item);
                        }
                    }
                }
                Value::Object(_) => return Some(node),
                _ => {}
            }
        }
        None
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
