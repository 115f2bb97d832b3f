//! Domain-specific assertion macros for gin harnesses.
//!
//! These wrap `pretty_assertions` so a failure shows a readable diff of
//! entity ids rather than whole records.

/// Assert the ids of a record list, in order.
///
/// ```rust,ignore
/// assert_entity_ids!(listing.entities, ["p1", "o1"]);
/// ```
#[macro_export]
macro_rules! assert_entity_ids {
    ($records:expr, [$($id:expr),* $(,)?]) => {{
        let actual: Vec<String> = $records
            .iter()
            .map(|r| r.get("id").and_then(|v| v.as_str()).unwrap_or("<no id>").to_string())
            .collect();
        let expected: Vec<String> = vec![$($id.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "entity ids differ");
    }};
}

/// Assert that a record's `name` has been decoded to the expected text.
#[macro_export]
macro_rules! assert_name_value {
    ($record:expr, $expected:expr) => {{
        let record: &serde_json::Map<String, serde_json::Value> = &$record;
        match record.get("name").and_then(|n| n.get("value")) {
            Some(serde_json::Value::String(actual)) => {
                pretty_assertions::assert_eq!(actual.as_str(), $expected)
            }
            other => panic!(
                "assert_name_value! failed: record {:?} has no decoded name; name = {:?}",
                record.get("id"),
                other
            ),
        }
    }};
}
