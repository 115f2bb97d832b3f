//! Entity payloads in the shapes the OpenGIN backend actually sends.

use serde_json::{json, Value};

/// Hex-encode a name the way older ingestion builds stored it: the UTF-8
/// bytes of `text` as lowercase hex, wrapped in a JSON object string.
pub fn legacy_name(text: &str, start_time: &str) -> String {
    let hex: String = text.bytes().map(|b| format!("{b:02x}")).collect();
    json!({ "value": hex, "startTime": start_time, "endTime": "" }).to_string()
}

/// A record with an already structured name.
pub fn entity_json(id: &str, major: &str, name: &str) -> Value {
    json!({
        "id": id,
        "kind": { "major": major, "minor": "" },
        "created": "2024-01-01T00:00:00Z",
        "terminated": "",
        "name": { "value": name, "startTime": "2024-01-01T00:00:00Z", "endTime": "" },
        "metadata": [],
        "attributes": [],
        "relationships": [],
    })
}

/// A record whose name is a serialized, hex-encoded string.
pub fn legacy_entity_json(id: &str, major: &str, name: &str) -> Value {
    let mut record = entity_json(id, major, "");
    record["name"] = Value::String(legacy_name(name, "2024-01-01T00:00:00Z"));
    record
}

/// `{"body": [...]}`, the envelope current read API builds use.
pub fn enveloped(records: &[Value]) -> String {
    json!({ "body": records }).to_string()
}

/// A bare JSON array, the shape older builds use.
pub fn bare(records: &[Value]) -> String {
    Value::Array(records.to_vec()).to_string()
}
