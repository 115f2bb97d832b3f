//! Legacy name decoding.
//!
//! Older backend builds serialize an entity name as a JSON *string* holding a
//! protobuf-style object, e.g. `{"value":"48656c6c6f","startTime":"..."}`,
//! where `value` is hex-encoded UTF-8. [`decode_name`] turns either that form
//! or an already-structured object into a [`NormalizedName`].
//!
//! Decoding never fails. Every degraded path logs a warning and falls back to
//! the most literal reading of the input.
//!
//! Known limitation: a literal name made only of hex digits (`"deadbeef"`,
//! `"cafe"`) cannot be told apart from an encoded one and is decoded as hex.
//! An odd number of hex digits is not a byte sequence and is kept verbatim
//! (`"abc"` stays `"abc"`) rather than decoded up to the last full pair.

use crate::types::Record;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

static HEX_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]+$").expect("hex pattern must compile"));

/// A display name with its validity window. Absent bounds are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedName {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl NormalizedName {
    /// A name with no time bounds.
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "value": self.value,
            "startTime": self.start_time,
            "endTime": self.end_time,
        })
    }
}

/// Normalize a `name` field of any JSON shape.
///
/// Strings go through [`decode_name_str`]. Objects are read field by field
/// without hex decoding, since only the serialized form was ever encoded.
pub fn decode_name(raw: &Value) -> NormalizedName {
    match raw {
        Value::String(s) => decode_name_str(s),
        Value::Object(fields) => NormalizedName {
            value: text_field(fields, "value"),
            start_time: text_field(fields, "startTime"),
            end_time: text_field(fields, "endTime"),
        },
        Value::Null => NormalizedName::default(),
        other => {
            tracing::warn!(name = %other, "unexpected name type, using its JSON text");
            NormalizedName::literal(other.to_string())
        }
    }
}

/// Decode the legacy serialized-string name form.
///
/// Input that is not a JSON object (plain text, numbers, arrays) is taken
/// verbatim as the display value.
pub fn decode_name_str(raw: &str) -> NormalizedName {
    let fields = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) | Err(_) => {
            tracing::warn!(name = raw, "failed to parse serialized name, using it verbatim");
            return NormalizedName::literal(raw);
        }
    };

    let value = match fields.get("value") {
        Some(Value::String(v)) => decode_hex_value(v),
        _ => text_field(&fields, "value"),
    };

    NormalizedName {
        value,
        start_time: text_field(&fields, "startTime"),
        end_time: text_field(&fields, "endTime"),
    }
}

/// Replace a string `name` field with its decoded object form. Records whose
/// name is already structured (or missing) are left alone.
pub fn normalize_record_name(record: &mut Record) {
    if let Some(Value::String(raw)) = record.get("name") {
        let decoded = decode_name_str(raw);
        record.insert("name".to_string(), decoded.to_value());
    }
}

fn decode_hex_value(value: &str) -> String {
    if !HEX_VALUE.is_match(value) {
        return value.to_string();
    }
    match hex::decode(value) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|err| {
            tracing::warn!(value, "hex name value is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }),
        Err(err) => {
            tracing::warn!(value, %err, "failed to decode hex name value");
            value.to_string()
        }
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
