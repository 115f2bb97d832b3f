//! Response unwrapper: one decoder for every search envelope the backend
//! produces.
//!
//! Observed shapes: a bare array, `{ "body": [...] }`, an empty result in
//! either shape, or an empty body. All "no results" forms collapse to
//! [`Unwrapped::Absent`]. Shapes that are not modeled yet pass through as
//! [`Unwrapped::Unrecognized`] so callers can decide what to do with them.

use serde_json::Value;

/// Canonical form of a search response.
#[derive(Debug, Clone, PartialEq)]
pub enum Unwrapped {
    /// Null, missing, or an empty result set.
    Absent,
    /// A non-empty sequence of records, in backend order.
    Records(Vec<Value>),
    /// Any other shape, returned as received.
    Unrecognized(Value),
}

impl Unwrapped {
    pub fn is_absent(&self) -> bool {
        matches!(self, Unwrapped::Absent)
    }

    /// The records, or an empty vector for the other variants.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            Unwrapped::Records(records) => records,
            Unwrapped::Absent | Unwrapped::Unrecognized(_) => Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Normalize an already-decoded payload.
///
/// Rules apply in order: absent input, a `body` array, a bare array, then
/// pass-through.
pub fn unwrap_response(data: Option<Value>) -> Unwrapped {
    match data {
        None | Some(Value::Null) => Unwrapped::Absent,
        Some(Value::Object(mut fields)) => match fields.remove("body") {
            Some(Value::Array(body)) => non_empty(body),
            Some(other) => {
                fields.insert("body".to_string(), other);
                Unwrapped::Unrecognized(Value::Object(fields))
            }
            None => Unwrapped::Unrecognized(Value::Object(fields)),
        },
        Some(Value::Array(items)) => non_empty(items),
        Some(other) => Unwrapped::Unrecognized(other),
    }
}

/// Decode a raw HTTP body and unwrap it. An empty or whitespace-only body
/// means "no data".
pub fn parse_search_body(body: &[u8]) -> Result<Unwrapped, ResponseError> {
    if body.trim_ascii().is_empty() {
        return Ok(Unwrapped::Absent);
    }
    let data: Value = serde_json::from_slice(body)?;
    Ok(unwrap_response(Some(data)))
}

fn non_empty(items: Vec<Value>) -> Unwrapped {
    if items.is_empty() {
        Unwrapped::Absent
    } else {
        Unwrapped::Records(items)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
