//! Core types for gin-core.
//!
//! Search results stay as untyped [`Record`] maps because the backend
//! contract is loose. [`Entity`] is the typed view used on write paths and
//! for display. The remaining types back the metadata, attribute and
//! relationship admin screens, which have no backend yet.

use crate::name::{normalize_record_name, NormalizedName};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An opaque backend record: field name to value.
pub type Record = serde_json::Map<String, Value>;

/// Two-level entity classification. `major` partitions search requests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Kind {
    #[serde(default, deserialize_with = "null_default")]
    pub major: String,
    #[serde(default, deserialize_with = "null_default")]
    pub minor: String,
}

impl Kind {
    pub fn new(major: impl Into<String>, minor: impl Into<String>) -> Self {
        Self {
            major: major.into(),
            minor: minor.into(),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

/// An OpenGIN entity.
///
/// Timestamps are kept as the strings the backend sends; an empty
/// `terminated` means the entity is still live.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub kind: Kind,
    #[serde(default, deserialize_with = "null_default")]
    pub created: String,
    #[serde(default, deserialize_with = "null_default")]
    pub terminated: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: NormalizedName,
    #[serde(default, deserialize_with = "null_default")]
    pub metadata: Vec<MetadataEntry>,
    #[serde(default, deserialize_with = "null_default")]
    pub attributes: Vec<Value>,
    #[serde(default, deserialize_with = "null_default")]
    pub relationships: Vec<Value>,
}

impl Entity {
    /// Read a backend record, decoding a legacy string name first. Missing and
    /// null fields take their defaults; only a missing `id` is an error.
    pub fn from_record(mut record: Record) -> Result<Self, serde_json::Error> {
        normalize_record_name(&mut record);
        serde_json::from_value(Value::Object(record))
    }

    pub fn to_record(&self) -> Record {
        match serde_json::to_value(self) {
            Ok(Value::Object(record)) => record,
            _ => Record::new(),
        }
    }

    /// The body sent on update. `kind` is immutable after creation and is
    /// never part of an update.
    pub fn to_update_payload(&self) -> Record {
        let mut record = self.to_record();
        record.remove("kind");
        record
    }
}

/// Whether a bulk listing came from the backend or from the static sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    /// The backend failed and the listing is demo data.
    Fallback,
}

/// Result of listing every entity across all major kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityListing {
    pub entities: Vec<Record>,
    pub source: DataSource,
}

impl EntityListing {
    pub fn live(entities: Vec<Record>) -> Self {
        Self {
            entities,
            source: DataSource::Live,
        }
    }

    pub fn fallback(entities: Vec<Record>) -> Self {
        Self {
            entities,
            source: DataSource::Fallback,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.source == DataSource::Fallback
    }
}

// ---------------------------------------------------------------------------
// Admin screen types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub id: String,
    pub key: String,
    pub value: String,
}

/// Tabular attribute value. Each row maps column name to cell text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeTable {
    pub columns: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: String,
    pub name: String,
    pub value: AttributeTable,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub key: String,
    pub related_entity_id: String,
    pub start_time: String,
    pub end_time: String,
}

fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
