//! Store: explicit in-memory collections for the admin screens that have no
//! backend yet (metadata, attributes, relationships).
//!
//! Each store is an owned value. Build one per process or per test; nothing
//! is shared between instances.

use crate::sample;
use crate::types::{Attribute, Metadata, Relationship};

/// Records addressable by a string id.
pub trait Keyed {
    /// Label used in error messages ("Metadata", "Attribute", ...).
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

impl Keyed for Metadata {
    const LABEL: &'static str = "Metadata";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Keyed for Attribute {
    const LABEL: &'static str = "Attribute";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Keyed for Relationship {
    const LABEL: &'static str = "Relationship";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{label} not found: {id}")]
    NotFound { label: &'static str, id: String },
}

/// Insertion-ordered collection of records.
#[derive(Debug, Clone)]
pub struct MemoryStore<T> {
    records: Vec<T>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Snapshot of every record, in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.records.clone()
    }

    /// Append a record. Ids are not checked for uniqueness.
    pub fn create(&mut self, record: T) -> T {
        self.records.push(record.clone());
        record
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Keyed + Clone> MemoryStore<T> {
    /// First record with this id.
    pub fn get(&self, id: &str) -> Option<T> {
        self.records.iter().find(|r| r.id() == id).cloned()
    }

    /// Replace the first record with the same id.
    pub fn update(&mut self, record: T) -> Result<T, StoreError> {
        let Some(slot) = self.records.iter_mut().find(|r| r.id() == record.id()) else {
            return Err(StoreError::NotFound {
                label: T::LABEL,
                id: record.id().to_string(),
            });
        };
        *slot = record.clone();
        Ok(record)
    }
}

impl MemoryStore<Attribute> {
    pub fn by_name(&self, name: &str) -> Vec<Attribute> {
        self.records
            .iter()
            .filter(|a| a.name == name)
            .cloned()
            .collect()
    }
}

/// One store per admin screen, seeded with the demo data.
#[derive(Debug, Clone)]
pub struct AdminStores {
    pub metadata: MemoryStore<Metadata>,
    pub attributes: MemoryStore<Attribute>,
    pub relationships: MemoryStore<Relationship>,
}

impl AdminStores {
    pub fn seeded() -> Self {
        Self {
            metadata: MemoryStore::with_records(sample::sample_metadata()),
            attributes: MemoryStore::with_records(sample::sample_attributes()),
            relationships: MemoryStore::with_records(sample::sample_relationships()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
