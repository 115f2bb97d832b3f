//! Static demo data.
//!
//! Used to seed the in-memory admin stores and as the degraded result set
//! when the entity backend is unreachable.

use crate::name::NormalizedName;
use crate::types::{Attribute, AttributeTable, Entity, Kind, Metadata, Record, Relationship};
use std::collections::BTreeMap;

pub fn sample_entities() -> Vec<Entity> {
    vec![Entity {
        id: "e1".to_string(),
        kind: Kind::new("example", "test"),
        created: "2024-03-17T10:00:00Z".to_string(),
        terminated: String::new(),
        name: NormalizedName {
            value: "Sample Entity".to_string(),
            start_time: "2024-03-17T10:00:00Z".to_string(),
            end_time: String::new(),
        },
        metadata: Vec::new(),
        attributes: Vec::new(),
        relationships: Vec::new(),
    }]
}

/// [`sample_entities`] in the record form returned by entity listings.
pub fn sample_entity_records() -> Vec<Record> {
    sample_entities().iter().map(Entity::to_record).collect()
}

pub fn sample_metadata() -> Vec<Metadata> {
    [("m1", "source", "HR System"), ("m2", "version", "1.0")]
        .into_iter()
        .map(|(id, key, value)| Metadata {
            id: id.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        })
        .collect()
}

pub fn sample_relationships() -> Vec<Relationship> {
    vec![Relationship {
        id: "r1".to_string(),
        key: "REPORTS_TO".to_string(),
        related_entity_id: "e2".to_string(),
        start_time: "2023-01-01T00:00".to_string(),
        end_time: String::new(),
    }]
}

pub fn sample_attributes() -> Vec<Attribute> {
    vec![
        attribute(
            "a1",
            "Monthly Expenses",
            &["Category", "Amount", "Payment Method", "Notes"],
            &[
                &["Rent", "$2,500", "Bank Transfer", "Apartment 4B"],
                &["Utilities", "$180", "Auto-Pay", "Electric, Water, Gas"],
                &["Groceries", "$650", "Credit Card", "Weekly shopping"],
                &["Transportation", "$120", "Debit Card", "Gas and parking"],
                &["Internet", "$80", "Auto-Pay", "100 Mbps plan"],
            ],
            ("2024-01-01T00:00", "2024-01-31T23:59"),
        ),
        attribute(
            "a2",
            "Customer Orders",
            &["Order ID", "Customer", "Product", "Quantity", "Total", "Status"],
            &[
                &["ORD-1001", "Alice Johnson", "Laptop", "1", "$1,299", "Shipped"],
                &["ORD-1002", "Bob Smith", "Mouse", "3", "$89.97", "Delivered"],
                &["ORD-1003", "Carol White", "Keyboard", "2", "$239.98", "Processing"],
                &["ORD-1004", "David Brown", "Monitor", "1", "$449", "Pending"],
            ],
            ("2024-02-01T00:00", "2024-02-28T23:59"),
        ),
        attribute(
            "a3",
            "Inventory Levels",
            &["Product SKU", "Product Name", "Quantity", "Location", "Reorder Level"],
            &[
                &["TECH-001", "Wireless Mouse", "45", "Warehouse A", "20"],
                &["TECH-002", "USB-C Cable", "12", "Warehouse B", "30"],
                &["TECH-003", "Laptop Stand", "67", "Warehouse A", "15"],
                &["TECH-004", "Webcam HD", "8", "Warehouse C", "25"],
            ],
            ("2024-03-01T00:00", ""),
        ),
    ]
}

fn attribute(
    id: &str,
    name: &str,
    columns: &[&str],
    rows: &[&[&str]],
    (start_time, end_time): (&str, &str),
) -> Attribute {
    let rows = rows
        .iter()
        .map(|cells| {
            columns
                .iter()
                .zip(cells.iter())
                .map(|(column, cell)| (column.to_string(), cell.to_string()))
                .collect::<BTreeMap<_, _>>()
        })
        .collect();

    Attribute {
        id: id.to_string(),
        name: name.to_string(),
        value: AttributeTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        },
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
    }
}
