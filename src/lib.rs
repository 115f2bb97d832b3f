//! gin: OpenGIN console.
//!
//! Command-line front end for the OpenGIN entity graph and the PDF extraction
//! pipeline. The binary in `main.rs` only parses arguments and sets up
//! logging; everything it runs lives in [`commands`] so that integration
//! harnesses can drive it directly.
//!
//! # Architecture
//!
//! ```text
//! cli ──► commands ──► gin_client::{EntityClient, ExtractionClient} ──► HTTP
//!             │                      │
//!             │                      └──► gin_core::{response, name}
//!             └──► gin_core::store (demo admin data)
//! ```

pub mod cli;
pub mod commands;

pub use gin_client::{EntityClient, ExtractionClient};
pub use gin_core::config::Config;
