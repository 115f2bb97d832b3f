//! gin-core: shared data model for the OpenGIN console.
//!
//! The OpenGIN backend is inconsistent about how it wraps search results and
//! how it serializes entity names. This crate owns the two normalization
//! steps that reconcile that contract, plus the typed records and
//! configuration shared by the client crate and the binary.
//!
//! # Layout
//!
//! ```text
//! raw body ──► response::parse_search_body ──► Unwrapped ──► Vec<Record>
//!                                                              │
//!                                        name::normalize_record_name
//!                                                              │
//!                                                   types::Entity (typed view)
//! ```
//!
//! Nothing here performs I/O except [`config::Config::load`].

pub mod config;
pub mod name;
pub mod response;
pub mod sample;
pub mod store;
pub mod types;

pub use name::{decode_name, decode_name_str, NormalizedName};
pub use response::{parse_search_body, unwrap_response, Unwrapped};
pub use types::{DataSource, Entity, EntityListing, Kind, Record};
