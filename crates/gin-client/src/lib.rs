//! gin-client: HTTP clients for the services behind the OpenGIN console.
//!
//! - [`EntityClient`] talks to the OpenGIN read and ingestion APIs.
//! - [`ExtractionClient`] drives the PDF extraction pipeline API.
//!
//! Both are generic over a [`Transport`] so harnesses can substitute scripted
//! backends; [`HyperTransport`] is the production implementation.

pub mod entity;
pub mod error;
pub mod extraction;
pub mod transport;

pub use entity::EntityClient;
pub use error::ClientError;
pub use extraction::{ExtractionClient, ExtractionRequest, JobResults};
pub use transport::{ApiRequest, ApiResponse, HyperTransport, Transport, TransportError};
