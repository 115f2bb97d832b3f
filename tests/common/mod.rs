//! Shared test utilities for gin integration harnesses.
//!
//! Import what you need via `mod common; use common::*;` at the top of each
//! harness file. The fake servers bind to 127.0.0.1 on a random port, so
//! harnesses can run in parallel.

#![allow(dead_code)]

pub mod assertions;
pub mod fake_opengin_api;
pub mod fake_pipeline_api;
pub mod fixtures;

pub use fixtures::*;
