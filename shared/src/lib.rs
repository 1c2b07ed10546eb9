//! Shared types and models for Bloom Climate
//!
//! This crate contains the data model and the series aggregator shared
//! between the relay backend, the client, and the browser (via WASM).

pub mod aggregation;
pub mod export;
pub mod models;
pub mod types;
pub mod validation;

pub use aggregation::*;
pub use export::*;
pub use models::*;
pub use types::*;
pub use validation::*;
