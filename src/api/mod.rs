//! Search Service Client Module
//!
//! Everything needed to talk to the remote course search service.
//!
//! ## Overview
//! The remote service is an opaque HTTP endpoint that ranks courses for a free-text
//! query. This module owns the wire contract (request URLs and response bodies) and
//! collapses every transport problem into a single `ApiError` taxonomy, so the rest of
//! the crate never sees `reqwest` types.
//!
//! ## Submodules
//! - **`types`**: Data Transfer Objects returned by the service (`Course`, responses).
//! - **`protocol`**: Endpoint paths and query-string construction.
//! - **`error`**: The `ApiError` taxonomy (network, HTTP status, decode).
//! - **`client`**: The `SearchApi` seam and its HTTP implementation.

pub mod client;
pub mod error;
pub mod protocol;
pub mod types;
