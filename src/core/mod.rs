// src/core/mod.rs

/// Typed scan results and the API's wire format.
pub mod models;

/// HTTP client for the CFSSL scan endpoint.
pub mod client;

pub mod error;

/// State machine behind the Scan page.
pub mod view_model;
