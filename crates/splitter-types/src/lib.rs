//! Common types module for the CSV order splitter.
//!
//! This module defines the data model shared by the codec, the platform client,
//! the split workflow and the HTTP surface. Inbound orders arrive from the
//! platform's webhook, CSV rows come from the referenced file, child order
//! requests go back out to the platform, and row outcomes are returned to the caller.

/// API request and response bodies for the HTTP endpoints.
pub mod api;
/// Outbound order-creation payloads and the platform's reply.
pub mod child_order;
/// Parsed CSV rows keyed by header column.
pub mod csv_row;
/// Inbound order payloads delivered by the platform webhook.
pub mod order;
/// Per-row results of a split run.
pub mod outcome;
/// Redacted string wrapper for credentials.
pub mod secret_string;

pub use api::*;
pub use child_order::*;
pub use csv_row::{columns, CsvRow};
pub use order::*;
pub use outcome::*;
pub use secret_string::SecretString;
