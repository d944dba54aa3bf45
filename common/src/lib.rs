//! Models shared between the lookup service and its clients.
//!
//! - `model`: domain values assembled while serving a lookup (identity, geo, local
//!   timestamp, access log row).
//! - `requests`: JSON bodies accepted by the HTTP API.
//! - `responses`: JSON bodies returned by the HTTP API.

pub mod model;
pub mod requests;
pub mod responses;
