//! Adapters around the service's external collaborators and pure helpers.
//!
//! Each collaborator sits behind a trait so the lookup handler can be built with
//! fakes in tests: `DateSource`, `GeoResolver`, `IdentifierDecoder`, `TableStore`.

pub mod clock;
pub mod data_source;
pub mod geo;
pub mod identifier;
pub mod log_writer;
pub mod table_store;
#[cfg(test)]
pub(crate) mod upstream;
