pub mod geo;
pub mod identity;
pub mod log_entry;
pub mod stamp;
