use serde::{Deserialize, Serialize};

/// Placeholder used for any field that could not be recovered.
pub const UNKNOWN: &str = "Unknown";

/// The decoded form of the opaque client identifier sent as `uuid`.
///
/// Only ever persisted as three columns of a `LogEntry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIdentity {
    pub user: String,
    pub machine: String,
    pub copy: u32,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            user: UNKNOWN.to_string(),
            machine: UNKNOWN.to_string(),
            copy: 0,
        }
    }
}
