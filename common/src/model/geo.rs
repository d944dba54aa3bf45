use crate::model::identity::UNKNOWN;
use serde::{Deserialize, Serialize};

/// Country and city resolved from a client IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoInfo {
    pub country: String,
    pub city: String,
}

impl Default for GeoInfo {
    fn default() -> Self {
        Self {
            country: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
        }
    }
}
