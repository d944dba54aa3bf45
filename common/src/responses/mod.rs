use serde::{Deserialize, Serialize};

/// Body of every `POST /api/getDate` response, tagged by its `status` field.
///
/// Serialises as `{"status":"Success","date":..}`, `{"status":"None","message":..}`
/// or `{"status":"Error","message":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum DateResponse {
    Success { date: String },
    #[serde(rename = "None")]
    NotFound { message: String },
    Error { message: String },
}

/// Liveness banner returned by `GET /` and `GET /api`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub message: String,
}
