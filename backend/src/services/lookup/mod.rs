//! # Serial Lookup Service
//!
//! Answers "which date belongs to this serial number" and records who asked.
//!
//! ## Registered routes (under `/api`)
//!
//! *   **`GET /api`**:
//!     - **Handler**: `banner::process`
//!     - **Description**: Liveness check, returns `{"message": ...}`.
//!
//! *   **`POST /api/getDate`**:
//!     - **Handler**: `get_date::process`
//!     - **Description**: Expects `{"serial": ..., "uuid": ...}` where `uuid` is the
//!       optional client identifier. Replies `Success` with the date, `None` (404) when
//!       the serial is unknown, or `Error` (400 for a missing serial, 500 when the
//!       data source cannot be read). Every answered lookup queues one access log row.

mod banner;
mod get_date;

use crate::error::AppError;
use actix_web::web::{get, post, scope, JsonConfig};
use actix_web::Scope;
use log::warn;

const API_PATH: &str = "/api";

/// Configures and returns the Actix scope for the lookup routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .app_data(json_config())
        .route("", get().to(banner::process))
        .route("/getDate", post().to(get_date::process))
}

/// An unreadable body counts as a body without a serial.
fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, req| {
        warn!("Rejected body on {}: {}", req.path(), err);
        AppError::MissingSerial.into()
    })
}
