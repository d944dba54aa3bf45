//! # Serial Date Lookup
//!
//! Backend logic for `POST /api/getDate`.
//!
//! ## Workflow
//!
//! 1.  **Validation**: the body must carry a non-blank `serial`. Anything else ends
//!     the request with `400` before any upstream call is made.
//!
//! 2.  **Fetch**: the configured `DateSource` is queried while the client's IP is
//!     resolved to a country and city. Both run concurrently.
//!
//! 3.  **Answer**: a data source fault becomes `500` and nothing is logged. A hit
//!     becomes `200 Success`, a miss `404 None`.
//!
//! 4.  **Access log**: for hits and misses, the client identifier is decoded, the
//!     current time is expressed in Paris time and the resulting `LogEntry` is queued
//!     on the `LogState` channel. Queuing never waits and never fails the request.

use crate::adapters::clock::paris_stamp;
use crate::error::AppError;
use crate::state::LookupState;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use common::model::geo::GeoInfo;
use common::model::identity::UNKNOWN;
use common::model::log_entry::LogEntry;
use common::requests::GetDateRequest;
use common::responses::DateResponse;
use futures_util::future::join;
use log::{error, info};
use std::net::SocketAddr;
use uuid::Uuid;

/// Actix web handler for `POST /api/getDate`.
///
/// Validates the serial, looks it up in the configured data source and queues an
/// access log row for the outcome.
///
/// # Arguments
/// * `req` - The incoming request, used for the client address.
/// * `state` - The shared `LookupState`, injected by Actix.
/// * `payload` - The JSON body with the `serial` and the optional client `uuid`.
///
/// # Returns
/// - `200 OK` with `{status: "Success", date}` when the serial is known.
/// - `400 Bad Request` when the serial is missing or blank.
/// - `404 Not Found` with `{status: "None"}` when the serial is unknown.
/// - `500 Internal Server Error` when the data source cannot be read.
pub(crate) async fn process(
    req: HttpRequest,
    state: web::Data<LookupState>,
    payload: web::Json<GetDateRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let serial = payload
        .serial
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingSerial)?
        .to_string();

    let request_id = Uuid::new_v4();
    let client_ip = client_ip(&req, state.trust_forwarded);
    info!("Lookup {request_id}: serial '{serial}' from {client_ip}");

    let geo = async {
        match state.log {
            Some(_) => state.geo.resolve(&client_ip).await,
            None => GeoInfo::default(),
        }
    };
    let (found, geo) = join(state.source.find_date(&serial), geo).await;

    let found = found.map_err(|e| {
        error!("Lookup {request_id}: data source failed: {e}");
        e
    })?;

    if let Some(log) = &state.log {
        let identity = state.decoder.decode(payload.uuid.as_deref().unwrap_or_default());
        let entry = LogEntry::new(
            paris_stamp(Utc::now()),
            identity,
            client_ip,
            geo,
            serial.clone(),
            found.clone(),
        );
        log.dispatch(request_id, entry);
    }

    match found {
        Some(date) => Ok(HttpResponse::Ok().json(DateResponse::Success { date })),
        None => Err(AppError::SerialNotFound(serial)),
    }
}

/// Address of the caller without a port.
///
/// With `trust_forwarded` the `Forwarded` / `X-Forwarded-For` headers win over the
/// peer address. Clients can set those headers freely, so this is only meaningful
/// behind a proxy that rewrites them.
fn client_ip(req: &HttpRequest, trust_forwarded: bool) -> String {
    if trust_forwarded {
        if let Some(raw) = req.connection_info().realip_remote_addr() {
            return without_port(raw);
        }
    }
    match req.peer_addr() {
        Some(addr) => addr.ip().to_string(),
        None => UNKNOWN.to_string(),
    }
}

fn without_port(raw: &str) -> String {
    match raw.parse::<SocketAddr>() {
        Ok(addr) => addr.ip().to_string(),
        Err(_) => raw
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string(),
    }
}
