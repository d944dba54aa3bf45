//! Unified error type for the lookup service.
//!
//! Every adapter returns `AppError`; the actix handlers turn it into the JSON body
//! the client sees. Only validation, not-found and upstream faults ever reach a
//! response. Geo and log-write failures are absorbed where they happen.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::DateResponse;
use thiserror::Error;

pub const MISSING_SERIAL_MESSAGE: &str = "Numéro de série manquant";
pub const NOT_FOUND_MESSAGE: &str = "Aucune date trouvée pour ce numéro de série";
pub const SERVER_ERROR_MESSAGE: &str = "Erreur serveur";

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Client-facing outcomes
    // ---------------------------
    #[error("serial number missing from request")]
    MissingSerial,

    #[error("no date recorded for serial {0}")]
    SerialNotFound(String),

    // ---------------------------
    // Upstream (data source, tabular store, geo service)
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream {url} answered {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("malformed upstream payload: {0}")]
    Payload(String),

    // ---------------------------
    // Local
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingSerial => StatusCode::BAD_REQUEST,
            AppError::SerialNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::MissingSerial => DateResponse::Error {
                message: MISSING_SERIAL_MESSAGE.to_string(),
            },
            AppError::SerialNotFound(_) => DateResponse::NotFound {
                message: NOT_FOUND_MESSAGE.to_string(),
            },
            _ => DateResponse::Error {
                message: SERVER_ERROR_MESSAGE.to_string(),
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
