//! Liveness banner served at the site root.

use actix_web::web::{get, resource};
use actix_web::{HttpResponse, Resource};
use common::responses::Banner;

const ROOT_BANNER: &str = "Serveur de dates opérationnel";

/// `GET /`
pub fn configure_routes() -> Resource {
    resource("/").route(get().to(process))
}

async fn process() -> HttpResponse {
    HttpResponse::Ok().json(Banner {
        message: ROOT_BANNER.to_string(),
    })
}
