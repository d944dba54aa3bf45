pub mod lookup;
pub mod status;

use actix_web::web::ServiceConfig;

/// Registers every HTTP route of the service.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(status::configure_routes())
        .service(lookup::configure_routes());
}
