use actix_web::HttpResponse;
use common::responses::Banner;

const API_BANNER: &str = "L'API fonctionne correctement";

pub(crate) async fn process() -> HttpResponse {
    HttpResponse::Ok().json(Banner {
        message: API_BANNER.to_string(),
    })
}
