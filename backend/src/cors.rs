//! Cross-origin access for browser clients on any origin.
//!
//! `headers()` stamps every response with the allow headers; `preflight` answers
//! any `OPTIONS` request with an empty `204` before routing happens.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::{header, Method};
use actix_web::middleware::{DefaultHeaders, Next};
use actix_web::{Error, HttpResponse};

pub fn headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"))
}

pub async fn preflight<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    if req.method() == Method::OPTIONS {
        let res = HttpResponse::NoContent().finish();
        return Ok(req.into_response(res).map_into_right_body());
    }

    Ok(next.call(req).await?.map_into_left_body())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::data_source::DateSource;
    use crate::adapters::geo::GeoResolver;
    use crate::adapters::identifier::PositionDecoder;
    use crate::error::AppError;
    use crate::state::LookupState;
    use actix_web::http::StatusCode;
    use actix_web::middleware::from_fn;
    use actix_web::{test as actix_test, web, App};
    use common::model::geo::GeoInfo;
    use futures_util::future::BoxFuture;
    use futures_util::FutureExt;
    use std::sync::Arc;

    struct Empty;

    impl DateSource for Empty {
        fn find_date<'a>(
            &'a self,
            _serial: &'a str,
        ) -> BoxFuture<'a, Result<Option<String>, AppError>> {
            async { Ok(None) }.boxed()
        }
    }

    impl GeoResolver for Empty {
        fn resolve<'a>(&'a self, _ip: &'a str) -> BoxFuture<'a, GeoInfo> {
            async { GeoInfo::default() }.boxed()
        }
    }

    fn lookup_state() -> LookupState {
        LookupState {
            source: Arc::new(Empty),
            geo: Arc::new(Empty),
            decoder: Arc::new(PositionDecoder),
            log: None,
            trust_forwarded: true,
        }
    }

    #[actix_web::test]
    async fn preflight_is_204_with_allow_headers() {
        let app = actix_test::init_service(
            App::new()
                .wrap(from_fn(preflight))
                .wrap(headers())
                .app_data(web::Data::new(lookup_state()))
                .configure(crate::services::configure),
        )
        .await;

        for uri in ["/api/getDate", "/api", "/anything"] {
            let req = actix_test::TestRequest::default()
                .method(Method::OPTIONS)
                .uri(uri)
                .insert_header((header::ORIGIN, "https://app.example"))
                .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
                .to_request();
            let res = actix_test::call_service(&app, req).await;

            assert_eq!(res.status(), StatusCode::NO_CONTENT, "uri {uri}");
            assert_eq!(
                res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
                "*"
            );
            assert!(res
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_METHODS)
                .unwrap()
                .to_str()
                .unwrap()
                .contains("POST"));
            assert!(actix_test::read_body(res).await.is_empty());
        }
    }

    #[actix_web::test]
    async fn regular_and_error_responses_carry_allow_origin() {
        let app = actix_test::init_service(
            App::new()
                .wrap(from_fn(preflight))
                .wrap(headers())
                .app_data(web::Data::new(lookup_state()))
                .configure(crate::services::configure),
        )
        .await;

        let ok = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api").to_request()).await;
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(ok.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");

        let bad = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/api/getDate").to_request(),
        )
        .await;
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
        assert_eq!(bad.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    }
}
