//! Local stand-in for the remote services the adapters call.
//!
//! `serve` binds an actix server on an ephemeral port. Every request it receives is
//! recorded, and every request gets the same canned reply.

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use std::sync::{Arc, Mutex};

/// One request as the stand-in saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path and query, as sent on the wire.
    pub uri: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

type Journal = Arc<Mutex<Vec<Recorded>>>;

pub struct Upstream {
    pub base_url: String,
    journal: Journal,
}

impl Upstream {
    pub fn requests(&self) -> Vec<Recorded> {
        self.journal.lock().unwrap().clone()
    }
}

/// Starts the stand-in. Must be called from inside an actix runtime.
pub fn serve(status: StatusCode, content_type: &'static str, body: impl Into<String>) -> Upstream {
    let journal: Journal = Arc::default();
    let reply = Reply {
        status,
        content_type,
        body: body.into(),
    };

    let shared = journal.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(shared.clone()))
            .app_data(web::Data::new(reply.clone()))
            .default_service(web::to(record))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    Upstream {
        base_url: format!("http://{addr}"),
        journal,
    }
}

async fn record(
    req: HttpRequest,
    body: web::Bytes,
    journal: web::Data<Journal>,
    reply: web::Data<Reply>,
) -> HttpResponse {
    journal.lock().unwrap().push(Recorded {
        method: req.method().to_string(),
        uri: req.uri().to_string(),
        authorization: req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    HttpResponse::build(reply.status)
        .content_type(reply.content_type)
        .body(reply.body.clone())
}
