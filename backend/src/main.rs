mod adapters;
mod config;
mod cors;
mod error;
mod log_controller;
mod services;
mod state;

use crate::config::Config;
use crate::error::AppError;
use crate::state::LookupState;
use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load().map_err(startup_error)?;
    let (lookup_state, log_pipeline) = LookupState::build(&config).map_err(startup_error)?;

    // Start the access log writer
    match log_pipeline {
        Some(pipeline) => {
            tokio::spawn(pipeline.run());
        }
        None => info!("Access log disabled"),
    }

    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(cors::preflight))
            .wrap(cors::headers())
            .wrap(Logger::default())
            .app_data(web::Data::new(lookup_state.clone()))
            .configure(services::configure)
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}

fn startup_error(e: AppError) -> std::io::Error {
    error!("Startup failed: {e}");
    std::io::Error::other(e.to_string())
}
