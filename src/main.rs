//! Main entry point for the backend server.
//!
//! Initializes the actor system, configures application state, and launches the HTTP server
//! with the client WebSocket endpoint and the statistics API.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;
use server::coordinator::SessionCoordinator;
use server::stats::StatsAggregator;

pub mod config;
mod errors;
mod server;
mod game;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    // Start the StatsAggregator actor (wins, losses, streaks per identity).
    let stats = StatsAggregator::new().start();

    // Start the SessionCoordinator actor (queue, pairing, session routing).
    let coordinator = SessionCoordinator::new(stats.clone().recipient()).start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(coordinator, stats));

    let (host, port) = config::server::bind_address();
    info!("[Server] Listening on {}:{}", host, port);

    // Start the HTTP server with WebSocket endpoints.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
