//! HTTP and WebSocket routing configuration.
//!
//! One WebSocket endpoint carries the whole client protocol; the HTTP endpoints expose
//! player statistics read-only.

use actix_web::web;
use crate::server::api::{leaderboard, player_stats};
use crate::server::matchmaking::session::ws_connect;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ws")
            .to(ws_connect)
    )
    .service(
        web::resource("/api/leaderboard")
            .route(web::get().to(leaderboard))
    )
    .service(
        web::resource("/api/player/{identity}/stats")
            .route(web::get().to(player_stats))
    );
}
