//! Read-only HTTP API over the statistics aggregator.

use actix_web::{web, HttpResponse};
use actix_web::http::StatusCode;
use log::error;

use crate::server::state::AppState;
use crate::server::stats::{GetLeaderboard, GetPlayerStats};
use crate::server::ws_error::http_error_response;

/// `GET /api/player/{identity}/stats`
pub async fn player_stats(path: web::Path<String>, data: web::Data<AppState>) -> HttpResponse {
    let identity = path.into_inner();
    match data.stats.send(GetPlayerStats { identity: identity.clone() }).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            error!("[Api] Stats lookup failed for {}: {}", identity, e);
            http_error_response(
                "STATS_UNAVAILABLE",
                "Failed to get stats",
                Some(&identity),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

/// `GET /api/leaderboard`
pub async fn leaderboard(data: web::Data<AppState>) -> HttpResponse {
    match data.stats.send(GetLeaderboard).await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => {
            error!("[Api] Leaderboard lookup failed: {}", e);
            http_error_response(
                "STATS_UNAVAILABLE",
                "Failed to get leaderboard",
                None,
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}
