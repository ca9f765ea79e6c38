// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the addresses of the long-lived actors (session coordinator and statistics aggregator).
//! Used to share state between HTTP/WebSocket handlers and the actor system.

use actix::Addr;
use crate::server::coordinator::SessionCoordinator;
use crate::server::stats::StatsAggregator;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the coordinator actor (queue, pairing, session routing).
    pub coordinator: Addr<SessionCoordinator>,
    /// Address of the statistics aggregator.
    pub stats: Addr<StatsAggregator>,
}

impl AppState {
    /// Create a new AppState with the given actor addresses.
    pub fn new(coordinator: Addr<SessionCoordinator>, stats: Addr<StatsAggregator>) -> Self {
        AppState { coordinator, stats }
    }
}
