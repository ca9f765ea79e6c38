// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the backend server components, including:
//! - Application state management and HTTP/WebSocket routing
//! - The session coordinator (queue, pairing, session lifecycle)
//! - Matchmaking primitives (wait queue, client protocol, WebSocket sessions)
//! - Per-session workers and the live session registry
//! - The statistics aggregator and its read-only API

pub mod state;
pub mod router;
pub mod api;
pub mod coordinator;
pub mod directory;
pub mod matchmaking;
pub mod game_session;
pub mod stats;
pub mod ws_error;
