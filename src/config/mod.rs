/// Main configuration module.
/// 
/// Re-exports submodules for game, matchmaking, server and statistics configuration.
pub mod matchmaking;
pub mod game;
pub mod server;
pub mod stats;
