/// Matchmaking module: wait queue, client protocol, and the client WebSocket session.

pub mod queue;
pub mod session;
pub mod messages;
pub mod types;
