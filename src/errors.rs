//! Command-scoped error taxonomy.
//!
//! Every error here is returned to the single requester of a command. None of them is
//! process-fatal and a rejected command never mutates state or triggers a broadcast.

use thiserror::Error;

/// A move that the game rules refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("position must be between 0 and 8")]
    InvalidPosition,
    #[error("cell is already occupied")]
    CellOccupied,
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("game is over")]
    GameOver,
}

/// A command that refers to something the server does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("session not found")]
    SessionNotFound,
    #[error("player is not waiting in the queue")]
    NotQueued,
    #[error("player is not connected")]
    NotConnected,
    #[error("player is not seated in this session")]
    NotParticipant,
}

/// A command that is not allowed in the current lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("cannot rematch while the game is still in progress")]
    CannotRematchWhileActive,
    #[error("player is already playing in a session")]
    AlreadyInSession,
    #[error("session was aborted after an internal error")]
    SessionAborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    State(#[from] StateError),
}

impl CommandError {
    /// Stable code sent to clients in error frames.
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Validation(ValidationError::InvalidPosition) => "INVALID_POSITION",
            CommandError::Validation(ValidationError::CellOccupied) => "CELL_OCCUPIED",
            CommandError::Validation(ValidationError::NotYourTurn) => "NOT_YOUR_TURN",
            CommandError::Validation(ValidationError::GameOver) => "GAME_OVER",
            CommandError::Lookup(LookupError::SessionNotFound) => "SESSION_NOT_FOUND",
            CommandError::Lookup(LookupError::NotQueued) => "NOT_QUEUED",
            CommandError::Lookup(LookupError::NotConnected) => "NOT_CONNECTED",
            CommandError::Lookup(LookupError::NotParticipant) => "NOT_A_PARTICIPANT",
            CommandError::State(StateError::CannotRematchWhileActive) => "CANNOT_REMATCH",
            CommandError::State(StateError::AlreadyInSession) => "ALREADY_IN_SESSION",
            CommandError::State(StateError::SessionAborted) => "SESSION_ABORTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_wrapped_variant() {
        let err: CommandError = ValidationError::CellOccupied.into();
        assert_eq!(err.code(), "CELL_OCCUPIED");
        let err: CommandError = StateError::CannotRematchWhileActive.into();
        assert_eq!(err.code(), "CANNOT_REMATCH");
        assert_eq!(err.to_string(), "cannot rematch while the game is still in progress");
    }
}
