use actix::prelude::*;

use crate::errors::CommandError;
use crate::game::state::{SessionId, SessionSnapshot};
use crate::server::matchmaking::types::Identity;

/// Message: play `position` for `identity`. Replies with the new snapshot.
#[derive(Message, Debug)]
#[rtype(result = "Result<SessionSnapshot, CommandError>")]
pub struct ApplyMove {
    pub identity: Identity,
    pub position: i64,
}

/// Message: reset a finished game.
#[derive(Message, Debug)]
#[rtype(result = "Result<SessionSnapshot, CommandError>")]
pub struct Rematch {
    pub identity: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    Left(Identity),
    Disconnected(Identity),
}

impl TerminationReason {
    pub fn identity(&self) -> &str {
        match self {
            TerminationReason::Left(id) | TerminationReason::Disconnected(id) => id,
        }
    }
}

/// Message: end the session without attributing a result.
#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct Terminate {
    pub reason: TerminationReason,
}

/// Message (worker -> coordinator): the session aborted itself and must be purged.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
#[rtype(result = "()")]
pub struct SessionClosed {
    pub session_id: SessionId,
}
