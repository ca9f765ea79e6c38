use actix::prelude::*;
use serde::{Serialize, Deserialize};

use crate::errors::CommandError;
use crate::game::state::{SessionId, SessionSnapshot};
use super::types::Identity;

/// Connection reference: anything able to receive server messages for one client.
pub type ClientAddr = Recipient<ServerWsMessage>;

// Message client -> serveur
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    FindMatch,
    CancelQueue,
    MakeMove {
        session_id: SessionId,
        position: i64,
    },
    RequestRematch {
        session_id: SessionId,
    },
    LeaveGame {
        session_id: SessionId,
    },
    Ping,
}

// Message serveur -> client
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    Registered {
        identity: Identity,
        username: String,
    },
    Searching {
        queue_position: usize,
    },
    QueueCancelled,
    SessionStarted(SessionSnapshot),
    SessionUpdated(SessionSnapshot),
    MoveAccepted(SessionSnapshot),
    RematchAccepted(SessionSnapshot),
    LeftSession {
        session_id: SessionId,
    },
    OpponentLeft {
        session_id: SessionId,
    },
    SessionAborted {
        session_id: SessionId,
    },
    SessionKicked {
        reason: String,
    },
    Pong,
    Error {
        code: String,
        message: String,
        context: Option<String>,
    },
}

impl ServerWsMessage {
    pub fn error(code: &str, message: &str, context: Option<&str>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.to_string(),
            context: context.map(str::to_string),
        }
    }

    /// Error frame for a rejected command.
    pub fn rejected(err: &CommandError, context: Option<&str>) -> Self {
        Self::error(err.code(), &err.to_string(), context)
    }
}
