use serde::{Serialize, Deserialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

use crate::errors::{CommandError, LookupError, StateError, ValidationError};
use crate::game::engine::{apply_move, evaluate_board, validate_move, BoardEvaluation};
use crate::game::types::{Board, Outcome, Phase, Symbol};
use crate::server::matchmaking::types::{Identity, PlayerInfo};

pub type SessionId = Uuid;

/// One of the two seats of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub id: Identity,
    pub username: String,
    pub symbol: Symbol,
}

/// Full externally visible state of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub board: Board,
    pub players: [PlayerSlot; 2],
    pub current_turn: Option<Identity>,
    pub phase: Phase,
    pub winner: Option<Identity>,
    pub winning_line: Option<[usize; 3]>,
    pub is_draw: bool,
    pub game_over: bool,
    pub created_at: u64,
}

/// Broken internal bookkeeping. Aborts the session it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("turn holder {0} is not seated in the session")]
    TurnHolderNotSeated(Identity),
    #[error("board has {x} X marks and {o} O marks")]
    UnbalancedBoard { x: usize, o: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    /// Ordinary rejection, reported to the requester only.
    Rejected(CommandError),
    Fault(InvariantViolation),
}

impl From<ValidationError> for MoveRejection {
    fn from(err: ValidationError) -> Self {
        MoveRejection::Rejected(err.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveApplied {
    pub index: usize,
    pub symbol: Symbol,
    /// True when this move ended the game (won or draw).
    pub finished: bool,
}

/// Authoritative state of one paired match.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    board: Board,
    slots: [PlayerSlot; 2],
    turn_holder: Option<Identity>,
    phase: Phase,
    winner: Option<Identity>,
    winning_line: Option<[usize; 3]>,
    created_at: u64,
}

impl GameSession {
    /// Create a session from the two dequeued players. `first` plays X and moves first.
    pub fn new(id: SessionId, first: PlayerInfo, second: PlayerInfo) -> Self {
        let turn_holder = Some(first.id.clone());
        GameSession {
            id,
            board: Board::empty(),
            slots: [
                PlayerSlot { id: first.id, username: first.username, symbol: Symbol::X },
                PlayerSlot { id: second.id, username: second.username, symbol: Symbol::O },
            ],
            turn_holder,
            phase: Phase::Active,
            winner: None,
            winning_line: None,
            created_at: unix_millis(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn_holder(&self) -> Option<&str> {
        self.turn_holder.as_deref()
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn slots(&self) -> &[PlayerSlot; 2] {
        &self.slots
    }

    pub fn is_participant(&self, identity: &str) -> bool {
        self.slots.iter().any(|s| s.id == identity)
    }

    fn slot_index(&self, identity: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.id == identity)
    }

    /// Validate, apply and evaluate one move.
    ///
    /// On any rejection the session is left exactly as it was.
    pub fn submit_move(&mut self, requester: &str, position: i64) -> Result<MoveApplied, MoveRejection> {
        let index = validate_move(&self.board, position, self.phase, self.turn_holder(), requester)?;
        let seat = self
            .slot_index(requester)
            .ok_or_else(|| MoveRejection::Fault(InvariantViolation::TurnHolderNotSeated(requester.to_string())))?;
        let symbol = self.slots[seat].symbol;

        let board = apply_move(&self.board, index, symbol);
        check_balance(&board).map_err(MoveRejection::Fault)?;
        self.board = board;

        match evaluate_board(&self.board) {
            BoardEvaluation::Won { symbol: winning, line } => {
                self.phase = Phase::Won;
                self.winner = self.slots.iter().find(|s| s.symbol == winning).map(|s| s.id.clone());
                self.winning_line = Some(line);
                self.turn_holder = None;
            }
            BoardEvaluation::Draw => {
                self.phase = Phase::Draw;
                self.turn_holder = None;
            }
            BoardEvaluation::InProgress => {
                self.turn_holder = Some(self.slots[1 - seat].id.clone());
            }
        }

        Ok(MoveApplied { index, symbol, finished: self.phase != Phase::Active })
    }

    /// Reset a finished game. X (the original first mover) starts again.
    pub fn rematch(&mut self, requester: &str) -> Result<(), CommandError> {
        if !self.is_participant(requester) {
            return Err(LookupError::NotParticipant.into());
        }
        if self.phase == Phase::Active {
            return Err(StateError::CannotRematchWhileActive.into());
        }
        self.board = Board::empty();
        self.phase = Phase::Active;
        self.turn_holder = Some(self.slots[0].id.clone());
        self.winner = None;
        self.winning_line = None;
        Ok(())
    }

    /// Per-player outcomes of a finished game, `None` while the game is active.
    pub fn outcomes(&self) -> Option<[(&PlayerSlot, Outcome); 2]> {
        let outcome_for = |slot: &PlayerSlot| match (self.phase, self.winner.as_deref()) {
            (Phase::Won, Some(winner)) if winner == slot.id => Outcome::Won,
            (Phase::Won, _) => Outcome::Lost,
            _ => Outcome::Draw,
        };
        match self.phase {
            Phase::Active => None,
            _ => Some([
                (&self.slots[0], outcome_for(&self.slots[0])),
                (&self.slots[1], outcome_for(&self.slots[1])),
            ]),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            board: self.board,
            players: self.slots.clone(),
            current_turn: self.turn_holder.clone(),
            phase: self.phase,
            winner: self.winner.clone(),
            winning_line: self.winning_line,
            is_draw: self.phase == Phase::Draw,
            game_over: self.phase != Phase::Active,
            created_at: self.created_at,
        }
    }

    #[cfg(test)]
    pub(crate) fn force_cell(&mut self, index: usize, symbol: Symbol) {
        self.board = self.board.with_cell(index, Some(symbol));
    }
}

/// X always moves first, so X marks equal O marks or lead by one.
fn check_balance(board: &Board) -> Result<(), InvariantViolation> {
    let x = board.count(Symbol::X);
    let o = board.count(Symbol::O);
    if x == o || x == o + 1 {
        Ok(())
    } else {
        Err(InvariantViolation::UnbalancedBoard { x, o })
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
