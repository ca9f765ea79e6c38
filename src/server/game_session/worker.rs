//! Per-session worker actor.
//!
//! Each live session gets its own worker. Moves, rematches and termination for one
//! session go through this actor's mailbox, so two mutations of the same board can never
//! interleave. Broadcasts are fire-and-forget `do_send`s; the command result travels back
//! separately as the message response.

use actix::prelude::*;
use log::{debug, error, info};

use crate::errors::{CommandError, StateError};
use crate::game::state::{GameSession, MoveRejection, SessionSnapshot};
use crate::server::game_session::messages::{ApplyMove, Rematch, SessionClosed, Terminate};
use crate::server::matchmaking::messages::{ClientAddr, ServerWsMessage};
use crate::server::stats::RecordOutcome;

pub struct SessionWorker {
    session: GameSession,
    /// Same order as the session slots: X first.
    connections: [ClientAddr; 2],
    stats: Recipient<RecordOutcome>,
    coordinator: Recipient<SessionClosed>,
}

impl SessionWorker {
    pub fn new(
        session: GameSession,
        connections: [ClientAddr; 2],
        stats: Recipient<RecordOutcome>,
        coordinator: Recipient<SessionClosed>,
    ) -> Self {
        Self {
            session,
            connections,
            stats,
            coordinator,
        }
    }

    fn broadcast(&self, msg: ServerWsMessage) {
        for addr in &self.connections {
            addr.do_send(msg.clone());
        }
    }

    fn report_outcomes(&self) {
        if let Some(outcomes) = self.session.outcomes() {
            for (slot, outcome) in outcomes {
                self.stats.do_send(RecordOutcome {
                    identity: slot.id.clone(),
                    username: slot.username.clone(),
                    outcome,
                });
            }
        }
    }

    /// Tear down after an internal error: tell both players, have the coordinator purge us.
    fn abort(&mut self, reason: &str, ctx: &mut Context<Self>) {
        let session_id = self.session.id();
        error!("[Session] Aborting session {}: {}", session_id, reason);
        self.broadcast(ServerWsMessage::SessionAborted { session_id });
        self.coordinator.do_send(SessionClosed { session_id });
        ctx.stop();
    }
}

impl Actor for SessionWorker {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        debug!("[Session] Worker started for session {}", self.session.id());
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        debug!("[Session] Worker stopped for session {}", self.session.id());
    }
}

impl Handler<ApplyMove> for SessionWorker {
    type Result = Result<SessionSnapshot, CommandError>;

    fn handle(&mut self, msg: ApplyMove, ctx: &mut Self::Context) -> Self::Result {
        match self.session.submit_move(&msg.identity, msg.position) {
            Ok(applied) => {
                debug!(
                    "[Session] {} played {:?} at {} in session {}",
                    msg.identity, applied.symbol, applied.index, self.session.id()
                );
                let snapshot = self.session.snapshot();
                self.broadcast(ServerWsMessage::SessionUpdated(snapshot.clone()));
                if applied.finished {
                    info!(
                        "[Session] Session {} finished: phase={:?} winner={:?}",
                        self.session.id(), self.session.phase(), self.session.winner()
                    );
                    self.report_outcomes();
                }
                Ok(snapshot)
            }
            Err(MoveRejection::Rejected(err)) => {
                debug!("[Session] Move from {} rejected: {}", msg.identity, err.code());
                Err(err)
            }
            Err(MoveRejection::Fault(violation)) => {
                self.abort(&violation.to_string(), ctx);
                Err(StateError::SessionAborted.into())
            }
        }
    }
}

impl Handler<Rematch> for SessionWorker {
    type Result = Result<SessionSnapshot, CommandError>;

    fn handle(&mut self, msg: Rematch, _ctx: &mut Self::Context) -> Self::Result {
        self.session.rematch(&msg.identity)?;
        info!("[Session] Rematch started in session {} by {}", self.session.id(), msg.identity);
        let snapshot = self.session.snapshot();
        self.broadcast(ServerWsMessage::SessionUpdated(snapshot.clone()));
        Ok(snapshot)
    }
}

impl Handler<Terminate> for SessionWorker {
    type Result = ();

    fn handle(&mut self, msg: Terminate, ctx: &mut Self::Context) -> Self::Result {
        let session_id = self.session.id();
        let leaver = msg.reason.identity();
        for (slot, addr) in self.session.slots().iter().zip(&self.connections) {
            if slot.id != leaver {
                addr.do_send(ServerWsMessage::OpponentLeft { session_id });
            }
        }
        info!("[Session] Session {} ended: {:?}", session_id, msg.reason);
        ctx.stop();
    }
}
