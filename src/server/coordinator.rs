/// Session coordinator actor.
///
/// Owns the connection directory, the match queue and the session registry. Every queue
/// mutation and every pairing runs inside this actor's mailbox, so two find-match requests
/// can never race for the same waiting entry. Game commands are routed to the worker of
/// the target session, which serializes them.

use actix::prelude::*;
use uuid::Uuid;
use log::{info, debug, warn};

use crate::errors::{CommandError, LookupError, StateError};
use crate::game::state::{GameSession, SessionId, SessionSnapshot};
use crate::server::directory::ConnectionDirectory;
use crate::server::game_session::messages::{ApplyMove, Rematch, SessionClosed, Terminate, TerminationReason};
use crate::server::game_session::registry::SessionRegistry;
use crate::server::game_session::worker::SessionWorker;
use crate::server::matchmaking::messages::{ClientAddr, ServerWsMessage};
use crate::server::matchmaking::queue::{MatchQueue, WaitingEntry};
use crate::server::matchmaking::types::{Identity, PlayerInfo};
use crate::server::stats::RecordOutcome;

/// Main coordinator actor.
pub struct SessionCoordinator {
    directory: ConnectionDirectory<ClientAddr>,
    queue: MatchQueue<ClientAddr>,
    registry: SessionRegistry<Addr<SessionWorker>>,
    /// Statistics collaborator handed to every session worker.
    stats: Recipient<RecordOutcome>,
}

impl SessionCoordinator {
    pub fn new(stats: Recipient<RecordOutcome>) -> Self {
        Self {
            directory: ConnectionDirectory::new(),
            queue: MatchQueue::new(),
            registry: SessionRegistry::new(),
            stats,
        }
    }

    /// Pair waiting players two at a time, oldest first.
    fn pair_waiting(&mut self, ctx: &mut Context<Self>) {
        while let Some((first, second)) = self.queue.try_pair() {
            self.on_pair(first, second, ctx);
        }
    }

    /// Create a session for two dequeued players. `first` becomes X and moves first.
    fn on_pair(&mut self, first: WaitingEntry<ClientAddr>, second: WaitingEntry<ClientAddr>, ctx: &mut Context<Self>) {
        let session_id = Uuid::new_v4();
        let participants = [first.info.id.clone(), second.info.id.clone()];
        let session = GameSession::new(session_id, first.info, second.info);
        let snapshot = session.snapshot();

        let connections = [first.connection, second.connection];
        for addr in &connections {
            addr.do_send(ServerWsMessage::SessionStarted(snapshot.clone()));
        }

        let worker = SessionWorker::new(
            session,
            connections,
            self.stats.clone(),
            ctx.address().recipient(),
        )
        .start();
        self.registry.insert(session_id, worker, participants);

        info!(
            "[Coordinator] Session {} created: X={} (waited {:?}), O={} (waited {:?})",
            session_id,
            snapshot.players[0].id,
            first.enqueued_at.elapsed(),
            snapshot.players[1].id,
            second.enqueued_at.elapsed()
        );
    }

    /// Drop every trace of `identity` in the queue and in live sessions.
    ///
    /// Returns the worker to terminate, if the identity was seated somewhere.
    fn release(&mut self, identity: &str) -> Option<Addr<SessionWorker>> {
        if self.queue.remove(identity).is_some() {
            debug!("[Coordinator] {} removed from queue", identity);
        }
        let session_id = self.registry.session_of(identity)?;
        self.registry.remove(&session_id).map(|entry| entry.handle)
    }

    pub fn view(&self) -> CoordinatorView {
        CoordinatorView {
            queued: self.queue.identities(),
            sessions: self.registry.len(),
            connected: self.directory.len(),
        }
    }
}

/// Send `Terminate` and wait until the worker has processed it.
fn terminate(worker: Option<Addr<SessionWorker>>, reason: TerminationReason) -> ResponseFuture<()> {
    Box::pin(async move {
        if let Some(worker) = worker {
            if worker.send(Terminate { reason }).await.is_err() {
                debug!("[Coordinator] Worker already stopped");
            }
        }
    })
}

/// Forward a game command to a session worker; a stopped worker means the session is gone.
fn forward<M>(worker: Addr<SessionWorker>, msg: M) -> ResponseFuture<Result<SessionSnapshot, CommandError>>
where
    M: Message<Result = Result<SessionSnapshot, CommandError>> + Send + 'static,
    SessionWorker: Handler<M>,
{
    Box::pin(async move {
        worker
            .send(msg)
            .await
            .unwrap_or_else(|_| Err(LookupError::SessionNotFound.into()))
    })
}

fn reject<T: 'static>(err: impl Into<CommandError>) -> ResponseFuture<Result<T, CommandError>> {
    let result: Result<T, CommandError> = Err(err.into());
    Box::pin(async move { result })
}

/// Read-only view of the coordinator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorView {
    pub queued: Vec<Identity>,
    pub sessions: usize,
    pub connected: usize,
}

/// Message: a client connected (or reconnected) with this identity.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub info: PlayerInfo,
    pub addr: ClientAddr,
}

/// Message: transport lost for this connection.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub identity: Identity,
    pub addr: ClientAddr,
}

/// Message: find-match request. Replies with the queue position (0 once paired).
#[derive(Message)]
#[rtype(result = "Result<usize, CommandError>")]
pub struct Enqueue {
    pub identity: Identity,
}

/// Message: leave the waiting queue.
#[derive(Message)]
#[rtype(result = "Result<(), CommandError>")]
pub struct CancelQueue {
    pub identity: Identity,
}

#[derive(Message)]
#[rtype(result = "Result<SessionSnapshot, CommandError>")]
pub struct SubmitMove {
    pub session_id: SessionId,
    pub identity: Identity,
    pub position: i64,
}

#[derive(Message)]
#[rtype(result = "Result<SessionSnapshot, CommandError>")]
pub struct RequestRematch {
    pub session_id: SessionId,
    pub identity: Identity,
}

/// Message: leave a session. The opponent is told, no result is attributed.
#[derive(Message)]
#[rtype(result = "Result<(), CommandError>")]
pub struct LeaveSession {
    pub session_id: SessionId,
    pub identity: Identity,
}

#[derive(Message)]
#[rtype(result = "CoordinatorView")]
pub struct Inspect;

impl Actor for SessionCoordinator {
    type Context = Context<Self>;
}

impl Handler<Connect> for SessionCoordinator {
    type Result = ResponseFuture<()>;

    /// Registers the identity. A previous connection for the same identity is kicked and
    /// whatever it was doing ends as a disconnect.
    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        let identity = msg.info.id.clone();
        let username = msg.info.username.clone();
        let addr = msg.addr.clone();

        let mut worker = None;
        if let Some(previous) = self.directory.register(msg.info, msg.addr) {
            previous.addr.do_send(ServerWsMessage::SessionKicked {
                reason: "Another session has connected with your identity.".to_string(),
            });
            worker = self.release(&identity);
            debug!("[Coordinator] {} reconnected (old connection kicked)", identity);
        } else {
            debug!("[Coordinator] {} connected as {}", identity, username);
        }
        addr.do_send(ServerWsMessage::Registered {
            identity: identity.clone(),
            username,
        });
        terminate(worker, TerminationReason::Disconnected(identity))
    }
}

impl Handler<Disconnect> for SessionCoordinator {
    type Result = ResponseFuture<()>;

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        // Stale or repeated disconnects are no-ops.
        if self.directory.remove_if_current(&msg.identity, &msg.addr).is_none() {
            return terminate(None, TerminationReason::Disconnected(msg.identity));
        }
        let worker = self.release(&msg.identity);
        debug!("[Coordinator] {} disconnected", msg.identity);
        terminate(worker, TerminationReason::Disconnected(msg.identity))
    }
}

impl Handler<Enqueue> for SessionCoordinator {
    type Result = Result<usize, CommandError>;

    fn handle(&mut self, msg: Enqueue, ctx: &mut Self::Context) -> Self::Result {
        let connection = self
            .directory
            .get(&msg.identity)
            .cloned()
            .ok_or(LookupError::NotConnected)?;
        if self.registry.session_of(&msg.identity).is_some() {
            warn!("[Coordinator] {} asked for a match while already playing", msg.identity);
            return Err(StateError::AlreadyInSession.into());
        }

        let position = self.queue.enqueue(connection.info, connection.addr);
        debug!("[Coordinator] {} waiting at position {}", msg.identity, position);
        self.pair_waiting(ctx);
        Ok(self.queue.position(&msg.identity).unwrap_or(0))
    }
}

impl Handler<CancelQueue> for SessionCoordinator {
    type Result = Result<(), CommandError>;

    fn handle(&mut self, msg: CancelQueue, _ctx: &mut Self::Context) -> Self::Result {
        self.queue
            .remove(&msg.identity)
            .map(|_| debug!("[Coordinator] {} cancelled matchmaking", msg.identity))
            .ok_or_else(|| LookupError::NotQueued.into())
    }
}

impl Handler<SubmitMove> for SessionCoordinator {
    type Result = ResponseFuture<Result<SessionSnapshot, CommandError>>;

    fn handle(&mut self, msg: SubmitMove, _ctx: &mut Self::Context) -> Self::Result {
        match self.registry.get(&msg.session_id) {
            Some(entry) => forward(
                entry.handle.clone(),
                ApplyMove { identity: msg.identity, position: msg.position },
            ),
            None => reject(LookupError::SessionNotFound),
        }
    }
}

impl Handler<RequestRematch> for SessionCoordinator {
    type Result = ResponseFuture<Result<SessionSnapshot, CommandError>>;

    fn handle(&mut self, msg: RequestRematch, _ctx: &mut Self::Context) -> Self::Result {
        match self.registry.get(&msg.session_id) {
            Some(entry) => forward(entry.handle.clone(), Rematch { identity: msg.identity }),
            None => reject(LookupError::SessionNotFound),
        }
    }
}

impl Handler<LeaveSession> for SessionCoordinator {
    type Result = ResponseFuture<Result<(), CommandError>>;

    fn handle(&mut self, msg: LeaveSession, _ctx: &mut Self::Context) -> Self::Result {
        let seated = match self.registry.get(&msg.session_id) {
            Some(entry) => entry.participants.contains(&msg.identity),
            // A player who is only waiting leaves the queue instead.
            None if self.queue.remove(&msg.identity).is_some() => {
                debug!("[Coordinator] {} left the queue", msg.identity);
                return Box::pin(async { Ok::<(), CommandError>(()) });
            }
            None => return reject(LookupError::SessionNotFound),
        };
        if !seated {
            return reject(LookupError::NotParticipant);
        }

        let worker = self.registry.remove(&msg.session_id).map(|entry| entry.handle);
        info!("[Coordinator] {} left session {}", msg.identity, msg.session_id);
        let done = terminate(worker, TerminationReason::Left(msg.identity));
        Box::pin(async move {
            done.await;
            Ok::<(), CommandError>(())
        })
    }
}

impl Handler<SessionClosed> for SessionCoordinator {
    type Result = ();

    fn handle(&mut self, msg: SessionClosed, _ctx: &mut Self::Context) -> Self::Result {
        if self.registry.remove(&msg.session_id).is_some() {
            warn!("[Coordinator] Session {} purged after abort", msg.session_id);
        }
    }
}

impl Handler<Inspect> for SessionCoordinator {
    type Result = MessageResult<Inspect>;

    fn handle(&mut self, _msg: Inspect, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.view())
    }
}
