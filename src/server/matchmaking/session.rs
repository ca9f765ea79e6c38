/// WebSocket session handler for one client.
///
/// This actor is the transport adapter: it registers the identity with the coordinator
/// when the socket opens, relays client commands (find match, moves, rematch, leave),
/// answers each command with its own acknowledgement, and forwards server notifications.
/// Closing the socket is reported as a disconnect.
use actix::dev::ToEnvelope;
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web::http::StatusCode;
use actix_web_actors::ws;
use log::{debug, error, warn};
use std::borrow::Cow;

use super::messages::{ClientWsMessage, ServerWsMessage};
use super::types::{default_username, Identity, PlayerInfo};
use crate::config::matchmaking::{MAX_USERNAME_LEN, MIN_USERNAME_LEN};
use crate::errors::CommandError;
use crate::server::coordinator::{
    CancelQueue, Connect, Disconnect, Enqueue, LeaveSession, RequestRematch, SessionCoordinator, SubmitMove,
};
use crate::server::ws_error::{http_error_response, ws_error_message};

/// Represents a client's WebSocket connection.
pub struct ClientSession {
    pub identity: Identity,
    pub username: String,
    pub coordinator: Addr<SessionCoordinator>,
}

impl ClientSession {
    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerWsMessage) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                error!("[Client] Failed to serialize ServerWsMessage: {}", e);
                ctx.text(ws_error_message("INTERNAL_ERROR", "Internal server error", None));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }

    /// Send a command to the coordinator and answer the client with its outcome only.
    fn dispatch<M, T, F>(&self, msg: M, on_ok: F, ctx: &mut ws::WebsocketContext<Self>)
    where
        M: Message<Result = Result<T, CommandError>> + Send + 'static,
        T: Send + 'static,
        F: FnOnce(T) -> ServerWsMessage + 'static,
        SessionCoordinator: Handler<M>,
        <SessionCoordinator as Actor>::Context: ToEnvelope<SessionCoordinator, M>,
    {
        let fut = self
            .coordinator
            .send(msg)
            .into_actor(self)
            .map(move |res, act, ctx| {
                let reply = match res {
                    Ok(Ok(value)) => on_ok(value),
                    Ok(Err(err)) => {
                        debug!("[Client] Command from {} rejected: {}", act.identity, err.code());
                        ServerWsMessage::rejected(&err, Some(act.identity.as_str()))
                    }
                    Err(e) => {
                        error!("[Client] Coordinator unreachable: {}", e);
                        ServerWsMessage::error("INTERNAL_ERROR", "Internal server error", None)
                    }
                };
                Self::send_json(ctx, &reply);
            });
        ctx.spawn(fut);
    }

    fn handle_client_message(&mut self, msg: ClientWsMessage, ctx: &mut ws::WebsocketContext<Self>) {
        let identity = self.identity.clone();
        match msg {
            ClientWsMessage::FindMatch => self.dispatch(
                Enqueue { identity },
                |queue_position| ServerWsMessage::Searching { queue_position },
                ctx,
            ),
            ClientWsMessage::CancelQueue => self.dispatch(
                CancelQueue { identity },
                |_| ServerWsMessage::QueueCancelled,
                ctx,
            ),
            ClientWsMessage::MakeMove { session_id, position } => self.dispatch(
                SubmitMove { session_id, identity, position },
                ServerWsMessage::MoveAccepted,
                ctx,
            ),
            ClientWsMessage::RequestRematch { session_id } => self.dispatch(
                RequestRematch { session_id, identity },
                ServerWsMessage::RematchAccepted,
                ctx,
            ),
            ClientWsMessage::LeaveGame { session_id } => self.dispatch(
                LeaveSession { session_id, identity },
                move |()| ServerWsMessage::LeftSession { session_id },
                ctx,
            ),
            ClientWsMessage::Ping => Self::send_json(ctx, &ServerWsMessage::Pong),
        }
    }
}

impl Actor for ClientSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the socket opens. Registers the identity with the coordinator.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.coordinator.do_send(Connect {
            info: PlayerInfo {
                id: self.identity.clone(),
                username: self.username.clone(),
            },
            addr: ctx.address().recipient(),
        });
    }

    /// Called when the socket closes. Transport loss ends any queue entry or session.
    fn stopped(&mut self, ctx: &mut Self::Context) {
        self.coordinator.do_send(Disconnect {
            identity: self.identity.clone(),
            addr: ctx.address().recipient(),
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ClientSession {
    /// Handles incoming WebSocket frames from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => match serde_json::from_str::<ClientWsMessage>(&text) {
                Ok(client_msg) => self.handle_client_message(client_msg, ctx),
                Err(e) => {
                    warn!("[Client] Invalid message from {}: {}", self.identity, e);
                    ctx.text(ws_error_message(
                        "INVALID_MESSAGE",
                        "Invalid client message",
                        Some(self.identity.as_str()),
                    ));
                }
            },
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[Client] Protocol error for {}: {}", self.identity, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for ClientSession {
    type Result = ();

    /// Handles notifications pushed by the coordinator or a session worker.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        Self::send_json(ctx, &msg);
        if let ServerWsMessage::SessionKicked { reason } = msg {
            ctx.close(Some(ws::CloseReason {
                code: ws::CloseCode::Policy,
                description: Some(reason),
            }));
            ctx.stop();
        }
    }
}

/// Checks the connection query and resolves the display name.
///
/// Expects `identity` (required) and `username` (optional, URL-encoded).
fn parse_connect_query(query: &str) -> Result<PlayerInfo, (&'static str, &'static str)> {
    let mut identity: Option<Identity> = None;
    let mut username = String::new();

    for kv in query.split('&') {
        let mut split = kv.splitn(2, '=');
        match (split.next(), split.next()) {
            (Some("identity"), Some(id)) => {
                identity = Some(
                    urlencoding::decode(id)
                        .unwrap_or_else(|_| Cow::Borrowed(""))
                        .into_owned(),
                );
            }
            (Some("username"), Some(name)) => {
                username = urlencoding::decode(name)
                    .unwrap_or_else(|_| Cow::Borrowed(""))
                    .into_owned();
            }
            _ => {}
        }
    }

    let identity = match identity {
        Some(id) if !id.is_empty() => id,
        _ => return Err(("MISSING_IDENTITY", "Missing identity")),
    };

    let username = username.trim().to_string();
    if username.is_empty() {
        return Ok(PlayerInfo { username: default_username(&identity), id: identity });
    }
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(("INVALID_USERNAME", "Username must be between 2 and 50 characters"));
    }
    Ok(PlayerInfo { id: identity, username })
}

/// WebSocket endpoint for clients.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let info = match parse_connect_query(req.query_string()) {
        Ok(info) => info,
        Err((code, message)) => {
            return Ok(http_error_response(code, message, None, StatusCode::BAD_REQUEST));
        }
    };

    ws::start(
        ClientSession {
            identity: info.id,
            username: info.username,
            coordinator: data.coordinator.clone(),
        },
        &req,
        stream,
    )
}
