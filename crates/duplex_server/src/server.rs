//! WebSocket transport and host lifecycle.

use crate::config::ServerConfig;
use crate::connection::Connection;
use crate::session::{SessionHandle, SessionSnapshot};
use anyhow::Result;
use axum::{
    Json, Router,
    body::Body,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::Request,
    response::Response,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Builds the router: `/ws` for participants, `/health` for probes.
pub fn router(session: SessionHandle) -> Router {
    Router::new()
        .route("/ws", get(ws_upgrade))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(session)
}

/// Serves `session` until Ctrl-C, then shuts down gracefully.
#[instrument(skip(config, session), fields(addr = %config.bind_address()))]
pub async fn serve(config: &ServerConfig, session: SessionHandle) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Server ready at ws://{}/ws", listener.local_addr()?);

    axum::serve(listener, router(session))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}

async fn health(State(session): State<SessionHandle>) -> Json<SessionSnapshot> {
    Json(session.snapshot())
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(session): State<SessionHandle>) -> Response {
    ws.on_upgrade(move |socket| drive_socket(socket, session))
}

/// Pumps frames between one WebSocket and its [`Connection`].
#[instrument(skip_all)]
async fn drive_socket(socket: WebSocket, session: SessionHandle) {
    let (mut sink, mut stream) = socket.split();
    let (mut connection, mut outbound) = Connection::open(session);
    info!("Participant connected");

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "Failed to encode notification");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                debug!("Socket closed, writer stopping");
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => connection.handle_frame(text.as_str()),
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, "Socket error");
                break;
            }
        }
    }

    connection.close();
    if let Err(e) = writer.await {
        warn!(error = %e, "Writer task failed");
    }
    info!("Participant disconnected");
}
