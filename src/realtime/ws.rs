use axum::{
    debug_handler,
    extract::{ws::{Message, WebSocket}, Query, State, WebSocketUpgrade},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use crate::{AppError, AppResult, AppState};

use super::{ClientEvent, Connection, Session};

#[derive(Deserialize)]
pub(crate) struct WsQuery {
    token: Option<String>,
}

/// A valid `?token=` registers the connection under the token's email before
/// the first frame is read.
#[debug_handler(state = AppState)]
pub(crate) async fn realtime_ws(
    Query(WsQuery { token }): Query<WsQuery>,
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    let identity = match token {
        Some(token) => {
            let claims = state.tokens.verify(&token)
                .map_err(|_| AppError::Unauthorized("Invalid token"))?;
            Some(claims.email)
        }
        None => None,
    };

    Ok(ws.on_upgrade(move |socket| serve(socket, state, identity)))
}

async fn serve(socket: WebSocket, state: AppState, identity: Option<String>) {
    let (connection, mut direct) = Connection::new();
    tracing::info!("new connection {}", connection.id);

    let mut everyone = state.tx.subscribe();
    let mut session = Session::new(connection, state.presence, state.tx, state.db_pool);
    if let Some(identity) = identity {
        session.handle(ClientEvent::Register(identity)).await;
    }

    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        loop {
            let frame = tokio::select! {
                frame = everyone.recv() => match frame {
                    Ok(frame) => frame,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("slow socket skipped {skipped} broadcasts");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                },
                frame = direct.recv() => match frame {
                    Some(frame) => frame,
                    None => break,
                },
            };

            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    loop {
        let msg = tokio::select! {
            msg = receiver.next() => msg,
            _ = &mut send_task => break,
        };

        let text = match msg {
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
            Some(Ok(_)) => continue,
        };

        match serde_json::from_str::<ClientEvent>(text.as_str()) {
            Ok(event) => session.handle(event).await,
            Err(err) => tracing::debug!("ignoring frame {:?}: {err}", text.as_str()),
        }
    }

    send_task.abort();
    session.close();
}
