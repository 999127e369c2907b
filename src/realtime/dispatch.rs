use serde_json::Value;
use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::convos::store;

use super::{ClientEvent, Connection, Presence, ServerEvent};

/// State of one socket between connect and disconnect. Events are handled one
/// at a time, in the order the client sent them.
pub struct Session {
    connection: Connection,
    identity: Option<String>,
    presence: Presence,
    tx: broadcast::Sender<String>,
    db_pool: SqlitePool,
}

impl Session {
    pub fn new(
        connection: Connection,
        presence: Presence,
        tx: broadcast::Sender<String>,
        db_pool: SqlitePool,
    ) -> Session {
        Session {
            connection,
            identity: None,
            presence,
            tx,
            db_pool,
        }
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub async fn handle(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Register(identity) => self.register(identity),
            ClientEvent::Typing { from, to } => self.typing(from, &to),
            ClientEvent::SendMessage(data) => self.send_message(data).await,
        }
    }

    fn register(&mut self, identity: String) {
        if let Some(previous) = self.identity.take() {
            if previous != identity {
                self.presence.unregister(&previous, self.connection.id);
            }
        }

        tracing::info!("{identity} registered on {}", self.connection.id);
        self.presence.register(identity.clone(), self.connection.clone());
        self.identity = Some(identity);
    }

    fn typing(&self, from: String, to: &str) {
        let Some(recipient) = self.presence.lookup(to) else {
            tracing::trace!("{from} typing to {to}, who is offline");
            return;
        };
        if !recipient.deliver(&ServerEvent::Typing { from }) {
            tracing::trace!("{to} is registered but their socket is gone");
        }
    }

    /// Every connected client sees `data` as sent, participant or not. Storing
    /// it happens afterwards and a failure there is only logged.
    async fn send_message(&self, data: Value) {
        tracing::debug!("message from {}", self.connection.id);

        match ServerEvent::NewMessage(data.clone()).frame() {
            Ok(frame) => match self.tx.send(frame) {
                Ok(receivers) => tracing::trace!("broadcast to {receivers} connections"),
                Err(_) => tracing::trace!("broadcast with nobody listening"),
            },
            Err(err) => tracing::error!("could not encode message: {err}"),
        }

        self.save(&data).await;
    }

    async fn save(&self, data: &Value) {
        let (participants, message) = match stored_parts(data) {
            Ok(parts) => parts,
            Err(err) => {
                tracing::error!("failed to save message, bad participants: {err}");
                return;
            }
        };

        if let Err(err) = store::append_or_create(&self.db_pool, &participants, &message).await {
            tracing::error!("failed to save message for {participants:?}: {err}");
        }
    }

    /// Drops this connection from the presence table, unless its identity has
    /// since been claimed by a newer connection.
    pub fn close(self) {
        if let Some(identity) = &self.identity {
            self.presence.unregister(identity, self.connection.id);
        }
        tracing::info!("{} disconnected", self.connection.id);
    }
}

/// The participant list and message of a relayed payload. A missing message
/// is stored as null.
fn stored_parts(data: &Value) -> serde_json::Result<(Vec<String>, Value)> {
    let participants = serde_json::from_value(data.get("participants").cloned().unwrap_or_default())?;
    let message = data.get("message").cloned().unwrap_or_default();
    Ok((participants, message))
}
