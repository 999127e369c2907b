use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::ServerEvent;

pub const OUTBOX_CAPACITY: usize = 64;

/// Handle to one live socket. Cloning it is cheap; every clone feeds the
/// same outbound queue.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: Uuid,
    outbox: mpsc::Sender<String>,
}

impl Connection {
    pub fn new() -> (Connection, mpsc::Receiver<String>) {
        let (outbox, rx) = mpsc::channel(OUTBOX_CAPACITY);
        (Connection { id: Uuid::now_v7(), outbox }, rx)
    }

    /// Returns false when the socket behind this handle is gone, or when it
    /// has stopped reading and its queue is full. The frame is dropped then.
    pub fn deliver(&self, event: &ServerEvent) -> bool {
        match event.frame() {
            Ok(frame) => match self.outbox.try_send(frame) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::debug!("outbox of {} is full, dropping {event:?}", self.id);
                    false
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            },
            Err(err) => {
                tracing::error!("could not encode {event:?}: {err}");
                false
            }
        }
    }
}

/// Who is online, and on which connection. One connection per identity: a
/// newer registration replaces the older one.
#[derive(Debug, Clone, Default)]
pub struct Presence {
    online: Arc<RwLock<HashMap<String, Connection>>>,
}

impl Presence {
    pub fn register(&self, identity: String, connection: Connection) -> Option<Connection> {
        self.online.write().insert(identity, connection)
    }

    pub fn lookup(&self, identity: &str) -> Option<Connection> {
        self.online.read().get(identity).cloned()
    }

    /// Only drops the entry if it still belongs to `connection_id`.
    pub fn unregister(&self, identity: &str, connection_id: Uuid) -> bool {
        let mut online = self.online.write();
        match online.get(identity) {
            Some(connection) if connection.id == connection_id => {
                online.remove(identity);
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.online.read().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.online.read().is_empty()
    }
}
