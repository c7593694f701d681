//! # Persisted Record
//!
//! The durable mirror of navigation state:
//!
//! ```text
//! lastScreen                    → "crew"
//! lastSelectedItemId:crew       → "Victor Glover"
//! lastSelectedItemId:technology → "Spaceport"
//! ```
//!
//! Reads go through [`PersistedRecord`], which turns every backend failure
//! into "absent". Writes go through [`PersistWriter`], a single background
//! task fed by a channel: callers never wait, and writes land in the order
//! they were issued.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::core::screen::Screen;
use crate::persistence::store::StateStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    LastScreen,
    LastSelectedItem(Screen),
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::LastScreen => f.write_str("lastScreen"),
            StoreKey::LastSelectedItem(screen) => write!(f, "lastSelectedItemId:{}", screen.name()),
        }
    }
}

/// Read side of the record.
#[derive(Clone)]
pub struct PersistedRecord {
    store: Arc<dyn StateStore>,
}

impl PersistedRecord {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn last_screen(&self) -> Option<String> {
        self.read(StoreKey::LastScreen).await
    }

    pub async fn last_selected_item(&self, screen: Screen) -> Option<String> {
        self.read(StoreKey::LastSelectedItem(screen)).await
    }

    /// Reads `key`, treating any failure as "no value".
    pub async fn read(&self, key: StoreKey) -> Option<String> {
        let key = key.to_string();
        match self.store.get(&key).await {
            Ok(value) => {
                debug!("Read {key} from {}: {:?}", self.store.name(), value);
                value
            }
            Err(e) => {
                warn!("Failed to read {key} from {}: {}", self.store.name(), e);
                None
            }
        }
    }
}

enum WriteCommand {
    Set { key: String, value: String },
    Flush(oneshot::Sender<()>),
}

/// Write side of the record.
///
/// Must be created inside a tokio runtime.
pub struct PersistWriter {
    tx: mpsc::UnboundedSender<WriteCommand>,
    task: JoinHandle<()>,
}

impl PersistWriter {
    pub fn spawn(store: Arc<dyn StateStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    WriteCommand::Set { key, value } => match store.set(&key, &value).await {
                        Ok(()) => debug!("Wrote {key} = {value:?} to {}", store.name()),
                        Err(e) => warn!("Failed to write {key} to {}: {}", store.name(), e),
                    },
                    WriteCommand::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            debug!("Persist writer for {} stopped", store.name());
        });
        Self { tx, task }
    }

    /// Queues a write and returns immediately.
    pub fn write(&self, key: StoreKey, value: impl Into<String>) {
        let command = WriteCommand::Set {
            key: key.to_string(),
            value: value.into(),
        };
        if self.tx.send(command).is_err() {
            warn!("Persist writer is gone, dropping write of {key}");
        }
    }

    /// Waits until every write queued before this call has been attempted.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(WriteCommand::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }

    /// Drains the queue and stops the background task.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            warn!("Persist writer task failed: {}", e);
        }
    }
}
