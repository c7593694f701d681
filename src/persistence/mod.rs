//! # Persistence
//!
//! Durable key/value storage for the last screen and per-screen selections.
//!
//! - [`store`]: the `StateStore` port every backend implements
//! - [`record`]: typed keys, a failure-absorbing reader and the ordered
//!   fire-and-forget writer the navigator talks to
//! - [`stores`]: concrete backends (in-memory, JSON file)

pub mod record;
pub mod store;
pub mod stores;

pub use record::{PersistWriter, PersistedRecord, StoreKey};
pub use store::{StateStore, StoreError};
pub use stores::{FileStore, MemoryStore};
