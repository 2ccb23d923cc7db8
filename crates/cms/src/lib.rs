//! Homepage CMS store.
//!
//! [`CmsStore`] is the layer between the admin UI and the editing core. It
//! holds the current homepage, routes every mutation through a
//! [`HistoryManager`](vitrine_history::HistoryManager), tracks unsaved changes,
//! and talks to storage through the async [`HomepageBackend`] contract.
//!
//! Only persistence is async. Edits, undo, redo and history jumps are
//! synchronous and never interleave with a save: every store method takes
//! `&mut self`.

/// Storage contract and the in-memory implementation.
pub mod backend;
/// Store configuration.
pub mod config;
/// Error types.
pub mod error;
/// The CMS store.
pub mod store;

pub use backend::{BackendError, HomepageBackend, MemoryBackend};
pub use config::{AutoSaveConfig, CmsConfig, ConfigError};
pub use error::{CmsError, Result};
pub use store::CmsStore;
