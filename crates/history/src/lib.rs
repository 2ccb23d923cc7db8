//! Command history for the homepage editor.
//!
//! Every document mutation goes through a [`Command`]: an immutable, named
//! description of a section edit that knows how to apply itself and captures
//! enough prior state ([`Inverse`]) to reconstruct the document it was applied
//! to. The [`HistoryManager`] owns the log of executed commands and a cursor
//! into it, and is the single authority for executing, undoing, redoing and
//! jumping through edits.
//!
//! # Architecture
//!
//! ```text
//! CMS store                       HistoryManager
//! ┌──────────────────┐  Command   ┌──────────────────────────┐
//! │ update_section() │──────────► │ entries: [Entry; n]      │
//! │ undo() / redo()  │            │ applied: cursor          │
//! │ document         │◄────────── │ execute / undo / redo    │
//! └──────────────────┘  Homepage  │ jump_to / clear          │
//!                                 └────────────┬─────────────┘
//!                                              │ HistoryState
//!                                              ▼
//!                                        listener(&state)
//! ```
//!
//! Everything here is synchronous and pure with respect to the document:
//! managers hand back new [`Homepage`](vitrine_document::Homepage) values and
//! never hold on to the caller's copy.

/// Section commands and their inverses.
pub mod command;
/// History configuration.
pub mod config;
/// Error types.
pub mod error;
/// The history manager.
pub mod manager;
/// Session and command identifiers.
pub mod session;

pub use command::{Applied, Command, CommandResult, FieldChanges, Inverse, MergeKey, SectionOp};
pub use config::HistoryConfig;
pub use error::{CommandError, HistoryError};
pub use manager::{HistoryEntryView, HistoryListener, HistoryManager, HistoryState};
pub use session::{CommandId, SessionId};
