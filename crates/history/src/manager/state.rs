use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{CommandId, SessionId};

/// Summary of the history for undo/redo controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryState {
	/// Whether an applied entry exists.
	pub can_undo: bool,
	/// Whether an undone entry exists.
	pub can_redo: bool,
	/// Description of the entry the next undo reverts.
	pub undo_description: Option<String>,
	/// Description of the entry the next redo re-applies.
	pub redo_description: Option<String>,
	/// Number of entries, applied and undone.
	pub history_size: usize,
	/// Effective entry cap.
	pub max_history_size: usize,
	/// Index of the most recently applied entry, `None` when nothing is applied.
	pub current_index: Option<usize>,
}

/// Read-only projection of one history entry, for the history panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntryView {
	/// Id to pass to [`HistoryManager::jump_to`](crate::HistoryManager::jump_to).
	pub id: CommandId,
	pub description: String,
	/// Time of the latest edit recorded in the entry.
	pub timestamp: DateTime<Utc>,
	/// Session that executed the command.
	pub session: Option<SessionId>,
	/// The entry sits after the cursor and would be re-applied by redo.
	pub is_undone: bool,
	/// The entry is the most recently applied one.
	pub is_current: bool,
}
