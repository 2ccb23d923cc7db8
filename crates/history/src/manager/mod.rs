//! Undo/redo history over homepage commands.
//!
//! The [`HistoryManager`] keeps executed commands in a single log with a
//! cursor, instead of separate undo and redo stacks, so that arbitrary
//! entries can be targeted by [`jump_to`](HistoryManager::jump_to).
//!
//! ```text
//!            applied             undone
//!   ┌─────┬─────┬─────┐ ┌─────┬─────┐
//!   │  A  │  B  │  C  │ │  D  │  E  │
//!   └─────┴─────┴──▲──┘ └─────┴─────┘
//!                  │
//!           current_index = 2
//! ```
//!
//! * Executing a command discards `D` and `E`, then appends (or merges into
//!   `C`).
//! * Undo applies the inverse of `C` and moves the cursor left.
//! * Redo replays `D` and moves the cursor right.
//! * Jumping replays one undo or redo step at a time until the target entry
//!   is current, so the result is identical to pressing undo/redo by hand.

mod state;

#[cfg(test)]
mod props;

use std::fmt;

use chrono::TimeDelta;
use tracing::{debug, trace, warn};
use vitrine_document::Homepage;

pub use self::state::{HistoryEntryView, HistoryState};
use crate::{
	Applied, Command, CommandId, CommandResult, HistoryConfig, HistoryError, Inverse, SessionId,
};

/// Observer invoked synchronously whenever the history changes.
pub type HistoryListener = Box<dyn FnMut(&HistoryState) + Send>;

#[derive(Debug, Clone)]
struct Entry {
	command: Command,
	/// Captured the last time `command` was applied.
	inverse: Inverse,
}

/// Owns the command log of one editing session.
pub struct HistoryManager {
	entries: Vec<Entry>,
	/// Number of applied entries: `entries[..applied]` are applied, the rest
	/// are undone and available for redo.
	applied: usize,
	config: HistoryConfig,
	session: SessionId,
	listener: Option<HistoryListener>,
}

impl fmt::Debug for HistoryManager {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HistoryManager")
			.field("entries", &self.entries.len())
			.field("applied", &self.applied)
			.field("config", &self.config)
			.field("session", &self.session)
			.field("listener", &self.listener.is_some())
			.finish()
	}
}

impl Default for HistoryManager {
	fn default() -> Self {
		Self::new(HistoryConfig::default())
	}
}

impl HistoryManager {
	/// Creates an empty manager with a fresh session.
	pub fn new(config: HistoryConfig) -> Self {
		Self {
			entries: Vec::new(),
			applied: 0,
			config,
			session: SessionId::generate(),
			listener: None,
		}
	}

	/// Replaces the session stamped onto commands that carry none.
	pub fn with_session(mut self, session: SessionId) -> Self {
		self.session = session;
		self
	}

	pub fn session(&self) -> &SessionId {
		&self.session
	}

	pub fn config(&self) -> &HistoryConfig {
		&self.config
	}

	/// Registers the change observer, replacing any previous one.
	pub fn set_listener(&mut self, listener: impl FnMut(&HistoryState) + Send + 'static) {
		self.listener = Some(Box::new(listener));
	}

	/// Removes the change observer.
	pub fn clear_listener(&mut self) {
		self.listener = None;
	}

	/// Returns the number of entries, applied and undone.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn can_undo(&self) -> bool {
		self.applied > 0
	}

	pub fn can_redo(&self) -> bool {
		self.applied < self.entries.len()
	}

	/// Index of the most recently applied entry.
	pub fn current_index(&self) -> Option<usize> {
		self.applied.checked_sub(1)
	}

	/// Executes `command` against `document` and records it.
	///
	/// A rejected command is not recorded and returns `document` unchanged.
	/// On success any undone entries are discarded, then the command either
	/// merges into the latest entry or is appended as a new one.
	pub fn execute(&mut self, command: Command, document: &Homepage) -> CommandResult {
		let command = if command.session().is_some() {
			command
		} else {
			command.with_session(self.session.clone())
		};

		let applied = match command.apply(document) {
			Ok(applied) => applied,
			Err(error) => {
				debug!(
					command = %command.id(),
					description = command.description(),
					%error,
					"command rejected"
				);
				return CommandResult::rejected(document.clone());
			}
		};

		if self.can_redo() {
			trace!(
				discarded = self.entries.len() - self.applied,
				"redo history discarded"
			);
			self.entries.truncate(self.applied);
		}

		if self.should_merge(&command) {
			if let Some(entry) = self.entries.last_mut() {
				trace!(
					entry = %entry.command.id(),
					merged = %command.id(),
					"command merged into latest entry"
				);
				entry.command.absorb(command);
			}
		} else {
			trace!(
				command = %command.id(),
				description = command.description(),
				entries = self.entries.len() + 1,
				"history entry pushed"
			);
			self.entries.push(Entry {
				command,
				inverse: applied.inverse,
			});
			self.applied = self.entries.len();
			self.enforce_limit();
		}

		self.notify();
		CommandResult::applied(applied.document)
	}

	/// Reverts the most recently applied entry.
	///
	/// Returns `Ok(None)` when there is nothing to undo.
	pub fn undo(&mut self, document: &Homepage) -> Result<Option<CommandResult>, HistoryError> {
		let Some(index) = self.current_index() else {
			debug!("undo: nothing to undo");
			return Ok(None);
		};
		let reverted = self.revert_at(index, document)?;
		self.applied = index;
		self.notify();
		Ok(Some(CommandResult::applied(reverted)))
	}

	/// Re-applies the first undone entry.
	///
	/// Returns `Ok(None)` when there is nothing to redo.
	pub fn redo(&mut self, document: &Homepage) -> Result<Option<CommandResult>, HistoryError> {
		if !self.can_redo() {
			debug!("redo: nothing to redo");
			return Ok(None);
		}
		let index = self.applied;
		let redone = self.replay_at(index, document)?;
		self.entries[index].inverse = redone.inverse;
		self.applied = index + 1;
		self.notify();
		Ok(Some(CommandResult::applied(redone.document)))
	}

	/// Undoes or redoes until the entry with `id` is the current one.
	///
	/// Returns `Ok(None)` if no entry has that id. If any step fails the
	/// jump is abandoned as a whole: cursor and entries stay as they were.
	pub fn jump_to(
		&mut self,
		id: &CommandId,
		document: &Homepage,
	) -> Result<Option<CommandResult>, HistoryError> {
		let Some(index) = self
			.entries
			.iter()
			.position(|entry| entry.command.id() == id)
		else {
			debug!(command = %id, "jump: unknown history entry");
			return Ok(None);
		};

		let target = index + 1;
		let from = self.applied;
		let mut cursor = from;
		let mut current = document.clone();
		while cursor > target {
			current = self.revert_at(cursor - 1, &current)?;
			cursor -= 1;
		}
		// Inverses refreshed by replay are committed only once every step succeeded.
		let mut refreshed = Vec::new();
		while cursor < target {
			let redone = self.replay_at(cursor, &current)?;
			refreshed.push((cursor, redone.inverse));
			current = redone.document;
			cursor += 1;
		}

		for (index, inverse) in refreshed {
			self.entries[index].inverse = inverse;
		}
		self.applied = cursor;
		trace!(command = %id, from, to = cursor, "jumped through history");
		self.notify();
		Ok(Some(CommandResult::applied(current)))
	}

	/// Drops every entry.
	///
	/// Call whenever the document is replaced from outside the history (load,
	/// revert) so undo never crosses into unrelated content.
	pub fn clear(&mut self) {
		trace!(entries = self.entries.len(), "history cleared");
		self.entries.clear();
		self.applied = 0;
		self.notify();
	}

	/// Lists every entry, oldest first.
	pub fn entries(&self) -> Vec<HistoryEntryView> {
		let current = self.current_index();
		self.entries
			.iter()
			.enumerate()
			.map(|(index, entry)| HistoryEntryView {
				id: entry.command.id().clone(),
				description: entry.command.description().to_owned(),
				timestamp: entry.command.timestamp(),
				session: entry.command.session().cloned(),
				is_undone: index >= self.applied,
				is_current: current == Some(index),
			})
			.collect()
	}

	/// Summarizes the history for undo/redo controls.
	pub fn state(&self) -> HistoryState {
		let description = |index: usize| {
			self.entries
				.get(index)
				.map(|entry| entry.command.description().to_owned())
		};
		HistoryState {
			can_undo: self.can_undo(),
			can_redo: self.can_redo(),
			undo_description: self.current_index().and_then(description),
			redo_description: description(self.applied),
			history_size: self.entries.len(),
			max_history_size: self.config.history_limit(),
			current_index: self.current_index(),
		}
	}

	/// Whether `command` folds into the latest entry.
	///
	/// Both must share a merge key and session, and `command` must be no older
	/// than the entry and strictly within the merge window of it.
	fn should_merge(&self, command: &Command) -> bool {
		let Some(key) = command.merge_key() else {
			return false;
		};
		let Some(last) = self.entries.last() else {
			return false;
		};
		if last.command.merge_key().as_ref() != Some(&key)
			|| last.command.session() != command.session()
		{
			return false;
		}
		let elapsed = command.timestamp() - last.command.timestamp();
		elapsed >= TimeDelta::zero() && elapsed < self.config.merge_window()
	}

	fn enforce_limit(&mut self) {
		let limit = self.config.history_limit();
		if self.entries.len() <= limit {
			return;
		}
		let excess = self.entries.len() - limit;
		self.entries.drain(..excess);
		self.applied = self.applied.saturating_sub(excess);
		trace!(evicted = excess, limit, "oldest history entries evicted");
	}

	/// Applies the inverse of entry `index` to `document`.
	fn revert_at(&self, index: usize, document: &Homepage) -> Result<Homepage, HistoryError> {
		let entry = &self.entries[index];
		let reverted = entry.inverse.apply(document).map_err(|source| {
			warn!(command = %entry.command.id(), error = %source, "undo replay failed");
			HistoryError::Replay {
				command: entry.command.id().clone(),
				source,
			}
		})?;
		trace!(
			command = %entry.command.id(),
			description = entry.command.description(),
			"undo"
		);
		Ok(reverted)
	}

	/// Replays entry `index` against `document`.
	fn replay_at(&self, index: usize, document: &Homepage) -> Result<Applied, HistoryError> {
		let entry = &self.entries[index];
		let redone = entry.command.replay(document).map_err(|source| {
			warn!(command = %entry.command.id(), error = %source, "redo replay failed");
			HistoryError::Replay {
				command: entry.command.id().clone(),
				source,
			}
		})?;
		trace!(
			command = %entry.command.id(),
			description = entry.command.description(),
			"redo"
		);
		Ok(redone)
	}

	fn notify(&mut self) {
		let state = self.state();
		if let Some(listener) = self.listener.as_mut() {
			listener(&state);
		}
	}
}
