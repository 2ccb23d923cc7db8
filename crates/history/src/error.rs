//! Error types for commands and history navigation.

use thiserror::Error;
use vitrine_document::{DocumentError, SectionId};

use crate::CommandId;

/// Structural reasons a command cannot apply to a document.
///
/// These are expected outcomes of user edits racing stale UI state. The
/// history manager reports them as a rejected [`CommandResult`] and never
/// records the command.
///
/// [`CommandResult`]: crate::CommandResult
#[derive(Debug, Error)]
pub enum CommandError {
	/// The target section is not in the document.
	#[error("section not found: {0}")]
	SectionNotFound(SectionId),

	/// A section with this id is already in the document.
	#[error("section already exists: {0}")]
	DuplicateSection(SectionId),

	/// A reorder index is past the end of the section list.
	#[error("index {index} out of range for {len} sections")]
	IndexOutOfRange {
		/// Offending index.
		index: usize,
		/// Number of sections in the document.
		len: usize,
	},

	/// A reorder would move a section onto its own position.
	#[error("section is already at position {0}")]
	SamePosition(usize),

	/// The section at the reorder source index is not the expected one.
	#[error("section {section_id} is not at position {index}")]
	StaleIndex {
		/// Section the command expected to move.
		section_id: SectionId,
		/// Source index recorded in the command.
		index: usize,
	},

	/// The command would leave the section exactly as it is.
	#[error("command leaves section {0} unchanged")]
	NoChange(SectionId),

	/// An update produced a config the section kind rejects.
	#[error("invalid section update: {0}")]
	InvalidUpdate(#[from] DocumentError),
}

/// Failure while navigating history.
///
/// Only raised when a recorded entry no longer applies to the document it is
/// replayed against, which means the log and the document have diverged. The
/// caller should reload the document from storage.
#[derive(Debug, Error)]
pub enum HistoryError {
	/// A logged entry failed to replay.
	#[error("history entry {command} could not be replayed: {source}")]
	Replay {
		/// Entry that failed.
		command: CommandId,
		/// Structural failure reported by the command.
		#[source]
		source: CommandError,
	},
}
