use thiserror::Error;
use vitrine_history::HistoryError;

use crate::BackendError;

/// Errors surfaced by [`CmsStore`](crate::CmsStore).
///
/// Rejected edits and empty undo/redo are not errors; the store reports them
/// as `false`/`None` return values.
#[derive(Debug, Error)]
pub enum CmsError {
	/// An edit or navigation was attempted before a homepage was loaded.
	#[error("no homepage loaded")]
	NotLoaded,

	/// History and document diverged; reload from storage.
	#[error(transparent)]
	History(#[from] HistoryError),

	/// Storage failed.
	#[error(transparent)]
	Backend(#[from] BackendError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, CmsError>;
