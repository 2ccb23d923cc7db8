use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Default cap on the number of history entries.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 50;

/// Default window, in milliseconds, within which same-field edits merge.
pub const DEFAULT_MERGE_WINDOW_MS: u64 = 1000;

/// Tuning for [`HistoryManager`](crate::HistoryManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
	/// Maximum number of retained entries. The oldest entries are evicted
	/// beyond this. Values below one behave as one.
	pub max_history_size: usize,
	/// Two mergeable commands closer than this collapse into one entry.
	/// Zero disables merging.
	pub merge_window_ms: u64,
}

impl Default for HistoryConfig {
	fn default() -> Self {
		Self {
			max_history_size: DEFAULT_MAX_HISTORY_SIZE,
			merge_window_ms: DEFAULT_MERGE_WINDOW_MS,
		}
	}
}

impl HistoryConfig {
	/// Returns the merge window as a duration.
	pub fn merge_window(&self) -> TimeDelta {
		i64::try_from(self.merge_window_ms)
			.ok()
			.and_then(TimeDelta::try_milliseconds)
			.unwrap_or(TimeDelta::MAX)
	}

	/// Returns the effective entry cap.
	pub fn history_limit(&self) -> usize {
		self.max_history_size.max(1)
	}
}
