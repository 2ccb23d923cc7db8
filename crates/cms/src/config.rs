//! Store configuration, loadable from TOML.
//!
//! ```toml
//! clear_history_on_publish = true
//!
//! [history]
//! max_history_size = 100
//! merge_window_ms = 750
//!
//! [auto_save]
//! enabled = true
//! delay_ms = 3000
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vitrine_history::HistoryConfig;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The file is not valid TOML or has unknown keys.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The file could not be read.
	#[error("I/O error reading {}: {error}", path.display())]
	Io {
		/// Path that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A value is out of range.
	#[error("invalid value for {field}: {reason}")]
	Invalid {
		/// Dotted key of the offending value.
		field: &'static str,
		/// What is wrong with it.
		reason: &'static str,
	},
}

/// Debounced draft saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutoSaveConfig {
	/// Whether [`CmsStore::auto_save`](crate::CmsStore::auto_save) saves at all.
	pub enabled: bool,
	/// Quiet time after the last edit before a draft save is due.
	pub delay_ms: u64,
}

impl Default for AutoSaveConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			delay_ms: 2000,
		}
	}
}

impl AutoSaveConfig {
	/// Returns the quiet time as a duration.
	pub fn delay(&self) -> Duration {
		Duration::from_millis(self.delay_ms)
	}
}

/// Configuration of a [`CmsStore`](crate::CmsStore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmsConfig {
	/// Undo history limits and merge window.
	pub history: HistoryConfig,
	pub auto_save: AutoSaveConfig,
	/// Drop undo history once a publish succeeds.
	pub clear_history_on_publish: bool,
}

impl CmsConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: CmsConfig = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&source)
	}

	/// Checks value ranges serde cannot express.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.history.max_history_size == 0 {
			return Err(ConfigError::Invalid {
				field: "history.max_history_size",
				reason: "must be at least 1",
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn empty_source_uses_defaults() {
		let config = CmsConfig::from_toml_str("").unwrap();
		assert_eq!(config, CmsConfig::default());
		assert_eq!(config.history.max_history_size, 50);
		assert_eq!(config.history.merge_window_ms, 1000);
		assert_eq!(config.auto_save.delay(), Duration::from_secs(2));
		assert!(!config.clear_history_on_publish);
	}

	#[test]
	fn partial_tables_keep_other_defaults() {
		let config = CmsConfig::from_toml_str(
			r#"
			clear_history_on_publish = true

			[history]
			merge_window_ms = 250
			"#,
		)
		.unwrap();
		assert!(config.clear_history_on_publish);
		assert_eq!(config.history.merge_window_ms, 250);
		assert_eq!(config.history.max_history_size, 50);
		assert!(config.auto_save.enabled);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = CmsConfig::from_toml_str("[history]\nmax_size = 3\n").unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)));
	}

	#[test]
	fn zero_history_size_is_invalid() {
		let err = CmsConfig::from_toml_str("[history]\nmax_history_size = 0\n").unwrap_err();
		assert!(matches!(
			err,
			ConfigError::Invalid {
				field: "history.max_history_size",
				..
			}
		));
	}

	#[test]
	fn load_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[auto_save]\nenabled = false\ndelay_ms = 500").unwrap();

		let config = CmsConfig::load(file.path()).unwrap();
		assert!(!config.auto_save.enabled);
		assert_eq!(config.auto_save.delay_ms, 500);
	}

	#[test]
	fn load_reports_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("cms.toml");

		let err = CmsConfig::load(&path).unwrap_err();
		assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
	}
}
