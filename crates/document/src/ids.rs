use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a homepage document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HomepageId(pub String);

impl HomepageId {
	/// Generates a fresh random homepage id.
	pub fn generate() -> Self {
		Self(Uuid::new_v4().to_string())
	}
}

impl fmt::Display for HomepageId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Unique identifier of a section.
///
/// Assigned once when the section is created and kept for the section's
/// whole lifetime. Duplicating a section produces a new id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub String);

impl SectionId {
	/// Generates a fresh random section id.
	pub fn generate() -> Self {
		Self(Uuid::new_v4().to_string())
	}

	/// Returns the id as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SectionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for SectionId {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
