//! Error types for the document model.

use thiserror::Error;

use crate::SectionId;

/// Errors raised while inspecting or converting homepage documents.
#[derive(Debug, Error)]
pub enum DocumentError {
	/// A section type tag did not name a known kind.
	#[error("unknown section kind: {0}")]
	UnknownSectionKind(String),

	/// A section's `order` does not match its position in the list.
	#[error("section {id} at position {index} has order {order}")]
	OrderMismatch {
		/// Section carrying the wrong order.
		id: SectionId,
		/// Array position of the section.
		index: usize,
		/// Order value stored on the section.
		order: usize,
	},

	/// Two sections share one id.
	#[error("duplicate section id: {0}")]
	DuplicateSectionId(SectionId),

	/// A section config could not be converted to or from JSON.
	#[error("invalid section config: {0}")]
	Config(#[from] serde_json::Error),

	/// A section config did not serialize to a JSON object.
	#[error("section config for {0} is not a JSON object")]
	NotAnObject(&'static str),
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;
