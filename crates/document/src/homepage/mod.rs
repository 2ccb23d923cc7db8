//! The homepage aggregate.
//!
//! # Order invariant
//!
//! Sections are stored in render order. Each section also carries an `order`
//! value, and in a well-formed document `sections[i].order == i` for every
//! `i`: the values are dense, unique and agree with array position.
//! [`Homepage::renumber`] restores the invariant after a structural edit and
//! [`Homepage::check_order`] verifies it.
//!
//! Documents arriving from storage may carry gapped or shuffled order values.
//! [`Homepage::normalized`] sorts by the stored values and renumbers, which
//! is what the editor does on load.

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DocumentError, HomepageId, Result, Section, SectionId};

/// Publication state of a homepage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
	#[default]
	Draft,
	Published,
}

/// Descriptive and bookkeeping fields of a homepage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomepageMetadata {
	pub title: String,
	pub description: String,
	/// Incremented by storage on every saved draft.
	pub version: u32,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
	pub published_at: Option<DateTime<Utc>>,
}

/// A versioned homepage document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homepage {
	pub id: HomepageId,
	pub status: PublishStatus,
	/// Sections in render order.
	pub sections: Vec<Section>,
	pub metadata: HomepageMetadata,
}

impl Homepage {
	/// Creates an empty draft homepage.
	pub fn new(title: impl Into<String>) -> Self {
		Self::new_at(title, Utc::now())
	}

	/// Creates an empty draft homepage stamped with `now`.
	pub fn new_at(title: impl Into<String>, now: DateTime<Utc>) -> Self {
		Self {
			id: HomepageId::generate(),
			status: PublishStatus::Draft,
			sections: Vec::new(),
			metadata: HomepageMetadata {
				title: title.into(),
				description: String::new(),
				version: 0,
				created_at: now,
				updated_at: now,
				published_at: None,
			},
		}
	}

	/// Returns the number of sections.
	pub fn len(&self) -> usize {
		self.sections.len()
	}

	/// Returns `true` if the homepage has no sections.
	pub fn is_empty(&self) -> bool {
		self.sections.is_empty()
	}

	/// Returns the array position of the section with `id`.
	pub fn position(&self, id: &SectionId) -> Option<usize> {
		self.sections.iter().position(|section| &section.id == id)
	}

	/// Returns the section with `id`.
	pub fn section(&self, id: &SectionId) -> Option<&Section> {
		self.sections.iter().find(|section| &section.id == id)
	}

	/// Returns `true` if a section with `id` exists.
	pub fn contains(&self, id: &SectionId) -> bool {
		self.position(id).is_some()
	}

	/// Iterates over the sections the storefront renders.
	pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
		self.sections.iter().filter(|section| section.visible)
	}

	/// Assigns every section its array position as `order`.
	pub fn renumber(&mut self) {
		for (index, section) in self.sections.iter_mut().enumerate() {
			section.order = index;
		}
	}

	/// Verifies the order invariant and id uniqueness.
	pub fn check_order(&self) -> Result<()> {
		let mut seen = HashSet::with_capacity(self.sections.len());
		for (index, section) in self.sections.iter().enumerate() {
			if section.order != index {
				return Err(DocumentError::OrderMismatch {
					id: section.id.clone(),
					index,
					order: section.order,
				});
			}
			if !seen.insert(&section.id) {
				return Err(DocumentError::DuplicateSectionId(section.id.clone()));
			}
		}
		Ok(())
	}

	/// Sorts sections by their stored order and renumbers them densely.
	///
	/// The sort is stable, so sections sharing an order value keep their
	/// relative array position.
	pub fn normalized(mut self) -> Self {
		self.sections.sort_by_key(|section| section.order);
		self.renumber();
		self
	}
}
