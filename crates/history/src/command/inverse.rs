use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use vitrine_document::{Homepage, Section, SectionContent, SectionId};

use super::edit;
use crate::CommandError;

/// State captured when a command applied, sufficient to undo it.
#[derive(Debug, Clone, PartialEq)]
pub enum Inverse {
	/// Undo an add or duplicate by removing the inserted section.
	Remove { section_id: SectionId },
	/// Undo a remove by re-inserting the captured section at its old index.
	Insert {
		section: Box<Section>,
		index: usize,
	},
	/// Undo an update field by field.
	///
	/// `previous` maps each updated field to its prior value, or `None` if the
	/// field was absent.
	RestoreFields {
		section_id: SectionId,
		previous: BTreeMap<String, Option<Value>>,
		updated_at: DateTime<Utc>,
	},
	/// Undo a reorder by moving the section back.
	Move {
		section_id: SectionId,
		from: usize,
		to: usize,
	},
	/// Undo a visibility toggle.
	SetVisibility {
		section_id: SectionId,
		visible: bool,
		updated_at: DateTime<Utc>,
	},
}

impl Inverse {
	/// Applies the inverse to `homepage`, returning the reverted copy.
	pub fn apply(&self, homepage: &Homepage) -> Result<Homepage, CommandError> {
		let mut document = homepage.clone();
		match self {
			Inverse::Remove { section_id } => {
				edit::remove(&mut document, section_id)?;
			}
			Inverse::Insert { section, index } => {
				edit::insert(&mut document, Section::clone(section), *index)?;
			}
			Inverse::RestoreFields {
				section_id,
				previous,
				updated_at,
			} => {
				let index = edit::locate(&document, section_id)?;
				let section = &mut document.sections[index];
				let kind = section.kind();
				let mut config = section.content.config_map()?;
				for (field, value) in previous {
					match value {
						Some(value) => {
							config.insert(field.clone(), value.clone());
						}
						None => {
							config.remove(field);
						}
					}
				}
				section.content = SectionContent::from_config_map(kind, config)?;
				section.updated_at = *updated_at;
			}
			Inverse::Move {
				section_id,
				from,
				to,
			} => {
				edit::relocate(&mut document, section_id, *from, *to)?;
			}
			Inverse::SetVisibility {
				section_id,
				visible,
				updated_at,
			} => {
				let index = edit::locate(&document, section_id)?;
				let section = &mut document.sections[index];
				section.visible = *visible;
				section.updated_at = *updated_at;
			}
		}
		Ok(document)
	}
}
