//! Invertible section commands.
//!
//! A [`Command`] pairs identity and bookkeeping (id, description, timestamp,
//! session) with a [`SectionOp`] describing the edit. Applying a command never
//! touches the input document; it returns the edited copy together with an
//! [`Inverse`] that turns the edited copy back into the input.
//!
//! Any value a command writes into the document (new section ids, `updated_at`
//! stamps) is fixed when the command is built, so applying the same command to
//! the same document always yields the same result. History replay relies on
//! this.

mod edit;
mod inverse;


use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use vitrine_document::{Homepage, Section, SectionContent, SectionId};

pub use self::inverse::Inverse;
use crate::{CommandError, CommandId, SessionId};

/// Shallow field changes for an update: config field name to new value.
pub type FieldChanges = Map<String, Value>;

/// The edit a [`Command`] performs.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOp {
	/// Insert `section` at `index`, or at the end when `index` is `None` or
	/// past the end.
	Add {
		section: Box<Section>,
		index: Option<usize>,
	},
	/// Remove the section with `section_id`.
	Remove { section_id: SectionId },
	/// Shallow-merge `changes` into the section's config.
	Update {
		section_id: SectionId,
		changes: FieldChanges,
	},
	/// Move the section at `from` to `to`.
	Reorder {
		section_id: SectionId,
		from: usize,
		to: usize,
	},
	/// Insert a copy of the section, with id `new_id`, right after it.
	Duplicate {
		section_id: SectionId,
		new_id: SectionId,
	},
	/// Set the section's `visible` flag.
	ToggleVisibility { section_id: SectionId, visible: bool },
}

/// Key under which consecutive commands may merge into one history entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeKey(String);

impl MergeKey {
	/// Returns the key as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for MergeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Outcome of a successful [`Command::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
	/// The edited document.
	pub document: Homepage,
	/// Turns `document` back into the document the command was applied to.
	pub inverse: Inverse,
}

/// Uniform result of executing or navigating history.
///
/// On failure `document` is the input document, unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
	/// Whether the command or navigation step took effect.
	pub success: bool,
	/// The resulting document.
	pub document: Homepage,
}

impl CommandResult {
	/// A successful outcome carrying the new document.
	pub fn applied(document: Homepage) -> Self {
		Self {
			success: true,
			document,
		}
	}

	/// A rejected outcome carrying the unchanged input document.
	pub fn rejected(document: Homepage) -> Self {
		Self {
			success: false,
			document,
		}
	}
}

/// A named, invertible edit of a homepage.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
	id: CommandId,
	description: String,
	timestamp: DateTime<Utc>,
	session: Option<SessionId>,
	op: SectionOp,
}

impl Command {
	fn new(op: SectionOp, description: String) -> Self {
		Self {
			id: CommandId::generate(),
			description,
			timestamp: Utc::now(),
			session: None,
			op,
		}
	}

	/// Inserts `section` at `index` (default: end of list).
	pub fn add_section(section: Section, index: Option<usize>) -> Self {
		let description = format!("Add {}", section.kind().label());
		Self::new(
			SectionOp::Add {
				section: Box::new(section),
				index,
			},
			description,
		)
	}

	/// Removes the section with `section_id`.
	pub fn remove_section(section_id: SectionId) -> Self {
		Self::new(SectionOp::Remove { section_id }, "Remove section".to_owned())
	}

	/// Shallow-merges `changes` into the config of the section.
	pub fn update_section(section_id: SectionId, changes: FieldChanges) -> Self {
		let fields = changes.keys().map(String::as_str).collect::<Vec<_>>();
		let description = format!("Update {}", fields.join(", "));
		Self::new(
			SectionOp::Update {
				section_id,
				changes,
			},
			description,
		)
	}

	/// Moves the section at `from` to `to`.
	pub fn reorder_section(section_id: SectionId, from: usize, to: usize) -> Self {
		let description = format!("Move section from {} to {}", from + 1, to + 1);
		Self::new(
			SectionOp::Reorder {
				section_id,
				from,
				to,
			},
			description,
		)
	}

	/// Duplicates the section. The copy's id is generated here.
	pub fn duplicate_section(section_id: SectionId) -> Self {
		Self::duplicate_section_as(section_id, SectionId::generate())
	}

	/// Duplicates the section, giving the copy the caller-chosen `new_id`.
	pub fn duplicate_section_as(section_id: SectionId, new_id: SectionId) -> Self {
		Self::new(
			SectionOp::Duplicate { section_id, new_id },
			"Duplicate section".to_owned(),
		)
	}

	/// Shows or hides the section.
	pub fn toggle_visibility(section_id: SectionId, visible: bool) -> Self {
		let description = if visible { "Show section" } else { "Hide section" };
		Self::new(
			SectionOp::ToggleVisibility {
				section_id,
				visible,
			},
			description.to_owned(),
		)
	}

	/// Overrides the creation timestamp.
	pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
		self.timestamp = timestamp;
		self
	}

	/// Attaches the editing session.
	pub fn with_session(mut self, session: SessionId) -> Self {
		self.session = Some(session);
		self
	}

	/// Overrides the history description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	/// Returns the command id, which is also its history entry id.
	pub fn id(&self) -> &CommandId {
		&self.id
	}

	/// Returns the label shown in the history panel.
	pub fn description(&self) -> &str {
		&self.description
	}

	/// Returns when the command was created, or last absorbed an edit.
	pub fn timestamp(&self) -> DateTime<Utc> {
		self.timestamp
	}

	/// Returns the session the command was executed in, if stamped.
	pub fn session(&self) -> Option<&SessionId> {
		self.session.as_ref()
	}

	/// Returns the edit this command performs.
	pub fn op(&self) -> &SectionOp {
		&self.op
	}

	/// Returns the id of the section this command creates or targets.
	pub fn section_id(&self) -> &SectionId {
		match &self.op {
			SectionOp::Add { section, .. } => &section.id,
			SectionOp::Remove { section_id }
			| SectionOp::Update { section_id, .. }
			| SectionOp::Reorder { section_id, .. }
			| SectionOp::Duplicate { section_id, .. }
			| SectionOp::ToggleVisibility { section_id, .. } => section_id,
		}
	}

	/// Returns the key under which this command merges with its predecessor.
	///
	/// Updates key on the section and the sorted set of updated fields;
	/// visibility toggles key on the section and the target value. Structural
	/// commands never merge.
	pub fn merge_key(&self) -> Option<MergeKey> {
		match &self.op {
			SectionOp::Update {
				section_id,
				changes,
			} => {
				let mut fields = changes.keys().map(String::as_str).collect::<Vec<_>>();
				fields.sort_unstable();
				Some(MergeKey(format!(
					"update:{section_id}:{}",
					fields.join(",")
				)))
			}
			SectionOp::ToggleVisibility {
				section_id,
				visible,
			} => Some(MergeKey(format!("visibility:{section_id}:{visible}"))),
			SectionOp::Add { .. }
			| SectionOp::Remove { .. }
			| SectionOp::Reorder { .. }
			| SectionOp::Duplicate { .. } => None,
		}
	}

	/// Applies the command to `homepage`.
	///
	/// Updates and visibility toggles that would change nothing are rejected
	/// with [`CommandError::NoChange`].
	pub fn apply(&self, homepage: &Homepage) -> Result<Applied, CommandError> {
		self.apply_inner(homepage, true)
	}

	/// Re-applies a recorded command during redo.
	///
	/// Unlike [`apply`](Self::apply), a merged entry whose net effect is nil
	/// still replays successfully.
	pub(crate) fn replay(&self, homepage: &Homepage) -> Result<Applied, CommandError> {
		self.apply_inner(homepage, false)
	}

	fn apply_inner(&self, homepage: &Homepage, strict: bool) -> Result<Applied, CommandError> {
		let mut document = homepage.clone();
		let inverse = match &self.op {
			SectionOp::Add { section, index } => {
				let section = Section::clone(section);
				let section_id = section.id.clone();
				edit::insert(&mut document, section, index.unwrap_or(usize::MAX))?;
				Inverse::Remove { section_id }
			}
			SectionOp::Remove { section_id } => {
				let (index, section) = edit::remove(&mut document, section_id)?;
				Inverse::Insert {
					section: Box::new(section),
					index,
				}
			}
			SectionOp::Update {
				section_id,
				changes,
			} => {
				let index = edit::locate(&document, section_id)?;
				let section = &mut document.sections[index];
				let kind = section.kind();
				let mut config = section.content.config_map()?;
				let mut previous = BTreeMap::new();
				let mut changed = false;
				for (field, value) in changes {
					let old = config.insert(field.clone(), value.clone());
					changed |= old.as_ref() != Some(value);
					previous.insert(field.clone(), old);
				}
				if strict && !changed {
					return Err(CommandError::NoChange(section_id.clone()));
				}
				section.content = SectionContent::from_config_map(kind, config)?;
				let updated_at = std::mem::replace(&mut section.updated_at, self.timestamp);
				Inverse::RestoreFields {
					section_id: section_id.clone(),
					previous,
					updated_at,
				}
			}
			SectionOp::Reorder {
				section_id,
				from,
				to,
			} => {
				edit::relocate(&mut document, section_id, *from, *to)?;
				Inverse::Move {
					section_id: section_id.clone(),
					from: *to,
					to: *from,
				}
			}
			SectionOp::Duplicate { section_id, new_id } => {
				let index = edit::locate(&document, section_id)?;
				let mut copy = document.sections[index].clone();
				copy.id = new_id.clone();
				copy.created_at = self.timestamp;
				copy.updated_at = self.timestamp;
				edit::insert(&mut document, copy, index + 1)?;
				Inverse::Remove {
					section_id: new_id.clone(),
				}
			}
			SectionOp::ToggleVisibility {
				section_id,
				visible,
			} => {
				let index = edit::locate(&document, section_id)?;
				let section = &mut document.sections[index];
				if strict && section.visible == *visible {
					return Err(CommandError::NoChange(section_id.clone()));
				}
				let was_visible = std::mem::replace(&mut section.visible, *visible);
				let updated_at = std::mem::replace(&mut section.updated_at, self.timestamp);
				Inverse::SetVisibility {
					section_id: section_id.clone(),
					visible: was_visible,
					updated_at,
				}
			}
		};
		Ok(Applied { document, inverse })
	}

	/// Folds a later command with the same merge key into this one.
	///
	/// The merged command keeps this command's id and description, takes the
	/// later command's timestamp, and applies the combined effect of both.
	pub(crate) fn absorb(&mut self, later: Command) {
		match (&mut self.op, later.op) {
			(
				SectionOp::Update { changes, .. },
				SectionOp::Update {
					changes: newer, ..
				},
			) => changes.extend(newer),
			(op, newer) => *op = newer,
		}
		self.timestamp = later.timestamp;
	}
}
