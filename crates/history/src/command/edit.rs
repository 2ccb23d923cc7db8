//! Structural section edits shared by commands and inverses.
//!
//! Every helper leaves the homepage renumbered.

use vitrine_document::{Homepage, Section, SectionId};

use crate::CommandError;

pub(super) fn locate(homepage: &Homepage, section_id: &SectionId) -> Result<usize, CommandError> {
	homepage
		.position(section_id)
		.ok_or_else(|| CommandError::SectionNotFound(section_id.clone()))
}

/// Inserts `section` at `index`, clamped to the end of the list.
pub(super) fn insert(
	homepage: &mut Homepage,
	section: Section,
	index: usize,
) -> Result<usize, CommandError> {
	if homepage.contains(&section.id) {
		return Err(CommandError::DuplicateSection(section.id));
	}
	let index = index.min(homepage.len());
	homepage.sections.insert(index, section);
	homepage.renumber();
	Ok(index)
}

/// Removes the section with `section_id`, returning it and its former index.
pub(super) fn remove(
	homepage: &mut Homepage,
	section_id: &SectionId,
) -> Result<(usize, Section), CommandError> {
	let index = locate(homepage, section_id)?;
	let section = homepage.sections.remove(index);
	homepage.renumber();
	Ok((index, section))
}

/// Moves the section at `from` to `to`, shifting the sections in between.
///
/// The section at `from` must be `section_id`; a mismatch means the indices
/// were computed against an older document.
pub(super) fn relocate(
	homepage: &mut Homepage,
	section_id: &SectionId,
	from: usize,
	to: usize,
) -> Result<(), CommandError> {
	let len = homepage.len();
	if from == to {
		return Err(CommandError::SamePosition(from));
	}
	if let Some(index) = [from, to].into_iter().find(|index| *index >= len) {
		return Err(CommandError::IndexOutOfRange { index, len });
	}
	if homepage.sections[from].id != *section_id {
		return Err(CommandError::StaleIndex {
			section_id: section_id.clone(),
			index: from,
		});
	}
	let section = homepage.sections.remove(from);
	homepage.sections.insert(to, section);
	homepage.renumber();
	Ok(())
}
