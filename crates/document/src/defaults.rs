use chrono::{DateTime, Utc};

use crate::{Section, SectionContent, SectionKind};

/// Creates a fully populated section of `kind` with a fresh id.
///
/// The section is visible and carries the kind's default config, so adding it
/// to any homepage yields a renderable document.
pub fn create_default_section(kind: SectionKind) -> Section {
	create_default_section_at(kind, Utc::now())
}

/// Like [`create_default_section`], stamped with `now`.
pub fn create_default_section_at(kind: SectionKind, now: DateTime<Utc>) -> Section {
	Section::new(SectionContent::default_for(kind), now)
}
