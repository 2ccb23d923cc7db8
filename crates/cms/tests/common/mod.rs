//! Shared fixtures for store integration tests.

use serde_json::Value;
use vitrine_cms::{CmsConfig, CmsStore, MemoryBackend};
use vitrine_document::{Homepage, SectionContent, SectionId, SectionKind, create_default_section};
use vitrine_history::FieldChanges;

/// Stored draft with one default section per kind, in order.
pub fn homepage(kinds: &[SectionKind]) -> Homepage {
	let mut homepage = Homepage::new("Storefront");
	homepage.sections = kinds.iter().map(|kind| create_default_section(*kind)).collect();
	homepage.renumber();
	homepage
}

/// Store over a memory backend seeded with `kinds`, already loaded.
pub async fn loaded_store(kinds: &[SectionKind], config: CmsConfig) -> CmsStore<MemoryBackend> {
	let _ = tracing_subscriber::fmt::try_init();
	let backend = MemoryBackend::with_homepage(homepage(kinds));
	let mut store = CmsStore::new(backend, config);
	store.load().await.unwrap();
	store
}

pub fn changes(value: Value) -> FieldChanges {
	match value {
		Value::Object(map) => map,
		other => panic!("expected object, got {other}"),
	}
}

pub fn ids(store: &CmsStore<MemoryBackend>) -> Vec<SectionId> {
	store
		.document()
		.unwrap()
		.sections
		.iter()
		.map(|section| section.id.clone())
		.collect()
}

pub fn headline(store: &CmsStore<MemoryBackend>, id: &SectionId) -> String {
	match &store.document().unwrap().section(id).unwrap().content {
		SectionContent::Hero(hero) => hero.headline.clone(),
		other => panic!("expected hero, got {:?}", other.kind()),
	}
}
