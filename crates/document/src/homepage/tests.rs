use chrono::{TimeZone, Utc};

use super::*;
use crate::{SectionKind, create_default_section_at};

fn homepage_with(kinds: &[SectionKind]) -> Homepage {
	let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
	let mut homepage = Homepage::new_at("Home", now);
	homepage.sections = kinds
		.iter()
		.map(|kind| create_default_section_at(*kind, now))
		.collect();
	homepage.renumber();
	homepage
}

#[test]
fn new_homepage_is_empty_draft() {
	let homepage = Homepage::new("Spring");
	assert!(homepage.is_empty());
	assert_eq!(homepage.status, PublishStatus::Draft);
	assert_eq!(homepage.metadata.version, 0);
	assert!(homepage.check_order().is_ok());
}

#[test]
fn renumber_makes_order_dense() {
	let mut homepage = homepage_with(&[SectionKind::Hero, SectionKind::TextBlock]);
	homepage.sections[0].order = 7;
	homepage.sections[1].order = 7;
	assert!(homepage.check_order().is_err());

	homepage.renumber();
	assert!(homepage.check_order().is_ok());
}

#[test]
fn check_order_reports_first_mismatch() {
	let mut homepage = homepage_with(&[
		SectionKind::Hero,
		SectionKind::TextBlock,
		SectionKind::Newsletter,
	]);
	homepage.sections[2].order = 5;

	match homepage.check_order() {
		Err(DocumentError::OrderMismatch { index, order, .. }) => {
			assert_eq!((index, order), (2, 5));
		}
		other => panic!("expected order mismatch, got {other:?}"),
	}
}

#[test]
fn check_order_rejects_duplicate_ids() {
	let mut homepage = homepage_with(&[SectionKind::Hero, SectionKind::Hero]);
	homepage.sections[1].id = homepage.sections[0].id.clone();

	assert!(matches!(
		homepage.check_order(),
		Err(DocumentError::DuplicateSectionId(_))
	));
}

#[test]
fn normalized_sorts_by_stored_order() {
	let mut homepage = homepage_with(&[
		SectionKind::Hero,
		SectionKind::TextBlock,
		SectionKind::Newsletter,
	]);
	let ids: Vec<_> = homepage.sections.iter().map(|s| s.id.clone()).collect();
	homepage.sections[0].order = 10;
	homepage.sections[1].order = 4;
	homepage.sections[2].order = 4;

	let homepage = homepage.normalized();
	let order: Vec<_> = homepage.sections.iter().map(|s| s.id.clone()).collect();
	assert_eq!(order, vec![ids[1].clone(), ids[2].clone(), ids[0].clone()]);
	assert!(homepage.check_order().is_ok());
}

#[test]
fn visible_sections_skips_hidden() {
	let mut homepage = homepage_with(&[SectionKind::Hero, SectionKind::TextBlock]);
	homepage.sections[0].visible = false;

	let visible: Vec<_> = homepage.visible_sections().map(|s| s.kind()).collect();
	assert_eq!(visible, vec![SectionKind::TextBlock]);
}

#[test]
fn homepage_serializes_snake_case_status() {
	let homepage = homepage_with(&[SectionKind::Hero]);
	let json = serde_json::to_value(&homepage).unwrap();
	assert_eq!(json["status"], "draft");
	assert_eq!(json["sections"][0]["content"]["type"], "hero");

	let back: Homepage = serde_json::from_value(json).unwrap();
	assert_eq!(back, homepage);
}
