//! Algebraic laws of the command log, checked over random edit sequences.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use serde_json::{Map, Value};
use vitrine_document::{Homepage, SectionId, SectionKind, create_default_section_at};

use super::*;

/// Raw material for one command, resolved against the current document.
#[derive(Debug, Clone)]
struct Seed {
	op: u8,
	a: usize,
	b: usize,
	flag: bool,
}

fn seed() -> impl Strategy<Value = Seed> {
	(0u8..6, 0usize..16, 0usize..16, any::<bool>()).prop_map(|(op, a, b, flag)| Seed {
		op,
		a,
		b,
		flag,
	})
}

fn epoch() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap()
}

fn kind(n: usize) -> SectionKind {
	SectionKind::ALL[n % SectionKind::ALL.len()]
}

/// A config field every section of `kind` defines, with a string value.
fn text_field(kind: SectionKind) -> &'static str {
	match kind {
		SectionKind::Hero => "headline",
		SectionKind::TextBlock => "body",
		SectionKind::ImageBanner => "caption",
		SectionKind::Newsletter => "description",
		SectionKind::ProductCarousel | SectionKind::CategoryGrid | SectionKind::Testimonials => {
			"title"
		}
	}
}

fn document(kinds: &[usize]) -> Homepage {
	let mut homepage = Homepage::new_at("Home", epoch());
	homepage.sections = kinds
		.iter()
		.map(|n| create_default_section_at(kind(*n), epoch()))
		.collect();
	homepage.renumber();
	homepage
}

/// Builds a command from `seed`. Targets are drawn from `doc` when possible,
/// so most commands apply; the rest exercise the rejection paths.
fn command(seed: &Seed, doc: &Homepage, at: DateTime<Utc>) -> Command {
	let len = doc.len();
	let target = |n: usize| {
		doc.sections
			.get(n % len.max(1))
			.map(|s| s.id.clone())
			.unwrap_or_else(|| SectionId::from("missing"))
	};
	let command = match seed.op {
		0 => Command::add_section(
			create_default_section_at(kind(seed.a), at),
			Some(seed.b % (len + 2)),
		),
		1 => Command::remove_section(target(seed.a)),
		2 => {
			let id = target(seed.a);
			let field = doc
				.section(&id)
				.map(|s| text_field(s.kind()))
				.unwrap_or("title");
			let mut changes = Map::new();
			changes.insert(field.to_owned(), Value::String(format!("v{}", seed.b)));
			Command::update_section(id, changes)
		}
		3 => {
			let from = seed.a % len.max(1);
			Command::reorder_section(target(seed.a), from, seed.b % len.max(1))
		}
		4 => Command::duplicate_section(target(seed.a)),
		_ => Command::toggle_visibility(target(seed.a), seed.flag),
	};
	command.with_timestamp(at)
}

/// Like [`seed`], but mostly headline and title updates on the first few
/// sections, so consecutive edits often share a merge key.
fn merge_seed() -> impl Strategy<Value = Seed> {
	(0u8..10, 0usize..3, 0usize..16, any::<bool>()).prop_map(|(op, a, b, flag)| Seed {
		op: if op >= 6 { 2 } else { op },
		a,
		b,
		flag,
	})
}

/// Quick follow-ups land inside the default merge window.
fn typing_gap(seed: &Seed) -> i64 {
	if seed.flag { 300 } else { 2_000 }
}

/// Executes every seed, each `gap_ms(seed)` after the previous one.
///
/// Returns the document after each history entry, starting with `start`,
/// and every command that was attempted. A command that merges into the
/// latest entry replaces that entry's document instead of adding one.
fn execute_spaced(
	history: &mut HistoryManager,
	start: Homepage,
	seeds: &[Seed],
	gap_ms: impl Fn(&Seed) -> i64,
) -> (Vec<Homepage>, Vec<Command>) {
	let mut states = vec![start];
	let mut commands = Vec::with_capacity(seeds.len());
	let mut at = epoch();
	for seed in seeds {
		let current = states.last().cloned().unwrap_or_else(|| document(&[]));
		at += TimeDelta::milliseconds(gap_ms(seed));
		let cmd = command(seed, &current, at);
		commands.push(cmd.clone());
		let entries = history.len();
		let result = history.execute(cmd, &current);
		if !result.success {
			assert_eq!(result.document, current);
		} else if history.len() == entries {
			if let Some(last) = states.last_mut() {
				*last = result.document;
			}
		} else {
			states.push(result.document);
		}
	}
	(states, commands)
}

/// Executes every seed two seconds apart, so nothing merges.
fn execute_all(
	history: &mut HistoryManager,
	start: Homepage,
	seeds: &[Seed],
) -> (Vec<Homepage>, Vec<Command>) {
	execute_spaced(history, start, seeds, |_| 2_000)
}

/// Undoes every entry, then redoes every entry, checking each document.
fn undo_all_then_redo_all(
	history: &mut HistoryManager,
	states: &[Homepage],
) -> Result<(), TestCaseError> {
	let steps = states.len() - 1;
	prop_assert_eq!(history.len(), steps);

	let mut doc = states[steps].clone();
	for expected in states.iter().rev().skip(1) {
		doc = history.undo(&doc).unwrap().unwrap().document;
		prop_assert_eq!(&doc, expected);
		prop_assert!(doc.check_order().is_ok());
	}
	prop_assert!(history.undo(&doc).unwrap().is_none());

	for expected in states.iter().skip(1) {
		doc = history.redo(&doc).unwrap().unwrap().document;
		prop_assert_eq!(&doc, expected);
	}
	prop_assert!(history.redo(&doc).unwrap().is_none());
	Ok(())
}

/// Runs `commands` in two managers, then compares a jump in one with
/// step-by-step navigation in the other.
fn jump_matches_walk(
	start: Homepage,
	seeds: &[Seed],
	gap_ms: impl Fn(&Seed) -> i64,
	undone: usize,
	target: usize,
) -> Result<(), TestCaseError> {
	let mut jumper = HistoryManager::default();
	let (states, commands) = execute_spaced(&mut jumper, start.clone(), seeds, gap_ms);
	let steps = states.len() - 1;
	if steps == 0 {
		return Ok(());
	}

	// Same edits in a second manager, navigated one step at a time.
	let mut walker = HistoryManager::default();
	let mut walked = start;
	let mut jumped = states[steps].clone();
	for cmd in commands {
		walked = walker.execute(cmd, &walked).document;
	}
	prop_assert_eq!(&walked, &jumped);
	prop_assert_eq!(walker.len(), steps);

	for _ in 0..undone % (steps + 1) {
		jumped = jumper.undo(&jumped).unwrap().unwrap().document;
		walked = walker.undo(&walked).unwrap().unwrap().document;
	}

	let target = target % steps;
	let id = jumper.entries()[target].id.clone();
	jumped = jumper.jump_to(&id, &jumped).unwrap().unwrap().document;

	while walker.current_index().is_none_or(|current| current < target) {
		walked = walker.redo(&walked).unwrap().unwrap().document;
	}
	while walker.current_index().is_some_and(|current| current > target) {
		walked = walker.undo(&walked).unwrap().unwrap().document;
	}

	prop_assert_eq!(jumper.current_index(), Some(target));
	prop_assert_eq!(&jumped, &walked);
	prop_assert_eq!(&jumped, &states[target + 1]);
	Ok(())
}

proptest! {
	#[test]
	fn apply_then_inverse_is_identity(
		kinds in prop::collection::vec(0usize..7, 0..6),
		seeds in prop::collection::vec(seed(), 1..12),
	) {
		let doc = document(&kinds);
		for (i, seed) in seeds.iter().enumerate() {
			let at = epoch() + TimeDelta::seconds(i as i64 + 1);
			let cmd = command(seed, &doc, at);
			if let Ok(applied) = cmd.apply(&doc) {
				let reverted = applied.inverse.apply(&applied.document).unwrap();
				prop_assert_eq!(&reverted, &doc);
			}
		}
	}

	#[test]
	fn order_stays_dense(
		kinds in prop::collection::vec(0usize..7, 0..6),
		seeds in prop::collection::vec(seed(), 1..30),
	) {
		let mut history = HistoryManager::default();
		let (states, _) = execute_all(&mut history, document(&kinds), &seeds);
		for state in &states {
			prop_assert!(state.check_order().is_ok());
		}
	}

	#[test]
	fn undo_all_then_redo_all_restores_every_state(
		kinds in prop::collection::vec(0usize..7, 0..6),
		seeds in prop::collection::vec(seed(), 1..30),
	) {
		let mut history = HistoryManager::default();
		let (states, _) = execute_all(&mut history, document(&kinds), &seeds);
		undo_all_then_redo_all(&mut history, &states)?;
	}

	#[test]
	fn merged_edits_undo_and_redo_as_one_step(
		kinds in prop::collection::vec(0usize..7, 1..4),
		seeds in prop::collection::vec(merge_seed(), 1..30),
	) {
		let mut history = HistoryManager::default();
		let (states, _) = execute_spaced(&mut history, document(&kinds), &seeds, typing_gap);
		undo_all_then_redo_all(&mut history, &states)?;
	}

	#[test]
	fn jump_matches_sequential_navigation(
		kinds in prop::collection::vec(0usize..7, 0..6),
		seeds in prop::collection::vec(seed(), 2..24),
		undone in 0usize..24,
		target in 0usize..24,
	) {
		jump_matches_walk(document(&kinds), &seeds, |_| 2_000, undone, target)?;
	}

	#[test]
	fn jump_over_merged_edits_matches_sequential_navigation(
		kinds in prop::collection::vec(0usize..7, 1..4),
		seeds in prop::collection::vec(merge_seed(), 2..24),
		undone in 0usize..24,
		target in 0usize..24,
	) {
		jump_matches_walk(document(&kinds), &seeds, typing_gap, undone, target)?;
	}
}
