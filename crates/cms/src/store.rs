//! The CMS store: one loaded homepage, its edit history, and persistence.

use tokio::time::Instant;
use tracing::{debug, info, warn};
use vitrine_document::{Homepage, SectionId, SectionKind, create_default_section};
use vitrine_history::{
	Command, CommandId, CommandResult, FieldChanges, HistoryEntryView, HistoryError,
	HistoryManager, HistoryState, SessionId,
};

use crate::{CmsConfig, CmsError, HomepageBackend, Result};

/// Holds the homepage being edited.
///
/// Every mutation becomes a [`Command`] executed through the store's
/// [`HistoryManager`]. Rejected commands leave the document untouched and
/// return `false` (or `None`). Any accepted edit, undo, redo or jump marks the
/// store dirty and restarts the auto-save delay.
pub struct CmsStore<B> {
	backend: B,
	config: CmsConfig,
	history: HistoryManager,
	document: Option<Homepage>,
	dirty: bool,
	last_edit: Option<Instant>,
}

impl<B: HomepageBackend> CmsStore<B> {
	/// Creates a store with nothing loaded.
	pub fn new(backend: B, config: CmsConfig) -> Self {
		Self {
			backend,
			history: HistoryManager::new(config.history),
			config,
			document: None,
			dirty: false,
			last_edit: None,
		}
	}

	/// Returns the storage backend.
	pub fn backend(&self) -> &B {
		&self.backend
	}

	pub fn config(&self) -> &CmsConfig {
		&self.config
	}

	/// Session stamped on every command this store executes.
	pub fn session(&self) -> &SessionId {
		self.history.session()
	}

	/// Returns the open document, if one is loaded.
	pub fn document(&self) -> Option<&Homepage> {
		self.document.as_ref()
	}

	/// Whether the document has edits not yet saved.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	/// Loads the draft from storage, replacing any open document.
	///
	/// Section order is normalized and history starts empty.
	pub async fn load(&mut self) -> Result<&Homepage> {
		let homepage = self.backend.load().await?.normalized();
		info!(
			homepage = %homepage.id,
			sections = homepage.len(),
			version = homepage.metadata.version,
			"homepage loaded"
		);
		Ok(self.replace_document(homepage))
	}

	/// Discards local edits and history by reloading the stored draft.
	pub async fn revert(&mut self) -> Result<&Homepage> {
		let homepage = self.backend.load().await?.normalized();
		info!(homepage = %homepage.id, discarded = self.dirty, "homepage reverted");
		Ok(self.replace_document(homepage))
	}

	/// Appends or inserts a default section of `kind`.
	///
	/// Returns the new section's id, or `None` when the insert was rejected.
	pub fn add_section(
		&mut self,
		kind: SectionKind,
		index: Option<usize>,
	) -> Result<Option<SectionId>> {
		let section = create_default_section(kind);
		let id = section.id.clone();
		let accepted = self.execute(Command::add_section(section, index))?;
		Ok(accepted.then_some(id))
	}

	/// Shallow-merges `changes` into the section's config.
	pub fn update_section(&mut self, id: &SectionId, changes: FieldChanges) -> Result<bool> {
		self.execute(Command::update_section(id.clone(), changes))
	}

	/// Removes the section.
	pub fn remove_section(&mut self, id: &SectionId) -> Result<bool> {
		self.execute(Command::remove_section(id.clone()))
	}

	/// Moves the section from index `from` to index `to`.
	///
	/// `from` must be the section's current index.
	pub fn reorder_section(&mut self, id: &SectionId, from: usize, to: usize) -> Result<bool> {
		self.execute(Command::reorder_section(id.clone(), from, to))
	}

	/// Moves the section to index `to`, wherever it currently is.
	pub fn move_section(&mut self, id: &SectionId, to: usize) -> Result<bool> {
		let Some(from) = self.loaded()?.position(id) else {
			debug!(section = %id, "move: section not found");
			return Ok(false);
		};
		self.reorder_section(id, from, to)
	}

	/// Inserts a copy of the section right after it.
	///
	/// Returns the copy's id, or `None` when the section does not exist.
	pub fn duplicate_section(&mut self, id: &SectionId) -> Result<Option<SectionId>> {
		let new_id = SectionId::generate();
		let accepted = self.execute(Command::duplicate_section_as(id.clone(), new_id.clone()))?;
		Ok(accepted.then_some(new_id))
	}

	/// Flips the section's `visible` flag.
	pub fn toggle_visibility(&mut self, id: &SectionId) -> Result<bool> {
		let Some(section) = self.loaded()?.section(id) else {
			debug!(section = %id, "toggle: section not found");
			return Ok(false);
		};
		let visible = !section.visible;
		self.execute(Command::toggle_visibility(id.clone(), visible))
	}

	/// Returns `false` when there is nothing to undo.
	pub fn undo(&mut self) -> Result<bool> {
		self.navigate(|history, document| history.undo(document))
	}

	/// Returns `false` when there is nothing to redo.
	pub fn redo(&mut self) -> Result<bool> {
		self.navigate(|history, document| history.redo(document))
	}

	/// Undoes or redoes until the entry `id` is the last applied one.
	///
	/// Returns `false` for an unknown id.
	pub fn jump_to(&mut self, id: &CommandId) -> Result<bool> {
		self.navigate(|history, document| history.jump_to(id, document))
	}

	/// Summary for undo/redo controls.
	pub fn history_state(&self) -> HistoryState {
		self.history.state()
	}

	/// Every history entry, oldest first.
	pub fn history_entries(&self) -> Vec<HistoryEntryView> {
		self.history.entries()
	}

	/// Registers the callback invoked after every history change.
	pub fn set_history_listener(&mut self, listener: impl FnMut(&HistoryState) + Send + 'static) {
		self.history.set_listener(listener);
	}

	/// Saves the document as a draft. History is kept.
	pub async fn save_draft(&mut self) -> Result<()> {
		let saved = self.backend.save_draft(self.loaded()?).await?;
		info!(homepage = %saved.id, version = saved.metadata.version, "draft saved");
		self.document = Some(saved);
		self.dirty = false;
		self.last_edit = None;
		Ok(())
	}

	/// Publishes the document.
	///
	/// History is cleared afterwards when `clear_history_on_publish` is set.
	pub async fn publish(&mut self) -> Result<()> {
		let published = self.backend.publish(self.loaded()?).await?;
		info!(
			homepage = %published.id,
			version = published.metadata.version,
			"homepage published"
		);
		self.document = Some(published);
		self.dirty = false;
		self.last_edit = None;
		if self.config.clear_history_on_publish {
			self.history.clear();
		}
		Ok(())
	}

	/// Whether a debounced draft save should run at `now`.
	pub fn auto_save_due(&self, now: Instant) -> bool {
		self.config.auto_save.enabled
			&& self.dirty
			&& self.last_edit.is_some_and(|edited| {
				now.saturating_duration_since(edited) >= self.config.auto_save.delay()
			})
	}

	/// Saves the draft if an auto-save is due. Returns whether it saved.
	pub async fn auto_save(&mut self) -> Result<bool> {
		if !self.auto_save_due(Instant::now()) {
			return Ok(false);
		}
		debug!("auto-save due");
		self.save_draft().await?;
		Ok(true)
	}

	fn loaded(&self) -> Result<&Homepage> {
		self.document.as_ref().ok_or(CmsError::NotLoaded)
	}

	fn replace_document(&mut self, homepage: Homepage) -> &Homepage {
		self.history.clear();
		self.dirty = false;
		self.last_edit = None;
		self.document.insert(homepage)
	}

	fn mark_dirty(&mut self) {
		self.dirty = true;
		self.last_edit = Some(Instant::now());
	}

	fn execute(&mut self, command: Command) -> Result<bool> {
		let document = self.document.as_ref().ok_or(CmsError::NotLoaded)?;
		let CommandResult { success, document } = self.history.execute(command, document);
		if success {
			self.document = Some(document);
			self.mark_dirty();
		}
		Ok(success)
	}

	fn navigate(
		&mut self,
		step: impl FnOnce(
			&mut HistoryManager,
			&Homepage,
		) -> std::result::Result<Option<CommandResult>, HistoryError>,
	) -> Result<bool> {
		let document = self.document.as_ref().ok_or(CmsError::NotLoaded)?;
		match step(&mut self.history, document) {
			Ok(Some(result)) => {
				self.document = Some(result.document);
				self.mark_dirty();
				Ok(true)
			}
			Ok(None) => Ok(false),
			Err(error) => {
				warn!(%error, "history no longer matches the document");
				Err(error.into())
			}
		}
	}
}
