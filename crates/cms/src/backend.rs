//! Storage contract for homepage documents.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::trace;
use vitrine_document::{Homepage, PublishStatus};

/// Storage failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
	/// No homepage is stored.
	#[error("homepage not found")]
	NotFound,

	/// Storage refused the document.
	#[error("storage rejected the homepage: {0}")]
	Rejected(String),

	/// Storage could not be reached.
	#[error("storage unavailable: {0}")]
	Unavailable(String),
}

/// Where homepage documents are loaded from and saved to.
///
/// Implementations own versioning and timestamps: the returned document is
/// the stored one and replaces the caller's copy.
#[async_trait]
pub trait HomepageBackend: Send + Sync {
	/// Fetches the current draft.
	async fn load(&self) -> Result<Homepage, BackendError>;

	/// Stores `homepage` as the draft.
	async fn save_draft(&self, homepage: &Homepage) -> Result<Homepage, BackendError>;

	/// Stores `homepage` and makes it the live storefront homepage.
	async fn publish(&self, homepage: &Homepage) -> Result<Homepage, BackendError>;
}

#[derive(Debug, Default)]
struct MemoryState {
	draft: Option<Homepage>,
	published: Option<Homepage>,
	saves: usize,
	publishes: usize,
	offline: bool,
}

/// Process-local backend.
///
/// Each save bumps `metadata.version`; publishing also records the live copy.
#[derive(Debug, Default)]
pub struct MemoryBackend {
	state: Mutex<MemoryState>,
}

impl MemoryBackend {
	/// Creates a backend with nothing stored.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a backend holding `homepage` as its draft.
	pub fn with_homepage(homepage: Homepage) -> Self {
		let backend = Self::default();
		backend.state.lock().draft = Some(homepage);
		backend
	}

	/// Returns the stored draft.
	pub fn draft(&self) -> Option<Homepage> {
		self.state.lock().draft.clone()
	}

	/// Returns the published homepage.
	pub fn published(&self) -> Option<Homepage> {
		self.state.lock().published.clone()
	}

	/// Number of successful draft saves.
	pub fn save_count(&self) -> usize {
		self.state.lock().saves
	}

	/// Number of successful publishes.
	pub fn publish_count(&self) -> usize {
		self.state.lock().publishes
	}

	/// Makes every call fail with [`BackendError::Unavailable`] while set.
	pub fn set_offline(&self, offline: bool) {
		self.state.lock().offline = offline;
	}
}

fn ensure_online(state: &MemoryState) -> Result<(), BackendError> {
	if state.offline {
		return Err(BackendError::Unavailable("memory backend offline".to_owned()));
	}
	Ok(())
}

#[async_trait]
impl HomepageBackend for MemoryBackend {
	async fn load(&self) -> Result<Homepage, BackendError> {
		let state = self.state.lock();
		ensure_online(&state)?;
		state.draft.clone().ok_or(BackendError::NotFound)
	}

	async fn save_draft(&self, homepage: &Homepage) -> Result<Homepage, BackendError> {
		let mut state = self.state.lock();
		ensure_online(&state)?;
		let mut saved = homepage.clone();
		saved.status = PublishStatus::Draft;
		saved.metadata.version += 1;
		saved.metadata.updated_at = Utc::now();
		state.draft = Some(saved.clone());
		state.saves += 1;
		trace!(homepage = %saved.id, version = saved.metadata.version, "draft stored");
		Ok(saved)
	}

	async fn publish(&self, homepage: &Homepage) -> Result<Homepage, BackendError> {
		let mut state = self.state.lock();
		ensure_online(&state)?;
		let now = Utc::now();
		let mut published = homepage.clone();
		published.status = PublishStatus::Published;
		published.metadata.version += 1;
		published.metadata.updated_at = now;
		published.metadata.published_at = Some(now);
		state.draft = Some(published.clone());
		state.published = Some(published.clone());
		state.publishes += 1;
		trace!(homepage = %published.id, version = published.metadata.version, "homepage published");
		Ok(published)
	}
}
