//! Homepage document model edited by the CMS.
//!
//! A [`Homepage`] is an ordered list of [`Section`]s rendered top to bottom.
//! Sections are plain values: editing code replaces whole sections instead of
//! mutating shared references, so two document snapshots never alias the same
//! section.

/// Default section factory.
pub mod defaults;
/// Document error types.
pub mod error;
/// The homepage aggregate and its order invariant.
pub mod homepage;
/// Identifier newtypes.
pub mod ids;
/// Section kinds and their configuration payloads.
pub mod section;

pub use defaults::{create_default_section, create_default_section_at};
pub use error::{DocumentError, Result};
pub use homepage::{Homepage, HomepageMetadata, PublishStatus};
pub use ids::{HomepageId, SectionId};
pub use section::{
	Alignment, BannerHeight, CategoryGridConfig, ContentWidth, HeroConfig, HeroHeight,
	ImageBannerConfig, NewsletterConfig, ProductCarouselConfig, ProductSource, Section,
	SectionContent, SectionKind, Testimonial, TestimonialsConfig, TextBlockConfig,
};
