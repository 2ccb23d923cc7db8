//! Sections: the building blocks of a homepage.
//!
//! A [`Section`] couples identity and layout state (id, visibility, order,
//! timestamps) with a kind-specific [`SectionContent`] payload. The payload is
//! a tagged union serialized as `{ "type": "<kind>", "config": { .. } }`.
//!
//! Config payloads can be viewed as JSON objects through
//! [`SectionContent::config_map`] and rebuilt with
//! [`SectionContent::from_config_map`]. Partial updates use this pair to
//! shallow-merge fields while keeping the typed config as the source of truth:
//! a merge that produces an invalid config fails to rebuild.

mod config;


use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use self::config::{
	Alignment, BannerHeight, CategoryGridConfig, ContentWidth, HeroConfig, HeroHeight,
	ImageBannerConfig, NewsletterConfig, ProductCarouselConfig, ProductSource, Testimonial,
	TestimonialsConfig, TextBlockConfig,
};
use crate::{DocumentError, Result, SectionId};

/// Discriminant of [`SectionContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
	Hero,
	ProductCarousel,
	TextBlock,
	ImageBanner,
	CategoryGrid,
	Newsletter,
	Testimonials,
}

impl SectionKind {
	/// Every section kind, in palette order.
	pub const ALL: [SectionKind; 7] = [
		SectionKind::Hero,
		SectionKind::ProductCarousel,
		SectionKind::TextBlock,
		SectionKind::ImageBanner,
		SectionKind::CategoryGrid,
		SectionKind::Newsletter,
		SectionKind::Testimonials,
	];

	/// Wire name of the kind, as used in the `type` tag.
	pub const fn as_str(self) -> &'static str {
		match self {
			SectionKind::Hero => "hero",
			SectionKind::ProductCarousel => "product_carousel",
			SectionKind::TextBlock => "text_block",
			SectionKind::ImageBanner => "image_banner",
			SectionKind::CategoryGrid => "category_grid",
			SectionKind::Newsletter => "newsletter",
			SectionKind::Testimonials => "testimonials",
		}
	}

	/// Human-readable name for history entries and the section palette.
	pub const fn label(self) -> &'static str {
		match self {
			SectionKind::Hero => "Hero Banner",
			SectionKind::ProductCarousel => "Product Carousel",
			SectionKind::TextBlock => "Text Block",
			SectionKind::ImageBanner => "Image Banner",
			SectionKind::CategoryGrid => "Category Grid",
			SectionKind::Newsletter => "Newsletter Signup",
			SectionKind::Testimonials => "Testimonials",
		}
	}
}

impl fmt::Display for SectionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SectionKind {
	type Err = DocumentError;

	fn from_str(s: &str) -> Result<Self> {
		SectionKind::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| DocumentError::UnknownSectionKind(s.to_owned()))
	}
}

/// Kind-specific section payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum SectionContent {
	Hero(HeroConfig),
	ProductCarousel(ProductCarouselConfig),
	TextBlock(TextBlockConfig),
	ImageBanner(ImageBannerConfig),
	CategoryGrid(CategoryGridConfig),
	Newsletter(NewsletterConfig),
	Testimonials(TestimonialsConfig),
}

impl SectionContent {
	/// Returns the default payload for `kind`.
	pub fn default_for(kind: SectionKind) -> Self {
		match kind {
			SectionKind::Hero => SectionContent::Hero(HeroConfig::default()),
			SectionKind::ProductCarousel => {
				SectionContent::ProductCarousel(ProductCarouselConfig::default())
			}
			SectionKind::TextBlock => SectionContent::TextBlock(TextBlockConfig::default()),
			SectionKind::ImageBanner => SectionContent::ImageBanner(ImageBannerConfig::default()),
			SectionKind::CategoryGrid => {
				SectionContent::CategoryGrid(CategoryGridConfig::default())
			}
			SectionKind::Newsletter => SectionContent::Newsletter(NewsletterConfig::default()),
			SectionKind::Testimonials => {
				SectionContent::Testimonials(TestimonialsConfig::default())
			}
		}
	}

	/// Returns the kind of this payload.
	pub fn kind(&self) -> SectionKind {
		match self {
			SectionContent::Hero(_) => SectionKind::Hero,
			SectionContent::ProductCarousel(_) => SectionKind::ProductCarousel,
			SectionContent::TextBlock(_) => SectionKind::TextBlock,
			SectionContent::ImageBanner(_) => SectionKind::ImageBanner,
			SectionContent::CategoryGrid(_) => SectionKind::CategoryGrid,
			SectionContent::Newsletter(_) => SectionKind::Newsletter,
			SectionContent::Testimonials(_) => SectionKind::Testimonials,
		}
	}

	/// Serializes the config payload into a JSON object.
	///
	/// Every field of the kind's config is present in the returned map,
	/// including `null` for unset optional fields.
	pub fn config_map(&self) -> Result<Map<String, Value>> {
		let kind = self.kind();
		let Value::Object(mut outer) = serde_json::to_value(self)? else {
			return Err(DocumentError::NotAnObject(kind.as_str()));
		};
		match outer.remove("config") {
			Some(Value::Object(config)) => Ok(config),
			_ => Err(DocumentError::NotAnObject(kind.as_str())),
		}
	}

	/// Rebuilds a payload of `kind` from a JSON config object.
	///
	/// Fails when a field has the wrong type or the map carries a field the
	/// kind does not define.
	pub fn from_config_map(kind: SectionKind, config: Map<String, Value>) -> Result<Self> {
		let mut outer = Map::with_capacity(2);
		outer.insert("type".to_owned(), Value::String(kind.as_str().to_owned()));
		outer.insert("config".to_owned(), Value::Object(config));
		Ok(serde_json::from_value(Value::Object(outer))?)
	}
}

/// A single homepage section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
	/// Stable identity of the section.
	pub id: SectionId,
	/// Whether the storefront renders this section.
	pub visible: bool,
	/// Canonical position in the homepage. Equal to the array index in a
	/// well-formed document.
	pub order: usize,
	/// Kind-specific payload.
	pub content: SectionContent,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Section {
	/// Creates a visible section with a fresh id.
	///
	/// The order is left at zero; inserting the section into a homepage
	/// assigns its canonical position.
	pub fn new(content: SectionContent, now: DateTime<Utc>) -> Self {
		Self {
			id: SectionId::generate(),
			visible: true,
			order: 0,
			content,
			created_at: now,
			updated_at: now,
		}
	}

	/// Returns the kind of this section.
	pub fn kind(&self) -> SectionKind {
		self.content.kind()
	}
}
