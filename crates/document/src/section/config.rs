//! Typed configuration payloads, one per section kind.
//!
//! Every struct fills missing fields from its [`Default`] impl and rejects
//! fields it does not define. The defaults are what a freshly added section
//! renders with.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of section text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
	Left,
	#[default]
	Center,
	Right,
}

/// Vertical size of a hero section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroHeight {
	Small,
	Medium,
	#[default]
	Large,
	Full,
}

/// Vertical size of an image banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerHeight {
	Small,
	#[default]
	Medium,
	Large,
}

/// Maximum text column width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentWidth {
	Narrow,
	#[default]
	Medium,
	Wide,
}

/// Where a product carousel pulls its products from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSource {
	#[default]
	Featured,
	NewArrivals,
	BestSellers,
	Category,
}

/// Full-width hero with headline and call to action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
	pub headline: String,
	pub subheadline: String,
	pub cta_text: String,
	pub cta_link: String,
	pub background_image: Option<String>,
	pub alignment: Alignment,
	pub height: HeroHeight,
	/// Background overlay opacity in percent (0-100).
	pub overlay_opacity: u8,
}

impl Default for HeroConfig {
	fn default() -> Self {
		Self {
			headline: String::new(),
			subheadline: String::new(),
			cta_text: "Shop Now".to_owned(),
			cta_link: "/products".to_owned(),
			background_image: None,
			alignment: Alignment::Center,
			height: HeroHeight::Large,
			overlay_opacity: 40,
		}
	}
}

/// Horizontally scrolling product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductCarouselConfig {
	pub title: String,
	pub source: ProductSource,
	/// Category slug, used when `source` is [`ProductSource::Category`].
	pub category_slug: Option<String>,
	pub product_limit: u32,
	pub show_prices: bool,
	pub autoplay: bool,
}

impl Default for ProductCarouselConfig {
	fn default() -> Self {
		Self {
			title: "Featured Products".to_owned(),
			source: ProductSource::Featured,
			category_slug: None,
			product_limit: 8,
			show_prices: true,
			autoplay: false,
		}
	}
}

/// Free-form text block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextBlockConfig {
	pub title: String,
	pub body: String,
	pub alignment: Alignment,
	pub max_width: ContentWidth,
}

/// Single linked image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageBannerConfig {
	pub image_url: String,
	pub alt_text: String,
	pub link: Option<String>,
	pub caption: String,
	pub height: BannerHeight,
}

/// Grid of category tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryGridConfig {
	pub title: String,
	/// Categories to show; empty means all top-level categories.
	pub category_ids: Vec<String>,
	pub columns: u8,
	pub show_names: bool,
}

impl Default for CategoryGridConfig {
	fn default() -> Self {
		Self {
			title: "Shop by Category".to_owned(),
			category_ids: Vec::new(),
			columns: 3,
			show_names: true,
		}
	}
}

/// Email capture form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewsletterConfig {
	pub title: String,
	pub description: String,
	pub button_text: String,
	pub placeholder: String,
}

impl Default for NewsletterConfig {
	fn default() -> Self {
		Self {
			title: "Stay in the loop".to_owned(),
			description: String::new(),
			button_text: "Subscribe".to_owned(),
			placeholder: "Enter your email".to_owned(),
		}
	}
}

/// One customer quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Testimonial {
	pub author: String,
	pub quote: String,
	/// Star rating, 1-5.
	pub rating: u8,
}

/// List of customer quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestimonialsConfig {
	pub title: String,
	pub testimonials: Vec<Testimonial>,
}

impl Default for TestimonialsConfig {
	fn default() -> Self {
		Self {
			title: "What our customers say".to_owned(),
			testimonials: Vec::new(),
		}
	}
}
