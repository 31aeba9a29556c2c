//! Static content indices searched by the overlay.
//!
//! Every label, description and category is a translation key. Because
//! translation falls back to the key itself, literal strings work too, which
//! keeps hand-written content files short.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

const BUILTIN_SITE: &str = include_str!("../content/site.toml");

/// A documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageEntry {
	pub path: String,
	pub label: String,
	#[serde(default)]
	pub description: Option<String>,
}

/// A shortcut to a documented API anchor or guide section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuickLinkEntry {
	pub path: String,
	pub label: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub category: Option<String>,
	#[serde(default)]
	pub icon: Option<String>,
}

/// A resource hosted outside the documentation site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalLinkEntry {
	pub url: String,
	pub label: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub icon: Option<String>,
}

/// The three read-only sources, in their authored order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteIndex {
	pub pages: Vec<PageEntry>,
	pub quick_links: Vec<QuickLinkEntry>,
	pub external: Vec<ExternalLinkEntry>,
}

impl SiteIndex {
	/// Index of the bundled documentation site.
	pub fn builtin() -> Result<Self> {
		Self::from_toml_str(BUILTIN_SITE, "built-in site index")
	}

	pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self> {
		let index: Self = toml::from_str(contents).map_err(|source| Error::Parse {
			origin: origin.to_string(),
			source,
		})?;
		debug!(
			origin,
			pages = index.pages.len(),
			quick_links = index.quick_links.len(),
			external = index.external.len(),
			"loaded site index"
		);
		Ok(index)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let contents = fs::read_to_string(path).map_err(|source| Error::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&contents, &path.display().to_string())
	}

	/// Look up the page registered at `path`.
	#[must_use]
	pub fn page(&self, path: &str) -> Option<&PageEntry> {
		self.pages.iter().find(|page| page.path == path)
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.pages.is_empty() && self.quick_links.is_empty() && self.external.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_index_has_every_source() {
		let index = SiteIndex::builtin().unwrap();
		assert!(index.pages.len() > 5, "curated view needs more pages than it shows");
		assert!(index.quick_links.len() > 3);
		assert!(!index.external.is_empty());
		assert!(index.external.iter().all(|link| link.url.starts_with("https://")));
	}

	#[test]
	fn missing_sections_default_to_empty() {
		let index = SiteIndex::from_toml_str(
			"[[pages]]\npath = \"/\"\nlabel = \"Home\"\n",
			"inline",
		)
		.unwrap();
		assert_eq!(index.pages.len(), 1);
		assert!(index.quick_links.is_empty());
		assert!(index.external.is_empty());
		assert_eq!(index.page("/").map(|page| page.label.as_str()), Some("Home"));
	}

	#[test]
	fn malformed_content_reports_origin() {
		let err = SiteIndex::from_toml_str("[[pages]]\nlabel = 3\n", "custom.toml").unwrap_err();
		assert!(err.to_string().contains("custom.toml"));
	}
}
