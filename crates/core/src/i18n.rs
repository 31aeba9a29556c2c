//! Translation catalogs and the reactive current locale.
//!
//! Catalog files are TOML tables, one per locale, flattened into dotted keys
//! (`[search] placeholder = "…"` becomes `search.placeholder`). Lookups never
//! fail: a key missing from the current locale falls back to the default
//! locale and finally to the key itself.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use include_dir::{Dir, include_dir};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::signal::Signal;

const BUILTIN_LOCALES: Dir = include_dir!("$CARGO_MANIFEST_DIR/locales");

/// Locale used when a key is missing from the active locale.
pub const DEFAULT_LOCALE: &str = "en";

/// Resolve a translation key to a display string.
///
/// Implementations must be total: a missing key yields a placeholder rather
/// than an error.
pub trait Translator {
	fn translate(&self, key: &str) -> String;
}

impl<F> Translator for F
where
	F: Fn(&str) -> String,
{
	fn translate(&self, key: &str) -> String {
		self(key)
	}
}

/// Flattened translation tables keyed by locale code.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	tables: BTreeMap<String, HashMap<String, String>>,
}

impl Catalog {
	/// Catalogs bundled with the crate.
	pub fn builtin() -> Result<Self> {
		let mut files: Vec<_> = BUILTIN_LOCALES.files().collect();
		files.sort_by(|a, b| a.path().cmp(b.path()));

		let mut catalog = Self::default();
		for file in files {
			let origin = format!("{}", file.path().display());
			let Some(locale) = file.path().file_stem().and_then(|stem| stem.to_str()) else {
				continue;
			};
			let contents = file
				.contents_utf8()
				.ok_or_else(|| Error::Encoding {
					origin: origin.clone(),
				})?;
			catalog.insert_toml(locale, contents, &origin)?;
		}

		if catalog.tables.is_empty() {
			return Err(Error::EmptyCatalog);
		}
		Ok(catalog)
	}

	/// Parse `contents` and merge it into the table for `locale`.
	pub fn insert_toml(&mut self, locale: &str, contents: &str, origin: &str) -> Result<()> {
		let document: toml::Table = toml::from_str(contents).map_err(|source| Error::Parse {
			origin: origin.to_string(),
			source,
		})?;
		let table = self.tables.entry(locale.to_string()).or_default();
		flatten_into(table, "", &document, origin)?;
		debug!(locale, origin, keys = table.len(), "loaded translation catalog");
		Ok(())
	}

	/// Insert a single entry, mostly useful for tests and host overrides.
	pub fn insert(&mut self, locale: &str, key: impl Into<String>, value: impl Into<String>) {
		self.tables
			.entry(locale.to_string())
			.or_default()
			.insert(key.into(), value.into());
	}

	#[must_use]
	pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
		self.tables
			.get(locale)
			.and_then(|table| table.get(key))
			.map(String::as_str)
	}

	#[must_use]
	pub fn has_locale(&self, locale: &str) -> bool {
		self.tables.contains_key(locale)
	}

	/// Locale codes in sorted order.
	pub fn locales(&self) -> impl Iterator<Item = &str> {
		self.tables.keys().map(String::as_str)
	}
}

fn flatten_into(
	target: &mut HashMap<String, String>,
	prefix: &str,
	table: &toml::Table,
	origin: &str,
) -> Result<()> {
	for (key, value) in table {
		let full = if prefix.is_empty() {
			key.clone()
		} else {
			format!("{prefix}.{key}")
		};
		match value {
			toml::Value::String(text) => {
				target.insert(full, text.clone());
			}
			toml::Value::Table(nested) => flatten_into(target, &full, nested, origin)?,
			_ => {
				return Err(Error::InvalidEntry {
					key: full,
					origin: origin.to_string(),
				});
			}
		}
	}
	Ok(())
}

/// Localization service: a catalog plus the observable current locale.
#[derive(Debug, Clone)]
pub struct Localizer {
	catalog: Rc<Catalog>,
	locale: Signal<String>,
	reported_missing: Rc<RefCell<HashSet<String>>>,
}

impl Localizer {
	/// Build a localizer starting at `locale`.
	pub fn new(catalog: Catalog, locale: &str) -> Result<Self> {
		ensure_locale(&catalog, locale)?;
		Ok(Self {
			catalog: Rc::new(catalog),
			locale: Signal::new(locale.to_string()),
			reported_missing: Rc::default(),
		})
	}

	/// Observable handle to the active locale code.
	#[must_use]
	pub fn locale(&self) -> &Signal<String> {
		&self.locale
	}

	#[must_use]
	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	/// Switch the active locale, notifying subscribers when it changes.
	pub fn set_locale(&self, locale: &str) -> Result<()> {
		ensure_locale(&self.catalog, locale)?;
		if self.locale.set(locale.to_string()) {
			debug!(locale, "locale changed");
		}
		Ok(())
	}

	/// Advance to the next available locale, wrapping around. Returns the new
	/// locale code.
	pub fn cycle_locale(&self) -> String {
		let current = self.locale.get();
		let locales: Vec<&str> = self.catalog.locales().collect();
		let position = locales.iter().position(|code| *code == current);
		let next = match position {
			Some(index) => locales[(index + 1) % locales.len()],
			None => locales.first().copied().unwrap_or(DEFAULT_LOCALE),
		}
		.to_string();
		self.locale.set(next.clone());
		next
	}
}

impl Translator for Localizer {
	fn translate(&self, key: &str) -> String {
		let locale = self.locale.get();
		if let Some(text) = self.catalog.lookup(&locale, key) {
			return text.to_string();
		}
		if let Some(text) = self.catalog.lookup(DEFAULT_LOCALE, key) {
			return text.to_string();
		}
		if self.reported_missing.borrow_mut().insert(key.to_string()) {
			warn!(key, locale = %locale, "missing translation key");
		}
		key.to_string()
	}
}

fn ensure_locale(catalog: &Catalog, locale: &str) -> Result<()> {
	if catalog.has_locale(locale) {
		return Ok(());
	}
	Err(Error::UnknownLocale {
		locale: locale.to_string(),
		available: catalog.locales().collect::<Vec<_>>().join(", "),
	})
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	fn catalog() -> Catalog {
		let mut catalog = Catalog::default();
		catalog
			.insert_toml(
				"en",
				"[search]\nplaceholder = \"Search docs\"\nclose = \"Close\"\n",
				"en.toml",
			)
			.unwrap();
		catalog
			.insert_toml("es", "[search]\nplaceholder = \"Buscar\"\n", "es.toml")
			.unwrap();
		catalog
	}

	#[test]
	fn nested_tables_flatten_to_dotted_keys() {
		let catalog = catalog();
		assert_eq!(catalog.lookup("en", "search.placeholder"), Some("Search docs"));
		assert_eq!(catalog.locales().collect::<Vec<_>>(), vec!["en", "es"]);
	}

	#[test]
	fn lookups_fall_back_to_default_locale_then_key() {
		let localizer = Localizer::new(catalog(), "es").unwrap();
		assert_eq!(localizer.translate("search.placeholder"), "Buscar");
		assert_eq!(localizer.translate("search.close"), "Close");
		assert_eq!(localizer.translate("nope.missing"), "nope.missing");
	}

	#[test]
	fn unknown_locale_is_rejected() {
		let localizer = Localizer::new(catalog(), "en").unwrap();
		let err = localizer.set_locale("fr").unwrap_err();
		assert!(matches!(err, Error::UnknownLocale { .. }));
		assert_eq!(localizer.locale().get(), "en");
	}

	#[test]
	fn cycling_notifies_locale_subscribers() {
		let localizer = Localizer::new(catalog(), "en").unwrap();
		let changes = Rc::new(Cell::new(0));
		let counter = Rc::clone(&changes);
		let _sub = localizer
			.locale()
			.subscribe(move |_| counter.set(counter.get() + 1));

		assert_eq!(localizer.cycle_locale(), "es");
		assert_eq!(localizer.cycle_locale(), "en");
		assert_eq!(changes.get(), 2);
	}

	#[test]
	fn non_string_values_are_rejected() {
		let mut catalog = Catalog::default();
		let err = catalog
			.insert_toml("en", "count = 3\n", "bad.toml")
			.unwrap_err();
		assert!(matches!(err, Error::InvalidEntry { ref key, .. } if key == "count"));
	}

	#[test]
	fn builtin_catalog_covers_overlay_keys() {
		let catalog = Catalog::builtin().unwrap();
		for locale in ["en", "es"] {
			for key in [
				"search.placeholder",
				"search.title",
				"search.no_results",
				"search.no_results_hint",
				"search.group.pages",
				"search.group.quick_links",
				"search.group.external",
			] {
				assert!(
					catalog.lookup(locale, key).is_some(),
					"{locale} catalog is missing {key}"
				);
			}
		}
	}
}
