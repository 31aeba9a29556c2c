//! Merge the three static sources into one ranked, capped result list.

use std::rc::Rc;

use crate::i18n::Translator;
use crate::index::{ExternalLinkEntry, PageEntry, QuickLinkEntry, SiteIndex};
use crate::results::{
	DEFAULT_EXTERNAL_ICON, DEFAULT_PAGE_ICON, DEFAULT_QUICK_LINK_ICON, ExternalHit, PageHit,
	QuickLinkHit, ResultItem, split_icon,
};

/// Upper bound on results for a non-empty query.
pub const MAX_RESULTS: usize = 12;
/// Pages shown in the curated view for an empty query.
pub const DEFAULT_PAGE_COUNT: usize = 5;
/// Quick links shown in the curated view for an empty query.
pub const DEFAULT_QUICK_LINK_COUNT: usize = 3;

/// Size limits applied by the [`Aggregator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorLimits {
	pub max_results: usize,
	pub default_pages: usize,
	pub default_quick_links: usize,
}

impl Default for AggregatorLimits {
	fn default() -> Self {
		Self {
			max_results: MAX_RESULTS,
			default_pages: DEFAULT_PAGE_COUNT,
			default_quick_links: DEFAULT_QUICK_LINK_COUNT,
		}
	}
}

/// Pure query evaluator over a shared [`SiteIndex`].
#[derive(Debug, Clone)]
pub struct Aggregator {
	index: Rc<SiteIndex>,
	limits: AggregatorLimits,
}

impl Aggregator {
	pub fn new(index: Rc<SiteIndex>) -> Self {
		Self::with_limits(index, AggregatorLimits::default())
	}

	pub fn with_limits(index: Rc<SiteIndex>, limits: AggregatorLimits) -> Self {
		Self { index, limits }
	}

	#[must_use]
	pub fn index(&self) -> &SiteIndex {
		&self.index
	}

	#[must_use]
	pub fn limits(&self) -> AggregatorLimits {
		self.limits
	}

	/// Results for `query` under the translator's current locale.
	///
	/// An empty or whitespace-only query yields the curated default view.
	/// Otherwise pages come first, then quick links, then external links, and
	/// the merged list is truncated to `max_results`. Truncating after the
	/// merge means plentiful page matches can crowd out every external match.
	#[must_use]
	pub fn compute(&self, query: &str, translator: &dyn Translator) -> Vec<ResultItem> {
		let needle = query.trim().to_lowercase();
		if needle.is_empty() {
			return self.curated(translator);
		}

		let pages = self
			.index
			.pages
			.iter()
			.map(|entry| resolve_page(entry, translator))
			.filter(|(hit, label)| page_matches(hit, label, &needle))
			.map(|(hit, _)| ResultItem::Page(hit));
		let quick_links = self
			.index
			.quick_links
			.iter()
			.map(|entry| resolve_quick_link(entry, translator))
			.filter(|hit| quick_link_matches(hit, &needle))
			.map(ResultItem::QuickLink);
		let external = self
			.index
			.external
			.iter()
			.map(|entry| resolve_external(entry, translator))
			.filter(|hit| external_matches(hit, &needle))
			.map(ResultItem::External);

		pages
			.chain(quick_links)
			.chain(external)
			.take(self.limits.max_results)
			.collect()
	}

	fn curated(&self, translator: &dyn Translator) -> Vec<ResultItem> {
		let pages = self
			.index
			.pages
			.iter()
			.take(self.limits.default_pages)
			.map(|entry| ResultItem::Page(resolve_page(entry, translator).0));
		let quick_links = self
			.index
			.quick_links
			.iter()
			.take(self.limits.default_quick_links)
			.map(|entry| ResultItem::QuickLink(resolve_quick_link(entry, translator)));
		pages.chain(quick_links).collect()
	}
}

/// Resolve a page and keep its untouched translated label for matching.
fn resolve_page(entry: &PageEntry, translator: &dyn Translator) -> (PageHit, String) {
	let label = translator.translate(&entry.label);
	let (icon, title) = split_icon(&label);
	let hit = PageHit {
		path: entry.path.clone(),
		title: title.to_string(),
		description: entry.description.as_deref().map(|key| translator.translate(key)),
		icon: icon.unwrap_or(DEFAULT_PAGE_ICON).to_string(),
	};
	(hit, label)
}

fn resolve_quick_link(entry: &QuickLinkEntry, translator: &dyn Translator) -> QuickLinkHit {
	QuickLinkHit {
		path: entry.path.clone(),
		title: translator.translate(&entry.label),
		description: entry.description.as_deref().map(|key| translator.translate(key)),
		category: entry.category.as_deref().map(|key| translator.translate(key)),
		icon: entry
			.icon
			.clone()
			.unwrap_or_else(|| DEFAULT_QUICK_LINK_ICON.to_string()),
	}
}

fn resolve_external(entry: &ExternalLinkEntry, translator: &dyn Translator) -> ExternalHit {
	ExternalHit {
		url: entry.url.clone(),
		title: translator.translate(&entry.label),
		description: entry.description.as_deref().map(|key| translator.translate(key)),
		icon: entry
			.icon
			.clone()
			.unwrap_or_else(|| DEFAULT_EXTERNAL_ICON.to_string()),
	}
}

fn contains_lowercase(text: Option<&str>, needle: &str) -> bool {
	text.is_some_and(|text| text.to_lowercase().contains(needle))
}

fn page_matches(hit: &PageHit, label: &str, needle: &str) -> bool {
	hit.title.to_lowercase().contains(needle)
		|| label.contains(needle)
		|| contains_lowercase(hit.description.as_deref(), needle)
}

fn quick_link_matches(hit: &QuickLinkHit, needle: &str) -> bool {
	contains_lowercase(Some(&hit.title), needle)
		|| contains_lowercase(hit.description.as_deref(), needle)
		|| contains_lowercase(hit.category.as_deref(), needle)
}

fn external_matches(hit: &ExternalHit, needle: &str) -> bool {
	contains_lowercase(Some(&hit.title), needle)
		|| contains_lowercase(hit.description.as_deref(), needle)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::results::ResultKind;

	fn identity(key: &str) -> String {
		key.to_string()
	}

	fn page(path: &str, label: &str, description: &str) -> PageEntry {
		PageEntry {
			path: path.into(),
			label: label.into(),
			description: Some(description.into()),
		}
	}

	fn quick_link(path: &str, label: &str, category: &str) -> QuickLinkEntry {
		QuickLinkEntry {
			path: path.into(),
			label: label.into(),
			description: None,
			category: Some(category.into()),
			icon: None,
		}
	}

	fn external(url: &str, label: &str) -> ExternalLinkEntry {
		ExternalLinkEntry {
			url: url.into(),
			label: label.into(),
			description: None,
			icon: None,
		}
	}

	fn aggregator(index: SiteIndex) -> Aggregator {
		Aggregator::new(Rc::new(index))
	}

	fn pulse_heavy_index() -> SiteIndex {
		SiteIndex {
			pages: (0..15)
				.map(|n| page(&format!("/p/{n}"), &format!("pulse page {n}"), "docs"))
				.collect(),
			quick_links: vec![quick_link("/q", "pulse anchor", "API")],
			external: vec![external("https://pulse.dev", "pulse site")],
		}
	}

	#[test]
	fn icon_prefixed_label_matches_after_stripping() {
		let index = SiteIndex {
			pages: vec![page("/api/pulse", "💫 pulse()", "Create reactive state")],
			..SiteIndex::default()
		};
		let results = aggregator(index).compute("pulse", &identity);
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].title(), "pulse()");
		assert_eq!(results[0].icon(), "💫");
		assert_eq!(results[0].destination(), "/api/pulse");
	}

	#[test]
	fn matching_is_case_insensitive_and_trimmed() {
		let index = SiteIndex {
			pages: vec![page("/api/pulse", "💫 pulse()", "Create reactive state")],
			..SiteIndex::default()
		};
		let aggregator = aggregator(index);
		assert_eq!(aggregator.compute("  PULSE ", &identity).len(), 1);
		assert_eq!(aggregator.compute("REACTIVE", &identity).len(), 1);
		assert!(aggregator.compute("missing", &identity).is_empty());
	}

	#[test]
	fn quick_links_match_on_category() {
		let index = SiteIndex {
			quick_links: vec![quick_link("/api#a", "subscribe()", "Signals")],
			..SiteIndex::default()
		};
		let results = aggregator(index).compute("signals", &identity);
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].category(), Some("Signals"));
	}

	#[test]
	fn empty_query_returns_curated_mix() {
		let aggregator = aggregator(pulse_heavy_index());
		let first = aggregator.compute("", &identity);
		let _ = aggregator.compute("pulse", &identity);
		let again = aggregator.compute("   ", &identity);

		assert_eq!(first.len(), DEFAULT_PAGE_COUNT + 1);
		assert_eq!(first, again);
		assert!(first[..DEFAULT_PAGE_COUNT].iter().all(|item| item.kind() == ResultKind::Page));
	}

	#[test]
	fn results_are_capped_after_concatenation() {
		let results = aggregator(pulse_heavy_index()).compute("pulse", &identity);
		assert_eq!(results.len(), MAX_RESULTS);
		assert!(results.iter().all(|item| item.kind() == ResultKind::Page));
	}

	#[test]
	fn kinds_appear_in_priority_order() {
		let index = SiteIndex {
			pages: vec![page("/a", "state page", "x")],
			quick_links: vec![quick_link("/b", "state link", "y")],
			external: vec![external("https://c", "state site")],
		};
		let kinds: Vec<_> = aggregator(index)
			.compute("state", &identity)
			.iter()
			.map(ResultItem::kind)
			.collect();
		assert_eq!(
			kinds,
			vec![ResultKind::Page, ResultKind::QuickLink, ResultKind::External]
		);
	}

	#[test]
	fn empty_sources_contribute_nothing() {
		let aggregator = aggregator(SiteIndex::default());
		assert!(aggregator.compute("", &identity).is_empty());
		assert!(aggregator.compute("anything", &identity).is_empty());
	}

	#[test]
	fn custom_limits_apply() {
		let limits = AggregatorLimits {
			max_results: 4,
			default_pages: 2,
			default_quick_links: 0,
		};
		let aggregator = Aggregator::with_limits(Rc::new(pulse_heavy_index()), limits);
		assert_eq!(aggregator.compute("", &identity).len(), 2);
		assert_eq!(aggregator.compute("pulse", &identity).len(), 4);
	}

	#[test]
	fn builtin_index_finds_github_only_in_external_links() {
		let index = SiteIndex::builtin().unwrap();
		let catalog = crate::i18n::Catalog::builtin().unwrap();
		let localizer = crate::i18n::Localizer::new(catalog, "en").unwrap();
		let results = aggregator(index).compute("github", &localizer);
		assert_eq!(results.len(), 1);
		assert!(results[0].is_external());
	}
}
