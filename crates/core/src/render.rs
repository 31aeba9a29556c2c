//! Turn a result list into a grouped, annotated list view and mount it into
//! the document.
//!
//! [`build_list`] is pure and is what hosts paint from. [`Renderer`] also
//! mirrors the view into the document as a listbox of option rows so focus
//! and accessibility state live where the rest of the page can see them.

use serde::Serialize;

use crate::dom::{Document, ElementId, ElementKind};
use crate::i18n::Translator;
use crate::results::{ResultItem, ResultKind};

/// Arrow glyph for destinations inside the site.
pub const INTERNAL_ARROW: &str = "→";
/// Arrow glyph for destinations that open a new browsing context.
pub const EXTERNAL_ARROW: &str = "↗";
/// Marker shown next to the title of external results.
pub const EXTERNAL_INDICATOR: &str = "⧉";

/// One selectable result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
	pub index: usize,
	pub kind: ResultKind,
	pub icon: String,
	pub title: String,
	pub description: Option<String>,
	pub category: Option<String>,
	pub external: bool,
	pub arrow: &'static str,
	pub active: bool,
	pub destination: String,
	/// Element backing this row once mounted.
	#[serde(skip)]
	pub element: Option<ElementId>,
}

/// A row or a group divider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListEntry {
	Divider { kind: ResultKind, label: String },
	Row(RowView),
}

/// Placeholder shown when nothing matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
	pub query: String,
	pub message: String,
	pub hint: String,
}

/// Complete visual state of the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListView {
	Empty(EmptyState),
	Results { entries: Vec<ListEntry> },
}

impl Default for ListView {
	fn default() -> Self {
		Self::Results {
			entries: Vec::new(),
		}
	}
}

impl ListView {
	pub fn entries(&self) -> &[ListEntry] {
		match self {
			Self::Empty(_) => &[],
			Self::Results { entries } => entries,
		}
	}

	pub fn rows(&self) -> impl Iterator<Item = &RowView> {
		self.entries().iter().filter_map(|entry| match entry {
			ListEntry::Row(row) => Some(row),
			ListEntry::Divider { .. } => None,
		})
	}

	#[must_use]
	pub fn row(&self, index: usize) -> Option<&RowView> {
		self.rows().find(|row| row.index == index)
	}

	#[must_use]
	pub fn divider_count(&self) -> usize {
		self.entries()
			.iter()
			.filter(|entry| matches!(entry, ListEntry::Divider { .. }))
			.count()
	}

	#[must_use]
	pub fn active_row(&self) -> Option<&RowView> {
		self.rows().find(|row| row.active)
	}
}

/// Build the list view for `results`.
///
/// Dividers appear before each run of a new kind, but only while the user is
/// searching; the curated empty-query view is shown without them.
#[must_use]
pub fn build_list(
	results: &[ResultItem],
	selected: usize,
	query: &str,
	translator: &dyn Translator,
) -> ListView {
	if results.is_empty() {
		return ListView::Empty(EmptyState {
			query: query.to_string(),
			message: translator.translate("search.no_results"),
			hint: translator.translate("search.no_results_hint"),
		});
	}

	let searching = !query.trim().is_empty();
	let mut entries = Vec::with_capacity(results.len() + 3);
	let mut previous: Option<ResultKind> = None;
	for (index, item) in results.iter().enumerate() {
		let kind = item.kind();
		if searching && previous != Some(kind) {
			entries.push(ListEntry::Divider {
				kind,
				label: translator.translate(kind.group_label_key()),
			});
		}
		previous = Some(kind);
		entries.push(ListEntry::Row(row_for(item, index, index == selected)));
	}
	ListView::Results { entries }
}

fn row_for(item: &ResultItem, index: usize, active: bool) -> RowView {
	let external = item.is_external();
	RowView {
		index,
		kind: item.kind(),
		icon: item.icon().to_string(),
		title: item.title().to_string(),
		description: item.description().map(str::to_string),
		category: item.category().map(str::to_string),
		external,
		arrow: if external { EXTERNAL_ARROW } else { INTERNAL_ARROW },
		active,
		destination: item.destination().to_string(),
		element: None,
	}
}

/// Mounts list views beneath a listbox element.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
	list: ElementId,
	input: ElementId,
}

impl Renderer {
	/// `list` receives the rows; `input` is the combobox whose
	/// `aria-activedescendant` tracks the active row.
	pub fn new(list: ElementId, input: ElementId) -> Self {
		Self { list, input }
	}

	#[must_use]
	pub fn list(&self) -> ElementId {
		self.list
	}

	/// Rebuild the list for `results` and mirror it into `document`.
	pub fn render(
		&self,
		document: &mut Document,
		results: &[ResultItem],
		selected: usize,
		query: &str,
		translator: &dyn Translator,
	) -> ListView {
		let mut view = build_list(results, selected, query, translator);
		let focused_row = document
			.active_element()
			.filter(|active| document.is_within(*active, self.list))
			.and_then(|active| document.attribute(active, "data-index"))
			.and_then(|index| index.parse::<usize>().ok());

		document.clear_children(self.list);
		document.remove_attribute(self.input, "aria-activedescendant");

		match &mut view {
			ListView::Empty(empty) => {
				let message = document.create(self.list, ElementKind::Text);
				document.set_attribute(message, "role", "status");
				document.set_text(message, format!("{} \"{}\"", empty.message, empty.query));
				let hint = document.create(self.list, ElementKind::Text);
				document.set_text(hint, empty.hint.clone());
			}
			ListView::Results { entries } => {
				for entry in entries.iter_mut() {
					match entry {
						ListEntry::Divider { kind, label } => {
							let divider = document.create(self.list, ElementKind::Text);
							document.set_attribute(divider, "role", "presentation");
							document.set_attribute(divider, "data-kind", kind.to_string());
							document.set_text(divider, label.clone());
						}
						ListEntry::Row(row) => {
							let element = self.mount_row(document, row);
							row.element = Some(element);
						}
					}
				}
			}
		}

		if let Some(index) = focused_row {
			let target = view
				.rows()
				.filter(|row| row.index <= index)
				.last()
				.and_then(|row| row.element)
				.unwrap_or(self.input);
			document.focus(target);
		}
		view
	}

	fn mount_row(&self, document: &mut Document, row: &RowView) -> ElementId {
		let element = document.create(self.list, ElementKind::Button);
		document.set_text(element, row.title.clone());
		document.set_attribute(element, "role", "option");
		document.set_attribute(element, "data-index", row.index.to_string());
		document.set_attribute(element, "data-kind", row.kind.to_string());
		document.set_attribute(element, "data-href", row.destination.clone());
		document.set_attribute(element, "aria-selected", row.active.to_string());
		if row.external {
			document.set_attribute(element, "target", "_blank");
			document.set_attribute(element, "rel", "noopener noreferrer");
		}
		if row.active {
			document.set_attribute(element, "class", "active");
			document.set_attribute(self.input, "aria-activedescendant", element.to_string());
		}
		element
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::results::{ExternalHit, PageHit, QuickLinkHit};

	fn translate(key: &str) -> String {
		match key {
			"search.group.pages" => "Pages".into(),
			"search.group.quick_links" => "Quick Links".into(),
			"search.group.external" => "External Links".into(),
			"search.no_results" => "No results for".into(),
			"search.no_results_hint" => "Try another keyword".into(),
			other => other.into(),
		}
	}

	fn mixed() -> Vec<ResultItem> {
		vec![
			ResultItem::Page(PageHit {
				path: "/api/pulse".into(),
				title: "pulse()".into(),
				description: Some("Create reactive state".into()),
				icon: "💫".into(),
			}),
			ResultItem::Page(PageHit {
				path: "/concepts".into(),
				title: "Core Concepts".into(),
				description: None,
				icon: "🧠".into(),
			}),
			ResultItem::QuickLink(QuickLinkHit {
				path: "/api/pulse#subscribe".into(),
				title: "pulse.subscribe()".into(),
				description: None,
				category: Some("API".into()),
				icon: "🔔".into(),
			}),
			ResultItem::External(ExternalHit {
				url: "https://github.com/pulse-js/pulse".into(),
				title: "GitHub".into(),
				description: None,
				icon: "🐙".into(),
			}),
		]
	}

	fn list_fixture() -> (Document, Renderer) {
		let mut document = Document::new();
		let body = document.body();
		let input = document.create(body, ElementKind::Input);
		let list = document.create(body, ElementKind::Container);
		(document, Renderer::new(list, input))
	}

	#[test]
	fn dividers_precede_each_kind_while_searching() {
		let view = build_list(&mixed(), 0, "p", &translate);
		let labels: Vec<_> = view
			.entries()
			.iter()
			.filter_map(|entry| match entry {
				ListEntry::Divider { label, .. } => Some(label.as_str()),
				ListEntry::Row(_) => None,
			})
			.collect();
		assert_eq!(labels, vec!["Pages", "Quick Links", "External Links"]);
		assert_eq!(view.rows().count(), 4);
	}

	#[test]
	fn curated_view_has_no_dividers() {
		let view = build_list(&mixed(), 0, "", &translate);
		assert_eq!(view.divider_count(), 0);
		assert_eq!(view.rows().count(), 4);
	}

	#[test]
	fn rows_carry_arrow_category_and_external_marker() {
		let view = build_list(&mixed(), 2, "p", &translate);
		let quick = view.row(2).unwrap();
		assert!(quick.active);
		assert_eq!(quick.category.as_deref(), Some("API"));
		assert_eq!(quick.arrow, INTERNAL_ARROW);
		assert!(!quick.external);

		let external = view.row(3).unwrap();
		assert!(external.external);
		assert_eq!(external.arrow, EXTERNAL_ARROW);
		assert_eq!(view.rows().filter(|row| row.active).count(), 1);
	}

	#[test]
	fn empty_results_show_query_and_hint() {
		let view = build_list(&[], 0, "zzzz", &translate);
		let ListView::Empty(empty) = &view else {
			panic!("expected empty state");
		};
		assert_eq!(empty.query, "zzzz");
		assert_eq!(empty.hint, "Try another keyword");
		assert_eq!(view.rows().count(), 0);
		assert_eq!(view.divider_count(), 0);
	}

	#[test]
	fn mounted_rows_expose_selection_to_assistive_tech() {
		let (mut document, renderer) = list_fixture();
		let view = renderer.render(&mut document, &mixed(), 1, "p", &translate);

		let selected: Vec<_> = view
			.rows()
			.filter_map(|row| row.element)
			.filter(|element| document.attribute(*element, "aria-selected") == Some("true"))
			.collect();
		assert_eq!(selected.len(), 1);
		assert_eq!(document.attribute(selected[0], "data-index"), Some("1"));
		assert_eq!(
			document.attribute(renderer.input, "aria-activedescendant"),
			Some(selected[0].to_string().as_str())
		);

		let external = view.row(3).and_then(|row| row.element).unwrap();
		assert_eq!(document.attribute(external, "rel"), Some("noopener noreferrer"));
	}

	#[test]
	fn rerender_keeps_focus_on_same_row_index() {
		let (mut document, renderer) = list_fixture();
		let first = renderer.render(&mut document, &mixed(), 0, "p", &translate);
		let row = first.row(2).and_then(|row| row.element).unwrap();
		assert!(document.focus(row));

		let second = renderer.render(&mut document, &mixed(), 1, "p", &translate);
		let replacement = second.row(2).and_then(|row| row.element).unwrap();
		assert_ne!(row, replacement);
		assert_eq!(document.active_element(), Some(replacement));

		renderer.render(&mut document, &[], 0, "p", &translate);
		assert_eq!(document.active_element(), Some(renderer.input));
	}
}
