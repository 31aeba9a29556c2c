//! Resolved, display-ready search results.

use std::fmt;

use serde::Serialize;

/// Icon shown for pages whose label carries no leading icon token.
pub const DEFAULT_PAGE_ICON: &str = "📄";
pub const DEFAULT_QUICK_LINK_ICON: &str = "⚡";
pub const DEFAULT_EXTERNAL_ICON: &str = "🔗";

/// Which source a result came from. Ordering matches result priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
	Page,
	QuickLink,
	External,
}

impl ResultKind {
	/// Translation key for the group divider of this kind.
	#[must_use]
	pub fn group_label_key(self) -> &'static str {
		match self {
			Self::Page => "search.group.pages",
			Self::QuickLink => "search.group.quick_links",
			Self::External => "search.group.external",
		}
	}
}

impl fmt::Display for ResultKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Page => "page",
			Self::QuickLink => "quick_link",
			Self::External => "external",
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageHit {
	pub path: String,
	pub title: String,
	pub description: Option<String>,
	pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickLinkHit {
	pub path: String,
	pub title: String,
	pub description: Option<String>,
	pub category: Option<String>,
	pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalHit {
	pub url: String,
	pub title: String,
	pub description: Option<String>,
	pub icon: String,
}

/// One row of the overlay's result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultItem {
	Page(PageHit),
	QuickLink(QuickLinkHit),
	External(ExternalHit),
}

impl ResultItem {
	#[must_use]
	pub fn kind(&self) -> ResultKind {
		match self {
			Self::Page(_) => ResultKind::Page,
			Self::QuickLink(_) => ResultKind::QuickLink,
			Self::External(_) => ResultKind::External,
		}
	}

	/// Internal path for pages and quick links, absolute URL for external
	/// links.
	#[must_use]
	pub fn destination(&self) -> &str {
		match self {
			Self::Page(hit) => &hit.path,
			Self::QuickLink(hit) => &hit.path,
			Self::External(hit) => &hit.url,
		}
	}

	#[must_use]
	pub fn title(&self) -> &str {
		match self {
			Self::Page(hit) => &hit.title,
			Self::QuickLink(hit) => &hit.title,
			Self::External(hit) => &hit.title,
		}
	}

	#[must_use]
	pub fn description(&self) -> Option<&str> {
		match self {
			Self::Page(hit) => hit.description.as_deref(),
			Self::QuickLink(hit) => hit.description.as_deref(),
			Self::External(hit) => hit.description.as_deref(),
		}
	}

	/// Grouping badge; only quick links carry one.
	#[must_use]
	pub fn category(&self) -> Option<&str> {
		match self {
			Self::QuickLink(hit) => hit.category.as_deref(),
			Self::Page(_) | Self::External(_) => None,
		}
	}

	#[must_use]
	pub fn icon(&self) -> &str {
		match self {
			Self::Page(hit) => &hit.icon,
			Self::QuickLink(hit) => &hit.icon,
			Self::External(hit) => &hit.icon,
		}
	}

	#[must_use]
	pub fn is_external(&self) -> bool {
		matches!(self, Self::External(_))
	}
}

/// Split a label like `"💫 pulse()"` into its leading icon token and the
/// remaining text. A token counts as an icon when it holds no alphanumeric
/// characters.
#[must_use]
pub fn split_icon(label: &str) -> (Option<&str>, &str) {
	let trimmed = label.trim_start();
	let Some((first, rest)) = trimmed.split_once(char::is_whitespace) else {
		return (None, trimmed);
	};
	if first.chars().any(char::is_alphanumeric) {
		(None, trimmed)
	} else {
		(Some(first), rest.trim_start())
	}
}
