//! Width-aware string helpers for terminal cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `text` in terminal columns.
#[must_use]
pub fn display_width(text: &str) -> usize {
	text.width()
}

/// Cut `text` to at most `max` columns, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
	if text.width() <= max {
		return text.to_string();
	}
	if max == 0 {
		return String::new();
	}

	let mut out = String::new();
	let mut used = 0;
	for ch in text.chars() {
		let width = ch.width().unwrap_or(0);
		if used + width > max - 1 {
			break;
		}
		out.push(ch);
		used += width;
	}
	out.push('…');
	out
}
