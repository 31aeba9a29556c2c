//! The search palette: bordered dialog with an input line, the grouped
//! result list and a key hint footer.

use quickjump_core::render::EXTERNAL_INDICATOR;
use quickjump_core::{EmptyState, ListEntry, ListView, RowView};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::border;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::text::{display_width, truncate};
use crate::input::QueryInput;
use crate::style::Theme;

const MAX_WIDTH: u16 = 76;
const MIN_WIDTH: u16 = 32;
/// Border, input line, two separators and the footer.
const CHROME_HEIGHT: u16 = 6;
const PROMPT: &str = "› ";
const CLOSE_LABEL: &str = "[Esc]";

/// Argument bundle for drawing the palette.
pub struct PaletteContext<'a, 'i> {
	pub view: &'a ListView,
	pub input: &'a mut QueryInput<'i>,
	pub title: &'a str,
	pub placeholder: &'a str,
	/// Footer hints: navigate, open, close.
	pub hints: [&'a str; 3],
	/// Row index whose element holds keyboard focus.
	pub focused_row: Option<usize>,
	/// Close button holds keyboard focus.
	pub close_focused: bool,
	/// First list line to show; adjusted to keep the active row visible.
	pub offset: &'a mut usize,
	pub theme: &'a Theme,
}

/// Screen regions of the drawn palette.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteAreas {
	pub dialog: Rect,
	pub close_button: Rect,
	pub rows: Vec<(usize, Rect)>,
}

/// Dialog rectangle for a list with `lines` entries inside `screen`.
#[must_use]
pub fn dialog_area(screen: Rect, lines: usize) -> Rect {
	let width = screen
		.width
		.saturating_sub(4)
		.clamp(MIN_WIDTH.min(screen.width), MAX_WIDTH);
	let wanted = CHROME_HEIGHT.saturating_add(u16::try_from(lines).unwrap_or(u16::MAX));
	let height = wanted
		.min(screen.height.saturating_sub(2))
		.max(CHROME_HEIGHT.min(screen.height));
	let x = screen.x + screen.width.saturating_sub(width) / 2;
	let slack = screen.height.saturating_sub(height);
	let y = screen.y + (slack / 4).max(1).min(slack);
	Rect::new(x, y, width, height)
}

pub fn render_palette(
	frame: &mut Frame,
	screen: Rect,
	ctx: PaletteContext<'_, '_>,
) -> PaletteAreas {
	let PaletteContext {
		view,
		input,
		title,
		placeholder,
		hints,
		focused_row,
		close_focused,
		offset,
		theme,
	} = ctx;

	let list_lines = match view {
		ListView::Empty(_) => 2,
		ListView::Results { entries } => entries.len(),
	};
	let dialog = dialog_area(screen, list_lines);
	frame.render_widget(Clear, dialog);

	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(border::ROUNDED)
		.border_style(theme.border)
		.title(Span::styled(format!(" {title} "), theme.highlight));
	let inner = block.inner(dialog);
	frame.render_widget(block, dialog);

	let close_width = display_width(CLOSE_LABEL) as u16;
	let close_button = Rect::new(
		(dialog.x + dialog.width).saturating_sub(close_width + 2),
		dialog.y,
		close_width,
		1,
	);
	let close_style = if close_focused {
		theme.focus_style()
	} else {
		theme.muted
	};
	frame.render_widget(Paragraph::new(Span::styled(CLOSE_LABEL, close_style)), close_button);

	if inner.height < 4 || inner.width < 4 {
		return PaletteAreas {
			dialog,
			close_button,
			rows: Vec::new(),
		};
	}

	let prompt_width = display_width(PROMPT) as u16;
	let input_row = Rect::new(inner.x, inner.y, inner.width, 1);
	frame.render_widget(Paragraph::new(Span::styled(PROMPT, theme.prompt)), input_row);
	input.set_placeholder(placeholder, theme.muted);
	input.set_style(theme.prompt);
	input.render(
		frame,
		Rect::new(
			inner.x + prompt_width,
			inner.y,
			inner.width.saturating_sub(prompt_width),
			1,
		),
	);

	let separator = "─".repeat(inner.width as usize);
	frame.render_widget(
		Paragraph::new(Span::styled(separator.clone(), theme.border)),
		Rect::new(inner.x, inner.y + 1, inner.width, 1),
	);

	let list_area = Rect::new(inner.x, inner.y + 2, inner.width, inner.height.saturating_sub(4));
	let rows = match view {
		ListView::Empty(empty) => {
			render_empty(frame, list_area, empty, theme);
			Vec::new()
		}
		ListView::Results { entries } => {
			render_entries(frame, list_area, entries, focused_row, offset, theme)
		}
	};

	let footer_y = inner.y + inner.height - 1;
	frame.render_widget(
		Paragraph::new(Span::styled(separator, theme.border)),
		Rect::new(inner.x, footer_y - 1, inner.width, 1),
	);
	let [navigate, open, close] = hints;
	let footer = Line::from(vec![
		Span::styled("↑↓ ", theme.highlight),
		Span::styled(navigate, theme.muted),
		Span::raw("  "),
		Span::styled("↵ ", theme.highlight),
		Span::styled(open, theme.muted),
		Span::raw("  "),
		Span::styled("esc ", theme.highlight),
		Span::styled(close, theme.muted),
	]);
	frame.render_widget(
		Paragraph::new(footer),
		Rect::new(inner.x, footer_y, inner.width, 1),
	);

	PaletteAreas {
		dialog,
		close_button,
		rows,
	}
}

fn render_empty(frame: &mut Frame, area: Rect, empty: &EmptyState, theme: &Theme) {
	let lines = vec![
		Line::from(Span::styled(
			format!("{} \"{}\"", empty.message, empty.query),
			theme.empty,
		)),
		Line::from(Span::styled(empty.hint.clone(), theme.muted)),
	];
	frame.render_widget(
		Paragraph::new(lines)
			.alignment(Alignment::Center)
			.wrap(Wrap { trim: true }),
		area,
	);
}

fn render_entries(
	frame: &mut Frame,
	area: Rect,
	entries: &[ListEntry],
	focused_row: Option<usize>,
	offset: &mut usize,
	theme: &Theme,
) -> Vec<(usize, Rect)> {
	let visible = area.height as usize;
	if visible == 0 {
		return Vec::new();
	}

	let active_line = entries
		.iter()
		.position(|entry| matches!(entry, ListEntry::Row(row) if row.active));
	*offset = scroll_offset(*offset, active_line, visible, entries.len());

	let mut rows = Vec::new();
	for (line, entry) in entries.iter().enumerate().skip(*offset).take(visible) {
		let y = area.y + (line - *offset) as u16;
		let rect = Rect::new(area.x, y, area.width, 1);
		match entry {
			ListEntry::Divider { label, .. } => {
				frame.render_widget(Paragraph::new(divider_line(label, area.width, theme)), rect);
			}
			ListEntry::Row(row) => {
				let focused = focused_row == Some(row.index);
				frame.render_widget(
					Paragraph::new(row_line(row, area.width as usize, focused, theme)),
					rect,
				);
				rows.push((row.index, rect));
			}
		}
	}
	rows
}

/// Keep `active` inside the window of `visible` lines starting at `offset`.
#[must_use]
pub fn scroll_offset(offset: usize, active: Option<usize>, visible: usize, total: usize) -> usize {
	let max_offset = total.saturating_sub(visible);
	let offset = offset.min(max_offset);
	match active {
		Some(line) if line < offset => line,
		Some(line) if line >= offset + visible => line + 1 - visible,
		_ => offset,
	}
}

pub(crate) fn divider_line(label: &str, width: u16, theme: &Theme) -> Line<'static> {
	let text = format!(" {} ", label.to_uppercase());
	let fill = (width as usize).saturating_sub(display_width(&text) + 1);
	Line::from(vec![
		Span::styled(text, theme.divider),
		Span::styled("╌".repeat(fill), theme.border),
	])
}

pub(crate) fn row_line(row: &RowView, width: usize, focused: bool, theme: &Theme) -> Line<'static> {
	let base = if row.active {
		theme.row_highlight
	} else {
		Style::default()
	};
	let base = if focused {
		base.add_modifier(Modifier::UNDERLINED)
	} else {
		base
	};
	let muted = if row.active { base } else { theme.muted };
	let title_style = if row.active {
		base
	} else {
		theme.highlight.patch(base)
	};

	let mut right = Vec::new();
	let mut right_width = 0;
	if let Some(category) = &row.category {
		let badge = format!(" {category} ");
		right_width += display_width(&badge) + 1;
		right.push(Span::styled(badge, if row.active { base } else { theme.badge }));
		right.push(Span::styled(" ", base));
	}
	if row.external {
		right_width += display_width(EXTERNAL_INDICATOR) + 1;
		right.push(Span::styled(EXTERNAL_INDICATOR, muted));
		right.push(Span::styled(" ", base));
	}
	right_width += display_width(row.arrow) + 1;
	right.push(Span::styled(row.arrow, base));
	right.push(Span::styled(" ", base));

	let marker = if row.active { "▌" } else { " " };
	let icon = format!("{marker}{} ", row.icon);
	let budget = width.saturating_sub(display_width(&icon) + right_width + 1);
	let title = truncate(&row.title, budget);
	let mut left_width = display_width(&icon) + display_width(&title);
	let mut spans = vec![
		Span::styled(icon, base),
		Span::styled(title, title_style),
	];
	if let Some(description) = &row.description {
		let remaining = budget.saturating_sub(display_width(&row.title) + 2);
		if remaining > 3 {
			let description = truncate(description, remaining);
			left_width += display_width(&description) + 2;
			spans.push(Span::styled("  ", base));
			spans.push(Span::styled(description, muted));
		}
	}

	let gap = width.saturating_sub(left_width + right_width);
	spans.push(Span::styled(" ".repeat(gap), base));
	spans.extend(right);
	Line::from(spans)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn offset_follows_active_line() {
		assert_eq!(scroll_offset(0, Some(2), 5, 10), 0);
		assert_eq!(scroll_offset(0, Some(7), 5, 10), 3);
		assert_eq!(scroll_offset(6, Some(4), 5, 10), 4);
		assert_eq!(scroll_offset(9, None, 5, 8), 3);
	}

	#[test]
	fn dialog_is_centered_and_capped() {
		let screen = Rect::new(0, 0, 120, 40);
		let area = dialog_area(screen, 15);
		assert_eq!(area.width, MAX_WIDTH);
		assert_eq!(area.x, (120 - MAX_WIDTH) / 2);
		assert_eq!(area.height, CHROME_HEIGHT + 15);

		let tiny = dialog_area(Rect::new(0, 0, 40, 10), 15);
		assert!(tiny.height <= 8);
		assert!(tiny.right() <= 40 && tiny.bottom() <= 10);
	}
}
