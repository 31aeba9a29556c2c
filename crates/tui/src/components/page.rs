//! The documentation page drawn behind the palette.

use quickjump_core::ElementId;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::text::{display_width, truncate};
use crate::style::Theme;

/// One focusable entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
	pub element: ElementId,
	pub label: String,
	pub focused: bool,
}

/// Argument bundle for drawing the page.
pub struct PageContext<'a> {
	pub nav: &'a [NavItem],
	pub title: &'a str,
	pub description: Option<&'a str>,
	/// Label and value for the route line.
	pub route: (&'a str, &'a str),
	pub status: &'a str,
	pub hints: &'a str,
	pub theme: &'a Theme,
}

/// Draw the page and return the screen area of every navigation item.
pub fn render_page(
	frame: &mut Frame,
	area: Rect,
	ctx: PageContext<'_>,
) -> Vec<(ElementId, Rect)> {
	let PageContext {
		nav,
		title,
		description,
		route,
		status,
		hints,
		theme,
	} = ctx;

	let [nav_area, body_area, status_area] = Layout::vertical([
		Constraint::Length(1),
		Constraint::Min(1),
		Constraint::Length(1),
	])
	.areas(area);

	frame.render_widget(Block::default().style(theme.header), nav_area);
	let mut areas = Vec::with_capacity(nav.len());
	let mut x = nav_area.x + 1;
	for item in nav {
		let remaining = (nav_area.x + nav_area.width).saturating_sub(x) as usize;
		if remaining < 3 {
			break;
		}
		let text = truncate(&format!(" {} ", item.label), remaining);
		let width = display_width(&text) as u16;
		let rect = Rect::new(x, nav_area.y, width, 1);
		let style = if item.focused {
			theme.focus_style()
		} else {
			theme.header
		};
		frame.render_widget(Paragraph::new(Span::styled(text, style)), rect);
		areas.push((item.element, rect));
		x += width + 1;
	}

	let framed = body_area.inner(Margin {
		vertical: 1,
		horizontal: 2,
	});
	let body = Block::default()
		.borders(Borders::LEFT)
		.border_style(theme.border);
	let inner = body.inner(framed);
	frame.render_widget(body, framed);

	let (route_label, route_value) = route;
	let mut lines = vec![
		Line::from(Span::styled(format!(" {title}"), theme.highlight)),
		Line::default(),
	];
	if let Some(description) = description {
		lines.push(Line::from(Span::styled(format!(" {description}"), theme.muted)));
		lines.push(Line::default());
	}
	lines.push(Line::from(vec![
		Span::styled(format!(" {route_label}: "), theme.muted),
		Span::raw(route_value),
	]));
	frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

	let status_line = Line::from(vec![
		Span::styled(format!(" {status}"), theme.prompt),
		Span::raw("  "),
		Span::styled(hints, theme.muted),
	]);
	frame.render_widget(Paragraph::new(status_line), status_area);

	areas
}
