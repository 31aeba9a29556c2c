//! Terminal key translation and the palette's text input.

use quickjump_core::{Key, KeyInput, Modifiers};
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

/// Translate a terminal key event into the overlay's key model.
#[must_use]
pub fn key_input(event: &KeyEvent) -> KeyInput {
	let mut modifiers = Modifiers {
		shift: event.modifiers.contains(KeyModifiers::SHIFT),
		ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
		alt: event.modifiers.contains(KeyModifiers::ALT),
		meta: event
			.modifiers
			.intersects(KeyModifiers::SUPER | KeyModifiers::META),
	};
	let key = match event.code {
		KeyCode::Up => Key::ArrowUp,
		KeyCode::Down => Key::ArrowDown,
		KeyCode::Enter => Key::Enter,
		KeyCode::Esc => Key::Escape,
		KeyCode::Tab => Key::Tab,
		KeyCode::BackTab => {
			modifiers.shift = true;
			Key::Tab
		}
		KeyCode::Char(ch) => Key::Char(ch),
		_ => Key::Other,
	};
	KeyInput::new(key, modifiers)
}

/// Single-line query editor.
#[derive(Debug, Clone)]
pub struct QueryInput<'a> {
	textarea: TextArea<'a>,
}

impl Default for QueryInput<'_> {
	fn default() -> Self {
		Self::new("")
	}
}

impl<'a> QueryInput<'a> {
	pub fn new(initial: &str) -> Self {
		let mut textarea = TextArea::new(vec![initial.to_string()]);
		textarea.set_cursor_line_style(Style::default());
		textarea.move_cursor(CursorMove::End);
		Self { textarea }
	}

	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or_default()
	}

	/// Replace the contents, keeping placeholder and styling.
	pub fn set_text(&mut self, text: &str) {
		if self.text() == text {
			return;
		}
		let placeholder = self.textarea.placeholder_text().to_string();
		let style = self.textarea.style();
		*self = Self::new(text);
		self.textarea.set_placeholder_text(placeholder);
		self.textarea.set_style(style);
	}

	pub fn set_placeholder(&mut self, placeholder: &str, style: Style) {
		if self.textarea.placeholder_text() != placeholder {
			self.textarea.set_placeholder_text(placeholder);
		}
		self.textarea.set_placeholder_style(style);
	}

	pub fn set_style(&mut self, style: Style) {
		self.textarea.set_style(style);
	}

	/// Feed an editing key. Returns whether the text changed. Enter never
	/// inserts a newline.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		if matches!(key.code, KeyCode::Enter) {
			return false;
		}
		if key.code == KeyCode::Char('m') && key.modifiers.contains(KeyModifiers::CONTROL) {
			return false;
		}
		let before = self.text().to_string();
		self.textarea.input(key);
		before != self.text()
	}

	pub fn render(&self, frame: &mut Frame, area: Rect) {
		frame.render_widget(&self.textarea, area);
	}
}
