use quickjump_core::{Disposition, ElementId, Key, KeyInput, Navigator};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use super::App;
use crate::input::key_input;

impl App<'_> {
	/// Dispatch a key press: global shortcut first, then the overlay, then
	/// the page's default behaviour for whatever the overlay let through.
	pub fn handle_key(&mut self, event: KeyEvent) {
		if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
			self.should_quit = true;
			return;
		}

		let input = key_input(&event);
		let disposition = match self.shortcuts.handle(&input) {
			Disposition::PreventDefault => Disposition::PreventDefault,
			Disposition::Propagate => self.overlay.handle_key(input),
		};
		if disposition == Disposition::Propagate {
			self.default_key_action(input, event);
		}
		self.sync_query_input();
	}

	fn default_key_action(&mut self, input: KeyInput, event: KeyEvent) {
		match input.key {
			Key::Tab => {
				self.document.borrow_mut().focus_next(input.modifiers.shift);
			}
			Key::Enter => {
				if let Some(element) = self.active_element() {
					self.activate_element(element);
				}
			}
			Key::Char('q') if !self.overlay.is_open() && !input.modifiers.ctrl => {
				self.should_quit = true;
			}
			_ if self.overlay.is_open() && self.active_element() == Some(self.overlay.modal().input) => {
				if self.query_input.input(event) {
					let text = self.query_input.text().to_string();
					self.overlay.set_query(text);
				}
			}
			_ => {}
		}
	}

	fn active_element(&self) -> Option<ElementId> {
		self.document.borrow().active_element()
	}

	/// Click or Enter on a page element.
	pub(crate) fn activate_element(&mut self, element: ElementId) {
		if element == self.elements.search_trigger {
			self.overlay.toggle();
		} else if element == self.elements.language {
			let locale = self.localizer.cycle_locale();
			debug!(%locale, "switched locale");
		} else if element == self.elements.quit {
			self.should_quit = true;
		} else if element == self.overlay.modal().close_button {
			self.overlay.close();
		} else if let Some(path) = self.elements.link_path(element).map(str::to_string) {
			self.router.navigate_to(&path);
		}
	}

	pub fn handle_mouse(&mut self, mouse: MouseEvent) {
		let (column, row) = (mouse.column, mouse.row);
		match mouse.kind {
			MouseEventKind::Moved => {
				if let Some(index) = self.row_at(column, row) {
					self.overlay.hover(index);
				}
			}
			MouseEventKind::Down(MouseButton::Left) => self.click_at(column, row),
			MouseEventKind::ScrollUp if self.overlay.is_open() => {
				self.overlay.handle_key(KeyInput::plain(Key::ArrowUp));
			}
			MouseEventKind::ScrollDown if self.overlay.is_open() => {
				self.overlay.handle_key(KeyInput::plain(Key::ArrowDown));
			}
			_ => {}
		}
		self.sync_query_input();
	}

	fn click_at(&mut self, column: u16, row: u16) {
		if self.overlay.is_open() {
			if let Some(index) = self.row_at(column, row) {
				self.overlay.click(index);
			} else if self
				.hit
				.close_button
				.is_some_and(|area| point_in_rect(column, row, area))
			{
				self.overlay.close();
			} else if self.hit.palette.is_some_and(|area| point_in_rect(column, row, area)) {
				let input = self.overlay.modal().input;
				self.document.borrow_mut().focus(input);
			}
			return;
		}

		let target = self
			.hit
			.page_elements
			.iter()
			.find(|(_, area)| point_in_rect(column, row, *area))
			.map(|(element, _)| *element);
		if let Some(element) = target {
			self.document.borrow_mut().focus(element);
			self.activate_element(element);
		}
	}

	fn row_at(&self, column: u16, row: u16) -> Option<usize> {
		if !self.overlay.is_open() {
			return None;
		}
		self.hit
			.rows
			.iter()
			.find(|(_, area)| point_in_rect(column, row, *area))
			.map(|(index, _)| *index)
	}
}

pub(crate) fn point_in_rect(column: u16, row: u16, area: Rect) -> bool {
	if area.width == 0 || area.height == 0 {
		return false;
	}
	let inside_x = column >= area.x && column < area.x.saturating_add(area.width);
	let inside_y = row >= area.y && row < area.y.saturating_add(area.height);
	inside_x && inside_y
}
