use quickjump_core::Translator;
use ratatui::Frame;

use super::App;
use super::host::Status;
use super::state::HitAreas;
use crate::components::{NavItem, PageContext, PaletteContext, render_page, render_palette};

impl App<'_> {
	/// Paint the page and, while the dialog is rendered, the palette on top.
	pub fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area();
		let mut hit = HitAreas::default();

		let nav = self.nav_items();
		let page = self.page.borrow().clone();
		let (title, description) = self.page_heading(&page.path);
		let title = match &page.anchor {
			Some(anchor) => format!("{title}  #{anchor}"),
			None => title,
		};
		let status = match &page.status {
			Status::Ready => self.localizer.translate("nav.status_ready"),
			Status::Opened(url) => {
				format!("{} {url}", self.localizer.translate("nav.status_opened"))
			}
			Status::OpenFailed(url) => {
				format!("{} {url}", self.localizer.translate("nav.status_open_failed"))
			}
		};
		let hints = format!(
			"{} {} · Tab {} · q {}",
			self.shortcuts.shortcut().label(),
			self.localizer.translate("nav.hint_search"),
			self.localizer.translate("nav.hint_focus"),
			self.localizer.translate("nav.hint_quit"),
		);
		let route_label = self.localizer.translate("nav.route");
		hit.page_elements = render_page(
			frame,
			area,
			PageContext {
				nav: &nav,
				title: &title,
				description: description.as_deref(),
				route: (&route_label, &page.route),
				status: &status,
				hints: &hints,
				theme: &self.style.theme,
			},
		);

		let modal = *self.overlay.modal();
		let (open, heading, placeholder, active) = {
			let document = self.document.borrow();
			(
				document.is_rendered(modal.root),
				document.text(modal.heading).to_string(),
				document
					.attribute(modal.input, "placeholder")
					.unwrap_or_default()
					.to_string(),
				document.active_element(),
			)
		};
		if open {
			let view = self.overlay.view();
			let focused_row = view
				.rows()
				.find(|row| row.element.is_some() && row.element == active)
				.map(|row| row.index);
			let hints = [
				self.localizer.translate("search.hint_navigate"),
				self.localizer.translate("search.hint_select"),
				self.localizer.translate("search.hint_close"),
			];
			let areas = render_palette(
				frame,
				area,
				PaletteContext {
					view: &view,
					input: &mut self.query_input,
					title: &heading,
					placeholder: &placeholder,
					hints: [&hints[0], &hints[1], &hints[2]],
					focused_row,
					close_focused: active == Some(modal.close_button),
					offset: &mut self.list_offset,
					theme: &self.style.theme,
				},
			);
			hit.palette = Some(areas.dialog);
			hit.close_button = Some(areas.close_button);
			hit.rows = areas.rows;
		} else {
			self.list_offset = 0;
		}
		self.hit = hit;
	}

	fn nav_items(&self) -> Vec<NavItem> {
		let active = self.document.borrow().active_element();
		let item = |element, label: String| NavItem {
			element,
			label,
			focused: active == Some(element),
		};

		let mut items = vec![item(
			self.elements.search_trigger,
			format!(
				"🔍 {} {}",
				self.localizer.translate("search.trigger"),
				self.shortcuts.shortcut().label()
			),
		)];
		for (element, path) in &self.elements.links {
			items.push(item(*element, self.page_heading(path).0));
		}
		items.push(item(
			self.elements.language,
			format!("🌐 {}", self.localizer.translate("locale.name")),
		));
		items.push(item(self.elements.quit, self.localizer.translate("nav.quit")));
		items
	}

	/// Translated title and description of the page at `path`.
	fn page_heading(&self, path: &str) -> (String, Option<String>) {
		match self.index.page(path) {
			Some(entry) => {
				let title = self.localizer.translate(&entry.label);
				let description = entry
					.description
					.as_deref()
					.map(|key| self.localizer.translate(key));
				(title, description)
			}
			None => (path.to_string(), None),
		}
	}
}
