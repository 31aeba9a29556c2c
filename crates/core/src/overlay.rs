//! Reactive glue: the search session signals wired to the aggregator,
//! renderer, controller and focus manager.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, info};

use crate::aggregate::Aggregator;
use crate::collab::{ExternalOpener, Navigator, NewContextRequest};
use crate::controller::{self, KeyCommand, clamp_selection};
use crate::dom::{Document, ElementId};
use crate::focus::{FocusManager, ModalElements};
use crate::i18n::{Localizer, Translator};
use crate::keys::{Disposition, Key, KeyInput};
use crate::render::{ListView, Renderer};
use crate::results::ResultItem;
use crate::scheduler::FrameScheduler;
use crate::shortcut::ToggleShortcut;
use crate::signal::{Signal, Subscription};

/// Observable state of the one overlay instance.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
	pub query: Signal<String>,
	pub selected_index: Signal<usize>,
	pub is_open: Signal<bool>,
}

impl SearchSession {
	pub fn new() -> Self {
		Self::default()
	}
}

/// Host services the overlay calls into.
pub struct OverlayServices {
	pub localizer: Localizer,
	pub navigator: Rc<dyn Navigator>,
	pub opener: Rc<dyn ExternalOpener>,
}

struct Shared {
	session: SearchSession,
	aggregator: Aggregator,
	localizer: Localizer,
	navigator: Rc<dyn Navigator>,
	opener: Rc<dyn ExternalOpener>,
	document: Rc<RefCell<Document>>,
	focus: FocusManager,
	renderer: Renderer,
	results: RefCell<Vec<ResultItem>>,
	view: RefCell<ListView>,
}

impl Shared {
	fn recompute(&self) {
		let query = self.session.query.get();
		let results = self.aggregator.compute(&query, &self.localizer);
		debug!(query = %query, count = results.len(), "results recomputed");
		*self.results.borrow_mut() = results;
	}

	fn render(&self) {
		let query = self.session.query.get();
		let selected = self.session.selected_index.get();
		let view = {
			let results = self.results.borrow();
			let mut document = self.document.borrow_mut();
			self.renderer
				.render(&mut document, &results, selected, &query, &self.localizer)
		};
		*self.view.borrow_mut() = view;
	}

	fn on_query_changed(&self) {
		self.recompute();
		self.session.selected_index.set(0);
		self.render();
	}

	fn on_locale_changed(&self) {
		self.focus
			.modal()
			.apply_labels(&mut self.document.borrow_mut(), &self.localizer);
		self.recompute();
		let count = self.results.borrow().len();
		let selected = self.session.selected_index.get();
		self.session
			.selected_index
			.set(clamp_selection(selected, count));
		self.render();
	}

	fn on_open_changed(&self, open: bool) {
		if open {
			self.focus
				.open(self.localizer.translate("search.placeholder"));
			self.session.query.set(String::new());
			self.session.selected_index.set(0);
		} else {
			self.focus.close();
		}
		debug!(open, "search overlay toggled");
		self.render();
	}

	fn activate(&self, item: &ResultItem) {
		match item {
			ResultItem::External(hit) => {
				info!(url = %hit.url, "opening external result");
				self.opener
					.open_in_new_context(&NewContextRequest::isolated(hit.url.as_str()));
			}
			ResultItem::Page(_) | ResultItem::QuickLink(_) => {
				info!(path = item.destination(), kind = %item.kind(), "navigating to result");
				self.navigator.navigate_to(item.destination());
			}
		}
		self.session.is_open.set(false);
	}

	/// Index of the result row holding keyboard focus, if any.
	fn focused_row(&self) -> Option<usize> {
		let document = self.document.borrow();
		let active = document.active_element()?;
		if !document.is_within(active, self.renderer.list()) {
			return None;
		}
		document.attribute(active, "data-index")?.parse().ok()
	}

	/// A dialog control other than the input or a result row (the close
	/// button) holding focus. Enter on it is left to the host.
	fn focused_control(&self) -> Option<ElementId> {
		let document = self.document.borrow();
		let modal = self.focus.modal();
		let active = document.active_element()?;
		let is_control = active != modal.input
			&& document.is_within(active, modal.root)
			&& !document.is_within(active, modal.list);
		is_control.then_some(active)
	}
}

/// The search overlay mounted into a host document.
pub struct Overlay {
	shared: Rc<Shared>,
	scheduler: FrameScheduler,
	_subscriptions: Vec<Subscription>,
}

impl Overlay {
	/// Mount the dialog beneath `parent` and subscribe to the session and
	/// locale signals. The overlay starts closed with the curated results
	/// already rendered.
	pub fn mount(
		document: Rc<RefCell<Document>>,
		scheduler: FrameScheduler,
		parent: ElementId,
		session: SearchSession,
		aggregator: Aggregator,
		services: OverlayServices,
	) -> Self {
		let modal = {
			let mut doc = document.borrow_mut();
			let modal = ModalElements::mount(&mut doc, parent);
			modal.apply_labels(&mut doc, &services.localizer);
			modal
		};
		let focus = FocusManager::new(Rc::clone(&document), scheduler.clone(), modal);
		let shared = Rc::new(Shared {
			session,
			aggregator,
			localizer: services.localizer,
			navigator: services.navigator,
			opener: services.opener,
			document,
			focus,
			renderer: Renderer::new(modal.list, modal.input),
			results: RefCell::default(),
			view: RefCell::default(),
		});

		let subscriptions = vec![
			shared
				.session
				.query
				.subscribe(with_shared(&shared, |shared, _| shared.on_query_changed())),
			shared
				.session
				.selected_index
				.subscribe(with_shared(&shared, |shared, _| shared.render())),
			shared
				.session
				.is_open
				.subscribe(with_shared(&shared, |shared, open| shared.on_open_changed(*open))),
			shared
				.localizer
				.locale()
				.subscribe(with_shared(&shared, |shared, _| shared.on_locale_changed())),
		];

		shared.recompute();
		shared.render();
		Self {
			shared,
			scheduler,
			_subscriptions: subscriptions,
		}
	}

	#[must_use]
	pub fn session(&self) -> &SearchSession {
		&self.shared.session
	}

	#[must_use]
	pub fn localizer(&self) -> &Localizer {
		&self.shared.localizer
	}

	#[must_use]
	pub fn document(&self) -> &Rc<RefCell<Document>> {
		&self.shared.document
	}

	#[must_use]
	pub fn scheduler(&self) -> &FrameScheduler {
		&self.scheduler
	}

	#[must_use]
	pub fn modal(&self) -> &ModalElements {
		self.shared.focus.modal()
	}

	#[must_use]
	pub fn focus(&self) -> &FocusManager {
		&self.shared.focus
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		self.shared.session.is_open.get()
	}

	/// Current list view, as last rendered.
	pub fn view(&self) -> Ref<'_, ListView> {
		self.shared.view.borrow()
	}

	/// Results behind the current view.
	pub fn results(&self) -> Ref<'_, [ResultItem]> {
		Ref::map(self.shared.results.borrow(), Vec::as_slice)
	}

	pub fn open(&self) {
		self.shared.session.is_open.set(true);
	}

	pub fn close(&self) {
		self.shared.session.is_open.set(false);
	}

	pub fn toggle(&self) {
		self.shared.session.is_open.update(|open| *open = !*open);
	}

	pub fn set_query(&self, query: impl Into<String>) {
		self.shared.session.query.set(query.into());
	}

	/// Offer a key press to the open overlay.
	///
	/// The result list is recomputed for the current query before the key is
	/// interpreted. A closed overlay propagates everything.
	pub fn handle_key(&self, input: KeyInput) -> Disposition {
		if !self.is_open() {
			return Disposition::Propagate;
		}
		if input.key == Key::Tab {
			return self.shared.focus.trap_tab(input.modifiers.shift);
		}
		if input.key == Key::Enter {
			if let Some(index) = self.shared.focused_row() {
				self.click(index);
				return Disposition::PreventDefault;
			}
			if self.shared.focused_control().is_some() {
				return Disposition::Propagate;
			}
		}

		let query = self.shared.session.query.get();
		let results = self
			.shared
			.aggregator
			.compute(&query, &self.shared.localizer);
		let selected = self.shared.session.selected_index.get();
		let command = controller::interpret(&input, selected, &results);
		let disposition = command.disposition();
		match command {
			KeyCommand::Select(index) => {
				self.shared.session.selected_index.set(index);
			}
			KeyCommand::Activate(item) => self.shared.activate(&item),
			KeyCommand::Close => self.close(),
			KeyCommand::Nothing | KeyCommand::Ignore => {}
		}
		disposition
	}

	/// Pointer moved over row `index`.
	pub fn hover(&self, index: usize) {
		if index < self.shared.results.borrow().len() {
			self.shared.session.selected_index.set(index);
		}
	}

	/// Row `index` was clicked; behaves like Enter on that row.
	pub fn click(&self, index: usize) {
		let item = self.shared.results.borrow().get(index).cloned();
		if let Some(item) = item {
			self.shared.activate(&item);
		}
	}
}

fn with_shared<T>(
	shared: &Rc<Shared>,
	handler: impl Fn(&Shared, &T) + 'static,
) -> impl Fn(&T) + 'static {
	let weak: Weak<Shared> = Rc::downgrade(shared);
	move |value: &T| {
		if let Some(shared) = weak.upgrade() {
			handler(&shared, value);
		}
	}
}

/// Application-wide key listener that toggles the overlay. Installed once at
/// startup and consulted before anything else sees a key.
#[derive(Debug, Clone)]
pub struct GlobalShortcuts {
	toggle: ToggleShortcut,
	is_open: Signal<bool>,
}

impl GlobalShortcuts {
	pub fn install(toggle: ToggleShortcut, session: &SearchSession) -> Self {
		debug!(shortcut = %toggle.label(), "global search shortcut installed");
		Self {
			toggle,
			is_open: session.is_open.clone(),
		}
	}

	#[must_use]
	pub fn shortcut(&self) -> ToggleShortcut {
		self.toggle
	}

	pub fn handle(&self, input: &KeyInput) -> Disposition {
		if !self.toggle.matches(input) {
			return Disposition::Propagate;
		}
		self.is_open.update(|open| *open = !*open);
		Disposition::PreventDefault
	}
}
