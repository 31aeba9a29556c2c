use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use quickjump_core::{
	Aggregator, AggregatorLimits, Catalog, Document, ElementId, ElementKind, FrameScheduler,
	GlobalShortcuts, Localizer, Overlay, OverlayServices, SearchSession, SiteIndex,
	ToggleShortcut,
};
use ratatui::layout::Rect;

use super::host::{PageState, Router, SystemBrowser};
use crate::input::QueryInput;
use crate::style::{StyleConfig, Theme};

/// Number of pages linked from the navigation bar.
pub(crate) const NAV_LINKS: usize = 5;

/// Everything needed to start the host.
#[derive(Debug, Clone)]
pub struct HostOptions {
	pub index: SiteIndex,
	pub catalog: Catalog,
	pub locale: String,
	pub limits: AggregatorLimits,
	pub theme: Theme,
	pub shortcut: ToggleShortcut,
	/// Open the palette right away.
	pub start_open: bool,
}

impl HostOptions {
	/// Built-in content, catalogs and theme.
	pub fn builtin() -> Result<Self> {
		Ok(Self {
			index: SiteIndex::builtin().context("failed to load the built-in site index")?,
			catalog: Catalog::builtin().context("failed to load the built-in catalogs")?,
			locale: quickjump_core::DEFAULT_LOCALE.to_string(),
			limits: AggregatorLimits::default(),
			theme: Theme::default(),
			shortcut: ToggleShortcut::terminal_default(),
			start_open: false,
		})
	}
}

/// Focusable elements of the page behind the palette.
#[derive(Debug, Clone)]
pub(crate) struct PageElements {
	pub(crate) search_trigger: ElementId,
	pub(crate) language: ElementId,
	pub(crate) quit: ElementId,
	/// Navigation links with their site paths.
	pub(crate) links: Vec<(ElementId, String)>,
}

impl PageElements {
	fn mount(document: &mut Document, index: &SiteIndex) -> Self {
		let body = document.body();
		let nav = document.create(body, ElementKind::Container);
		document.set_attribute(nav, "role", "navigation");

		let search_trigger = document.create(nav, ElementKind::Button);
		document.set_attribute(search_trigger, "aria-haspopup", "dialog");
		let links = index
			.pages
			.iter()
			.take(NAV_LINKS)
			.map(|page| {
				let link = document.create(nav, ElementKind::Link);
				document.set_attribute(link, "href", page.path.clone());
				(link, page.path.clone())
			})
			.collect();
		let language = document.create(nav, ElementKind::Button);
		let quit = document.create(nav, ElementKind::Button);

		Self {
			search_trigger,
			language,
			quit,
			links,
		}
	}

	pub(crate) fn link_path(&self, element: ElementId) -> Option<&str> {
		self.links
			.iter()
			.find(|(id, _)| *id == element)
			.map(|(_, path)| path.as_str())
	}
}

/// Screen regions from the last draw, used for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub(crate) struct HitAreas {
	pub(crate) palette: Option<Rect>,
	pub(crate) close_button: Option<Rect>,
	/// Result index and the rectangle of its row.
	pub(crate) rows: Vec<(usize, Rect)>,
	pub(crate) page_elements: Vec<(ElementId, Rect)>,
}

/// The terminal host: a documentation page with the search overlay on top.
pub struct App<'a> {
	pub(crate) document: Rc<RefCell<Document>>,
	pub(crate) scheduler: FrameScheduler,
	pub(crate) overlay: Overlay,
	pub(crate) shortcuts: GlobalShortcuts,
	pub(crate) localizer: Localizer,
	pub(crate) router: Rc<Router>,
	pub(crate) index: Rc<SiteIndex>,
	pub(crate) page: Rc<RefCell<PageState>>,
	pub(crate) elements: PageElements,
	pub(crate) query_input: QueryInput<'a>,
	pub(crate) style: StyleConfig,
	pub(crate) hit: HitAreas,
	/// First visible list line inside the palette.
	pub(crate) list_offset: usize,
	pub(crate) should_quit: bool,
}

impl App<'_> {
	/// Build the page, mount the overlay and install the global shortcut.
	pub fn new(options: HostOptions) -> Result<Self> {
		Self::with_browser(options, SystemBrowser::new)
	}

	/// Like [`App::new`], with a custom external opener factory.
	pub fn with_browser(
		options: HostOptions,
		browser: impl FnOnce(Rc<RefCell<PageState>>) -> SystemBrowser,
	) -> Result<Self> {
		let HostOptions {
			index,
			catalog,
			locale,
			limits,
			theme,
			shortcut,
			start_open,
		} = options;

		let localizer = Localizer::new(catalog, &locale)
			.with_context(|| format!("cannot start with locale `{locale}`"))?;
		let index = Rc::new(index);

		let mut document = Document::new();
		let elements = PageElements::mount(&mut document, &index);
		let body = document.body();
		document.focus(elements.search_trigger);
		let document = Rc::new(RefCell::new(document));

		let page = Rc::new(RefCell::new(PageState::new("/")));
		let router = Rc::new(Router::new(localizer.clone(), Rc::clone(&page)));
		let opener = Rc::new(browser(Rc::clone(&page)));
		let scheduler = FrameScheduler::new();
		let session = SearchSession::new();
		let overlay = Overlay::mount(
			Rc::clone(&document),
			scheduler.clone(),
			body,
			session.clone(),
			Aggregator::with_limits(Rc::clone(&index), limits),
			OverlayServices {
				localizer: localizer.clone(),
				navigator: router.clone(),
				opener,
			},
		);
		let shortcuts = GlobalShortcuts::install(shortcut, &session);

		let mut app = Self {
			document,
			scheduler,
			overlay,
			shortcuts,
			localizer,
			router,
			index,
			page,
			elements,
			query_input: QueryInput::default(),
			style: StyleConfig::with_theme(theme),
			hit: HitAreas::default(),
			list_offset: 0,
			should_quit: false,
		};
		if start_open {
			app.overlay.open();
		}
		app.sync_query_input();
		Ok(app)
	}

	#[must_use]
	pub fn overlay(&self) -> &Overlay {
		&self.overlay
	}

	#[must_use]
	pub fn page(&self) -> PageState {
		self.page.borrow().clone()
	}

	#[must_use]
	pub fn should_quit(&self) -> bool {
		self.should_quit
	}

	/// Run the deferred focus work queued for after this paint.
	pub fn after_paint(&mut self) -> bool {
		self.scheduler.run_pending()
	}

	/// Mirror the session query into the text input (it is reset on open).
	pub(crate) fn sync_query_input(&mut self) {
		let query = self.overlay.session().query.get();
		self.query_input.set_text(&query);
	}
}
