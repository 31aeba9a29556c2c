//! Services the terminal host provides to the overlay: routing between
//! pages and launching the system browser.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use quickjump_core::{DEFAULT_LOCALE, ExternalOpener, Localizer, Navigator, NewContextRequest};
use tracing::{info, warn};

/// What the status line reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
	Ready,
	Opened(String),
	OpenFailed(String),
}

/// The page the host is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
	/// Site path without locale prefix or fragment, used for lookups.
	pub path: String,
	/// Fragment after `#`, if any.
	pub anchor: Option<String>,
	/// Full route including the locale prefix.
	pub route: String,
	pub status: Status,
}

impl PageState {
	pub fn new(path: &str) -> Self {
		Self {
			path: path.to_string(),
			anchor: None,
			route: path.to_string(),
			status: Status::Ready,
		}
	}
}

/// Locale-aware router: non-default locales are served under `/<locale>`.
pub struct Router {
	localizer: Localizer,
	page: Rc<RefCell<PageState>>,
}

impl Router {
	pub fn new(localizer: Localizer, page: Rc<RefCell<PageState>>) -> Self {
		Self { localizer, page }
	}

	/// Route for `path` under the active locale.
	#[must_use]
	pub fn localized_route(&self, path: &str) -> String {
		let locale = self.localizer.locale().get();
		if locale == DEFAULT_LOCALE {
			path.to_string()
		} else if path == "/" {
			format!("/{locale}")
		} else {
			format!("/{locale}{path}")
		}
	}
}

impl Navigator for Router {
	fn navigate_to(&self, path: &str) {
		let (base, anchor) = match path.split_once('#') {
			Some((base, anchor)) => (base, Some(anchor.to_string())),
			None => (path, None),
		};
		let base = if base.is_empty() { "/" } else { base };
		let route = self.localized_route(path);
		info!(%route, "navigated");

		let mut page = self.page.borrow_mut();
		page.path = base.to_string();
		page.anchor = anchor;
		page.route = route;
		page.status = Status::Ready;
	}
}

type Launcher = Box<dyn Fn(&str) -> io::Result<()>>;

/// Opens external results with the platform's default browser.
///
/// Browsers started this way share nothing with the terminal session, so the
/// request's opener and referrer isolation holds by construction.
pub struct SystemBrowser {
	page: Rc<RefCell<PageState>>,
	launcher: Launcher,
}

impl SystemBrowser {
	pub fn new(page: Rc<RefCell<PageState>>) -> Self {
		Self::with_launcher(page, |url| open::that_detached(url))
	}

	/// Use `launcher` instead of the system browser.
	pub fn with_launcher(
		page: Rc<RefCell<PageState>>,
		launcher: impl Fn(&str) -> io::Result<()> + 'static,
	) -> Self {
		Self {
			page,
			launcher: Box::new(launcher),
		}
	}
}

impl ExternalOpener for SystemBrowser {
	fn open_in_new_context(&self, request: &NewContextRequest) {
		let status = match (self.launcher)(&request.url) {
			Ok(()) => {
				info!(url = %request.url, features = %request.features(), "opened external link");
				Status::Opened(request.url.clone())
			}
			Err(error) => {
				warn!(url = %request.url, %error, "failed to launch browser");
				Status::OpenFailed(request.url.clone())
			}
		};
		self.page.borrow_mut().status = status;
	}
}

#[cfg(test)]
mod tests {
	use quickjump_core::Catalog;

	use super::*;

	fn localizer() -> Localizer {
		Localizer::new(Catalog::builtin().unwrap(), "en").unwrap()
	}

	#[test]
	fn routes_carry_locale_prefix_outside_default_locale() {
		let localizer = localizer();
		let page = Rc::new(RefCell::new(PageState::new("/")));
		let router = Router::new(localizer.clone(), Rc::clone(&page));

		router.navigate_to("/api/pulse#subscribe");
		{
			let page = page.borrow();
			assert_eq!(page.path, "/api/pulse");
			assert_eq!(page.anchor.as_deref(), Some("subscribe"));
			assert_eq!(page.route, "/api/pulse#subscribe");
		}

		localizer.set_locale("es").unwrap();
		router.navigate_to("/");
		assert_eq!(page.borrow().route, "/es");
		router.navigate_to("/faq");
		assert_eq!(page.borrow().route, "/es/faq");
	}

	#[test]
	fn browser_failures_are_reported_not_propagated() {
		let page = Rc::new(RefCell::new(PageState::new("/")));
		let browser = SystemBrowser::with_launcher(Rc::clone(&page), |_| {
			Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
		});
		browser.open_in_new_context(&NewContextRequest::isolated("https://example.com"));
		assert_eq!(
			page.borrow().status,
			Status::OpenFailed("https://example.com".into())
		);
	}

	#[test]
	fn launcher_receives_the_url() {
		let page = Rc::new(RefCell::new(PageState::new("/")));
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&seen);
		let browser = SystemBrowser::with_launcher(Rc::clone(&page), move |url| {
			sink.borrow_mut().push(url.to_string());
			Ok(())
		});
		browser.open_in_new_context(&NewContextRequest::isolated("https://npmjs.com"));
		assert_eq!(*seen.borrow(), vec!["https://npmjs.com".to_string()]);
		assert_eq!(page.borrow().status, Status::Opened("https://npmjs.com".into()));
	}
}
