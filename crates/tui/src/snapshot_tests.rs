use std::cell::RefCell;
use std::rc::Rc;

use quickjump_core::render::build_list;
use quickjump_core::results::{ExternalHit, PageHit, QuickLinkHit};
use quickjump_core::{ListEntry, ResultItem, ShortcutModifier, ToggleShortcut};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, HostOptions, Status, SystemBrowser};
use crate::components::palette::{divider_line, row_line};
use crate::style::{Theme, by_name};

fn mono() -> Theme {
	by_name("mono").expect("mono theme is built in")
}

fn test_app() -> (App<'static>, Rc<RefCell<Vec<String>>>) {
	let options = HostOptions {
		theme: mono(),
		shortcut: ToggleShortcut {
			modifier: ShortcutModifier::Ctrl,
			letter: 'k',
		},
		..HostOptions::builtin().expect("builtin options")
	};
	let launched = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&launched);
	let app = App::with_browser(options, move |page| {
		SystemBrowser::with_launcher(page, move |url| {
			sink.borrow_mut().push(url.to_string());
			Ok(())
		})
	})
	.expect("app");
	(app, launched)
}

fn press(app: &mut App<'_>, code: KeyCode, modifiers: KeyModifiers) {
	app.handle_key(KeyEvent::new(code, modifiers));
}

fn type_text(app: &mut App<'_>, text: &str) {
	for ch in text.chars() {
		press(app, KeyCode::Char(ch), KeyModifiers::NONE);
	}
}

fn draw(app: &mut App<'_>) -> String {
	let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
	terminal
		.draw(|frame| app.draw(frame))
		.expect("draw frame");
	buffer_to_string(terminal.backend().buffer())
}

fn buffer_to_string(buf: &Buffer) -> String {
	let mut lines = Vec::new();
	for y in 0..buf.area.height {
		let mut line = String::new();
		for x in 0..buf.area.width {
			line.push_str(buf[(x, y)].symbol());
		}
		lines.push(line);
	}
	lines.join("\n")
}

fn line_text(line: &ratatui::text::Line<'_>) -> String {
	line.spans.iter().map(|span| span.content.as_ref()).collect()
}

#[test]
fn grouped_list_lines_snapshot() {
	let results = vec![
		ResultItem::Page(PageHit {
			path: "/api/pulse".into(),
			title: "pulse()".into(),
			description: Some("Create reactive state".into()),
			icon: "*".into(),
		}),
		ResultItem::QuickLink(QuickLinkHit {
			path: "/api/pulse#subscribe".into(),
			title: "pulse.subscribe()".into(),
			description: None,
			category: Some("API".into()),
			icon: "+".into(),
		}),
		ResultItem::External(ExternalHit {
			url: "https://github.com/pulse-js/pulse".into(),
			title: "GitHub".into(),
			description: Some("Source code".into()),
			icon: "@".into(),
		}),
	];
	let labels = |key: &str| -> String {
		match key {
			"search.group.pages" => "Pages".into(),
			"search.group.quick_links" => "Quick Links".into(),
			"search.group.external" => "External Links".into(),
			other => other.into(),
		}
	};
	let view = build_list(&results, 1, "p", &labels);
	let theme = mono();

	let rendered = view
		.entries()
		.iter()
		.map(|entry| {
			let line = match entry {
				ListEntry::Divider { label, .. } => divider_line(label, 48, &theme),
				ListEntry::Row(row) => row_line(row, 48, false, &theme),
			};
			format!("|{}", line_text(&line).trim_end())
		})
		.collect::<Vec<_>>()
		.join("\n");
	insta::assert_snapshot!("grouped_list_lines", rendered);
}

#[test]
fn closed_page_shows_heading_route_and_status() {
	let (mut app, _) = test_app();
	let screen = draw(&mut app);
	assert!(screen.contains("Home"));
	assert!(screen.contains("Overview of the pulse reactive state library"));
	assert!(screen.contains("Route: /"));
	assert!(screen.contains("Ready"));
	assert!(!screen.contains("Search documentation"));
}

#[test]
fn open_palette_draws_curated_rows_without_dividers() {
	let (mut app, _) = test_app();
	press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
	assert!(app.overlay().is_open());
	assert!(app.after_paint());

	let screen = draw(&mut app);
	assert!(screen.contains("Search documentation"));
	assert!(screen.contains("[Esc]"));
	assert!(screen.contains("Getting Started"));
	assert!(screen.contains("pulse.subscribe()"));
	assert!(!screen.contains("QUICK LINKS"));
	assert!(screen.contains("navigate"));
	assert_eq!(app.hit.rows.len(), 8);
}

#[test]
fn builtin_shortcut_opens_on_ctrl_k() {
	let options = HostOptions::builtin().expect("builtin options");
	assert_eq!(options.shortcut, ToggleShortcut::terminal_default());
	let mut app = App::new(options).expect("app");
	press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
	assert!(app.overlay().is_open());
}

#[test]
fn typed_query_shows_group_dividers() {
	let (mut app, _) = test_app();
	press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
	app.after_paint();
	type_text(&mut app, "pulse");
	assert_eq!(app.overlay().session().query.get(), "pulse");
	assert_eq!(app.query_input.text(), "pulse");

	let screen = draw(&mut app);
	assert!(screen.contains("PAGES"));
	assert!(screen.contains("QUICK LINKS"));
}

#[test]
fn unmatched_query_draws_empty_state() {
	let (mut app, _) = test_app();
	press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
	app.after_paint();
	type_text(&mut app, "zzqxv");

	let screen = draw(&mut app);
	assert!(screen.contains("No results for \"zzqxv\""));
	assert!(app.hit.rows.is_empty());
}

#[test]
fn escape_closes_and_returns_focus_to_trigger() {
	let (mut app, _) = test_app();
	let trigger = app.elements.search_trigger;
	press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
	app.after_paint();
	let input = app.overlay().modal().input;
	assert_eq!(app.document.borrow().active_element(), Some(input));

	press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
	assert!(!app.overlay().is_open());
	app.after_paint();
	assert_eq!(app.document.borrow().active_element(), Some(trigger));
	assert!(!draw(&mut app).contains("Search documentation"));
}

#[test]
fn enter_on_external_result_launches_browser() {
	let (mut app, launched) = test_app();
	press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
	app.after_paint();
	type_text(&mut app, "github");
	press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

	assert_eq!(
		*launched.borrow(),
		vec!["https://github.com/pulse-js/pulse".to_string()]
	);
	assert!(!app.overlay().is_open());
	assert_eq!(
		app.page().status,
		Status::Opened("https://github.com/pulse-js/pulse".into())
	);
}

#[test]
fn clicking_a_row_navigates() {
	let (mut app, _) = test_app();
	press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
	app.after_paint();
	draw(&mut app);

	let (_, area) = *app
		.hit
		.rows
		.iter()
		.find(|(index, _)| *index == 1)
		.expect("second row is visible");
	app.handle_mouse(MouseEvent {
		kind: MouseEventKind::Down(MouseButton::Left),
		column: area.x + 2,
		row: area.y,
		modifiers: KeyModifiers::NONE,
	});

	assert!(!app.overlay().is_open());
	assert_eq!(app.page().path, "/getting-started");
}

#[test]
fn tab_and_enter_follow_navigation_links() {
	let (mut app, _) = test_app();
	press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
	press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
	let (second_link, _) = app.elements.links[1].clone();
	assert_eq!(app.document.borrow().active_element(), Some(second_link));

	press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
	assert_eq!(app.page().path, "/getting-started");
	assert!(!app.overlay().is_open());
}

#[test]
fn language_button_switches_locale_and_routes() {
	let (mut app, _) = test_app();
	let language = app.elements.language;
	app.activate_element(language);
	assert_eq!(app.localizer.locale().get(), "es");

	let (link, _) = app.elements.links[2].clone();
	app.activate_element(link);
	assert_eq!(app.page().route, "/es/concepts");

	press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
	let heading = app.overlay().modal().heading;
	assert_eq!(
		app.document.borrow().text(heading),
		"Buscar en la documentación"
	);
}

#[test]
fn q_quits_only_while_palette_is_closed() {
	let (mut app, _) = test_app();
	press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
	app.after_paint();
	type_text(&mut app, "q");
	assert!(!app.should_quit());
	assert_eq!(app.overlay().session().query.get(), "q");

	press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
	type_text(&mut app, "q");
	assert!(app.should_quit());
}

#[test]
fn ctrl_c_always_quits() {
	let (mut app, _) = test_app();
	press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
	press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
	assert!(app.should_quit());
}
