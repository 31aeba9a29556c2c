use ratatui::style::{Color, Modifier, Style};

/// Styles for the page chrome and the search palette.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	/// Navigation bar across the top of the page.
	pub header: Style,
	/// The active result row.
	pub row_highlight: Style,
	/// Search input line.
	pub prompt: Style,
	/// Empty-state message.
	pub empty: Style,
	/// Result titles and page headings.
	pub highlight: Style,
	/// Group dividers between result kinds.
	pub divider: Style,
	/// Category badges on quick links.
	pub badge: Style,
	/// Descriptions, hints and the status line.
	pub muted: Style,
	/// Palette border.
	pub border: Style,
}

impl Theme {
	/// Style for the page element holding keyboard focus.
	#[must_use]
	pub fn focus_style(&self) -> Style {
		Style::new()
			.fg(self.row_highlight.fg.unwrap_or(Color::Reset))
			.bg(self.row_highlight.bg.unwrap_or(Color::Reset))
			.add_modifier(Modifier::UNDERLINED)
	}
}

/// Describes a theme instance that can be looked up by name.
#[derive(Debug, Clone)]
pub struct ThemeRegistration {
	/// The name of the theme.
	pub name: String,
	/// The theme configuration.
	pub theme: Theme,
	/// Alternate names for the theme.
	pub aliases: Vec<String>,
}

impl ThemeRegistration {
	/// Creates a new theme registration with the given name and theme.
	pub fn new(name: impl Into<String>, theme: Theme) -> Self {
		Self {
			name: name.into(),
			theme,
			aliases: Vec::new(),
		}
	}

	/// Adds a single alias to this theme registration.
	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.aliases.push(alias.into());
		self
	}

	/// Whether `name` refers to this theme, ignoring case and surrounding
	/// whitespace.
	#[must_use]
	pub fn answers_to(&self, name: &str) -> bool {
		let wanted = name.trim();
		self.name.eq_ignore_ascii_case(wanted)
			|| self
				.aliases
				.iter()
				.any(|alias| alias.eq_ignore_ascii_case(wanted))
	}
}
