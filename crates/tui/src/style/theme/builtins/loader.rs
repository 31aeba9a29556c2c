use anyhow::{Context, Result, anyhow, bail};
use include_dir::{Dir, File};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::style::theme::types::{Theme, ThemeRegistration};

pub(super) struct BuiltinThemes {
	pub(super) registrations: Vec<ThemeRegistration>,
	pub(super) default_theme: Theme,
}

#[derive(Debug, Deserialize)]
struct ThemeConfig {
	name: String,
	#[serde(default)]
	aliases: Vec<String>,
	#[serde(default)]
	default: bool,
	styles: ThemeStylesConfig,
}

impl ThemeConfig {
	fn into_document(self, context: &str) -> Result<ThemeDocument> {
		let theme = self.styles.into_theme(&format!("{context}.styles"))?;
		let registration = self
			.aliases
			.into_iter()
			.map(|alias| alias.trim().to_string())
			.filter(|alias| !alias.is_empty())
			.fold(ThemeRegistration::new(self.name, theme), |registration, alias| {
				registration.alias(alias)
			});

		Ok(ThemeDocument {
			registration,
			is_default: self.default,
		})
	}
}

#[derive(Debug, Deserialize)]
struct ThemeStylesConfig {
	header: StyleConfig,
	row_highlight: StyleConfig,
	prompt: StyleConfig,
	empty: StyleConfig,
	highlight: StyleConfig,
	divider: StyleConfig,
	badge: StyleConfig,
	muted: StyleConfig,
	border: StyleConfig,
}

impl ThemeStylesConfig {
	fn into_theme(self, context: &str) -> Result<Theme> {
		let style = |config: &StyleConfig, field: &str| config.to_style(&format!("{context}.{field}"));
		Ok(Theme {
			header: style(&self.header, "header")?,
			row_highlight: style(&self.row_highlight, "row_highlight")?,
			prompt: style(&self.prompt, "prompt")?,
			empty: style(&self.empty, "empty")?,
			highlight: style(&self.highlight, "highlight")?,
			divider: style(&self.divider, "divider")?,
			badge: style(&self.badge, "badge")?,
			muted: style(&self.muted, "muted")?,
			border: style(&self.border, "border")?,
		})
	}
}

struct ThemeDocument {
	registration: ThemeRegistration,
	is_default: bool,
}

#[derive(Debug, Default, Deserialize)]
struct StyleConfig {
	#[serde(default)]
	fg: Option<String>,
	#[serde(default)]
	bg: Option<String>,
	#[serde(default)]
	modifiers: Vec<String>,
}

impl StyleConfig {
	fn to_style(&self, context: &str) -> Result<Style> {
		let mut style = Style::new();

		if let Some(fg) = &self.fg {
			let color = parse_color(fg)
				.with_context(|| format!("{context}: invalid foreground colour `{fg}`"))?;
			style = style.fg(color);
		}

		if let Some(bg) = &self.bg {
			let color = parse_color(bg)
				.with_context(|| format!("{context}: invalid background colour `{bg}`"))?;
			style = style.bg(color);
		}

		for modifier in &self.modifiers {
			let modifier_value = parse_modifier(modifier)
				.with_context(|| format!("{context}: invalid modifier `{modifier}`"))?;
			style = style.add_modifier(modifier_value);
		}

		Ok(style)
	}
}

pub(super) fn load_builtin_themes(dir: &Dir) -> Result<BuiltinThemes> {
	let mut registrations = Vec::new();
	let mut default_name: Option<String> = None;

	let mut files: Vec<_> = dir.files().collect();
	files.sort_by(|a, b| a.path().cmp(b.path()));

	for file in files {
		let document = parse_theme_document(file)?;
		if document.is_default {
			if let Some(existing) = &default_name {
				bail!(
					"multiple built-in themes are marked as default (`{existing}` and `{}`)",
					document.registration.name
				);
			}
			default_name = Some(document.registration.name.clone());
		}
		registrations.push(document.registration);
	}

	let default_theme = match &default_name {
		Some(name) => registrations
			.iter()
			.find(|registration| &registration.name == name)
			.map(|registration| registration.theme),
		None => registrations.first().map(|registration| registration.theme),
	}
	.ok_or_else(|| anyhow!("no built-in theme definitions were found"))?;

	Ok(BuiltinThemes {
		registrations,
		default_theme,
	})
}

fn parse_theme_document(file: &File) -> Result<ThemeDocument> {
	let path = file.path();
	let contents = file
		.contents_utf8()
		.with_context(|| format!("{path:?} is not valid UTF-8"))?;

	let config: ThemeConfig = toml::from_str(contents)
		.with_context(|| format!("failed to parse built-in theme definition in {path:?}"))?;

	config.into_document(&format!("{path:?}"))
}

fn parse_color(input: &str) -> Result<Color> {
	let value = input.trim();

	if let Some(hex) = value.strip_prefix('#') {
		return parse_hex_colour(hex);
	}

	if let Some(body) = value.strip_prefix("ansi(").and_then(|s| s.strip_suffix(')')) {
		let index: u8 = body
			.trim()
			.parse()
			.with_context(|| format!("invalid ANSI colour index `{body}`"))?;
		return Ok(Color::Indexed(index));
	}

	if let Ok(index) = value.parse::<u8>() {
		return Ok(Color::Indexed(index));
	}

	let named = match normalise_key(value).as_str() {
		"reset" | "none" | "default" => Color::Reset,
		"black" => Color::Black,
		"red" => Color::Red,
		"green" => Color::Green,
		"yellow" => Color::Yellow,
		"blue" => Color::Blue,
		"magenta" => Color::Magenta,
		"cyan" => Color::Cyan,
		"gray" | "grey" => Color::Gray,
		"dark_gray" | "dark_grey" => Color::DarkGray,
		"light_red" => Color::LightRed,
		"light_green" => Color::LightGreen,
		"light_yellow" => Color::LightYellow,
		"light_blue" => Color::LightBlue,
		"light_magenta" => Color::LightMagenta,
		"light_cyan" => Color::LightCyan,
		"white" => Color::White,
		other => bail!("unknown colour `{other}`"),
	};
	Ok(named)
}

fn parse_hex_colour(hex: &str) -> Result<Color> {
	let expanded: String = match hex.len() {
		3 => hex.chars().flat_map(|ch| [ch, ch]).collect(),
		6 => hex.to_string(),
		_ => bail!("hex colours must be 3 or 6 characters long"),
	};
	let channel = |range: std::ops::Range<usize>| {
		expanded
			.get(range)
			.and_then(|digits| u8::from_str_radix(digits, 16).ok())
			.with_context(|| format!("invalid hex colour `#{hex}`"))
	};
	Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn parse_modifier(input: &str) -> Result<Modifier> {
	match normalise_key(input).as_str() {
		"bold" => Ok(Modifier::BOLD),
		"dim" => Ok(Modifier::DIM),
		"italic" => Ok(Modifier::ITALIC),
		"underline" | "underlined" => Ok(Modifier::UNDERLINED),
		"reversed" | "reverse" | "invert" | "inverted" => Ok(Modifier::REVERSED),
		"crossed_out" | "strikethrough" => Ok(Modifier::CROSSED_OUT),
		other => bail!("unknown modifier `{other}`"),
	}
}

fn normalise_key(value: &str) -> String {
	value
		.trim()
		.to_ascii_lowercase()
		.chars()
		.map(|ch| match ch {
			'-' | ' ' => '_',
			other => other,
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use include_dir::DirEntry;

	use super::*;

	const MINIMAL: &str = r##"
name = "{name}"
default = {default}

[styles]
header = { fg = "#fff" }
row_highlight = { fg = "black", bg = "light-blue", modifiers = ["bold"] }
prompt = { fg = "ansi(12)" }
empty = { fg = "dark grey", modifiers = ["italic"] }
highlight = {}
divider = {}
badge = {}
muted = {}
border = {}
"##;

	fn theme_source(name: &str, default: bool) -> String {
		MINIMAL
			.replace("{name}", name)
			.replace("{default}", &default.to_string())
	}

	#[test]
	fn colours_and_modifiers_parse() {
		assert_eq!(parse_color("#fff").unwrap(), Color::Rgb(255, 255, 255));
		assert_eq!(parse_color("#1e2a3b").unwrap(), Color::Rgb(0x1e, 0x2a, 0x3b));
		assert_eq!(parse_color("ansi(12)").unwrap(), Color::Indexed(12));
		assert_eq!(parse_color("Light-Blue").unwrap(), Color::LightBlue);
		assert!(parse_color("#12").is_err());
		assert!(parse_color("chartreuse").is_err());
		assert_eq!(parse_modifier("Bold").unwrap(), Modifier::BOLD);
		assert!(parse_modifier("sparkle").is_err());
	}

	#[test]
	fn bundled_themes_load_with_one_default() {
		let themes = load_builtin_themes(&super::super::BUILTIN_THEME_DIR).unwrap();
		assert!(themes.registrations.len() >= 3);
	}

	#[test]
	fn two_defaults_are_rejected() {
		let first = theme_source("one", true);
		let second = theme_source("two", true);
		let entries = [
			DirEntry::File(File::new("one.toml", first.as_bytes())),
			DirEntry::File(File::new("two.toml", second.as_bytes())),
		];
		let dir = Dir::new("themes", &entries);
		let err = load_builtin_themes(&dir).err().unwrap();
		assert!(err.to_string().contains("multiple built-in themes"));
	}

	#[test]
	fn default_flag_selects_theme() {
		let first = theme_source("one", false);
		let second = theme_source("two", true).replace("#fff", "#000");
		let entries = [
			DirEntry::File(File::new("one.toml", first.as_bytes())),
			DirEntry::File(File::new("two.toml", second.as_bytes())),
		];
		let dir = Dir::new("themes", &entries);
		let themes = load_builtin_themes(&dir).unwrap();
		assert_eq!(themes.default_theme.header.fg, Some(Color::Rgb(0, 0, 0)));
	}
}
