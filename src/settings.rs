use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail, ensure};
use config::{Config, ConfigError, File, Map};
use quickjump_core::{AggregatorLimits, Catalog, DEFAULT_LOCALE};
use quickjump_tui::Theme;
use serde::Deserialize;

use crate::app_dirs;
use crate::cli::CliArgs;

const DEFAULT_THEME: &str = "slate";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_NAME: &str = "quickjump.log";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	search: SearchSection,
	ui: UiSection,
	content: ContentSection,
	log: LogSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	max_results: Option<usize>,
	default_pages: Option<usize>,
	default_quick_links: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	locale: Option<String>,
	theme: Option<String>,
	start_open: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ContentSection {
	path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LogSection {
	level: Option<String>,
	file: Option<PathBuf>,
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogConfig {
	pub(crate) level: String,
	pub(crate) file: PathBuf,
}

pub(crate) struct ResolvedConfig {
	pub(crate) limits: AggregatorLimits,
	pub(crate) locale: String,
	pub(crate) theme_name: String,
	pub(crate) theme: Theme,
	pub(crate) start_open: bool,
	/// Site index file; `None` uses the built-in index.
	pub(crate) content: Option<PathBuf>,
	pub(crate) log: LogConfig,
}

impl ResolvedConfig {
	pub(crate) fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  Max results: {}", self.limits.max_results);
		println!("  Default pages: {}", self.limits.default_pages);
		println!("  Default quick links: {}", self.limits.default_quick_links);
		println!("  Locale: {}", self.locale);
		println!("  Theme: {}", self.theme_name);
		println!("  Start open: {}", bool_to_word(self.start_open));
		match &self.content {
			Some(path) => println!("  Content: {}", path.display()),
			None => println!("  Content: (built-in)"),
		}
		println!("  Log level: {}", self.log.level);
		println!("  Log file: {}", self.log.file.display());
	}
}

/// Where configuration comes from besides the command line.
pub(crate) struct ConfigSources {
	/// Directory for project files and relative paths.
	pub(crate) cwd: PathBuf,
	/// Directory holding the user's `config.toml`.
	pub(crate) config_dir: Option<PathBuf>,
	/// `QUICKJUMP__*` variables; `None` reads the process environment.
	pub(crate) env: Option<Map<String, String>>,
}

impl ConfigSources {
	pub(crate) fn from_process() -> Result<Self> {
		Ok(Self {
			cwd: env::current_dir().context("failed to determine working directory")?,
			config_dir: app_dirs::get_config_dir().ok(),
			env: None,
		})
	}

	/// Only `cwd` and the given variables; no user config dir.
	#[cfg(test)]
	pub(crate) fn isolated(cwd: &Path) -> Self {
		Self {
			cwd: cwd.to_path_buf(),
			config_dir: None,
			env: Some(Map::new()),
		}
	}
}

pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	load_from(cli, &ConfigSources::from_process()?)
}

/// Like [`load`], with explicit sources.
pub(crate) fn load_from(cli: &CliArgs, sources: &ConfigSources) -> Result<ResolvedConfig> {
	let builder = build_config(cli, sources)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve(&sources.cwd)
}

fn build_config(cli: &CliArgs, sources: &ConfigSources) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files(sources) {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(sources.cwd.join(path)).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("quickjump")
			.separator("__")
			.try_parsing(true)
			.source(sources.env.clone()),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files(sources: &ConfigSources) -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Some(dir) = &sources.config_dir {
		files.push(dir.join("config.toml"));
	}

	files.push(sources.cwd.join(".quickjump.toml"));
	files.push(sources.cwd.join("quickjump.toml"));

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(value) = cli.max_results {
			self.search.max_results = Some(value);
		}
		if let Some(locale) = cli.locale.clone() {
			self.ui.locale = Some(locale);
		}
		if let Some(theme) = cli.theme.clone() {
			self.ui.theme = Some(theme);
		}
		if cli.open {
			self.ui.start_open = Some(true);
		}
		if let Some(path) = cli.content.clone() {
			self.content.path = Some(path);
		}
		if let Some(file) = cli.log_file.clone() {
			self.log.file = Some(file);
		}
	}

	fn resolve(self, cwd: &Path) -> Result<ResolvedConfig> {
		let defaults = AggregatorLimits::default();
		let limits = AggregatorLimits {
			max_results: self.search.max_results.unwrap_or(defaults.max_results),
			default_pages: self.search.default_pages.unwrap_or(defaults.default_pages),
			default_quick_links: self
				.search
				.default_quick_links
				.unwrap_or(defaults.default_quick_links),
		};
		ensure!(limits.max_results > 0, "search.max_results must be at least 1");

		let locale = self
			.ui
			.locale
			.map(|locale| locale.trim().to_ascii_lowercase())
			.filter(|locale| !locale.is_empty())
			.unwrap_or_else(|| DEFAULT_LOCALE.to_string());
		let catalog = Catalog::builtin().context("failed to load the built-in catalogs")?;
		if !catalog.has_locale(&locale) {
			let available = catalog.locales().collect::<Vec<_>>().join(", ");
			bail!("unknown locale '{locale}' (available: {available})");
		}

		let theme_name = self
			.ui
			.theme
			.map(|name| name.trim().to_string())
			.filter(|name| !name.is_empty())
			.unwrap_or_else(|| DEFAULT_THEME.to_string());
		let theme = quickjump_tui::by_name(&theme_name).ok_or_else(|| {
			anyhow!(
				"unknown theme '{theme_name}' (available: {})",
				quickjump_tui::names().join(", ")
			)
		})?;

		let content = match self.content.path {
			Some(path) => {
				let path = cwd.join(path);
				let metadata = fs::metadata(&path)
					.with_context(|| format!("failed to inspect content file {}", path.display()))?;
				ensure!(metadata.is_file(), "content path {} must be a file", path.display());
				Some(path)
			}
			None => None,
		};

		let level = self
			.log
			.level
			.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
		tracing::Level::from_str(&level).map_err(|_| anyhow!("unknown log level '{level}'"))?;
		let file = match self.log.file {
			Some(file) => cwd.join(file),
			None => app_dirs::get_cache_dir()?.join(LOG_FILE_NAME),
		};

		Ok(ResolvedConfig {
			limits,
			locale,
			theme_name,
			theme,
			start_open: self.ui.start_open.unwrap_or(false),
			content,
			log: LogConfig { level, file },
		})
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
