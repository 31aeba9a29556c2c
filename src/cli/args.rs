use std::fmt::Write;
use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{ArgAction, ColorChoice, Parser, ValueEnum};

use crate::app_dirs;

/// Version banner with the directories the binary reads and writes.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let cache_dir = match app_dirs::get_cache_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("quickjump {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "cache directory: {cache_dir}");

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments, exiting with clap's message on error.
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
	name = "quickjump",
	version,
	long_version = long_version(),
	about = "Search overlay for jumping between documentation pages, API anchors and external links",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "QUICKJUMP_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'L',
		long,
		value_name = "CODE",
		help = "Interface locale, e.g. en or es (default: en)"
	)]
	pub(crate) locale: Option<String>,
	#[arg(
		long,
		value_name = "THEME",
		help = "Select a theme by name or alias (default: slate)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		long,
		value_name = "FILE",
		help = "Site index TOML to search instead of the built-in one (default: built-in)"
	)]
	pub(crate) content: Option<PathBuf>,
	#[arg(
		short = 'm',
		long = "max-results",
		value_name = "NUM",
		help = "Maximum number of results shown for a query (default: 12)"
	)]
	pub(crate) max_results: Option<usize>,
	#[arg(
		long,
		help = "Start with the search palette open (default: disabled)"
	)]
	pub(crate) open: bool,
	#[arg(
		short = 'q',
		long,
		value_name = "QUERY",
		help = "Print the results for QUERY and exit without starting the interface"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		long = "log-file",
		value_name = "FILE",
		help = "Write logs to FILE (default: quickjump.log in the cache directory)"
	)]
	pub(crate) log_file: Option<PathBuf>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(
		long = "list-locales",
		help = "List available locales and exit (default: disabled)"
	)]
	pub(crate) list_locales: bool,
	#[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the result")]
	pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn command_definition_is_consistent() {
		CliArgs::command().debug_assert();
	}

	#[test]
	fn defaults_to_plain_output() {
		let parsed = CliArgs::try_parse_from(["quickjump"]).expect("parses");
		assert_eq!(parsed.output, OutputFormat::Plain);
		assert!(parsed.query.is_none());
		assert!(!parsed.open);
	}

	#[test]
	fn config_flag_is_repeatable() {
		let parsed = CliArgs::try_parse_from([
			"quickjump",
			"--config",
			"a.toml",
			"-c",
			"b.toml",
			"--query",
			"pulse",
			"--output",
			"json",
		])
		.expect("parses");
		assert_eq!(parsed.config, vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]);
		assert_eq!(parsed.query.as_deref(), Some("pulse"));
		assert_eq!(parsed.output, OutputFormat::Json);
	}
}
