mod app_dirs;
mod cli;
mod logging;
mod settings;
mod workflow;

use anyhow::{Context, Result};
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use quickjump_core::Catalog;
use workflow::{Outcome, SearchWorkflow};

fn main() -> Result<()> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in quickjump_tui::names() {
			println!("{name}");
		}
		return Ok(());
	}

	if cli.list_locales {
		let catalog = Catalog::builtin().context("failed to load the built-in catalogs")?;
		for code in catalog.locales() {
			let name = catalog.lookup(code, "locale.name").unwrap_or(code);
			println!("{code}\t{name}");
		}
		return Ok(());
	}

	let resolved = settings::load(&cli)?;
	logging::init(&resolved.log)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let workflow = SearchWorkflow::from_config(resolved)?;
	let outcome = match &cli.query {
		Some(query) => workflow.search(query)?,
		None => workflow.run_interactive()?,
	};
	print_outcome(cli.output, &outcome)
}

fn print_outcome(format: OutputFormat, outcome: &Outcome) -> Result<()> {
	match format {
		OutputFormat::Plain => print_plain(outcome),
		OutputFormat::Json => print_json(outcome)?,
	}
	Ok(())
}
