use std::rc::Rc;

use anyhow::{Context, Result};
use quickjump_core::{Aggregator, Catalog, Localizer, ResultItem, SiteIndex, ToggleShortcut};
use quickjump_tui::{HostOptions, PageState};
use tracing::info;

use crate::settings::ResolvedConfig;

/// What a run produced, ready for printing.
#[derive(Debug)]
pub(crate) enum Outcome {
	/// One-shot query results.
	Results {
		query: String,
		locale: String,
		results: Vec<ResultItem>,
	},
	/// The page the interactive session ended on.
	Page(PageState),
}

/// Builds the host options from configuration and runs either mode.
pub(crate) struct SearchWorkflow {
	options: HostOptions,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let ResolvedConfig {
			limits,
			locale,
			theme,
			start_open,
			content,
			..
		} = config;

		let index = match content {
			Some(path) => SiteIndex::from_path(&path)
				.with_context(|| format!("failed to load site index {}", path.display()))?,
			None => SiteIndex::builtin().context("failed to load the built-in site index")?,
		};
		let catalog = Catalog::builtin().context("failed to load the built-in catalogs")?;

		Ok(Self {
			options: HostOptions {
				index,
				catalog,
				locale,
				limits,
				theme,
				shortcut: ToggleShortcut::terminal_default(),
				start_open,
			},
		})
	}

	/// Run the aggregator once for `query`.
	pub(crate) fn search(&self, query: &str) -> Result<Outcome> {
		let HostOptions {
			index,
			catalog,
			locale,
			limits,
			..
		} = &self.options;
		let localizer = Localizer::new(catalog.clone(), locale)?;
		let aggregator = Aggregator::with_limits(Rc::new(index.clone()), *limits);
		let results = aggregator.compute(query, &localizer);
		info!(%query, count = results.len(), "one-shot search");

		Ok(Outcome::Results {
			query: query.to_string(),
			locale: locale.clone(),
			results,
		})
	}

	/// Start the terminal interface and report where the user ended up.
	pub(crate) fn run_interactive(self) -> Result<Outcome> {
		let page = quickjump_tui::run(self.options)?;
		Ok(Outcome::Page(page))
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::Parser;
	use quickjump_core::ResultKind;
	use tempfile::tempdir;

	use super::*;
	use crate::cli::CliArgs;
	use crate::settings::{self, ConfigSources};

	fn workflow(args: &[&str], dir: &std::path::Path) -> SearchWorkflow {
		let mut argv = vec!["quickjump", "--no-config", "--log-file", "q.log"];
		argv.extend_from_slice(args);
		let cli = CliArgs::try_parse_from(argv).unwrap();
		let resolved = settings::load_from(&cli, &ConfigSources::isolated(dir)).unwrap();
		SearchWorkflow::from_config(resolved).unwrap()
	}

	#[test]
	fn one_shot_search_uses_builtin_content() {
		let dir = tempdir().unwrap();
		let Outcome::Results { results, locale, .. } =
			workflow(&[], dir.path()).search("github").unwrap()
		else {
			panic!("expected results");
		};
		assert_eq!(locale, "en");
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].kind(), ResultKind::External);
	}

	#[test]
	fn cap_and_custom_content_are_honoured() {
		let dir = tempdir().unwrap();
		fs::write(
			dir.path().join("site.toml"),
			r#"
[[pages]]
path = "/alpha"
label = "Alpha guide"

[[pages]]
path = "/beta"
label = "Beta guide"

[[pages]]
path = "/gamma"
label = "Gamma guide"
"#,
		)
		.unwrap();

		let flow = workflow(&["--content", "site.toml", "--max-results", "2"], dir.path());
		let Outcome::Results { results, .. } = flow.search("guide").unwrap() else {
			panic!("expected results");
		};
		let titles: Vec<_> = results.iter().map(ResultItem::title).collect();
		assert_eq!(titles, ["Alpha guide", "Beta guide"]);
	}
}
