use anyhow::Result;
use quickjump_tui::Status;
use serde_json::json;

use crate::workflow::Outcome;

/// Print a plain-text representation of the outcome.
pub(crate) fn print_plain(outcome: &Outcome) {
	match outcome {
		Outcome::Results { query, results, .. } => {
			if results.is_empty() {
				println!("No results for '{query}'");
				return;
			}
			for item in results {
				println!("{}\t{}\t{}", item.kind(), item.title(), item.destination());
			}
		}
		Outcome::Page(page) => println!("{}", page.route),
	}
}

/// Format the outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &Outcome) -> Result<String> {
	let payload = match outcome {
		Outcome::Results {
			query,
			locale,
			results,
		} => json!({
			"query": query,
			"locale": locale,
			"results": results,
		}),
		Outcome::Page(page) => {
			let (status, url) = match &page.status {
				Status::Ready => ("ready", None),
				Status::Opened(url) => ("opened", Some(url)),
				Status::OpenFailed(url) => ("open_failed", Some(url)),
			};
			json!({
				"path": page.path,
				"anchor": page.anchor,
				"route": page.route,
				"status": status,
				"external": url,
			})
		}
	};

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the outcome.
pub(crate) fn print_json(outcome: &Outcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use quickjump_core::ResultItem;
	use quickjump_core::results::ExternalHit;
	use quickjump_tui::PageState;
	use serde_json::Value;

	use super::*;

	#[test]
	fn json_results_are_tagged_by_kind() {
		let outcome = Outcome::Results {
			query: "git".into(),
			locale: "en".into(),
			results: vec![ResultItem::External(ExternalHit {
				url: "https://github.com/pulse-js/pulse".into(),
				title: "GitHub".into(),
				description: None,
				icon: "🐙".into(),
			})],
		};

		let json = format_outcome_json(&outcome).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["query"], "git");
		assert_eq!(value["results"][0]["kind"], "external");
		assert_eq!(value["results"][0]["url"], "https://github.com/pulse-js/pulse");
	}

	#[test]
	fn json_page_reports_route_and_status() {
		let mut page = PageState::new("/faq");
		page.route = "/es/faq".into();
		page.status = Status::Opened("https://discord.gg/pulse-js".into());

		let json = format_outcome_json(&Outcome::Page(page)).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["route"], "/es/faq");
		assert_eq!(value["status"], "opened");
		assert_eq!(value["external"], "https://discord.gg/pulse-js");
		assert!(value["anchor"].is_null());
	}
}
