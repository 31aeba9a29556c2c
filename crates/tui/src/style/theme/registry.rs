use super::builtins;
use super::types::Theme;

/// Lookup a theme by case-insensitive name or alias.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	builtins::registrations()
		.into_iter()
		.find(|registration| registration.answers_to(name))
		.map(|registration| registration.theme)
}

/// Canonical theme names, sorted case-insensitively.
#[must_use]
pub fn names() -> Vec<String> {
	let mut names: Vec<String> = builtins::registrations()
		.into_iter()
		.map(|registration| registration.name)
		.collect();
	names.sort_unstable_by_key(|name| name.to_ascii_lowercase());
	names
}
