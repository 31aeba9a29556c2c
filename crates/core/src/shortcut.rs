//! The application-wide shortcut that toggles the overlay.

use crate::keys::{Key, KeyInput};

/// Which modifier arms the shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutModifier {
	/// Command key (macOS).
	Meta,
	/// Control key (everywhere else).
	Ctrl,
}

impl ShortcutModifier {
	/// Cmd on macOS, Ctrl on every other platform.
	#[must_use]
	pub fn platform_default() -> Self {
		if cfg!(target_os = "macos") {
			Self::Meta
		} else {
			Self::Ctrl
		}
	}

	#[must_use]
	pub fn label(self) -> &'static str {
		match self {
			Self::Meta => "⌘",
			Self::Ctrl => "Ctrl",
		}
	}
}

/// Modifier + letter combination, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleShortcut {
	pub modifier: ShortcutModifier,
	pub letter: char,
}

impl Default for ToggleShortcut {
	fn default() -> Self {
		Self {
			modifier: ShortcutModifier::platform_default(),
			letter: 'k',
		}
	}
}

impl ToggleShortcut {
	/// Ctrl+K on every platform.
	///
	/// Terminals do not report the Command key without keyboard enhancement,
	/// and macOS terminal emulators bind Cmd+K to clearing the screen, so a
	/// terminal host arms the shortcut with Ctrl.
	#[must_use]
	pub fn terminal_default() -> Self {
		Self {
			modifier: ShortcutModifier::Ctrl,
			letter: 'k',
		}
	}

	#[must_use]
	pub fn matches(&self, input: &KeyInput) -> bool {
		let Key::Char(ch) = input.key else {
			return false;
		};
		let armed = match self.modifier {
			ShortcutModifier::Meta => input.modifiers.meta,
			ShortcutModifier::Ctrl => input.modifiers.ctrl,
		};
		armed && ch.eq_ignore_ascii_case(&self.letter)
	}

	/// Human-readable form such as `Ctrl+K`.
	#[must_use]
	pub fn label(&self) -> String {
		format!("{}+{}", self.modifier.label(), self.letter.to_ascii_uppercase())
	}
}
