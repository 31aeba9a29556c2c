//! Host-neutral key events and the prevent-default contract.

/// Keys the overlay distinguishes. Everything else arrives as `Char` or
/// `Other` and is left to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
	ArrowUp,
	ArrowDown,
	Enter,
	Escape,
	Tab,
	Char(char),
	Other,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
	pub shift: bool,
	pub ctrl: bool,
	pub alt: bool,
	/// Command on macOS, the Windows/Super key elsewhere.
	pub meta: bool,
}

impl Modifiers {
	pub const NONE: Self = Self {
		shift: false,
		ctrl: false,
		alt: false,
		meta: false,
	};
	pub const SHIFT: Self = Self {
		shift: true,
		..Self::NONE
	};
	pub const CTRL: Self = Self {
		ctrl: true,
		..Self::NONE
	};
	pub const META: Self = Self {
		meta: true,
		..Self::NONE
	};
}

/// A single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
	pub key: Key,
	pub modifiers: Modifiers,
}

impl KeyInput {
	pub const fn new(key: Key, modifiers: Modifiers) -> Self {
		Self { key, modifiers }
	}

	pub const fn plain(key: Key) -> Self {
		Self::new(key, Modifiers::NONE)
	}
}

impl From<Key> for KeyInput {
	fn from(key: Key) -> Self {
		Self::plain(key)
	}
}

/// Outcome of offering a key to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
	/// The handler consumed the key; the host must skip its default action.
	PreventDefault,
	/// The host should apply its default action (caret movement, typing,
	/// native Tab order).
	Propagate,
}

impl Disposition {
	#[must_use]
	pub fn prevented(self) -> bool {
		matches!(self, Self::PreventDefault)
	}
}
