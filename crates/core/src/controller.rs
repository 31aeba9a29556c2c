//! Keyboard/selection state machine.
//!
//! The controller is pure: it maps a key, the current selection and the
//! result list (recomputed at the moment of the key press) to a
//! [`KeyCommand`]. The overlay applies the command.

use crate::keys::{Disposition, Key, KeyInput};
use crate::results::ResultItem;

/// What the overlay should do in response to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCommand {
	/// Move the selection to this index.
	Select(usize),
	/// Activate this result and close.
	Activate(ResultItem),
	/// Close without activating.
	Close,
	/// Enter on an empty list.
	Nothing,
	/// Not ours; let the host handle it.
	Ignore,
}

impl KeyCommand {
	/// Arrow keys and Enter always prevent the host default, even when they
	/// change nothing, so the caret never jumps and no form submits.
	#[must_use]
	pub fn disposition(&self) -> Disposition {
		match self {
			Self::Select(_) | Self::Activate(_) | Self::Nothing => Disposition::PreventDefault,
			Self::Close | Self::Ignore => Disposition::Propagate,
		}
	}
}

/// Clamp `index` into `[0, max(1, count) - 1]`.
#[must_use]
pub fn clamp_selection(index: usize, count: usize) -> usize {
	index.min(count.saturating_sub(1))
}

/// Interpret `input` against the current selection and results.
#[must_use]
pub fn interpret(input: &KeyInput, selected: usize, results: &[ResultItem]) -> KeyCommand {
	let count = results.len();
	let selected = clamp_selection(selected, count);
	match input.key {
		Key::ArrowDown => KeyCommand::Select(clamp_selection(selected + 1, count)),
		Key::ArrowUp => KeyCommand::Select(selected.saturating_sub(1)),
		Key::Enter => match results.get(selected) {
			Some(item) => KeyCommand::Activate(item.clone()),
			None => KeyCommand::Nothing,
		},
		Key::Escape => KeyCommand::Close,
		Key::Tab | Key::Char(_) | Key::Other => KeyCommand::Ignore,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::results::{PageHit, ResultKind};

	fn results(count: usize) -> Vec<ResultItem> {
		(0..count)
			.map(|n| {
				ResultItem::Page(PageHit {
					path: format!("/{n}"),
					title: format!("Page {n}"),
					description: None,
					icon: "📄".into(),
				})
			})
			.collect()
	}

	fn press(key: Key) -> KeyInput {
		KeyInput::plain(key)
	}

	#[test]
	fn arrows_clamp_at_both_ends() {
		let items = results(3);
		assert_eq!(interpret(&press(Key::ArrowDown), 2, &items), KeyCommand::Select(2));
		assert_eq!(interpret(&press(Key::ArrowDown), 0, &items), KeyCommand::Select(1));
		assert_eq!(interpret(&press(Key::ArrowUp), 0, &items), KeyCommand::Select(0));
		assert_eq!(interpret(&press(Key::ArrowUp), 2, &items), KeyCommand::Select(1));
	}

	#[test]
	fn arbitrary_arrow_sequences_stay_in_range() {
		for count in 0..5 {
			let items = results(count);
			let mut selected = 0;
			for step in 0..40 {
				let key = if (step / 3) % 2 == 0 { Key::ArrowDown } else { Key::ArrowUp };
				if let KeyCommand::Select(next) = interpret(&press(key), selected, &items) {
					selected = next;
				}
				assert!(selected < count.max(1), "selection {selected} escaped {count} results");
			}
		}
	}

	#[test]
	fn enter_on_empty_list_is_noop_but_prevented() {
		let command = interpret(&press(Key::Enter), 0, &[]);
		assert_eq!(command, KeyCommand::Nothing);
		assert!(command.disposition().prevented());
	}

	#[test]
	fn enter_activates_selected_item() {
		let items = results(3);
		let KeyCommand::Activate(item) = interpret(&press(Key::Enter), 1, &items) else {
			panic!("expected activation");
		};
		assert_eq!(item.destination(), "/1");
		assert_eq!(item.kind(), ResultKind::Page);
	}

	#[test]
	fn stale_selection_is_clamped_before_use() {
		let items = results(2);
		let KeyCommand::Activate(item) = interpret(&press(Key::Enter), 9, &items) else {
			panic!("expected activation");
		};
		assert_eq!(item.destination(), "/1");
	}

	#[test]
	fn other_keys_propagate() {
		let items = results(2);
		for key in [Key::Char('a'), Key::Tab, Key::Other, Key::Escape] {
			let command = interpret(&press(key), 0, &items);
			assert!(!command.disposition().prevented(), "{key:?} must not prevent default");
		}
		assert_eq!(interpret(&press(Key::Escape), 0, &items), KeyCommand::Close);
	}
}
