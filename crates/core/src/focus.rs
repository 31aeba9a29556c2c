//! Modal focus lifecycle: capture on open, containment while open,
//! restoration on close.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::dom::{Document, ElementId, ElementKind};
use crate::i18n::Translator;
use crate::keys::Disposition;
use crate::scheduler::{FrameHandle, FrameScheduler};

/// Elements making up the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalElements {
	pub root: ElementId,
	/// Visually hidden heading that names the dialog.
	pub heading: ElementId,
	pub input: ElementId,
	pub close_button: ElementId,
	pub list: ElementId,
}

impl ModalElements {
	/// Build the dialog skeleton under `parent`, initially hidden.
	pub fn mount(document: &mut Document, parent: ElementId) -> Self {
		let root = document.create(parent, ElementKind::Container);
		let heading = document.create(root, ElementKind::Heading);
		let input = document.create(root, ElementKind::Input);
		let close_button = document.create(root, ElementKind::Button);
		let list = document.create(root, ElementKind::Container);

		document.set_hidden(root, true);
		document.set_attribute(root, "role", "dialog");
		document.set_attribute(root, "aria-modal", "true");
		document.set_attribute(root, "aria-labelledby", heading.to_string());
		document.set_attribute(heading, "class", "sr-only");
		document.set_attribute(input, "type", "search");
		document.set_attribute(input, "role", "combobox");
		document.set_attribute(input, "aria-autocomplete", "list");
		document.set_attribute(input, "aria-controls", list.to_string());
		document.set_attribute(input, "aria-expanded", "true");
		document.set_attribute(close_button, "type", "button");
		document.set_text(close_button, "Esc");
		document.set_attribute(list, "role", "listbox");
		document.set_attribute(list, "aria-labelledby", heading.to_string());

		Self {
			root,
			heading,
			input,
			close_button,
			list,
		}
	}

	/// (Re)apply every translated label on the dialog.
	pub fn apply_labels(&self, document: &mut Document, translator: &dyn Translator) {
		document.set_text(self.heading, translator.translate("search.title"));
		document.set_attribute(self.input, "aria-label", translator.translate("search.input_label"));
		document.set_attribute(self.input, "placeholder", translator.translate("search.placeholder"));
		document.set_attribute(self.close_button, "aria-label", translator.translate("search.close"));
	}
}

/// Owns the focus side of the open/close state machine.
#[derive(Debug, Clone)]
pub struct FocusManager {
	document: Rc<RefCell<Document>>,
	scheduler: FrameScheduler,
	modal: ModalElements,
	previously_focused: Rc<Cell<Option<ElementId>>>,
	pending_restore: Rc<Cell<Option<FrameHandle>>>,
}

impl FocusManager {
	pub fn new(
		document: Rc<RefCell<Document>>,
		scheduler: FrameScheduler,
		modal: ModalElements,
	) -> Self {
		Self {
			document,
			scheduler,
			modal,
			previously_focused: Rc::default(),
			pending_restore: Rc::default(),
		}
	}

	#[must_use]
	pub fn modal(&self) -> &ModalElements {
		&self.modal
	}

	/// Element that receives focus back when the dialog closes.
	#[must_use]
	pub fn previously_focused(&self) -> Option<ElementId> {
		self.previously_focused.get()
	}

	/// Closed → open: remember the active element, reveal the dialog, and
	/// focus the input once the dialog has been painted.
	///
	/// Re-opening before the previous close restored focus cancels that
	/// restore and keeps the element captured originally.
	pub fn open(&self, placeholder: String) {
		let restore_cancelled = self
			.pending_restore
			.take()
			.is_some_and(|handle| self.scheduler.cancel(handle));

		{
			let mut document = self.document.borrow_mut();
			if !restore_cancelled {
				self.previously_focused.set(document.active_element());
			}
			document.set_hidden(self.modal.root, false);
		}
		debug!(
			previously_focused = ?self.previously_focused.get(),
			restore_cancelled,
			"search dialog opened"
		);

		let document = Rc::clone(&self.document);
		let input = self.modal.input;
		self.scheduler.request("focus-search-input", move || {
			let mut document = document.borrow_mut();
			document.set_attribute(input, "placeholder", placeholder);
			document.focus(input);
		});
	}

	/// Open → closed: hide the dialog and hand focus back after the next
	/// paint. A pending input-focus request from `open` is superseded.
	pub fn close(&self) {
		self.document.borrow_mut().set_hidden(self.modal.root, true);

		let document = Rc::clone(&self.document);
		let previously_focused = Rc::clone(&self.previously_focused);
		let pending = Rc::clone(&self.pending_restore);
		let handle = self.scheduler.request("restore-focus", move || {
			pending.set(None);
			let Some(target) = previously_focused.take() else {
				return;
			};
			let mut document = document.borrow_mut();
			if document.contains(target) {
				document.focus(target);
				debug!(%target, "focus restored");
			} else {
				debug!(%target, "previously focused element is gone");
			}
		});
		self.pending_restore.set(Some(handle));
	}

	/// Keep Tab inside the dialog.
	///
	/// Tab on the last tabbable element wraps to the first and Shift+Tab on
	/// the first wraps to the last. Focus that is not inside the dialog at all
	/// (for instance before the deferred input focus has run) is pulled in.
	pub fn trap_tab(&self, backwards: bool) -> Disposition {
		let mut document = self.document.borrow_mut();
		let tabbable = document.tabbable_within(self.modal.root);
		let (Some(&first), Some(&last)) = (tabbable.first(), tabbable.last()) else {
			return Disposition::PreventDefault;
		};

		let active = document.active_element();
		let inside = active.is_some_and(|active| document.is_within(active, self.modal.root));
		let target = if !inside {
			Some(if backwards { last } else { first })
		} else if backwards && active == Some(first) {
			Some(last)
		} else if !backwards && active == Some(last) {
			Some(first)
		} else {
			None
		};

		match target {
			Some(target) => {
				document.focus(target);
				Disposition::PreventDefault
			}
			None => Disposition::Propagate,
		}
	}
}
