//! "Run after the next paint" scheduling.
//!
//! The host drains the scheduler once per painted frame. There is a single
//! pending slot: requesting a new callback replaces whatever was waiting, and
//! a request can be cancelled by the handle it returned.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::trace;

/// Identifies one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(u64);

struct PendingFrame {
	handle: FrameHandle,
	label: &'static str,
	callback: Box<dyn FnOnce()>,
}

/// Single-slot deferred callback queue shared between the overlay and host.
#[derive(Clone, Default)]
pub struct FrameScheduler {
	slot: Rc<RefCell<Option<PendingFrame>>>,
	next: Rc<Cell<u64>>,
}

impl fmt::Debug for FrameScheduler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FrameScheduler")
			.field("pending", &self.pending_label())
			.finish()
	}
}

impl FrameScheduler {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queue `callback` for the next frame, replacing any pending callback.
	pub fn request(&self, label: &'static str, callback: impl FnOnce() + 'static) -> FrameHandle {
		let handle = FrameHandle(self.next.get());
		self.next.set(handle.0 + 1);

		let replaced = self.slot.borrow_mut().replace(PendingFrame {
			handle,
			label,
			callback: Box::new(callback),
		});
		if let Some(previous) = replaced {
			trace!(replaced = previous.label, with = label, "frame callback replaced");
		}
		handle
	}

	/// Drop the pending callback if it is still the one behind `handle`.
	pub fn cancel(&self, handle: FrameHandle) -> bool {
		let mut slot = self.slot.borrow_mut();
		if slot.as_ref().is_some_and(|pending| pending.handle == handle) {
			*slot = None;
			true
		} else {
			false
		}
	}

	/// Whether `handle` still waits for a frame.
	#[must_use]
	pub fn is_pending(&self, handle: FrameHandle) -> bool {
		self.slot
			.borrow()
			.as_ref()
			.is_some_and(|pending| pending.handle == handle)
	}

	/// Label of the waiting callback, if any.
	#[must_use]
	pub fn pending_label(&self) -> Option<&'static str> {
		self.slot.borrow().as_ref().map(|pending| pending.label)
	}

	/// Run the pending callback. Called by the host after it paints.
	///
	/// The slot is emptied before the callback runs so the callback may
	/// schedule follow-up work for the frame after.
	pub fn run_pending(&self) -> bool {
		let pending = self.slot.borrow_mut().take();
		match pending {
			Some(pending) => {
				trace!(label = pending.label, "running frame callback");
				(pending.callback)();
				true
			}
			None => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn callbacks_wait_for_the_frame() {
		let scheduler = FrameScheduler::new();
		let ran = Rc::new(Cell::new(false));
		let flag = Rc::clone(&ran);
		let handle = scheduler.request("test", move || flag.set(true));

		assert!(!ran.get());
		assert!(scheduler.is_pending(handle));
		assert!(scheduler.run_pending());
		assert!(ran.get());
		assert!(!scheduler.run_pending());
	}

	#[test]
	fn new_request_replaces_pending_one() {
		let scheduler = FrameScheduler::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		let first = Rc::clone(&log);
		let second = Rc::clone(&log);

		let stale = scheduler.request("first", move || first.borrow_mut().push("first"));
		scheduler.request("second", move || second.borrow_mut().push("second"));

		assert!(!scheduler.is_pending(stale));
		assert!(!scheduler.cancel(stale), "stale handle must not cancel newer work");
		scheduler.run_pending();
		assert_eq!(*log.borrow(), vec!["second"]);
	}

	#[test]
	fn cancel_drops_callback() {
		let scheduler = FrameScheduler::new();
		let handle = scheduler.request("noop", || panic!("cancelled callback ran"));
		assert!(scheduler.cancel(handle));
		assert!(!scheduler.run_pending());
	}
}
