//! Observable values with synchronous change notification.
//!
//! A [`Signal`] is a cheaply clonable handle to a shared value. Setting a new
//! value that differs from the current one runs every subscriber before the
//! setter returns, which is what keeps renders ordered behind the event that
//! caused them. Subscribers receive a snapshot of the new value, so they are
//! free to read or write any signal (including this one) while running.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct SignalInner<T> {
	value: RefCell<T>,
	subscribers: RefCell<Vec<(u64, Callback<T>)>>,
	next_id: Cell<u64>,
}

/// Shared observable value.
pub struct Signal<T> {
	inner: Rc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &self.inner.value.borrow())
			.field("subscribers", &self.inner.subscribers.borrow().len())
			.finish()
	}
}

impl<T: Default + Clone + PartialEq + 'static> Default for Signal<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
	pub fn new(value: T) -> Self {
		Self {
			inner: Rc::new(SignalInner {
				value: RefCell::new(value),
				subscribers: RefCell::new(Vec::new()),
				next_id: Cell::new(0),
			}),
		}
	}

	/// Clone the current value out of the signal.
	#[must_use]
	pub fn get(&self) -> T {
		self.inner.value.borrow().clone()
	}

	/// Borrow the current value for the duration of `read`.
	pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
		read(&self.inner.value.borrow())
	}

	/// Store `value` and notify subscribers when it differs from the current
	/// value. Returns whether a change was published.
	pub fn set(&self, value: T) -> bool {
		{
			let mut current = self.inner.value.borrow_mut();
			if *current == value {
				return false;
			}
			*current = value.clone();
		}
		self.notify(&value);
		true
	}

	/// Mutate the value in place, publishing only if it actually changed.
	pub fn update(&self, mutate: impl FnOnce(&mut T)) -> bool {
		let mut next = self.get();
		mutate(&mut next);
		self.set(next)
	}

	/// Register `callback` to run after every published change.
	///
	/// The callback stays registered until the returned [`Subscription`] is
	/// dropped.
	#[must_use = "dropping the subscription unsubscribes immediately"]
	pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
		let id = self.inner.next_id.get();
		self.inner.next_id.set(id + 1);
		self.inner
			.subscribers
			.borrow_mut()
			.push((id, Rc::new(callback)));

		let weak: Weak<SignalInner<T>> = Rc::downgrade(&self.inner);
		Subscription {
			release: Some(Box::new(move || {
				if let Some(inner) = weak.upgrade() {
					inner
						.subscribers
						.borrow_mut()
						.retain(|(existing, _)| *existing != id);
				}
			})),
		}
	}

	/// Number of live subscribers.
	#[must_use]
	pub fn subscriber_count(&self) -> usize {
		self.inner.subscribers.borrow().len()
	}

	fn notify(&self, value: &T) {
		let callbacks: Vec<Callback<T>> = self
			.inner
			.subscribers
			.borrow()
			.iter()
			.map(|(_, callback)| Rc::clone(callback))
			.collect();
		for callback in callbacks {
			callback(value);
		}
	}
}

/// Keeps a signal subscription alive; unsubscribes on drop.
pub struct Subscription {
	release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Keep the callback registered for the rest of the signal's lifetime.
	pub fn forget(mut self) {
		self.release = None;
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.release.is_some())
			.finish()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}
