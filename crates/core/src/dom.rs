//! Minimal document model: an element tree with attributes, visibility and a
//! single active (focused) element.
//!
//! This is the surface the overlay shares with its host. The host builds its
//! own elements (navigation links, buttons) into the same tree, paints from
//! it, and falls back to [`Document::focus_next`] as the native Tab action
//! whenever a key handler does not prevent default.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Stable handle to an element. Ids are never reused within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl fmt::Display for ElementId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "el-{}", self.0)
	}
}

/// Element categories that matter for focus behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
	Container,
	Heading,
	Text,
	Input,
	Button,
	Link,
}

impl ElementKind {
	/// Kinds that take focus without an explicit tab index.
	fn natively_focusable(self) -> bool {
		matches!(self, Self::Input | Self::Button | Self::Link)
	}
}

#[derive(Debug, Clone)]
struct Element {
	kind: ElementKind,
	parent: Option<ElementId>,
	children: Vec<ElementId>,
	tab_index: Option<i32>,
	hidden: bool,
	text: String,
	attributes: BTreeMap<String, String>,
}

/// Owned element tree rooted at a body element.
#[derive(Debug, Clone)]
pub struct Document {
	elements: HashMap<ElementId, Element>,
	body: ElementId,
	active: Option<ElementId>,
	next_id: u32,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	pub fn new() -> Self {
		let body = ElementId(0);
		let mut elements = HashMap::new();
		elements.insert(
			body,
			Element {
				kind: ElementKind::Container,
				parent: None,
				children: Vec::new(),
				tab_index: None,
				hidden: false,
				text: String::new(),
				attributes: BTreeMap::new(),
			},
		);
		Self {
			elements,
			body,
			active: None,
			next_id: 1,
		}
	}

	#[must_use]
	pub fn body(&self) -> ElementId {
		self.body
	}

	/// Append a new element of `kind` as the last child of `parent`.
	///
	/// # Panics
	///
	/// Panics if `parent` is not attached to this document. Use
	/// [`Document::try_create`] when the parent may have been removed.
	pub fn create(&mut self, parent: ElementId, kind: ElementKind) -> ElementId {
		match self.try_create(parent, kind) {
			Some(id) => id,
			None => panic!("cannot append to detached element {parent}"),
		}
	}

	/// Append a new element beneath `parent`, or `None` when `parent` is
	/// detached.
	pub fn try_create(&mut self, parent: ElementId, kind: ElementKind) -> Option<ElementId> {
		if !self.contains(parent) {
			return None;
		}
		let id = ElementId(self.next_id);
		self.next_id += 1;
		self.elements.insert(
			id,
			Element {
				kind,
				parent: Some(parent),
				children: Vec::new(),
				tab_index: None,
				hidden: false,
				text: String::new(),
				attributes: BTreeMap::new(),
			},
		);
		if let Some(parent) = self.elements.get_mut(&parent) {
			parent.children.push(id);
		}
		Some(id)
	}

	/// Whether `id` is still attached to the document.
	#[must_use]
	pub fn contains(&self, id: ElementId) -> bool {
		self.elements.contains_key(&id)
	}

	#[must_use]
	pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
		self.elements.get(&id).map(|element| element.kind)
	}

	#[must_use]
	pub fn parent(&self, id: ElementId) -> Option<ElementId> {
		self.elements.get(&id).and_then(|element| element.parent)
	}

	#[must_use]
	pub fn children(&self, id: ElementId) -> &[ElementId] {
		self.elements
			.get(&id)
			.map_or(&[], |element| element.children.as_slice())
	}

	pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
		if let Some(element) = self.elements.get_mut(&id) {
			element.text = text.into();
		}
	}

	#[must_use]
	pub fn text(&self, id: ElementId) -> &str {
		self.elements.get(&id).map_or("", |element| element.text.as_str())
	}

	pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
		if let Some(element) = self.elements.get_mut(&id) {
			element.attributes.insert(name.to_string(), value.into());
		}
	}

	pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
		if let Some(element) = self.elements.get_mut(&id) {
			element.attributes.remove(name);
		}
	}

	#[must_use]
	pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
		self.elements
			.get(&id)
			.and_then(|element| element.attributes.get(name))
			.map(String::as_str)
	}

	pub fn set_tab_index(&mut self, id: ElementId, tab_index: Option<i32>) {
		if let Some(element) = self.elements.get_mut(&id) {
			element.tab_index = tab_index;
		}
	}

	/// Hide or reveal an element and its subtree. Hiding the subtree that
	/// holds focus blurs it.
	pub fn set_hidden(&mut self, id: ElementId, hidden: bool) {
		if let Some(element) = self.elements.get_mut(&id) {
			element.hidden = hidden;
		}
		if hidden
			&& let Some(active) = self.active
			&& self.is_within(active, id)
		{
			self.active = None;
		}
	}

	/// Whether the element and all of its ancestors are visible.
	#[must_use]
	pub fn is_rendered(&self, id: ElementId) -> bool {
		let mut cursor = Some(id);
		while let Some(current) = cursor {
			let Some(element) = self.elements.get(&current) else {
				return false;
			};
			if element.hidden {
				return false;
			}
			cursor = element.parent;
		}
		true
	}

	/// Whether `id` is `ancestor` or lies somewhere beneath it.
	#[must_use]
	pub fn is_within(&self, id: ElementId, ancestor: ElementId) -> bool {
		let mut cursor = Some(id);
		while let Some(current) = cursor {
			if current == ancestor {
				return true;
			}
			cursor = self.parent(current);
		}
		false
	}

	/// Detach `id` and its subtree. Removing the body is ignored.
	pub fn remove(&mut self, id: ElementId) {
		if id == self.body || !self.contains(id) {
			return;
		}
		if let Some(parent) = self.parent(id)
			&& let Some(parent) = self.elements.get_mut(&parent)
		{
			parent.children.retain(|child| *child != id);
		}
		self.drop_subtree(id);
	}

	/// Detach every child of `id`.
	pub fn clear_children(&mut self, id: ElementId) {
		let children = match self.elements.get_mut(&id) {
			Some(element) => std::mem::take(&mut element.children),
			None => return,
		};
		for child in children {
			self.drop_subtree(child);
		}
	}

	fn drop_subtree(&mut self, id: ElementId) {
		let Some(element) = self.elements.remove(&id) else {
			return;
		};
		if self.active == Some(id) {
			self.active = None;
		}
		for child in element.children {
			self.drop_subtree(child);
		}
	}

	/// Whether the element can receive focus programmatically.
	#[must_use]
	pub fn is_focusable(&self, id: ElementId) -> bool {
		let Some(element) = self.elements.get(&id) else {
			return false;
		};
		(element.kind.natively_focusable() || element.tab_index.is_some()) && self.is_rendered(id)
	}

	/// Whether Tab navigation stops at the element: inputs, buttons and
	/// links, plus anything with a non-negative tab index.
	#[must_use]
	pub fn is_tabbable(&self, id: ElementId) -> bool {
		let Some(element) = self.elements.get(&id) else {
			return false;
		};
		let in_sequence = match element.tab_index {
			Some(index) => index >= 0,
			None => element.kind.natively_focusable(),
		};
		in_sequence && self.is_rendered(id)
	}

	/// Tabbable elements beneath `root` (inclusive) in document order.
	#[must_use]
	pub fn tabbable_within(&self, root: ElementId) -> Vec<ElementId> {
		let mut found = Vec::new();
		self.walk(root, &mut |id| {
			if self.is_tabbable(id) {
				found.push(id);
			}
		});
		found
	}

	/// Every element beneath `root` (inclusive) in document order.
	#[must_use]
	pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
		let mut found = Vec::new();
		self.walk(root, &mut |id| found.push(id));
		found
	}

	fn walk(&self, id: ElementId, visit: &mut impl FnMut(ElementId)) {
		let Some(element) = self.elements.get(&id) else {
			return;
		};
		visit(id);
		for child in &element.children {
			self.walk(*child, visit);
		}
	}

	#[must_use]
	pub fn active_element(&self) -> Option<ElementId> {
		self.active
	}

	/// Move focus to `id`. Returns `false` and leaves focus untouched when the
	/// element cannot take focus.
	pub fn focus(&mut self, id: ElementId) -> bool {
		if !self.is_focusable(id) {
			return false;
		}
		self.active = Some(id);
		true
	}

	pub fn blur(&mut self) {
		self.active = None;
	}

	/// Native Tab behaviour: step through the document's tab order, wrapping
	/// at either end. Returns the newly focused element.
	pub fn focus_next(&mut self, backwards: bool) -> Option<ElementId> {
		let order = self.tabbable_within(self.body);
		if order.is_empty() {
			return None;
		}
		let position = self
			.active
			.and_then(|active| order.iter().position(|id| *id == active));
		let next = match (position, backwards) {
			(None, false) => 0,
			(None, true) => order.len() - 1,
			(Some(index), false) => (index + 1) % order.len(),
			(Some(index), true) => (index + order.len() - 1) % order.len(),
		};
		let target = order[next];
		self.active = Some(target);
		Some(target)
	}
}
