//! Field-cell rendering: wrapping a field's markup with its label and an
//! error slot.
//!
//! Dispatch is by [`FieldKind`]; unregistered kinds fall back to
//! [`default_cell`].

use crate::fields::{FieldDescriptor, FieldKind};
use crate::markup::{Element, Node};
use std::collections::HashMap;
use std::sync::Arc;

/// Wraps a described field's markup into a labeled cell.
pub type CellRenderer = Arc<dyn Fn(&FieldDescriptor, Node) -> Node + Send + Sync>;

/// Registry of cell renderers keyed by field kind.
#[derive(Clone)]
pub struct CellRegistry {
	renderers: HashMap<FieldKind, CellRenderer>,
	fallback: CellRenderer,
}

impl CellRegistry {
	/// Registry with the built-in entries: hidden fields pass through without
	/// a cell (they have nothing to label), everything else falls back to
	/// [`default_cell`].
	pub fn new() -> Self {
		let mut renderers: HashMap<FieldKind, CellRenderer> = HashMap::new();
		renderers.insert(FieldKind::Hidden, Arc::new(|_: &FieldDescriptor, markup| markup));
		Self {
			renderers,
			fallback: Arc::new(default_cell),
		}
	}

	/// Registers a renderer for one field kind, replacing any earlier entry.
	pub fn register(
		mut self,
		kind: FieldKind,
		renderer: impl Fn(&FieldDescriptor, Node) -> Node + Send + Sync + 'static,
	) -> Self {
		self.renderers.insert(kind, Arc::new(renderer));
		self
	}

	pub fn render_cell(&self, descriptor: &FieldDescriptor, markup: Node) -> Node {
		let renderer = self.renderers.get(&descriptor.kind).unwrap_or(&self.fallback);
		renderer(descriptor, markup)
	}
}

impl Default for CellRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Default cell: label block (with a required-marker span when the descriptor
/// carries `required`), the field markup, then an error slot.
///
/// Only the first error message is surfaced; when there is none the slot
/// renders with a `hidden` class so the cell keeps its shape.
pub fn default_cell(descriptor: &FieldDescriptor, markup: Node) -> Node {
	let mut label = Element::new("label")
		.attr("for", format!("id_{}", descriptor.name))
		.child(descriptor.display_label());
	if descriptor.required {
		label = label.child(Element::new("span").attr("class", "required").child("*"));
	}

	let error_slot = match descriptor.errors.first() {
		Some(message) => Element::new("span")
			.attr("class", "error")
			.child(message.as_str()),
		None => Element::new("span").attr("class", "error hidden"),
	};

	Element::new("div")
		.attr("class", "field-cell")
		.child(label)
		.child(markup)
		.child(error_slot)
		.into()
}
