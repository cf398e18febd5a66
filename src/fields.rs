//! Polymorphic form fields.
//!
//! A field describes itself as structured data ([`Field::describe`]) and
//! renders itself as markup ([`Field::render`]). Built-in variants cover text
//! input, hidden input, and action buttons; downstream crates add variants by
//! implementing [`Field`] with a [`FieldKind::Custom`] tag and, if they want
//! bespoke cell wrapping, registering a renderer for that tag.

pub mod action_button;
pub mod hidden_field;
pub mod text_field;

pub use action_button::{ActionButton, ButtonRole, CANCEL_NAME};
pub use hidden_field::HiddenField;
pub use text_field::TextField;

use crate::data::{Environment, FormData};
use crate::markup::Node;
use serde::Serialize;
use serde_json::Value;

/// Type tag used for cell-renderer dispatch and button classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
	Text,
	Hidden,
	Button,
	Custom(&'static str),
}

impl FieldKind {
	pub fn is_button(&self) -> bool {
		matches!(self, FieldKind::Button)
	}
}

/// Structural description of a field: its type tag, name, and current value,
/// plus presentation metadata attached during rendering.
///
/// Descriptors are produced fresh on every render call and never cached
/// across requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
	#[serde(rename = "type")]
	pub kind: FieldKind,
	pub name: String,
	pub value: Value,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	pub required: bool,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<String>,
}

impl FieldDescriptor {
	pub fn new(kind: FieldKind, name: impl Into<String>, value: Value) -> Self {
		Self {
			kind,
			name: name.into(),
			value,
			label: None,
			required: false,
			errors: vec![],
		}
	}

	/// Merges environment context: a label looked up by name (when no
	/// explicit label was configured) and this field's errors.
	pub fn attach_env(&mut self, env: &Environment) {
		if self.label.is_none() {
			self.label = env.label_for(&self.name).map(str::to_string);
		}
		self.errors = env.field_errors(&self.name).to_vec();
	}

	/// The label to display: explicit or environment-supplied label, else the
	/// humanized field name.
	pub fn display_label(&self) -> String {
		self.label.clone().unwrap_or_else(|| humanize(&self.name))
	}
}

/// A named, typed unit of form input/output.
///
/// Implementations are immutable value objects constructed once per form
/// definition and shared across requests; they must not hold per-request
/// state.
pub trait Field: Send + Sync {
	fn kind(&self) -> FieldKind;

	fn name(&self) -> &str;

	/// Describes the field against the current data. The value falls back to
	/// a variant-specific default, then to the empty string.
	fn describe(&self, data: &FormData) -> FieldDescriptor;

	/// Renders the field's own markup fragment. Label and error wrapping is
	/// the cell renderer's job.
	fn render(&self, data: &FormData, env: &Environment) -> Node;
}

/// Turns a field name into a display label: `first_name` becomes
/// `First name`.
pub fn humanize(name: &str) -> String {
	let mut out = String::with_capacity(name.len());
	for (i, ch) in name.chars().enumerate() {
		let ch = if ch == '_' || ch == '-' { ' ' } else { ch };
		if i == 0 {
			out.extend(ch.to_uppercase());
		} else {
			out.push(ch);
		}
	}
	out
}
