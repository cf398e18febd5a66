//! Submit and cancel action buttons.

use crate::data::{Environment, FormData};
use crate::fields::{Field, FieldDescriptor, FieldKind, humanize};
use crate::markup::{Element, Node};
use serde_json::Value;

/// Field name that classifies a button as a cancel action.
pub const CANCEL_NAME: &str = "cancel";

/// How a button participates in submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
	Submit,
	Cancel,
}

impl ButtonRole {
	/// Classifies a button by its field name: `cancel` cancels, everything
	/// else submits.
	pub fn for_name(name: &str) -> Self {
		if name == CANCEL_NAME {
			ButtonRole::Cancel
		} else {
			ButtonRole::Submit
		}
	}

	pub fn class_name(&self) -> &'static str {
		match self {
			ButtonRole::Submit => "submit",
			ButtonRole::Cancel => "cancel",
		}
	}
}

/// An action button with a fixed label. Unlike input fields, the value is
/// never taken from submitted data.
#[derive(Debug, Clone)]
pub struct ActionButton {
	name: String,
	label: String,
}

impl ActionButton {
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		let label = humanize(&name);
		Self { name, label }
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	pub fn role(&self) -> ButtonRole {
		ButtonRole::for_name(&self.name)
	}
}

impl Field for ActionButton {
	fn kind(&self) -> FieldKind {
		FieldKind::Button
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn describe(&self, _data: &FormData) -> FieldDescriptor {
		FieldDescriptor::new(
			FieldKind::Button,
			&self.name,
			Value::String(self.label.clone()),
		)
	}

	fn render(&self, _data: &FormData, _env: &Environment) -> Node {
		Element::new("input")
			.attr("type", "submit")
			.attr("name", self.name.as_str())
			.attr("value", self.label.as_str())
			.attr("class", format!("button {}", self.role().class_name()))
			.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_cancel_classification() {
		assert_eq!(ActionButton::new("cancel").role(), ButtonRole::Cancel);
		assert_eq!(ActionButton::new("save").role(), ButtonRole::Submit);
		assert_eq!(ActionButton::new("delete").role(), ButtonRole::Submit);
	}

	#[test]
	fn test_label_never_taken_from_data() {
		let button = ActionButton::new("save");
		let data = FormData::from_pairs([("save", json!("clicked"))]);
		let descriptor = button.describe(&data);
		assert_eq!(descriptor.value, json!("Save"));
	}

	#[test]
	fn test_render_carries_role_class() {
		let html = ActionButton::new("cancel")
			.render(&FormData::new(), &Environment::new())
			.render_to_string();
		assert!(html.contains("class=\"button cancel\""));
		assert!(html.contains("value=\"Cancel\""));
	}
}
