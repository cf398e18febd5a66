//! Hidden input field.

use crate::data::{Environment, FormData, value_to_string};
use crate::fields::{Field, FieldDescriptor, FieldKind};
use crate::markup::{Element, Node};
use serde_json::Value;

/// Hidden input carrying state across the submission round-trip.
///
/// Value resolution order: value present in submitted data, then the
/// construction-time value, then the empty string.
#[derive(Debug, Clone)]
pub struct HiddenField {
	name: String,
	value: Option<String>,
}

impl HiddenField {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: None,
		}
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}
}

impl Field for HiddenField {
	fn kind(&self) -> FieldKind {
		FieldKind::Hidden
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn describe(&self, data: &FormData) -> FieldDescriptor {
		let value = data
			.get(&self.name)
			.cloned()
			.or_else(|| self.value.clone().map(Value::String))
			.unwrap_or_else(|| Value::String(String::new()));
		FieldDescriptor::new(FieldKind::Hidden, &self.name, value)
	}

	fn render(&self, data: &FormData, _env: &Environment) -> Node {
		let descriptor = self.describe(data);
		Element::new("input")
			.attr("type", "hidden")
			.attr("name", self.name.as_str())
			.attr("value", value_to_string(&descriptor.value))
			.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_submitted_value_beats_construction_value() {
		let field = HiddenField::new("k").with_value("v0");
		let data = FormData::from_pairs([("k", json!("sub"))]);
		let html = field.render(&data, &Environment::new()).render_to_string();
		assert!(html.contains("value=\"sub\""));
		assert!(!html.contains("v0"));
	}

	#[test]
	fn test_construction_value_when_not_submitted() {
		let field = HiddenField::new("k").with_value("v0");
		let html = field
			.render(&FormData::new(), &Environment::new())
			.render_to_string();
		assert!(html.contains("value=\"v0\""));
	}

	#[test]
	fn test_empty_when_both_absent() {
		let field = HiddenField::new("k");
		let html = field
			.render(&FormData::new(), &Environment::new())
			.render_to_string();
		assert!(html.contains("value=\"\""));
	}
}
