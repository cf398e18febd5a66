//! Single-line text input field.

use crate::data::{Environment, FormData, value_to_string};
use crate::fields::{Field, FieldDescriptor, FieldKind};
use crate::markup::{Element, Node};
use serde_json::Value;

/// Default `size` attribute applied when the caller supplies none.
const DEFAULT_SIZE: &str = "35";

/// Text input with an optional label override, required marker, and
/// free-form presentation attributes.
///
/// # Examples
///
/// ```
/// use formwork::fields::TextField;
///
/// let field = TextField::new("username")
/// 	.with_label("Login name")
/// 	.required()
/// 	.attr("maxlength", "64");
/// ```
#[derive(Debug, Clone)]
pub struct TextField {
	name: String,
	label: Option<String>,
	required: bool,
	attrs: Vec<(String, String)>,
}

impl TextField {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			required: false,
			attrs: vec![],
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Adds a pass-through presentation attribute (`size`, `maxlength`,
	/// `placeholder`, ...). Attributes render in the order they were added.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}
}

impl Field for TextField {
	fn kind(&self) -> FieldKind {
		FieldKind::Text
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn describe(&self, data: &FormData) -> FieldDescriptor {
		let value = data
			.get(&self.name)
			.cloned()
			.unwrap_or_else(|| Value::String(String::new()));
		let mut descriptor = FieldDescriptor::new(FieldKind::Text, &self.name, value);
		descriptor.label = self.label.clone();
		descriptor.required = self.required;
		descriptor
	}

	fn render(&self, data: &FormData, env: &Environment) -> Node {
		let mut descriptor = self.describe(data);
		descriptor.attach_env(env);

		let mut input = Element::new("input")
			.attr("type", "text")
			.attr("id", format!("id_{}", self.name))
			.attr("name", self.name.as_str())
			.attr("value", value_to_string(&descriptor.value));
		if !self.attrs.iter().any(|(name, _)| name == "size") {
			input = input.attr("size", DEFAULT_SIZE);
		}
		for (name, value) in &self.attrs {
			input = input.attr(name.as_str(), value.as_str());
		}
		if self.required {
			input = input.attr("required", "required");
		}
		input.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_render_reflects_data_value() {
		let field = TextField::new("name");
		let data = FormData::from_pairs([("name", json!("Ann"))]);
		let html = field.render(&data, &Environment::new()).render_to_string();
		assert!(html.contains("value=\"Ann\""));
		assert!(html.contains("name=\"name\""));
		assert!(html.contains("id=\"id_name\""));
	}

	#[test]
	fn test_render_default_size() {
		let field = TextField::new("name");
		let html = field
			.render(&FormData::new(), &Environment::new())
			.render_to_string();
		assert!(html.contains("size=\"35\""));
	}

	#[test]
	fn test_render_size_override() {
		let field = TextField::new("name").attr("size", "10");
		let html = field
			.render(&FormData::new(), &Environment::new())
			.render_to_string();
		assert!(html.contains("size=\"10\""));
		assert!(!html.contains("size=\"35\""));
	}

	#[test]
	fn test_render_is_pure() {
		let field = TextField::new("name").required().attr("placeholder", "Your name");
		let data = FormData::from_pairs([("name", json!("Ann"))]);
		let env = Environment::new();
		assert_eq!(
			field.render(&data, &env).render_to_string(),
			field.render(&data, &env).render_to_string()
		);
	}

	#[test]
	fn test_describe_missing_value_is_empty_string() {
		let field = TextField::new("name");
		let descriptor = field.describe(&FormData::new());
		assert_eq!(descriptor.value, json!(""));
	}
}
