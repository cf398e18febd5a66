//! Canonical form data, render environment, and data-loading dispatch.
//!
//! All field values flow through [`FormData`]: defaults, loaded entity data,
//! submitted payloads, and the data handed to terminal responses. Keys are
//! normalized to their symbolic form on every insert and lookup, so raw
//! payload keys (`"age"`, `":age"`, `" age "`) and in-process keys compare
//! equal once stored.

use crate::request::Request;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Field-name to ordered error messages. A missing key means no error; an
/// empty vec is treated the same.
pub type ErrorMap = HashMap<String, Vec<String>>;

/// Reserved key for errors that apply to the submission as a whole rather
/// than to a single field.
pub const FORM_WIDE_KEY: &str = "_all";

/// Normalizes a raw key to its symbolic form: surrounding whitespace trimmed
/// and one leading `:` sigil stripped.
///
/// # Examples
///
/// ```
/// use formwork::data::normalize_key;
///
/// assert_eq!(normalize_key("age"), "age");
/// assert_eq!(normalize_key(":age"), "age");
/// assert_eq!(normalize_key("  age "), "age");
/// ```
pub fn normalize_key(raw: &str) -> String {
	let trimmed = raw.trim();
	trimmed.strip_prefix(':').unwrap_or(trimmed).to_string()
}

/// Renders a form value for display in an attribute or text slot.
///
/// Scalars print plainly, `null` prints empty, sequences join their items
/// with commas.
pub fn value_to_string(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => n.to_string(),
		Value::Array(items) => items
			.iter()
			.map(value_to_string)
			.collect::<Vec<_>>()
			.join(","),
		Value::Object(_) => value.to_string(),
	}
}

/// A mapping from symbolic field name to a primitive value or a homogeneous
/// sequence of primitives.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormData {
	values: HashMap<String, Value>,
}

impl FormData {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds form data from key/value pairs, normalizing every key.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::data::FormData;
	/// use serde_json::json;
	///
	/// let data = FormData::from_pairs([("age", json!("10"))]);
	/// assert_eq!(data.get(":age"), Some(&json!("10")));
	/// ```
	pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: AsRef<str>,
		V: Into<Value>,
	{
		let mut data = Self::new();
		for (key, value) in pairs {
			data.insert(key.as_ref(), value);
		}
		data
	}

	pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
		self.values.insert(normalize_key(key), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.values.get(&normalize_key(key))
	}

	/// Convenience accessor for string-valued fields.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(Value::as_str)
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.values.remove(&normalize_key(key))
	}

	pub fn contains(&self, key: &str) -> bool {
		self.values.contains_key(&normalize_key(key))
	}

	/// True when the key is present with a value that is not `null`, `false`,
	/// `""`, or an empty sequence.
	pub fn is_truthy(&self, key: &str) -> bool {
		match self.get(key) {
			None | Some(Value::Null) => false,
			Some(Value::Bool(b)) => *b,
			Some(Value::String(s)) => !s.is_empty(),
			Some(Value::Array(items)) => !items.is_empty(),
			Some(_) => true,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.values.iter()
	}
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for FormData {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::from_pairs(iter)
	}
}

// Deserialization re-normalizes keys rather than trusting the stored form,
// so entries loaded from an external session backend hold the invariant too.
impl<'de> Deserialize<'de> for FormData {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = HashMap::<String, Value>::deserialize(deserializer)?;
		Ok(raw.into_iter().collect())
	}
}

/// Read-only context threaded through rendering.
#[derive(Debug, Clone, Default)]
pub struct Environment {
	/// Validation errors from a prior submission, keyed by field name.
	pub errors: Option<ErrorMap>,
	/// Display labels keyed by field name.
	pub labels: Option<HashMap<String, String>>,
}

impl Environment {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_errors(mut self, errors: ErrorMap) -> Self {
		self.errors = Some(errors);
		self
	}

	pub fn with_labels(mut self, labels: HashMap<String, String>) -> Self {
		self.labels = Some(labels);
		self
	}

	/// Errors recorded for one field, empty when none.
	pub fn field_errors(&self, name: &str) -> &[String] {
		self.errors
			.as_ref()
			.and_then(|errors| errors.get(name))
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	pub fn label_for(&self, name: &str) -> Option<&str> {
		self.labels
			.as_ref()
			.and_then(|labels| labels.get(name))
			.map(String::as_str)
	}
}

/// How a form sources its data: nothing, a static map, or a function of the
/// request. Used for both defaults and entity data sources with identical
/// semantics.
#[derive(Clone, Default)]
pub enum DataProvider {
	#[default]
	Absent,
	Static(FormData),
	Computed(Arc<dyn Fn(&Request) -> FormData + Send + Sync>),
}

impl DataProvider {
	pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: AsRef<str>,
		V: Into<Value>,
	{
		Self::Static(FormData::from_pairs(pairs))
	}

	pub fn computed(f: impl Fn(&Request) -> FormData + Send + Sync + 'static) -> Self {
		Self::Computed(Arc::new(f))
	}

	/// Resolves the provider against a request. `Absent` yields `None`; the
	/// other variants always yield data, even when the map is empty.
	pub fn resolve(&self, request: &Request) -> Option<FormData> {
		match self {
			Self::Absent => None,
			Self::Static(data) => Some(data.clone()),
			Self::Computed(f) => Some(f(request)),
		}
	}
}

impl fmt::Debug for DataProvider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Absent => f.write_str("DataProvider::Absent"),
			Self::Static(data) => f.debug_tuple("DataProvider::Static").field(data).finish(),
			Self::Computed(_) => f.write_str("DataProvider::Computed(..)"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("age", "age")]
	#[case(":age", "age")]
	#[case(" :age ", "age")]
	#[case("first_name", "first_name")]
	#[case("  spaced  ", "spaced")]
	fn test_normalize_key(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(normalize_key(raw), expected);
	}

	#[test]
	fn test_raw_and_symbolic_keys_collapse() {
		let mut data = FormData::new();
		data.insert("age", json!("10"));
		assert_eq!(data.get(":age"), Some(&json!("10")));
		data.insert(":age", json!("11"));
		assert_eq!(data.len(), 1);
		assert_eq!(data.get("age"), Some(&json!("11")));
	}

	#[rstest]
	#[case(json!("yes"), true)]
	#[case(json!(""), false)]
	#[case(json!(false), false)]
	#[case(json!(true), true)]
	#[case(json!(null), false)]
	#[case(json!(0), true)]
	#[case(json!([]), false)]
	#[case(json!(["a"]), true)]
	fn test_is_truthy(#[case] value: Value, #[case] expected: bool) {
		let data = FormData::from_pairs([("flag", value)]);
		assert_eq!(data.is_truthy("flag"), expected);
	}

	#[test]
	fn test_is_truthy_missing_key() {
		assert!(!FormData::new().is_truthy("anything"));
	}

	#[test]
	fn test_value_to_string() {
		assert_eq!(value_to_string(&json!("x")), "x");
		assert_eq!(value_to_string(&json!(10)), "10");
		assert_eq!(value_to_string(&json!(null)), "");
		assert_eq!(value_to_string(&json!(["a", "b"])), "a,b");
	}

	#[test]
	fn test_deserialize_normalizes_keys() {
		let data: FormData = serde_json::from_str(r#"{":age": "10"}"#).unwrap();
		assert_eq!(data.get("age"), Some(&json!("10")));
	}

	#[test]
	fn test_environment_field_errors_empty_when_absent() {
		let env = Environment::new();
		assert!(env.field_errors("name").is_empty());
	}

	#[test]
	fn test_data_provider_resolution() {
		let request = Request::builder().uri("/").build();
		assert_eq!(DataProvider::Absent.resolve(&request), None);

		let static_provider = DataProvider::from_pairs([("a", json!(1))]);
		assert!(static_provider.resolve(&request).is_some());

		let computed = DataProvider::computed(|request: &Request| {
			FormData::from_pairs([("uri", json!(request.uri()))])
		});
		let data = computed.resolve(&request).unwrap();
		assert_eq!(data.get("uri"), Some(&json!("/")));
	}

	proptest! {
		#[test]
		fn prop_normalize_is_idempotent(raw in "[ :]?[a-z_]{1,12} ?") {
			let once = normalize_key(&raw);
			prop_assert_eq!(normalize_key(&once), once.clone());
		}

		#[test]
		fn prop_sigiled_and_bare_keys_agree(name in "[a-z_]{1,12}") {
			let sigiled = format!(":{name}");
			prop_assert_eq!(normalize_key(&sigiled), normalize_key(&name));
		}
	}
}
