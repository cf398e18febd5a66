//! Reusable submitted-data checks, composable into a single validation
//! function for [`crate::pipeline::FunctionValidate`].

use crate::data::{ErrorMap, FORM_WIDE_KEY, FormData, value_to_string};
use crate::form::{FormError, FormResult};
use regex::Regex;

/// Accumulates validation messages per field, in check order.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
	inner: ErrorMap,
}

impl ValidationErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, field: &str, message: impl Into<String>) {
		self.inner
			.entry(field.to_string())
			.or_default()
			.push(message.into());
	}

	/// Records an error against the submission as a whole.
	pub fn add_form_wide(&mut self, message: impl Into<String>) {
		self.add(FORM_WIDE_KEY, message);
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn into_map(self) -> ErrorMap {
		self.inner
	}
}

/// A single check against the whole submitted data set.
pub trait DataCheck: Send + Sync {
	fn check(&self, data: &FormData, errors: &mut ValidationErrors);
}

/// Rejects a field that is missing or blank after trimming.
///
/// # Examples
///
/// ```
/// use formwork::validators::{DataCheck, NotBlank, ValidationErrors};
/// use formwork::data::FormData;
///
/// let check = NotBlank::new("name");
/// let mut errors = ValidationErrors::new();
/// check.check(&FormData::new(), &mut errors);
/// assert!(!errors.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct NotBlank {
	field: String,
	message: Option<String>,
}

impl NotBlank {
	pub fn new(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			message: None,
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl DataCheck for NotBlank {
	fn check(&self, data: &FormData, errors: &mut ValidationErrors) {
		let blank = match data.get(&self.field) {
			None => true,
			Some(value) => value_to_string(value).trim().is_empty(),
		};
		if blank {
			let message = self
				.message
				.clone()
				.unwrap_or_else(|| format!("{} cannot be blank!", self.field));
			errors.add(&self.field, message);
		}
	}
}

/// Rejects a present, non-empty value shorter than `min` characters.
/// Absent or blank values pass; pair with [`NotBlank`] to require presence.
#[derive(Debug, Clone)]
pub struct MinLength {
	field: String,
	min: usize,
	message: Option<String>,
}

impl MinLength {
	pub fn new(field: impl Into<String>, min: usize) -> Self {
		Self {
			field: field.into(),
			min,
			message: None,
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl DataCheck for MinLength {
	fn check(&self, data: &FormData, errors: &mut ValidationErrors) {
		let Some(value) = data.get(&self.field) else {
			return;
		};
		let text = value_to_string(value);
		// Character count, not byte count, so multi-byte input measures
		// the way users count it.
		if !text.is_empty() && text.chars().count() < self.min {
			let message = self.message.clone().unwrap_or_else(|| {
				format!("{} must be at least {} characters", self.field, self.min)
			});
			errors.add(&self.field, message);
		}
	}
}

/// Rejects a present, non-empty value that does not match the pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
	field: String,
	regex: Regex,
	message: Option<String>,
}

impl Pattern {
	/// Compiles the pattern up front; a malformed pattern fails at
	/// form-definition time, not per request.
	pub fn new(field: impl Into<String>, pattern: &str) -> FormResult<Self> {
		let field = field.into();
		let regex = Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
			field: field.clone(),
			source,
		})?;
		Ok(Self {
			field,
			regex,
			message: None,
		})
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl DataCheck for Pattern {
	fn check(&self, data: &FormData, errors: &mut ValidationErrors) {
		let Some(value) = data.get(&self.field) else {
			return;
		};
		let text = value_to_string(value);
		if !text.is_empty() && !self.regex.is_match(&text) {
			let message = self
				.message
				.clone()
				.unwrap_or_else(|| format!("{} is not in the expected format", self.field));
			errors.add(&self.field, message);
		}
	}
}

/// Folds a set of checks into one validation function suitable for
/// [`crate::handlers::SubmitHandlerBuilder::validator_fn`].
pub fn combine(checks: Vec<Box<dyn DataCheck>>) -> impl Fn(&FormData) -> ErrorMap + Send + Sync {
	move |data| {
		let mut errors = ValidationErrors::new();
		for check in &checks {
			check.check(data, &mut errors);
		}
		errors.into_map()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn run(check: &dyn DataCheck, data: &FormData) -> ErrorMap {
		let mut errors = ValidationErrors::new();
		check.check(data, &mut errors);
		errors.into_map()
	}

	#[rstest]
	#[case(FormData::new())]
	#[case(FormData::from_pairs([("name", json!(""))]))]
	#[case(FormData::from_pairs([("name", json!("   "))]))]
	fn test_not_blank_rejects(#[case] data: FormData) {
		let errors = run(&NotBlank::new("name"), &data);
		assert_eq!(errors.get("name").unwrap()[0], "name cannot be blank!");
	}

	#[test]
	fn test_not_blank_accepts() {
		let data = FormData::from_pairs([("name", json!("Ann"))]);
		assert!(run(&NotBlank::new("name"), &data).is_empty());
	}

	#[test]
	fn test_not_blank_custom_message() {
		let errors = run(
			&NotBlank::new("name").with_message("required"),
			&FormData::new(),
		);
		assert_eq!(errors.get("name").unwrap()[0], "required");
	}

	#[test]
	fn test_min_length_counts_chars_not_bytes() {
		let check = MinLength::new("title", 3);
		let data = FormData::from_pairs([("title", json!("äöü"))]);
		assert!(run(&check, &data).is_empty());

		let short = FormData::from_pairs([("title", json!("äö"))]);
		assert!(!run(&check, &short).is_empty());
	}

	#[test]
	fn test_min_length_skips_absent_and_blank() {
		let check = MinLength::new("title", 3);
		assert!(run(&check, &FormData::new()).is_empty());
		let blank = FormData::from_pairs([("title", json!(""))]);
		assert!(run(&check, &blank).is_empty());
	}

	#[test]
	fn test_pattern() {
		let check = Pattern::new("slug", r"^[a-z0-9-]+$").unwrap();
		let good = FormData::from_pairs([("slug", json!("my-post"))]);
		assert!(run(&check, &good).is_empty());

		let bad = FormData::from_pairs([("slug", json!("My Post"))]);
		let errors = run(&check, &bad);
		assert_eq!(errors.get("slug").unwrap()[0], "slug is not in the expected format");
	}

	#[test]
	fn test_pattern_fails_fast_on_bad_regex() {
		assert!(Pattern::new("slug", "[unclosed").is_err());
	}

	#[test]
	fn test_combine_accumulates_in_order() {
		let validate = combine(vec![
			Box::new(NotBlank::new("name")),
			Box::new(MinLength::new("title", 5)),
		]);
		let data = FormData::from_pairs([("title", json!("ab"))]);
		let errors = validate(&data);
		assert!(errors.contains_key("name"));
		assert!(errors.contains_key("title"));
	}

	#[test]
	fn test_form_wide_errors_use_reserved_key() {
		let mut errors = ValidationErrors::new();
		errors.add_form_wide("passwords do not match");
		let map = errors.into_map();
		assert!(map.contains_key(FORM_WIDE_KEY));
	}
}
