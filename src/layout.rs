//! Layout strategies: arranging rendered fields and buttons into a page
//! fragment.

use crate::cell::CellRegistry;
use crate::data::{Environment, FormData};
use crate::fields::Field;
use crate::markup::{Element, Node};
use crate::request::Request;
use std::sync::Arc;

/// Result bundle of a layout or form render: a body and an optional title.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
	pub body: Node,
	pub title: Option<String>,
}

/// A page title: a literal, or a function of the request evaluated lazily at
/// render time.
#[derive(Clone)]
pub enum TitleSpec {
	Static(String),
	Computed(Arc<dyn Fn(&Request) -> String + Send + Sync>),
}

impl TitleSpec {
	pub fn computed(f: impl Fn(&Request) -> String + Send + Sync + 'static) -> Self {
		Self::Computed(Arc::new(f))
	}

	pub fn resolve(&self, request: &Request) -> String {
		match self {
			Self::Static(title) => title.clone(),
			Self::Computed(f) => f(request),
		}
	}
}

impl From<&str> for TitleSpec {
	fn from(title: &str) -> Self {
		Self::Static(title.to_string())
	}
}

impl From<String> for TitleSpec {
	fn from(title: String) -> Self {
		Self::Static(title)
	}
}

/// Strategy for composing a set of fields into a page fragment.
///
/// Layouts are immutable and shared across requests.
pub trait Layout: Send + Sync {
	fn render(
		&self,
		request: &Request,
		fields: &[Arc<dyn Field>],
		data: &FormData,
		env: &Environment,
	) -> LayoutResult;
}

/// Single-column grid: field cells stacked above one button row.
///
/// Fields are partitioned into buttons and non-buttons by their kind;
/// non-buttons render through the cell registry, buttons render plainly.
#[derive(Clone, Default)]
pub struct GridLayout {
	title: Option<TitleSpec>,
	cells: CellRegistry,
}

impl GridLayout {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_title(mut self, title: impl Into<TitleSpec>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn with_title_fn(mut self, f: impl Fn(&Request) -> String + Send + Sync + 'static) -> Self {
		self.title = Some(TitleSpec::computed(f));
		self
	}

	pub fn with_cells(mut self, cells: CellRegistry) -> Self {
		self.cells = cells;
		self
	}
}

impl Layout for GridLayout {
	fn render(
		&self,
		request: &Request,
		fields: &[Arc<dyn Field>],
		data: &FormData,
		env: &Environment,
	) -> LayoutResult {
		let (buttons, inputs): (Vec<_>, Vec<_>) =
			fields.iter().partition(|field| field.kind().is_button());

		let mut grid = Element::new("div").attr("class", "form-grid");
		for field in inputs {
			let mut descriptor = field.describe(data);
			descriptor.attach_env(env);
			let cell = self.cells.render_cell(&descriptor, field.render(data, env));
			grid = grid.child(Element::new("div").attr("class", "form-row").child(cell));
		}

		let mut button_row = Element::new("div").attr("class", "form-row buttons");
		for button in buttons {
			button_row = button_row.child(button.render(data, env));
		}
		grid = grid.child(button_row);

		let title = self
			.title
			.as_ref()
			.map(|title| title.resolve(request))
			.filter(|title| !title.is_empty());

		LayoutResult {
			body: grid.into(),
			title,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{ActionButton, TextField};

	fn fields() -> Vec<Arc<dyn Field>> {
		vec![
			Arc::new(TextField::new("name")),
			Arc::new(ActionButton::new("save")),
			Arc::new(ActionButton::new("cancel")),
		]
	}

	fn request() -> Request {
		Request::builder().uri("/users/new").build()
	}

	#[test]
	fn test_grid_partitions_buttons_into_one_row() {
		let layout = GridLayout::new();
		let result = layout.render(&request(), &fields(), &FormData::new(), &Environment::new());
		let html = result.body.render_to_string();

		let buttons_at = html.find("form-row buttons").unwrap();
		assert!(html.find("field-cell").unwrap() < buttons_at);
		assert!(html.contains("name=\"save\""));
		assert!(html.contains("name=\"cancel\""));
	}

	#[test]
	fn test_static_title() {
		let layout = GridLayout::new().with_title("Sign up");
		let result = layout.render(&request(), &[], &FormData::new(), &Environment::new());
		assert_eq!(result.title.as_deref(), Some("Sign up"));
	}

	#[test]
	fn test_computed_title_sees_request() {
		let layout = GridLayout::new().with_title_fn(|request| format!("At {}", request.uri()));
		let result = layout.render(&request(), &[], &FormData::new(), &Environment::new());
		assert_eq!(result.title.as_deref(), Some("At /users/new"));
	}

	#[test]
	fn test_empty_title_is_omitted() {
		let layout = GridLayout::new().with_title("");
		let result = layout.render(&request(), &[], &FormData::new(), &Environment::new());
		assert_eq!(result.title, None);
	}
}
