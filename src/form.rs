//! The form itself: identity, action/method resolution, and the outer form
//! tag.

use crate::data::{Environment, FormData};
use crate::fields::Field;
use crate::layout::{Layout, LayoutResult};
use crate::markup::Element;
use crate::request::Request;
use http::Method;
use std::sync::Arc;

/// Hidden field carrying the real verb when the browser can only POST.
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// Configuration errors surfaced at form-definition time, before any request
/// is processed.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("form id must not be empty")]
	EmptyId,
	#[error("duplicate field name: {0}")]
	DuplicateField(String),
	#[error("invalid pattern for field {field}")]
	InvalidPattern {
		field: String,
		#[source]
		source: regex::Error,
	},
}

pub type FormResult<T> = Result<T, FormError>;

/// A form action: a literal URL, or a function of the request.
#[derive(Clone)]
pub enum ActionSpec {
	Static(String),
	Computed(Arc<dyn Fn(&Request) -> String + Send + Sync>),
}

impl ActionSpec {
	pub fn computed(f: impl Fn(&Request) -> String + Send + Sync + 'static) -> Self {
		Self::Computed(Arc::new(f))
	}

	pub fn resolve(&self, request: &Request) -> String {
		match self {
			Self::Static(action) => action.clone(),
			Self::Computed(f) => f(request),
		}
	}
}

impl From<&str> for ActionSpec {
	fn from(action: &str) -> Self {
		Self::Static(action.to_string())
	}
}

impl From<String> for ActionSpec {
	fn from(action: String) -> Self {
		Self::Static(action)
	}
}

type ActionResolver = Arc<dyn Fn(&Request) -> (String, Method) + Send + Sync>;

/// A form definition: unique identity, action/method resolver, layout, and
/// extra markup attributes.
///
/// Forms are constructed once and reused across requests.
#[derive(Clone)]
pub struct Form {
	id: String,
	resolver: ActionResolver,
	layout: Arc<dyn Layout>,
	attrs: Vec<(String, String)>,
}

impl Form {
	pub fn builder(id: impl Into<String>) -> FormBuilder {
		FormBuilder::new(id)
	}

	/// The form's unique identity, used to key flash-carried error state.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Renders the layout's body wrapped in the form tag.
	///
	/// GET and POST render natively; any other verb renders a POST form with
	/// a hidden method-override field carrying the verb name. Caller attrs
	/// merge in but never override `method` or `action`.
	pub fn render(
		&self,
		request: &Request,
		fields: &[Arc<dyn Field>],
		data: &FormData,
		env: &Environment,
	) -> LayoutResult {
		let (action, method) = (self.resolver)(request);
		let inner = self.layout.render(request, fields, data, env);

		let native = method == Method::GET || method == Method::POST;
		let form_method = if native {
			method.as_str().to_ascii_lowercase()
		} else {
			"post".to_string()
		};

		let mut form = Element::new("form")
			.attr("action", action)
			.attr("method", form_method);
		for (name, value) in &self.attrs {
			if name == "method" || name == "action" {
				continue;
			}
			form = form.attr(name.as_str(), value.as_str());
		}
		if !native {
			form = form.child(
				Element::new("input")
					.attr("type", "hidden")
					.attr("name", METHOD_OVERRIDE_FIELD)
					.attr("value", method.as_str()),
			);
		}
		form = form.child(inner.body);

		LayoutResult {
			body: form.into(),
			title: inner.title,
		}
	}
}

/// Builder for [`Form`].
///
/// The default resolver chooses update semantics when the request carries an
/// `id` route parameter and create semantics otherwise, with POST as the
/// method when none is configured.
///
/// # Examples
///
/// ```
/// use formwork::form::Form;
/// use formwork::layout::GridLayout;
/// use http::Method;
///
/// let form = Form::builder("user-form")
/// 	.create_action("/users")
/// 	.update_action_fn(|request| {
/// 		format!("/users/{}", request.route_param("id").unwrap_or_default())
/// 	})
/// 	.update_method(Method::PUT)
/// 	.layout(GridLayout::new())
/// 	.attr("class", "stacked")
/// 	.build()
/// 	.unwrap();
/// assert_eq!(form.id(), "user-form");
/// ```
pub struct FormBuilder {
	id: String,
	create_method: Option<Method>,
	update_method: Option<Method>,
	create_action: Option<ActionSpec>,
	update_action: Option<ActionSpec>,
	resolver: Option<ActionResolver>,
	layout: Option<Arc<dyn Layout>>,
	attrs: Vec<(String, String)>,
}

impl FormBuilder {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			create_method: None,
			update_method: None,
			create_action: None,
			update_action: None,
			resolver: None,
			layout: None,
			attrs: vec![],
		}
	}

	pub fn create_method(mut self, method: Method) -> Self {
		self.create_method = Some(method);
		self
	}

	pub fn update_method(mut self, method: Method) -> Self {
		self.update_method = Some(method);
		self
	}

	pub fn create_action(mut self, action: impl Into<ActionSpec>) -> Self {
		self.create_action = Some(action.into());
		self
	}

	pub fn create_action_fn(mut self, f: impl Fn(&Request) -> String + Send + Sync + 'static) -> Self {
		self.create_action = Some(ActionSpec::computed(f));
		self
	}

	pub fn update_action(mut self, action: impl Into<ActionSpec>) -> Self {
		self.update_action = Some(action.into());
		self
	}

	pub fn update_action_fn(mut self, f: impl Fn(&Request) -> String + Send + Sync + 'static) -> Self {
		self.update_action = Some(ActionSpec::computed(f));
		self
	}

	/// Replaces the default resolver entirely.
	pub fn resolver(mut self, f: impl Fn(&Request) -> (String, Method) + Send + Sync + 'static) -> Self {
		self.resolver = Some(Arc::new(f));
		self
	}

	pub fn layout(mut self, layout: impl Layout + 'static) -> Self {
		self.layout = Some(Arc::new(layout));
		self
	}

	/// Adds a pass-through attribute for the form tag.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	pub fn build(self) -> FormResult<Form> {
		if self.id.is_empty() {
			return Err(FormError::EmptyId);
		}

		let resolver = match self.resolver {
			Some(resolver) => resolver,
			None => {
				let create_action = self
					.create_action
					.unwrap_or_else(|| ActionSpec::Static(String::new()));
				let update_action = self.update_action.unwrap_or_else(|| create_action.clone());
				let create_method = self.create_method.unwrap_or(Method::POST);
				let update_method = self.update_method.unwrap_or(Method::POST);
				Arc::new(move |request: &Request| {
					if request.route_param("id").is_some() {
						(update_action.resolve(request), update_method.clone())
					} else {
						(create_action.resolve(request), create_method.clone())
					}
				}) as ActionResolver
			}
		};

		let layout = self
			.layout
			.unwrap_or_else(|| Arc::new(crate::layout::GridLayout::new()));

		Ok(Form {
			id: self.id,
			resolver,
			layout,
			attrs: self.attrs,
		})
	}
}
