//! Request orchestrators: [`EmbeddedFormHandler`] drives the render path,
//! [`SubmitHandler`] drives the submission pipeline.

use crate::data::{DataProvider, Environment, ErrorMap, FormData};
use crate::fields::Field;
use crate::flash::FlashStore;
use crate::form::{Form, FormError, FormResult};
use crate::pipeline::{
	CancelControl, Control, FunctionValidate, RenderPlan, Status, SubmitProcessor, SubmitResponse,
	process_form_submit,
};
use crate::request::Request;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The field list of a form: fixed at definition time, or computed from the
/// request.
#[derive(Clone)]
pub enum FieldsProvider {
	Static(Vec<Arc<dyn Field>>),
	Computed(Arc<dyn Fn(&Request) -> Vec<Arc<dyn Field>> + Send + Sync>),
}

impl FieldsProvider {
	pub fn resolve(&self, request: &Request) -> Vec<Arc<dyn Field>> {
		match self {
			Self::Static(fields) => fields.clone(),
			Self::Computed(f) => f(request),
		}
	}
}

/// Render-path output: the serialized form body plus whatever downstream
/// consumers need to assemble the page.
#[derive(Debug, Clone)]
pub struct RenderedForm {
	pub body: String,
	pub title: Option<String>,
	/// Errors carried over from a failed submission, when any.
	pub errors: Option<ErrorMap>,
	/// Side-channel data accumulated by controls (headers and the like).
	pub extras: HashMap<String, Value>,
}

/// Orchestrates rendering a form for a GET-like request.
///
/// Data precedence: flash-carried data from a failed submission, then the
/// entity data source, then computed defaults, then nothing. A data source
/// that yields data suppresses default computation entirely, so edit flows
/// never pay for defaults.
pub struct EmbeddedFormHandler {
	form: Form,
	fields: FieldsProvider,
	data_source: DataProvider,
	defaults: DataProvider,
	controls: Vec<Arc<dyn Control>>,
	labels: Option<HashMap<String, String>>,
}

impl EmbeddedFormHandler {
	pub fn builder(form: Form) -> EmbeddedFormBuilder {
		EmbeddedFormBuilder::new(form)
	}

	pub fn form(&self) -> &Form {
		&self.form
	}

	pub fn render(&self, request: &Request, flash: &mut dyn FlashStore) -> RenderedForm {
		let id = self.form.id();

		let (flash_data, errors) = match flash.take(id) {
			Some(entry) => {
				let errors = if entry.errors.is_empty() {
					None
				} else {
					Some(entry.errors)
				};
				(Some(entry.data), errors)
			}
			None => (None, None),
		};

		let data = if let Some(data) = flash_data {
			tracing::debug!(form = id, "rendering with flash-carried data");
			data
		} else if let Some(data) = self.data_source.resolve(request) {
			tracing::debug!(form = id, "rendering with data source");
			data
		} else if let Some(data) = self.defaults.resolve(request) {
			tracing::debug!(form = id, "rendering with defaults");
			data
		} else {
			FormData::new()
		};

		let env = Environment {
			errors: errors.clone(),
			labels: self.labels.clone(),
		};

		let mut plan = RenderPlan::new(self.fields.resolve(request));
		for control in &self.controls {
			plan = control.add_control(request, plan);
		}

		let output = self.form.render(request, &plan.fields, &data, &env);

		RenderedForm {
			body: output.body.render_to_string(),
			title: output.title,
			errors,
			extras: plan.extras,
		}
	}
}

/// Builder for [`EmbeddedFormHandler`]. Controls default to
/// `[CancelControl]` when none are added.
pub struct EmbeddedFormBuilder {
	form: Form,
	static_fields: Vec<Arc<dyn Field>>,
	computed_fields: Option<Arc<dyn Fn(&Request) -> Vec<Arc<dyn Field>> + Send + Sync>>,
	data_source: DataProvider,
	defaults: DataProvider,
	controls: Option<Vec<Arc<dyn Control>>>,
	labels: Option<HashMap<String, String>>,
}

impl EmbeddedFormBuilder {
	pub fn new(form: Form) -> Self {
		Self {
			form,
			static_fields: vec![],
			computed_fields: None,
			data_source: DataProvider::Absent,
			defaults: DataProvider::Absent,
			controls: None,
			labels: None,
		}
	}

	pub fn field(mut self, field: impl Field + 'static) -> Self {
		self.static_fields.push(Arc::new(field));
		self
	}

	pub fn fields(mut self, fields: Vec<Arc<dyn Field>>) -> Self {
		self.static_fields = fields;
		self
	}

	/// Computes the field list per request, replacing any static fields.
	pub fn fields_fn(
		mut self,
		f: impl Fn(&Request) -> Vec<Arc<dyn Field>> + Send + Sync + 'static,
	) -> Self {
		self.computed_fields = Some(Arc::new(f));
		self
	}

	pub fn data_source(mut self, data_source: DataProvider) -> Self {
		self.data_source = data_source;
		self
	}

	pub fn defaults(mut self, defaults: DataProvider) -> Self {
		self.defaults = defaults;
		self
	}

	pub fn control(mut self, control: impl Control + 'static) -> Self {
		self.controls
			.get_or_insert_with(Vec::new)
			.push(Arc::new(control));
		self
	}

	pub fn labels(mut self, labels: HashMap<String, String>) -> Self {
		self.labels = Some(labels);
		self
	}

	pub fn build(self) -> FormResult<EmbeddedFormHandler> {
		let mut seen = HashSet::new();
		for field in &self.static_fields {
			if !seen.insert(field.name().to_string()) {
				return Err(FormError::DuplicateField(field.name().to_string()));
			}
		}

		let fields = match self.computed_fields {
			Some(f) => FieldsProvider::Computed(f),
			None => FieldsProvider::Static(self.static_fields),
		};

		Ok(EmbeddedFormHandler {
			form: self.form,
			fields,
			data_source: self.data_source,
			defaults: self.defaults,
			controls: self
				.controls
				.unwrap_or_else(|| vec![Arc::new(CancelControl)]),
			labels: self.labels,
		})
	}
}

/// Orchestrates processing a submitted payload for a POST-like request.
///
/// The raw payload's keys are normalized, then the pipeline runs over
/// `controls ++ [validator]` with the validator always last. A pipeline
/// outcome wins; exhaustion is success.
pub struct SubmitHandler {
	controls: Vec<Arc<dyn Control>>,
	validator: Arc<dyn SubmitProcessor>,
}

impl SubmitHandler {
	pub fn builder() -> SubmitHandlerBuilder {
		SubmitHandlerBuilder::new()
	}

	pub fn handle<K, V>(
		&self,
		request: &Request,
		target: &str,
		payload: impl IntoIterator<Item = (K, V)>,
	) -> SubmitResponse
	where
		K: AsRef<str>,
		V: Into<Value>,
	{
		let data = FormData::from_pairs(payload);
		let status = Status::new(request, data);

		let mut processors: Vec<&dyn SubmitProcessor> = Vec::with_capacity(self.controls.len() + 1);
		for control in &self.controls {
			let processor: &dyn SubmitProcessor = control.as_ref();
			processors.push(processor);
		}
		processors.push(self.validator.as_ref());

		let status = process_form_submit(processors, target, status);
		match status.outcome {
			Some(response) => response,
			None => SubmitResponse::success(target, status.data),
		}
	}
}

/// Builder for [`SubmitHandler`]. Controls default to `[CancelControl]`; the
/// validator defaults to one that accepts everything.
#[derive(Default)]
pub struct SubmitHandlerBuilder {
	controls: Option<Vec<Arc<dyn Control>>>,
	validator: Option<Arc<dyn SubmitProcessor>>,
}

impl SubmitHandlerBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn control(mut self, control: impl Control + 'static) -> Self {
		self.controls
			.get_or_insert_with(Vec::new)
			.push(Arc::new(control));
		self
	}

	/// Supplies a validation function, wrapped into the processor contract.
	pub fn validator_fn(
		mut self,
		f: impl Fn(&FormData) -> ErrorMap + Send + Sync + 'static,
	) -> Self {
		self.validator = Some(Arc::new(FunctionValidate::new(f)));
		self
	}

	/// Supplies an object already satisfying the processor contract.
	pub fn validator(mut self, validator: impl SubmitProcessor + 'static) -> Self {
		self.validator = Some(Arc::new(validator));
		self
	}

	pub fn build(self) -> SubmitHandler {
		SubmitHandler {
			controls: self
				.controls
				.unwrap_or_else(|| vec![Arc::new(CancelControl)]),
			validator: self.validator.unwrap_or_else(|| {
				Arc::new(FunctionValidate::new(|_: &FormData| ErrorMap::new()))
			}),
		}
	}
}
