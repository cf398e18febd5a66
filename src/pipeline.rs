//! The submission-processing pipeline: controls, validators, and the
//! short-circuiting driver.
//!
//! A submission flows through an ordered sequence of [`SubmitProcessor`]s.
//! Each processor receives the in-flight [`Status`] and may terminate the
//! pipeline by setting its outcome; the driver never overwrites an existing
//! outcome and skips all remaining processors once one is set. Failure is
//! communicated as data, never by unwinding.

use crate::data::{ErrorMap, FormData};
use crate::fields::{CANCEL_NAME, Field, HiddenField};
use crate::request::Request;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Hidden-field name that carries which cancel button a form renders, so the
/// pressed button survives the POST round-trip.
pub const CANCEL_SENTINEL: &str = "_cancel";

/// Terminal outcome of a submission. The `target` names where the outcome
/// should be delivered; turning it into an actual HTTP response is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitResponse {
	Canceled {
		target: String,
		data: FormData,
	},
	Failure {
		target: String,
		data: FormData,
		errors: ErrorMap,
	},
	Success {
		target: String,
		data: FormData,
	},
}

impl SubmitResponse {
	pub fn canceled(target: &str, data: FormData) -> Self {
		Self::Canceled {
			target: target.to_string(),
			data,
		}
	}

	pub fn failure(target: &str, data: FormData, errors: ErrorMap) -> Self {
		Self::Failure {
			target: target.to_string(),
			data,
			errors,
		}
	}

	pub fn success(target: &str, data: FormData) -> Self {
		Self::Success {
			target: target.to_string(),
			data,
		}
	}

	pub fn is_canceled(&self) -> bool {
		matches!(self, Self::Canceled { .. })
	}

	pub fn is_failure(&self) -> bool {
		matches!(self, Self::Failure { .. })
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success { .. })
	}

	pub fn target(&self) -> &str {
		match self {
			Self::Canceled { target, .. }
			| Self::Failure { target, .. }
			| Self::Success { target, .. } => target,
		}
	}

	pub fn data(&self) -> &FormData {
		match self {
			Self::Canceled { data, .. }
			| Self::Failure { data, .. }
			| Self::Success { data, .. } => data,
		}
	}

	pub fn errors(&self) -> Option<&ErrorMap> {
		match self {
			Self::Failure { errors, .. } => Some(errors),
			_ => None,
		}
	}
}

/// Per-submission pipeline state, created fresh for each request and moved
/// (not aliased) through the processors. A `Some` outcome freezes it.
#[derive(Debug)]
pub struct Status<'r> {
	pub request: &'r Request,
	pub data: FormData,
	pub outcome: Option<SubmitResponse>,
}

impl<'r> Status<'r> {
	pub fn new(request: &'r Request, data: FormData) -> Self {
		Self {
			request,
			data,
			outcome: None,
		}
	}
}

/// A pipeline stage. Implementations inspect the status and either pass it
/// through (possibly with replaced data) or set its outcome.
pub trait SubmitProcessor: Send + Sync {
	fn process<'r>(&self, target: &str, status: Status<'r>) -> Status<'r>;
}

/// The field/response pair threaded through controls before rendering.
/// Controls append fields and extras; they never clobber keys another
/// control wrote.
pub struct RenderPlan {
	pub fields: Vec<Arc<dyn Field>>,
	pub extras: HashMap<String, Value>,
}

impl RenderPlan {
	pub fn new(fields: Vec<Arc<dyn Field>>) -> Self {
		Self {
			fields,
			extras: HashMap::new(),
		}
	}
}

/// A pre-submission hook that augments the rendered field set and later
/// interprets the submitted state as a pipeline stage.
pub trait Control: SubmitProcessor {
	fn add_control(&self, request: &Request, plan: RenderPlan) -> RenderPlan;
}

/// Round-trips which cancel button a form carries.
///
/// At render time, every cancel-classified button gets a companion hidden
/// field named [`CANCEL_SENTINEL`] whose value is the button's field name. At
/// submit time the sentinel is read back: when the named field arrived truthy
/// the submission is canceled, short-circuiting the rest of the pipeline. The
/// sentinel and the named field are stripped from the data either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelControl;

impl Control for CancelControl {
	fn add_control(&self, _request: &Request, mut plan: RenderPlan) -> RenderPlan {
		let cancel_names: Vec<String> = plan
			.fields
			.iter()
			.filter(|field| field.kind().is_button() && field.name() == CANCEL_NAME)
			.map(|field| field.name().to_string())
			.collect();
		for name in cancel_names {
			plan.fields
				.push(Arc::new(HiddenField::new(CANCEL_SENTINEL).with_value(name)));
		}
		plan
	}
}

impl SubmitProcessor for CancelControl {
	fn process<'r>(&self, target: &str, mut status: Status<'r>) -> Status<'r> {
		let Some(sentinel) = status.data.remove(CANCEL_SENTINEL) else {
			return status;
		};
		let named = crate::data::value_to_string(&sentinel);
		let canceled = status.data.is_truthy(&named);
		status.data.remove(&named);
		if canceled {
			status.outcome = Some(SubmitResponse::canceled(target, status.data.clone()));
		}
		status
	}
}

/// Wraps a validation function into a pipeline stage. A non-empty error map
/// rejects the submission with a `Failure` outcome.
pub struct FunctionValidate<F> {
	f: F,
}

impl<F> FunctionValidate<F>
where
	F: Fn(&FormData) -> ErrorMap + Send + Sync,
{
	pub fn new(f: F) -> Self {
		Self { f }
	}
}

impl<F> SubmitProcessor for FunctionValidate<F>
where
	F: Fn(&FormData) -> ErrorMap + Send + Sync,
{
	fn process<'r>(&self, target: &str, mut status: Status<'r>) -> Status<'r> {
		let errors = (self.f)(&status.data);
		if !errors.is_empty() {
			status.outcome = Some(SubmitResponse::failure(target, status.data.clone(), errors));
		}
		status
	}
}

/// Drives the pipeline: processors run in declaration order, an outcome set
/// by an earlier processor is never overwritten, and all processors after
/// the first outcome are skipped. Exhaustion with no outcome is left to the
/// caller to interpret.
pub fn process_form_submit<'r, 'p>(
	processors: impl IntoIterator<Item = &'p dyn SubmitProcessor>,
	target: &str,
	mut status: Status<'r>,
) -> Status<'r> {
	for (index, processor) in processors.into_iter().enumerate() {
		if status.outcome.is_some() {
			break;
		}
		status = processor.process(target, status);
		if status.outcome.is_some() {
			tracing::debug!(index, "submit pipeline short-circuited");
		}
	}
	status
}
