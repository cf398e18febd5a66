//! Form definition, rendering, and submission processing for server-rendered
//! web applications.
//!
//! A form is declared once as a composition of typed fields, a layout
//! strategy, and a chain of controls and validators, then used two ways:
//!
//! - **Render path** ([`EmbeddedFormHandler`]): resolve data (flash-carried
//!   state from a failed submission, an entity data source, or computed
//!   defaults), let controls inject their hidden fields, and render the
//!   layout inside the form tag.
//! - **Submit path** ([`SubmitHandler`]): normalize the payload's keys and
//!   run it through an ordered, short-circuiting pipeline that ends in
//!   exactly one of [`SubmitResponse::Canceled`], [`SubmitResponse::Failure`],
//!   or [`SubmitResponse::Success`].
//!
//! Validation failure is data, not an error: processors reject by setting
//! the pipeline outcome, and the resulting error map travels through a
//! [`FlashStore`] back to the next render.
//!
//! ```
//! use formwork::{NotBlank, Request, SubmitHandler, combine};
//! use serde_json::json;
//!
//! let handler = SubmitHandler::builder()
//! 	.validator_fn(combine(vec![Box::new(NotBlank::new("name"))]))
//! 	.build();
//!
//! let request = Request::builder().uri("/people").build();
//! let response = handler.handle(&request, "/people", [("name", json!("Ann"))]);
//! assert!(response.is_success());
//! ```

pub mod cell;
pub mod data;
pub mod fields;
pub mod flash;
pub mod form;
pub mod handlers;
pub mod layout;
pub mod markup;
pub mod pipeline;
pub mod request;
pub mod validators;

pub use cell::{CellRegistry, CellRenderer, default_cell};
pub use data::{
	DataProvider, Environment, ErrorMap, FORM_WIDE_KEY, FormData, normalize_key, value_to_string,
};
pub use fields::{
	ActionButton, ButtonRole, CANCEL_NAME, Field, FieldDescriptor, FieldKind, HiddenField,
	TextField, humanize,
};
pub use flash::{FlashEntry, FlashStore, MemoryFlash};
pub use form::{ActionSpec, Form, FormBuilder, FormError, FormResult, METHOD_OVERRIDE_FIELD};
pub use handlers::{
	EmbeddedFormBuilder, EmbeddedFormHandler, FieldsProvider, RenderedForm, SubmitHandler,
	SubmitHandlerBuilder,
};
pub use layout::{GridLayout, Layout, LayoutResult, TitleSpec};
pub use markup::{Element, Node};
pub use pipeline::{
	CANCEL_SENTINEL, CancelControl, Control, FunctionValidate, RenderPlan, Status,
	SubmitProcessor, SubmitResponse, process_form_submit,
};
pub use request::{Request, RequestBuilder};
pub use validators::{DataCheck, MinLength, NotBlank, Pattern, ValidationErrors, combine};
