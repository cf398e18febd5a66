//! Render-path scenarios: data precedence, flash round-trips, and control
//! field injection.

use formwork::{
	ActionButton, CANCEL_SENTINEL, DataProvider, EmbeddedFormHandler, FlashEntry, FlashStore,
	Form, FormData, GridLayout, MemoryFlash, Request, TextField,
};
use serde_json::json;

fn form() -> Form {
	Form::builder("person-form")
		.create_action("/people")
		.layout(GridLayout::new().with_title("New person"))
		.build()
		.unwrap()
}

fn handler() -> EmbeddedFormHandler {
	EmbeddedFormHandler::builder(form())
		.field(TextField::new("name").required())
		.field(ActionButton::new("save"))
		.field(ActionButton::new("cancel"))
		.data_source(DataProvider::Absent)
		.defaults(DataProvider::from_pairs([("name", json!("Anonymous"))]))
		.build()
		.unwrap()
}

fn request() -> Request {
	Request::builder().uri("/people/new").build()
}

#[test]
fn test_defaults_fill_a_fresh_form() {
	let mut flash = MemoryFlash::new();
	let rendered = handler().render(&request(), &mut flash);

	assert!(rendered.body.contains("value=\"Anonymous\""));
	assert!(rendered.errors.is_none());
	assert_eq!(rendered.title.as_deref(), Some("New person"));
}

#[test]
fn test_data_source_suppresses_defaults_idempotently() {
	let handler = EmbeddedFormHandler::builder(form())
		.field(TextField::new("name"))
		.data_source(DataProvider::from_pairs([("name", json!("Loaded"))]))
		.defaults(DataProvider::from_pairs([("name", json!("Defaulted"))]))
		.build()
		.unwrap();

	let mut flash = MemoryFlash::new();
	for _ in 0..3 {
		let rendered = handler.render(&request(), &mut flash);
		assert!(rendered.body.contains("value=\"Loaded\""));
		assert!(!rendered.body.contains("Defaulted"));
	}
}

#[test]
fn test_cancel_control_injects_sentinel_into_markup() {
	let mut flash = MemoryFlash::new();
	let rendered = handler().render(&request(), &mut flash);

	assert!(rendered
		.body
		.contains(&format!("name=\"{CANCEL_SENTINEL}\" value=\"cancel\"")));
}

#[test]
fn test_flash_errors_and_data_reach_the_rerender() {
	let mut flash = MemoryFlash::new();
	flash.put(
		"person-form",
		FlashEntry::new(
			FormData::from_pairs([("name", json!(""))]),
			[("name".to_string(), vec!["name cannot be blank!".to_string()])].into(),
		),
	);

	let rendered = handler().render(&request(), &mut flash);

	assert!(rendered.body.contains("name cannot be blank!"));
	assert!(rendered.body.contains("class=\"error\""));
	let errors = rendered.errors.expect("errors attached to the result");
	assert_eq!(errors.get("name").unwrap()[0], "name cannot be blank!");

	// Flash is read-once: the next render is clean and falls back to
	// defaults again.
	let clean = handler().render(&request(), &mut flash);
	assert!(clean.errors.is_none());
	assert!(clean.body.contains("value=\"Anonymous\""));
	assert!(clean.body.contains("class=\"error hidden\""));
}

#[test]
fn test_flash_data_beats_data_source() {
	let handler = EmbeddedFormHandler::builder(form())
		.field(TextField::new("name"))
		.data_source(DataProvider::from_pairs([("name", json!("Loaded"))]))
		.build()
		.unwrap();

	let mut flash = MemoryFlash::new();
	flash.put(
		"person-form",
		FlashEntry::new(
			FormData::from_pairs([("name", json!("Rejected"))]),
			formwork::ErrorMap::new(),
		),
	);

	let rendered = handler.render(&request(), &mut flash);
	assert!(rendered.body.contains("value=\"Rejected\""));
	assert!(!rendered.body.contains("Loaded"));
}

#[test]
fn test_rendered_form_tag_and_button_row() {
	let mut flash = MemoryFlash::new();
	let rendered = handler().render(&request(), &mut flash);

	assert!(rendered.body.starts_with("<form action=\"/people\" method=\"post\">"));
	assert!(rendered.body.contains("class=\"button submit\""));
	assert!(rendered.body.contains("class=\"button cancel\""));
	assert!(rendered.body.ends_with("</form>"));
}

#[test]
fn test_computed_fields_see_the_request() {
	let handler = EmbeddedFormHandler::builder(form())
		.fields_fn(|request: &Request| {
			let mut fields: Vec<std::sync::Arc<dyn formwork::Field>> =
				vec![std::sync::Arc::new(TextField::new("name"))];
			if request.route_param("id").is_some() {
				fields.push(std::sync::Arc::new(TextField::new("updated_reason")));
			}
			fields
		})
		.build()
		.unwrap();

	let mut flash = MemoryFlash::new();
	let fresh = handler.render(&request(), &mut flash);
	assert!(!fresh.body.contains("updated_reason"));

	let edit_request = Request::builder()
		.uri("/people/4/edit")
		.route_param("id", "4")
		.build();
	let edit = handler.render(&edit_request, &mut flash);
	assert!(edit.body.contains("updated_reason"));
}
