//! Request-side view of the HTTP request consumed by the engine.
//!
//! The engine never parses HTTP itself; hosts build a [`Request`] from
//! whatever server representation they use. Only the pieces the form engine
//! reads are carried: method, URI, resolved route parameters, and headers.

use http::{HeaderMap, Method};
use std::collections::HashMap;

/// Request context for one render or one submission.
///
/// # Examples
///
/// ```
/// use formwork::request::Request;
/// use http::Method;
///
/// let request = Request::builder()
/// 	.method(Method::GET)
/// 	.uri("/users/7/edit")
/// 	.route_param("id", "7")
/// 	.build();
/// assert_eq!(request.route_param("id"), Some("7"));
/// ```
#[derive(Debug, Clone)]
pub struct Request {
	method: Method,
	uri: String,
	route_params: HashMap<String, String>,
	headers: HeaderMap,
}

impl Request {
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	pub fn uri(&self) -> &str {
		&self.uri
	}

	/// Looks up a resolved path parameter by name.
	pub fn route_param(&self, name: &str) -> Option<&str> {
		self.route_params.get(name).map(String::as_str)
	}

	pub fn route_params(&self) -> &HashMap<String, String> {
		&self.route_params
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}
}

/// Builder for [`Request`].
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Option<Method>,
	uri: String,
	route_params: HashMap<String, String>,
	headers: HeaderMap,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = uri.into();
		self
	}

	pub fn route_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.route_params.insert(name.into(), value.into());
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	pub fn build(self) -> Request {
		Request {
			method: self.method.unwrap_or(Method::GET),
			uri: self.uri,
			route_params: self.route_params,
			headers: self.headers,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_defaults_to_get() {
		let request = Request::builder().uri("/").build();
		assert_eq!(request.method(), &Method::GET);
	}

	#[test]
	fn test_route_params() {
		let request = Request::builder()
			.uri("/posts/3")
			.route_param("id", "3")
			.build();
		assert_eq!(request.route_param("id"), Some("3"));
		assert_eq!(request.route_param("slug"), None);
	}
}
