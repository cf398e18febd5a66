//! Markup tree emitted by fields, layouts, and forms.
//!
//! Rendering produces a tree of [`Node`]s which is serialized to a string in
//! one pass. All text and attribute values are HTML-escaped on serialization;
//! the tree itself never holds pre-escaped content.

/// Elements that must not carry a closing tag.
const VOID_ELEMENTS: &[&str] = &["area", "base", "br", "col", "hr", "img", "input", "link", "meta"];

/// A node in the markup tree: an element or a text leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	Element(Element),
	Text(String),
}

impl Node {
	/// Serializes the node to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut out = String::new();
		self.render_to(&mut out);
		out
	}

	fn render_to(&self, out: &mut String) {
		match self {
			Node::Element(element) => element.render_to(out),
			Node::Text(text) => out.push_str(&html_escape(text)),
		}
	}
}

impl From<Element> for Node {
	fn from(element: Element) -> Self {
		Node::Element(element)
	}
}

impl From<String> for Node {
	fn from(text: String) -> Self {
		Node::Text(text)
	}
}

impl From<&str> for Node {
	fn from(text: &str) -> Self {
		Node::Text(text.to_string())
	}
}

/// A tagged element with ordered attributes and children.
///
/// Attributes keep insertion order so repeated renders of the same tree are
/// byte-identical.
///
/// # Examples
///
/// ```
/// use formwork::markup::Element;
///
/// let html = Element::new("div")
/// 	.attr("class", "greeting")
/// 	.child("hello")
/// 	.render_to_string();
/// assert_eq!(html, "<div class=\"greeting\">hello</div>");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
	tag: String,
	attrs: Vec<(String, String)>,
	children: Vec<Node>,
}

impl Element {
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attrs: vec![],
			children: vec![],
		}
	}

	/// Appends an attribute. A repeated name replaces the earlier value in
	/// place, keeping its original position.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		let name = name.into();
		let value = value.into();
		match self.attrs.iter_mut().find(|(existing, _)| *existing == name) {
			Some(slot) => slot.1 = value,
			None => self.attrs.push((name, value)),
		}
		self
	}

	/// Appends a child node.
	pub fn child(mut self, child: impl Into<Node>) -> Self {
		self.children.push(child.into());
		self
	}

	/// Appends every node in the iterator as a child.
	pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
		self.children.extend(nodes);
		self
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn render_to_string(&self) -> String {
		let mut out = String::new();
		self.render_to(&mut out);
		out
	}

	fn render_to(&self, out: &mut String) {
		out.push('<');
		out.push_str(&self.tag);
		for (name, value) in &self.attrs {
			out.push(' ');
			out.push_str(name);
			out.push_str("=\"");
			out.push_str(&html_escape(value));
			out.push('"');
		}
		if VOID_ELEMENTS.contains(&self.tag.as_str()) {
			out.push_str(" />");
			return;
		}
		out.push('>');
		for child in &self.children {
			child.render_to(out);
		}
		out.push_str("</");
		out.push_str(&self.tag);
		out.push('>');
	}
}

/// Escapes text for safe embedding in HTML content and attribute values.
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}
