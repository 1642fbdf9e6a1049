//! Render tree.
//!
//! Components describe their UI as a tree of [`Node`]s instead of building
//! markup strings. Trees compare structurally, serialise to HTML for the
//! initial page load, and feed the differ for live updates.
//!
//! Two invariants keep child indices aligned with the browser's DOM so patch
//! paths stay valid after parsing:
//!
//! - adjacent text children are merged into one text node
//! - empty text children are never stored

use std::fmt::Write as _;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A node in the render tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// An element with tag, attributes and children
    Element(Element),
    /// A text node (escaped on output)
    Text(String),
}

/// An element node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Tag name
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attributes in insertion order
    #[must_use]
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Value of a single attribute
    #[must_use]
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child nodes
    #[must_use]
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Sets an attribute, replacing an existing value of the same name.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name.into(), value.into());
        self
    }

    /// Sets an attribute only when `condition` holds.
    #[must_use]
    pub fn attr_if(self, condition: bool, name: impl Into<String>, value: impl Into<String>) -> Self {
        if condition { self.attr(name, value) } else { self }
    }

    /// Shorthand for the `class` attribute.
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Shorthand for the `id` attribute.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Appends a child node.
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.push(child.into());
        self
    }

    /// Appends a child only when `condition` holds.
    #[must_use]
    pub fn child_if(self, condition: bool, child: impl FnOnce() -> Node) -> Self {
        if condition { self.child(child()) } else { self }
    }

    /// Appends several children.
    #[must_use]
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        for child in children {
            self.push(child.into());
        }
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub(crate) fn set_attr(&mut self, name: String, value: String) {
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    pub(crate) fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| n != name);
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub(crate) fn push(&mut self, node: Node) {
        match node {
            Node::Text(text) if text.is_empty() => {}
            Node::Text(text) => {
                if let Some(Node::Text(last)) = self.children.last_mut() {
                    last.push_str(&text);
                } else {
                    self.children.push(Node::Text(text));
                }
            }
            element @ Node::Element(_) => self.children.push(element),
        }
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
        }
        out.push('>');
        if self.is_void() {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl Node {
    /// Creates a text node
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Concatenated text of this node and all descendants
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serialise to HTML with text and attribute escaping.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub(crate) fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape_text(text)),
            Self::Element(element) => element.write_html(out),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_html() {
        let node: Node = Element::new("ul")
            .class("filters")
            .child(Element::new("li").child(Element::new("a").attr("href", "?filter=all").text("All")))
            .into();

        assert_eq!(
            node.to_html(),
            r#"<ul class="filters"><li><a href="?filter=all">All</a></li></ul>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let node: Node = Element::new("input").attr("type", "checkbox").into();
        assert_eq!(node.to_html(), r#"<input type="checkbox">"#);
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node: Node = Element::new("label")
            .attr("title", r#"say "hi" & <bye>"#)
            .text("<script>alert(1)</script>")
            .into();

        assert_eq!(
            node.to_html(),
            "<label title=\"say &quot;hi&quot; &amp; &lt;bye&gt;\">&lt;script&gt;alert(1)&lt;/script&gt;</label>"
        );
    }

    #[test]
    fn attr_replaces_existing_value() {
        let element = Element::new("li").class("a").class("b");
        assert_eq!(element.attrs().len(), 1);
        assert_eq!(element.attr_value("class"), Some("b"));
    }

    #[test]
    fn adjacent_text_is_merged_and_empty_text_dropped() {
        let element = Element::new("span")
            .text("3")
            .text("")
            .text(" items")
            .child(Element::new("b"))
            .text("");

        assert_eq!(element.child_nodes().len(), 2);
        assert_eq!(element.child_nodes()[0], Node::text("3 items"));
    }

    #[test]
    fn conditional_builders() {
        let element = Element::new("li")
            .attr_if(false, "class", "completed")
            .child_if(true, || Node::text("x"))
            .child_if(false, || Node::text("y"));

        assert_eq!(element.attr_value("class"), None);
        assert_eq!(Node::from(element).text_content(), "x");
    }
}
