//! # LiveView Testing
//!
//! Testing utilities and helpers for live components.
//!
//! This crate provides:
//! - `ComponentTest`: Given-When-Then harness for component lifecycles
//! - Render tree queries for asserting on structure instead of markup
//!
//! ## Example
//!
//! ```ignore
//! use liveview_testing::{ComponentTest, query};
//!
//! ComponentTest::new(TodosComponent::new(store))
//!     .when_event(TodoEvent::AddTodo { text: "Buy milk".into() })
//!     .then_render(|tree| {
//!         let count = query::find_by_class(tree, "todo-count").unwrap();
//!         assert_eq!(query::text(count), "1 item left");
//!     })
//!     .run();
//! ```


pub use component_test::ComponentTest;

/// Render tree queries
///
/// Lookups by `id`, class and tag, returning elements in document order.
pub mod query {
    use liveview_core::{Element, Node};

    /// Returns `true` if the element's `class` attribute contains `class`
    #[must_use]
    pub fn has_class(element: &Element, class: &str) -> bool {
        element
            .attr_value("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// All elements (including `root`) matching `predicate`, in document order
    pub fn find_all<'a>(root: &'a Node, predicate: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect(root, predicate, &mut found);
        found
    }

    fn collect<'a>(node: &'a Node, predicate: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if let Node::Element(element) = node {
            if predicate(element) {
                found.push(element);
            }
            for child in element.child_nodes() {
                collect(child, predicate, found);
            }
        }
    }

    /// First element with the given `id`
    #[must_use]
    pub fn find_by_id<'a>(root: &'a Node, id: &str) -> Option<&'a Element> {
        find_all(root, &|e: &Element| e.attr_value("id") == Some(id)).into_iter().next()
    }

    /// First element carrying `class`
    #[must_use]
    pub fn find_by_class<'a>(root: &'a Node, class: &str) -> Option<&'a Element> {
        find_all_by_class(root, class).into_iter().next()
    }

    /// All elements carrying `class`
    #[must_use]
    pub fn find_all_by_class<'a>(root: &'a Node, class: &str) -> Vec<&'a Element> {
        find_all(root, &|e: &Element| has_class(e, class))
    }

    /// All elements with tag `tag`
    #[must_use]
    pub fn find_all_by_tag<'a>(root: &'a Node, tag: &str) -> Vec<&'a Element> {
        find_all(root, &|e: &Element| e.tag() == tag)
    }

    /// Text content of an element
    #[must_use]
    pub fn text(element: &Element) -> String {
        element.child_nodes().iter().map(Node::text_content).collect()
    }
}
