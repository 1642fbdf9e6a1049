//! Render tree diffing.
//!
//! [`diff`] compares two trees and produces the patches that turn the old one
//! into the new one. Patches address nodes by child-index path from the root
//! (`[]` is the root itself), which lines up with the DOM because of the text
//! invariants kept by [`crate::render`].
//!
//! The algorithm is positional: same tag ⇒ diff attributes and children in
//! place, anything else ⇒ replace. Extra new children are appended, surplus
//! old children truncated.

use crate::render::{Element, Node};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// A single change between two render trees.
///
/// Serialises to JSON tagged by `op`; node payloads are sent as HTML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    /// Replace the node at `path`
    Replace {
        /// Target node
        path: Vec<usize>,
        /// New node
        #[serde(rename = "html", serialize_with = "node_as_html")]
        node: Node,
    },
    /// Set (add or change) an attribute
    SetAttr {
        /// Target element
        path: Vec<usize>,
        /// Attribute name
        name: String,
        /// New value
        value: String,
    },
    /// Remove an attribute
    RemoveAttr {
        /// Target element
        path: Vec<usize>,
        /// Attribute name
        name: String,
    },
    /// Change the contents of a text node
    SetText {
        /// Target text node
        path: Vec<usize>,
        /// New text
        text: String,
    },
    /// Append children to an element
    Append {
        /// Target element
        path: Vec<usize>,
        /// Nodes to append, in order
        #[serde(rename = "html", serialize_with = "nodes_as_html")]
        nodes: Vec<Node>,
    },
    /// Remove all children at index `len` and beyond
    Truncate {
        /// Target element
        path: Vec<usize>,
        /// Number of children to keep
        len: usize,
    },
}

/// Errors raised when applying patches to a tree that does not match them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// The path does not lead to a node
    #[error("No node at path {0:?}")]
    InvalidPath(Vec<usize>),

    /// The patch needs an element but the path leads to text (or vice versa)
    #[error("Node at path {0:?} has the wrong kind for this patch")]
    WrongKind(Vec<usize>),
}

/// Compute the patches that turn `old` into `new`.
#[must_use]
pub fn diff(old: &Node, new: &Node) -> Vec<Patch> {
    let mut patches = Vec::new();
    let mut path = Vec::new();
    diff_node(old, new, &mut path, &mut patches);
    patches
}

fn diff_node(old: &Node, new: &Node, path: &mut Vec<usize>, out: &mut Vec<Patch>) {
    match (old, new) {
        (Node::Text(a), Node::Text(b)) => {
            if a != b {
                out.push(Patch::SetText {
                    path: path.clone(),
                    text: b.clone(),
                });
            }
        }
        (Node::Element(a), Node::Element(b)) if a.tag() == b.tag() => {
            diff_attrs(a, b, path, out);
            diff_children(a.child_nodes(), b.child_nodes(), path, out);
        }
        _ => out.push(Patch::Replace {
            path: path.clone(),
            node: new.clone(),
        }),
    }
}

fn diff_attrs(old: &Element, new: &Element, path: &[usize], out: &mut Vec<Patch>) {
    for (name, value) in new.attrs() {
        if old.attr_value(name) != Some(value.as_str()) {
            out.push(Patch::SetAttr {
                path: path.to_vec(),
                name: name.clone(),
                value: value.clone(),
            });
        }
    }
    for (name, _) in old.attrs() {
        if new.attr_value(name).is_none() {
            out.push(Patch::RemoveAttr {
                path: path.to_vec(),
                name: name.clone(),
            });
        }
    }
}

fn diff_children(old: &[Node], new: &[Node], path: &mut Vec<usize>, out: &mut Vec<Patch>) {
    let common = old.len().min(new.len());
    for (index, (a, b)) in old.iter().zip(new.iter()).enumerate() {
        path.push(index);
        diff_node(a, b, path, out);
        path.pop();
    }
    if new.len() > common {
        out.push(Patch::Append {
            path: path.clone(),
            nodes: new[common..].to_vec(),
        });
    } else if old.len() > common {
        out.push(Patch::Truncate {
            path: path.clone(),
            len: common,
        });
    }
}

/// Apply patches to a tree in order.
///
/// # Errors
///
/// Returns an [`ApplyError`] if a patch does not fit the tree.
pub fn apply(root: &mut Node, patches: &[Patch]) -> Result<(), ApplyError> {
    for patch in patches {
        match patch {
            Patch::Replace { path, node } => {
                *locate(root, path)? = node.clone();
            }
            Patch::SetAttr { path, name, value } => {
                element_at(root, path)?.set_attr(name.clone(), value.clone());
            }
            Patch::RemoveAttr { path, name } => {
                element_at(root, path)?.remove_attr(name);
            }
            Patch::SetText { path, text } => match locate(root, path)? {
                Node::Text(current) => current.clone_from(text),
                Node::Element(_) => return Err(ApplyError::WrongKind(path.clone())),
            },
            Patch::Append { path, nodes } => {
                let element = element_at(root, path)?;
                for node in nodes {
                    element.push(node.clone());
                }
            }
            Patch::Truncate { path, len } => {
                element_at(root, path)?.children_mut().truncate(*len);
            }
        }
    }
    Ok(())
}

fn locate<'a>(root: &'a mut Node, path: &[usize]) -> Result<&'a mut Node, ApplyError> {
    let mut node = root;
    for &index in path {
        node = match node {
            Node::Element(element) => element
                .children_mut()
                .get_mut(index)
                .ok_or_else(|| ApplyError::InvalidPath(path.to_vec()))?,
            Node::Text(_) => return Err(ApplyError::InvalidPath(path.to_vec())),
        };
    }
    Ok(node)
}

fn element_at<'a>(root: &'a mut Node, path: &[usize]) -> Result<&'a mut Element, ApplyError> {
    match locate(root, path)? {
        Node::Element(element) => Ok(element),
        Node::Text(_) => Err(ApplyError::WrongKind(path.to_vec())),
    }
}

fn node_as_html<S: Serializer>(node: &Node, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&node.to_html())
}

fn nodes_as_html<S: Serializer>(nodes: &[Node], serializer: S) -> Result<S::Ok, S::Error> {
    let mut html = String::new();
    for node in nodes {
        node.write_html(&mut html);
    }
    serializer.serialize_str(&html)
}
