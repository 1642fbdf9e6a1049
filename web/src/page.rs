//! HTML page shell around a live component.
//!
//! The component's static render goes inside a `data-live-root` container;
//! the client script finds that container, reads the socket path from it and
//! takes over.

use crate::state::PageConfig;
use liveview_core::{Element, Node};

/// Marker attribute on the element the client script manages
pub const ROOT_ATTR: &str = "data-live-root";

/// Attribute carrying the WebSocket path
pub const SOCKET_ATTR: &str = "data-live-socket";

/// Path the client script is served from
pub const CLIENT_SCRIPT_PATH: &str = "/live.js";

/// Wrap `content` in a complete HTML document.
#[must_use]
pub fn render_page(config: &PageConfig, content: &Node) -> String {
    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::new("title").text(config.full_title()))
        .children(
            config
                .stylesheets
                .iter()
                .map(|href| Element::new("link").attr("rel", "stylesheet").attr("href", href.as_str())),
        )
        .child(
            Element::new("script")
                .attr("defer", "")
                .attr("src", CLIENT_SCRIPT_PATH),
        );

    let root = Element::new("div")
        .attr(ROOT_ATTR, "")
        .attr(SOCKET_ATTR, config.socket_path.as_str())
        .child(content.clone());

    let mut body = Element::new("body").child(root);
    if let Some(footer) = &config.footer {
        body = body.child(footer.clone());
    }

    let document: Node = Element::new("html")
        .attr("lang", "en")
        .child(head)
        .child(body)
        .into();

    format!("<!DOCTYPE html>\n{}", document.to_html())
}
