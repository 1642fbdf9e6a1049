//! Shared state for the live router.
//!
//! One [`LiveState`] serves one component: every request and every socket
//! gets a clone holding the same component, hub, and page configuration.

use liveview_core::{Node, component::LiveComponent};
use liveview_runtime::{LiveHub, metrics::PrometheusMetrics};
use std::sync::Arc;

/// Static configuration for the HTML page shell and routes.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Path serving the static render, e.g. `/todos`
    pub live_path: String,
    /// Path accepting the WebSocket upgrade
    pub socket_path: String,
    /// Document title
    pub title: String,
    /// Appended to the title, e.g. `" · LiveView"`
    pub title_suffix: String,
    /// Stylesheet URLs, linked in order
    pub stylesheets: Vec<String>,
    /// Markup placed after the live root, outside live updates
    pub footer: Option<Node>,
}

impl PageConfig {
    /// Configuration for a component served at `live_path`.
    ///
    /// The socket path defaults to `{live_path}/live`.
    #[must_use]
    pub fn new(live_path: impl Into<String>) -> Self {
        let live_path = live_path.into();
        let socket_path = format!("{}/live", live_path.trim_end_matches('/'));
        Self {
            live_path,
            socket_path,
            title: String::from("LiveView"),
            title_suffix: String::new(),
            stylesheets: Vec::new(),
            footer: None,
        }
    }

    /// Set the document title and suffix
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.title = title.into();
        self.title_suffix = suffix.into();
        self
    }

    /// Link a stylesheet
    #[must_use]
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheets.push(href.into());
        self
    }

    /// Place static markup after the live root
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<Node>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Full document title
    #[must_use]
    pub fn full_title(&self) -> String {
        format!("{}{}", self.title, self.title_suffix)
    }
}

/// State shared by all handlers of one live component.
pub struct LiveState<C: LiveComponent> {
    /// The component every session mounts
    pub component: Arc<C>,
    /// Change notifications and session accounting
    pub hub: LiveHub,
    /// Page shell and route configuration
    pub page: Arc<PageConfig>,
    /// Installed Prometheus recorder, if metrics are enabled
    pub metrics: Option<PrometheusMetrics>,
}

impl<C: LiveComponent> LiveState<C> {
    /// State with a default hub and no metrics recorder
    #[must_use]
    pub fn new(component: C, page: PageConfig) -> Self {
        Self {
            component: Arc::new(component),
            hub: LiveHub::default(),
            page: Arc::new(page),
            metrics: None,
        }
    }

    /// Replace the hub, e.g. to set its soft session limit
    #[must_use]
    pub fn with_hub(mut self, hub: LiveHub) -> Self {
        self.hub = hub;
        self
    }

    /// Expose an installed recorder on `/metrics`
    #[must_use]
    pub fn with_metrics(mut self, metrics: PrometheusMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

// Manual impl: the component itself need not be Clone
impl<C: LiveComponent> Clone for LiveState<C> {
    fn clone(&self) -> Self {
        Self {
            component: Arc::clone(&self.component),
            hub: self.hub.clone(),
            page: Arc::clone(&self.page),
            metrics: self.metrics.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_path_follows_live_path() {
        assert_eq!(PageConfig::new("/todos").socket_path, "/todos/live");
        assert_eq!(PageConfig::new("/todos/").socket_path, "/todos/live");
    }

    #[test]
    fn full_title_appends_suffix() {
        let page = PageConfig::new("/todos").with_title("TodoMVC", " · LiveView");
        assert_eq!(page.full_title(), "TodoMVC · LiveView");
    }
}
