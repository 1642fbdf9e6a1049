//! Configuration management for the TodoMVC server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file is read by the binary before this runs.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Page shell configuration
    pub page: PageSettings,
    /// Live session configuration
    pub live: LiveSettings,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Page shell configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSettings {
    /// Document title
    pub title: String,
    /// Appended to the title
    pub title_suffix: String,
}

/// Live session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSettings {
    /// Install the Prometheus recorder and serve `/metrics`
    pub metrics_enabled: bool,
    /// Session count above which readiness reports degraded
    pub max_sessions_soft_limit: usize,
    /// Session count at which readiness fails; unlimited when unset
    pub max_sessions_hard_limit: Option<usize>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse(&lookup, "PORT").unwrap_or(4001),
                log_level: lookup("RUST_LOG").unwrap_or_else(|| "info,todomvc=debug".to_string()),
                shutdown_timeout: parse(&lookup, "SHUTDOWN_TIMEOUT").unwrap_or(30),
            },
            page: PageSettings {
                title: lookup("PAGE_TITLE").unwrap_or_else(|| "TodoMVC".to_string()),
                title_suffix: lookup("PAGE_TITLE_SUFFIX")
                    .unwrap_or_else(|| " · LiveView".to_string()),
            },
            live: LiveSettings {
                metrics_enabled: lookup("METRICS_ENABLED")
                    .and_then(|s| parse_bool(&s))
                    .unwrap_or(true),
                max_sessions_soft_limit: parse(&lookup, "MAX_SESSIONS_SOFT_LIMIT").unwrap_or(1000),
                max_sessions_hard_limit: parse(&lookup, "MAX_SESSIONS_HARD_LIMIT"),
            },
        }
    }

    /// Address to bind, as `host:port`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Graceful shutdown timeout
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
