//! Configuration types for concierge
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::access::Role;
use serde::Deserialize;
use std::collections::HashMap;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Session verification settings
    pub session: SessionConfig,

    /// Policy gate tables
    pub gate: GateConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8990,
        }
    }
}

/// Session verification configuration
///
/// The session token is issued by an external authentication provider;
/// concierge only presents it to the session store for verification.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the session cookie
    pub cookie_name: String,

    /// Session store verification endpoint (prefer env var SESSION_STORE_URL)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bound on the one suspension point in the request path.
    /// On timeout the session is treated as absent, never retried.
    pub timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session_token".to_string(),
            endpoint: None,
            timeout_ms: 800,
        }
    }
}

/// Policy gate configuration
///
/// Both tables are data, not behavior: they are compiled into an immutable
/// [`PolicyGate`](crate::access::PolicyGate) at startup and never mutated
/// at runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Default landing page for authenticated callers
    pub landing: String,

    /// Generic not-found page used as the deny target
    pub not_found: String,

    /// Unauthenticated-entry routes (exact match)
    pub public_routes: Vec<String>,

    /// Prefix under which API paths live
    pub api_prefix: String,

    /// API qualifier for the file-serving namespace (unconditionally open;
    /// the file endpoint re-verifies authorization itself)
    pub files_qualifier: String,

    /// API qualifier for the mobile-client namespace (employee-only)
    pub mobile_qualifier: String,

    /// Regex patterns for paths that never enter the gate
    pub exclude: Vec<String>,

    /// Ordered page-route policy entries; first matching prefix wins
    pub routes: Vec<RouteEntryConfig>,

    /// API action policy: qualifier → action → allowed roles
    pub actions: HashMap<String, HashMap<String, Vec<Role>>>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            landing: "/dashboard".to_string(),
            not_found: "/404".to_string(),
            public_routes: vec![
                "/login".to_string(),
                "/forgot-password".to_string(),
                "/reset-password".to_string(),
            ],
            api_prefix: "/api".to_string(),
            files_qualifier: "files".to_string(),
            mobile_qualifier: "mobile".to_string(),
            exclude: default_exclusions(),
            // Empty tables fail strict validation: the process must not
            // serve under a default policy.
            routes: Vec::new(),
            actions: HashMap::new(),
        }
    }
}

/// One page-route policy entry as configured
#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntryConfig {
    /// Path prefix this entry guards
    pub prefix: String,

    /// Roles allowed to navigate under the prefix
    pub roles: Vec<Role>,

    /// Whether downstream chrome lists this entry in the navigation
    #[serde(default = "default_show_in_nav")]
    pub show_in_nav: bool,

    /// Display title for navigation rendering
    #[serde(default)]
    pub title: String,
}

fn default_show_in_nav() -> bool {
    true
}

/// Default exclusion patterns: static assets, public error pages, the
/// auth/session endpoints themselves, and the public validation and
/// password-recovery API endpoints.
pub fn default_exclusions() -> Vec<String> {
    [
        r"^/static/",
        r"^/img/",
        r"^/favicon\.ico$",
        r"^/(404|403|500)$",
        r"^/logout$",
        r"^/api/auth/",
        r"^/api/validation/",
        r"^/api/security/(forgot|reset)-password$",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
