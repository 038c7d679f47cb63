//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (CONCIERGE__*)
//! 2. Configuration file (TOML)
//! 3. Default values
//!
//! Validation is deliberately fatal: a process with an empty or malformed
//! policy table must refuse to begin serving rather than run under a
//! default-allow policy.

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "concierge.toml",
    ".concierge.toml",
    "~/.config/concierge/config.toml",
    "/etc/concierge/config.toml",
];

/// Load configuration from a TOML string (useful for testing)
///
/// Skips the session-endpoint requirement so tests can run against an
/// in-process verifier; the policy tables themselves are still validated.
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config_relaxed(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Defaults are handled by serde defaults on AppConfig

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with CONCIERGE_ prefix
    // e.g., CONCIERGE__SERVER__PORT, CONCIERGE__SESSION__ENDPOINT
    // Double underscore (__) maps to nested keys (server.port)
    builder = builder.add_source(
        Environment::with_prefix("CONCIERGE")
            .separator("__")
            .try_parsing(true),
    );

    // 4. SESSION_STORE_URL is the conventional way to point at the
    // session-verification endpoint
    if let Ok(url) = std::env::var("SESSION_STORE_URL") {
        builder = builder
            .set_override("session.endpoint", url)
            .map_err(|e| ConfigError::Load(e.to_string()))?;
    }

    // Build and deserialize
    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_config_relaxed(config)?;

    // A gate without a session store can never authenticate anyone
    match &config.session.endpoint {
        Some(endpoint)
            if endpoint.starts_with("http://") || endpoint.starts_with("https://") => {}
        Some(endpoint) => {
            return Err(ConfigError::Invalid {
                message: format!(
                    "session.endpoint must start with http:// or https://, got: {}",
                    endpoint
                ),
            });
        }
        None => {
            return Err(ConfigError::Missing {
                field: "session.endpoint (set SESSION_STORE_URL environment variable)".to_string(),
            });
        }
    }

    Ok(())
}

/// Validate configuration values (relaxed - for testing without a session store)
fn validate_config_relaxed(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::Invalid {
            message: "server.port must be greater than 0".to_string(),
        });
    }

    if config.session.timeout_ms == 0 {
        return Err(ConfigError::Invalid {
            message: "session.timeout_ms must be greater than 0".to_string(),
        });
    }

    // Serving with empty tables would mean every page navigation denies
    // and every API call fails closed; refuse to start instead.
    if config.gate.routes.is_empty() {
        return Err(ConfigError::Missing {
            field: "gate.routes".to_string(),
        });
    }

    if config.gate.actions.is_empty() {
        return Err(ConfigError::Missing {
            field: "gate.actions".to_string(),
        });
    }

    for route in &config.gate.routes {
        if !route.prefix.starts_with('/') {
            return Err(ConfigError::Invalid {
                message: format!("route prefix '{}' must start with '/'", route.prefix),
            });
        }
        if route.roles.is_empty() {
            return Err(ConfigError::Invalid {
                message: format!("route entry '{}' has an empty role set", route.prefix),
            });
        }
    }

    for path in config
        .gate
        .public_routes
        .iter()
        .chain([&config.gate.landing, &config.gate.not_found, &config.gate.api_prefix])
    {
        if !path.starts_with('/') {
            return Err(ConfigError::Invalid {
                message: format!("gate path '{}' must start with '/'", path),
            });
        }
    }

    validate_patterns(&config.gate.exclude, "gate.exclude")?;

    Ok(())
}

/// Validate that all patterns are valid regex
fn validate_patterns(patterns: &[String], field_path: &str) -> Result<(), ConfigError> {
    for pattern in patterns {
        if let Err(e) = regex::Regex::new(pattern) {
            return Err(ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                reason: format!("in {}: {}", field_path, e),
            });
        }
    }
    Ok(())
}
