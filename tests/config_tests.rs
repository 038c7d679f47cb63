//! Configuration loading tests

use concierge::access::Role;
use concierge::config::{LogFormat, load_config_from_str};

const MINIMAL_CONFIG: &str = r#"
[[gate.routes]]
prefix = "/dashboard"
roles = ["platform_admin"]

[gate.actions.employees]
update = ["customer_admin"]
"#;

const FULL_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 9000

[session]
cookie_name = "portal_session"
endpoint = "https://session.internal/verify"
timeout_ms = 500

[logging]
level = "debug"
format = "json"

[gate]
landing = "/home"
not_found = "/missing"
public_routes = ["/login", "/forgot-password"]
api_prefix = "/api"
files_qualifier = "files"
mobile_qualifier = "mobile"
exclude = ["^/assets/", "^/healthz$"]

[[gate.routes]]
prefix = "/home"
roles = ["platform_admin", "customer_admin", "partner_admin"]
title = "Home"

[[gate.routes]]
prefix = "/contracts"
roles = ["platform_admin"]
show_in_nav = false
title = "Contracts"

[gate.actions.employees]
create = ["customer_admin"]
update = ["platform_admin", "customer_admin"]

[gate.actions.publications]
create = ["platform_admin", "customer_admin"]
"#;

#[test]
fn test_minimal_config_uses_defaults() {
    let config = load_config_from_str(MINIMAL_CONFIG).unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8990);
    assert_eq!(config.session.cookie_name, "session_token");
    assert_eq!(config.session.timeout_ms, 800);
    assert_eq!(config.gate.landing, "/dashboard");
    assert_eq!(config.gate.not_found, "/404");
    assert_eq!(config.gate.api_prefix, "/api");
    assert_eq!(config.logging.format, LogFormat::Pretty);

    // Default exclusions apply when none are configured
    assert!(
        config
            .gate
            .exclude
            .iter()
            .any(|p| p.contains("/static/"))
    );
}

#[test]
fn test_full_config_overrides_everything() {
    let config = load_config_from_str(FULL_CONFIG).unwrap();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.session.cookie_name, "portal_session");
    assert_eq!(
        config.session.endpoint.as_deref(),
        Some("https://session.internal/verify")
    );
    assert_eq!(config.session.timeout_ms, 500);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);

    assert_eq!(config.gate.landing, "/home");
    assert_eq!(config.gate.not_found, "/missing");
    assert_eq!(config.gate.public_routes.len(), 2);
    assert_eq!(config.gate.exclude, vec!["^/assets/", "^/healthz$"]);

    assert_eq!(config.gate.routes.len(), 2);
    assert_eq!(config.gate.routes[0].prefix, "/home");
    assert!(config.gate.routes[0].show_in_nav);
    assert!(!config.gate.routes[1].show_in_nav);

    assert_eq!(
        config.gate.actions["employees"]["update"],
        vec![Role::PlatformAdmin, Role::CustomerAdmin]
    );
    assert_eq!(config.gate.actions.len(), 2);
}

#[test]
fn test_route_order_is_preserved() {
    let toml = r#"
[[gate.routes]]
prefix = "/offers/archive"
roles = ["platform_admin"]

[[gate.routes]]
prefix = "/offers"
roles = ["platform_admin"]

[[gate.routes]]
prefix = "/contracts"
roles = ["platform_admin"]

[gate.actions.offers]
create = ["platform_admin"]
"#;

    let config = load_config_from_str(toml).unwrap();
    let prefixes: Vec<_> = config.gate.routes.iter().map(|r| r.prefix.as_str()).collect();
    assert_eq!(prefixes, vec!["/offers/archive", "/offers", "/contracts"]);
}

#[test]
fn test_missing_tables_are_fatal() {
    assert!(load_config_from_str("").is_err());
    assert!(
        load_config_from_str(
            r#"
[[gate.routes]]
prefix = "/dashboard"
roles = ["platform_admin"]
"#
        )
        .is_err()
    );
}

#[test]
fn test_malformed_toml_is_fatal() {
    let result = load_config_from_str("[[gate.routes");
    assert!(result.is_err());
}

#[test]
fn test_load_config_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[session]
endpoint = "https://session.internal/verify"

[[gate.routes]]
prefix = "/dashboard"
roles = ["platform_admin"]

[gate.actions.employees]
update = ["customer_admin"]
"#
    )
    .unwrap();

    let config = concierge::load_config(Some(file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.gate.routes[0].prefix, "/dashboard");
    assert_eq!(
        config.session.endpoint.as_deref(),
        Some("https://session.internal/verify")
    );
}

#[test]
fn test_missing_config_file_is_fatal() {
    let result = concierge::load_config(Some("/nonexistent/concierge.toml"));
    assert!(result.is_err());
}

#[test]
fn test_unknown_role_is_fatal() {
    let toml = r#"
[[gate.routes]]
prefix = "/dashboard"
roles = ["root"]

[gate.actions.employees]
update = ["customer_admin"]
"#;
    assert!(load_config_from_str(toml).is_err());
}
