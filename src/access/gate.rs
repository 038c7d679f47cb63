//! Access policy gate
//!
//! The single decision point every guarded request passes through.
//! [`PolicyGate::decide`] is a pure function of the request path, the
//! policy tables compiled at startup, and the caller's decoded session;
//! it holds no per-request state and is safe to evaluate on arbitrarily
//! many requests concurrently.

use crate::access::policy::{ActionPolicyTable, RouteEntry, RoutePolicy};
use crate::access::types::{Decision, Role, RoleSet, Session};
use crate::config::GateConfig;
use crate::error::ConfigError;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Why a request ended in the default-deny branch.
///
/// The user-visible outcome is identical for all three (a generic
/// not-found redirect, deliberately not confirming resource existence),
/// but the flavors carry distinct log signals for security auditing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DenyKind {
    /// No session at all
    Unauthenticated,
    /// Valid session, role not in the matching entry's set
    RoleExcluded,
    /// No policy entry matched the path or action at all
    NoPolicyEntry,
}

impl DenyKind {
    const fn as_str(&self) -> &'static str {
        match self {
            DenyKind::Unauthenticated => "unauthenticated",
            DenyKind::RoleExcluded => "role_excluded",
            DenyKind::NoPolicyEntry => "no_policy_entry",
        }
    }
}

/// Route-authorization policy gate.
///
/// Compiled once from [`GateConfig`] at startup; immutable afterwards.
/// Evaluation order (a reordering here is an authorization regression):
///
/// 1. Public-route short-circuit (login and password-recovery screens)
/// 2. Root convenience redirect to the landing page
/// 3. API paths: files namespace open, mobile namespace employee-only,
///    everything else through the action policy table
/// 4. Page paths through the ordered route policy table, first match wins
/// 5. Default deny: redirect to the not-found page
#[derive(Debug)]
pub struct PolicyGate {
    public_routes: Vec<String>,
    landing: String,
    not_found: String,
    api_prefix: String,
    files_qualifier: String,
    mobile_qualifier: String,
    routes: RoutePolicy,
    actions: ActionPolicyTable,
}

impl PolicyGate {
    /// Compile the gate from configuration
    pub fn new(config: &GateConfig) -> Result<Self, ConfigError> {
        let entries = config
            .routes
            .iter()
            .map(|route| RouteEntry {
                prefix: route.prefix.clone(),
                roles: RoleSet::new(route.roles.clone()),
                show_in_nav: route.show_in_nav,
                title: route.title.clone(),
            })
            .collect();

        let mut actions = HashMap::new();
        for (qualifier, table) in &config.actions {
            let compiled: HashMap<String, RoleSet> = table
                .iter()
                .map(|(action, roles)| (action.clone(), RoleSet::new(roles.clone())))
                .collect();
            actions.insert(qualifier.clone(), compiled);
        }

        Ok(Self {
            public_routes: config.public_routes.clone(),
            landing: config.landing.clone(),
            not_found: config.not_found.clone(),
            api_prefix: config.api_prefix.clone(),
            files_qualifier: config.files_qualifier.clone(),
            mobile_qualifier: config.mobile_qualifier.clone(),
            routes: RoutePolicy::new(entries)?,
            actions: ActionPolicyTable::new(actions),
        })
    }

    /// Compute the authorization decision for one request.
    ///
    /// Never returns an error and never panics: a denied request is an
    /// ordinary return value, and an absent session is a normal input.
    pub fn decide(&self, path: &str, session: Option<&Session>) -> Decision {
        let role = session.map(|s| s.role);
        debug!(path, role = ?role, "Evaluating gate");

        // 1. Public entry routes: send authenticated callers away from the
        // auth screens, let everyone else reach them.
        if self.public_routes.iter().any(|route| route == path) {
            trace!("Matched public route");
            return if session.is_some() {
                Decision::Redirect(self.landing.clone())
            } else {
                Decision::Allow
            };
        }

        // 2. Root is a pure convenience redirect, not a security decision
        if path == "/" {
            trace!("Root redirect");
            return Decision::Redirect(self.landing.clone());
        }

        // 3. API paths
        if let Some((qualifier, action)) = self.api_segments(path) {
            if qualifier == self.files_qualifier {
                // File access control is re-verified by the file endpoint
                // itself; the gate performs no filtering here.
                trace!("File-serving namespace, passing through");
                return Decision::Allow;
            }

            if qualifier == self.mobile_qualifier {
                // API callers get a status code, not a navigation
                return if role == Some(Role::Employee) {
                    Decision::Allow
                } else {
                    debug!(path, role = ?role, "Denying mobile API call");
                    Decision::Forbidden
                };
            }

            let allowed = self.actions.allowed_roles(qualifier, action);
            if allowed.permits(role) {
                trace!(qualifier, action, "Matched action policy entry");
                return Decision::Allow;
            }

            let kind = self.deny_kind(role, allowed.is_empty());
            return self.default_deny(path, kind);
        }

        // 4. Page paths: first matching prefix wins
        if let Some(entry) = self.routes.find(path) {
            if entry.roles.permits(role) {
                trace!(prefix = %entry.prefix, "Matched route policy entry");
                return Decision::Allow;
            }
            let kind = self.deny_kind(role, false);
            return self.default_deny(path, kind);
        }

        // 5. Fail-closed terminal branch
        self.default_deny(path, self.deny_kind(role, true))
    }

    /// Route entries to render in the navigation for a role, in table order
    pub fn nav_entries(&self, role: Role) -> Vec<&RouteEntry> {
        self.routes.nav_entries(role).collect()
    }

    /// Split an API path into its qualifier and action segments.
    ///
    /// Returns `None` for non-API paths. Missing segments come back as
    /// empty strings, which can never match a policy entry.
    fn api_segments<'a>(&self, path: &'a str) -> Option<(&'a str, &'a str)> {
        let rest = path.strip_prefix(self.api_prefix.as_str())?;
        if !rest.is_empty() && !rest.starts_with('/') {
            // e.g. "/apitools" is not under "/api"
            return None;
        }

        let mut segments = rest.split('/').filter(|s| !s.is_empty());
        Some((
            segments.next().unwrap_or(""),
            segments.next().unwrap_or(""),
        ))
    }

    fn deny_kind(&self, role: Option<Role>, no_entry: bool) -> DenyKind {
        if role.is_none() {
            DenyKind::Unauthenticated
        } else if no_entry {
            DenyKind::NoPolicyEntry
        } else {
            DenyKind::RoleExcluded
        }
    }

    fn default_deny(&self, path: &str, kind: DenyKind) -> Decision {
        debug!(path, kind = kind.as_str(), "Denying request");
        Decision::Redirect(self.not_found.clone())
    }
}
