//! Access control types
//!
//! Core types used by the policy gate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity class of an authenticated caller, the unit of authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform-wide administrator (the operator of the portal itself)
    PlatformAdmin,
    /// Administrator scoped to a single customer tenant
    CustomerAdmin,
    /// Administrator scoped to a partner organization
    PartnerAdmin,
    /// End employee of a customer
    Employee,
}

impl Role {
    /// Get the role name as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::PlatformAdmin => "platform_admin",
            Role::CustomerAdmin => "customer_admin",
            Role::PartnerAdmin => "partner_admin",
            Role::Employee => "employee",
        }
    }

    /// Try to parse a role from a string
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "platform_admin" => Some(Role::PlatformAdmin),
            "customer_admin" => Some(Role::CustomerAdmin),
            "partner_admin" => Some(Role::PartnerAdmin),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }

    /// Administrative scope level: 1 for platform-wide roles, 2 for
    /// tenant-scoped roles.
    ///
    /// The gate itself only uses role identity; the level exists for
    /// downstream page chrome (navigation grouping).
    pub const fn level(&self) -> u8 {
        match self {
            Role::PlatformAdmin => 1,
            Role::CustomerAdmin | Role::PartnerAdmin | Role::Employee => 2,
        }
    }

    /// Get all roles
    pub const fn all() -> &'static [Role] {
        &[
            Role::PlatformAdmin,
            Role::CustomerAdmin,
            Role::PartnerAdmin,
            Role::Employee,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable set of roles permitted by a policy entry.
///
/// A lookup miss in the action table yields [`RoleSet::EMPTY`], never an
/// absent value: an empty set matches no caller, so missing policy fails
/// closed at the type level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    /// The empty set: matches no role, including no session at all.
    pub const EMPTY: RoleSet = RoleSet(Vec::new());

    /// Create a role set from a list of roles
    pub fn new(roles: impl Into<Vec<Role>>) -> Self {
        Self(roles.into())
    }

    /// Check whether a role is a member of this set
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Check whether this set matches the caller's role, if any.
    ///
    /// An absent role (unauthenticated caller) never matches.
    pub fn permits(&self, role: Option<Role>) -> bool {
        role.is_some_and(|r| self.contains(r))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(roles: Vec<Role>) -> Self {
        Self(roles)
    }
}

/// A decoded session attached to a request.
///
/// Issued by the external authentication provider; the gate only ever
/// reads it. Absence of a session is a normal input value, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The caller's role
    pub role: Role,

    /// Tenant identifier, present for customer-scoped roles
    #[serde(default)]
    pub customer_id: Option<String>,
}

impl Session {
    /// Create a session with no tenant scope
    pub fn new(role: Role) -> Self {
        Self {
            role,
            customer_id: None,
        }
    }

    /// Create a session scoped to a customer tenant
    pub fn for_customer(role: Role, customer_id: impl Into<String>) -> Self {
        Self {
            role,
            customer_id: Some(customer_id.into()),
        }
    }
}

/// Authorization decision produced by the gate for one request.
///
/// The serving layer translates this into pass-through, an HTTP redirect,
/// or a bare 403; the gate itself performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Pass the request through to the downstream handler
    Allow,
    /// Redirect the caller to the given path
    Redirect(String),
    /// Reject with HTTP 403 and an empty body (API paths only)
    Forbidden,
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Decision::Redirect(_))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Decision::Forbidden)
    }
}
