//! Policy tables
//!
//! The two static tables the gate evaluates against: an ordered list of
//! page route entries (first matching prefix wins) and a nested
//! qualifier/action table for API paths. Both are built once at startup
//! and shared read-only for the life of the process.

use crate::access::types::{Role, RoleSet};
use crate::error::ConfigError;
use std::collections::HashMap;

/// One page-route rule: a path prefix and the roles allowed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Path prefix this entry guards (e.g., `/offers`)
    pub prefix: String,
    /// Roles permitted to navigate under the prefix
    pub roles: RoleSet,
    /// Whether downstream chrome lists this entry in the navigation
    pub show_in_nav: bool,
    /// Display title for navigation rendering
    pub title: String,
}

impl RouteEntry {
    /// Check whether a request path falls under this entry's prefix
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// Ordered page-route policy table.
///
/// Entries are checked in table order and the first matching prefix wins,
/// so a broader prefix placed earlier takes precedence over a narrower one
/// placed later. Construction rejects that arrangement when the two
/// entries disagree on roles, since the later entry would be an
/// unreachable rule that reads as if it applied.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    entries: Vec<RouteEntry>,
}

impl RoutePolicy {
    /// Build the table, validating that no entry is shadowed by an earlier
    /// entry with a different role set.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, ConfigError> {
        for (later_idx, later) in entries.iter().enumerate() {
            for earlier in &entries[..later_idx] {
                if later.prefix.starts_with(&earlier.prefix) && later.roles != earlier.roles {
                    return Err(ConfigError::Invalid {
                        message: format!(
                            "route entry '{}' is unreachable: shadowed by earlier entry '{}' with a different role set",
                            later.prefix, earlier.prefix
                        ),
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// Find the first entry whose prefix matches the path
    pub fn find(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.matches(path))
    }

    /// Entries to show in the navigation for a given role, in table order
    pub fn nav_entries(&self, role: Role) -> impl Iterator<Item = &RouteEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.show_in_nav && entry.roles.contains(role))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Two-level API policy table: qualifier → action → allowed roles.
///
/// A lookup miss returns the empty-set sentinel rather than an absent
/// value, so a `(qualifier, action)` pair nobody thought about denies
/// every caller instead of allowing them.
#[derive(Debug, Clone, Default)]
pub struct ActionPolicyTable {
    actions: HashMap<String, HashMap<String, RoleSet>>,
}

impl ActionPolicyTable {
    pub fn new(actions: HashMap<String, HashMap<String, RoleSet>>) -> Self {
        Self { actions }
    }

    /// Roles allowed for a `(qualifier, action)` pair.
    ///
    /// Returns [`RoleSet::EMPTY`] when either level of the lookup misses.
    pub fn allowed_roles(&self, qualifier: &str, action: &str) -> &RoleSet {
        static EMPTY: RoleSet = RoleSet::EMPTY;
        self.actions
            .get(qualifier)
            .and_then(|actions| actions.get(action))
            .unwrap_or(&EMPTY)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of qualifiers in the table
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
