//! Access control module
//!
//! The role-based route-authorization gate for the admin portal.
//!
//! ## Decision Model
//!
//! Every guarded request flows through [`PolicyGate::decide`], which
//! evaluates ordered guard clauses with the following precedence
//! (highest to lowest):
//!
//! 1. **Public-route short-circuit** - login and password-recovery screens
//!    are open to unauthenticated callers; authenticated callers are sent
//!    to the landing page instead
//! 2. **Root redirect** - `/` always redirects to the landing page
//! 3. **API paths** - the file-serving namespace passes through
//!    unconditionally, the mobile namespace is employee-only, everything
//!    else is checked against the qualifier/action policy table
//! 4. **Page paths** - checked against the ordered route policy table,
//!    first matching prefix wins
//! 5. **Default deny** - anything not explicitly allowed redirects to the
//!    generic not-found page
//!
//! A missing policy entry, an absent session, and a role mismatch all end
//! in the default-deny branch: ambiguous or missing authorization input
//! resolves to denial, never to access.
//!
//! ## Example Configuration
//!
//! ```toml
//! [gate]
//! landing = "/dashboard"
//! not_found = "/404"
//!
//! [[gate.routes]]
//! prefix = "/contracts"
//! roles = ["platform_admin"]
//! title = "Contracts"
//!
//! [gate.actions.employees]
//! update = ["platform_admin", "customer_admin"]
//! ```

pub mod exclusions;
pub mod gate;
pub mod policy;
pub mod types;

pub use exclusions::ExclusionFilter;
pub use gate::PolicyGate;
pub use policy::{ActionPolicyTable, RouteEntry, RoutePolicy};
pub use types::{Decision, Role, RoleSet, Session};
