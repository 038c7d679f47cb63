//! Concierge
//!
//! A role-based route-authorization gate for the admin portal.
//!
//! ## Features
//!
//! - **One decision point** - every guarded request is classified against
//!   static policy tables before any handler runs
//! - **Fail closed** - missing policy entries, absent sessions, and
//!   verification failures all resolve to denial, never to access
//! - **Immutable policy** - tables load once at startup; the process
//!   refuses to serve under an empty or malformed policy
//! - **External sessions** - token issuance belongs to the authentication
//!   provider; concierge only verifies, with a bounded timeout
//!
//! ## Decision Precedence
//!
//! ```text
//! public routes → root redirect → API (files/mobile/actions) → pages → deny
//! ```
//!
//! ## Example Configuration
//!
//! ```toml
//! [session]
//! cookie_name = "session_token"
//! # endpoint from SESSION_STORE_URL env var
//!
//! [gate]
//! landing = "/dashboard"
//! not_found = "/404"
//!
//! [[gate.routes]]
//! prefix = "/dashboard"
//! roles = ["platform_admin", "customer_admin", "partner_admin"]
//!
//! [[gate.routes]]
//! prefix = "/contracts"
//! roles = ["platform_admin"]
//!
//! [gate.actions.employees]
//! update = ["platform_admin", "customer_admin"]
//! ```

pub mod access;
pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod util;

// Re-export main types
pub use access::{Decision, PolicyGate, Role, Session};
pub use config::{AppConfig, load_config};
pub use error::{AppError, Result};
pub use server::GateState;
