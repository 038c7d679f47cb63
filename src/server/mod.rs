//! Server module
//!
//! Router integration for the policy gate: the enforcement middleware and
//! the listener that serves a gated router.

pub mod http;
pub mod middleware;

pub use http::{DEFAULT_PORT, bind_addr, gateway_router, serve, serve_blocking};
pub use middleware::{GateState, enforce};
