//! Session verification module
//!
//! Session issuance belongs to the external authentication provider; this
//! module only verifies tokens it is handed. The default implementation
//! asks a remote session store, with an in-memory verifier available for
//! tests and local runs.

pub mod memory;
pub mod provider;
pub mod remote;

pub use memory::MemoryVerifier;
pub use provider::{BoxedSessionVerifier, SessionVerifier};
pub use remote::RemoteVerifier;

use crate::config::SessionConfig;
use crate::error::AuthError;

/// Create a session verifier from configuration
pub fn create_verifier(config: &SessionConfig) -> Result<BoxedSessionVerifier, AuthError> {
    Ok(Box::new(RemoteVerifier::new(config)?))
}
