//! Session verifier trait
//!
//! Verification of the opaque session token is the one suspension point
//! in the request path. The gate never issues or mutates sessions; it
//! only asks a verifier whether a presented token corresponds to one.

use crate::access::Session;
use crate::error::AuthError;
// async_trait required for dyn-compatibility with Box<dyn SessionVerifier>
use async_trait::async_trait;

/// Session verifier trait
///
/// Implementations decode and validate an opaque session token. Any
/// failure is reported as an [`AuthError`]; the request path treats every
/// failure as an absent session (fail closed) and never retries - a
/// transient verification failure denies the individual request, and
/// retrying the navigation is the client's responsibility.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Verify a token and return the session it proves
    async fn verify(&self, token: &str) -> Result<Session, AuthError>;

    /// Get a description of the verification mechanism (for logging)
    fn verifier_type(&self) -> &'static str;
}

/// Box type alias for session verifiers
pub type BoxedSessionVerifier = Box<dyn SessionVerifier>;
