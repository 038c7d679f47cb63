//! In-memory session verification
//!
//! A fixed token-to-session map, used by tests and local development runs
//! that have no session store to talk to.

use crate::access::Session;
use crate::auth::provider::SessionVerifier;
use crate::error::AuthError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Session verifier backed by an in-process map
#[derive(Debug, Clone, Default)]
pub struct MemoryVerifier {
    sessions: HashMap<String, Session>,
}

impl MemoryVerifier {
    /// Create an empty verifier (every token is unknown)
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token and the session it proves
    pub fn with_session(mut self, token: impl Into<String>, session: Session) -> Self {
        self.sessions.insert(token.into(), session);
        self
    }
}

#[async_trait]
impl SessionVerifier for MemoryVerifier {
    async fn verify(&self, token: &str) -> Result<Session, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MalformedToken);
        }

        self.sessions
            .get(token)
            .cloned()
            .ok_or(AuthError::Unknown)
    }

    fn verifier_type(&self) -> &'static str {
        "in-memory"
    }
}
