//! Remote session store verification
//!
//! Presents the opaque token to an external session-store endpoint over
//! HTTP. The request carries a bounded timeout; expiry, rejection, and
//! transport failures all surface as [`AuthError`] and the caller treats
//! them as an absent session.

use crate::access::Session;
use crate::auth::provider::SessionVerifier;
use crate::config::SessionConfig;
use crate::error::AuthError;
use async_trait::async_trait;
use std::time::Duration;

/// Session verifier backed by a remote session store
#[derive(Debug, Clone)]
pub struct RemoteVerifier {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteVerifier {
    /// Create a verifier from session configuration
    pub fn new(config: &SessionConfig) -> Result<Self, AuthError> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or(AuthError::NotConfigured)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Create a verifier against an explicit endpoint (useful for testing)
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SessionVerifier for RemoteVerifier {
    async fn verify(&self, token: &str) -> Result<Session, AuthError> {
        if token.is_empty() || token.contains(|c: char| c.is_whitespace() || c.is_control()) {
            return Err(AuthError::MalformedToken);
        }

        let response = self
            .client
            .get(&self.endpoint)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AuthError::Unknown);
        }
        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            });
        }

        let session: Session = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidPayload(e.to_string()))?;

        Ok(session)
    }

    fn verifier_type(&self) -> &'static str {
        "remote session store"
    }
}
