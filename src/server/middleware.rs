//! Gate enforcement middleware
//!
//! The router integration contract: every request except the pre-excluded
//! patterns goes through [`enforce`], and the gate's decision is applied
//! before any downstream handler runs.

use crate::access::{Decision, ExclusionFilter, PolicyGate, Session};
use crate::auth::BoxedSessionVerifier;
use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::util::{bearer_token, find_cookie};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Shared, read-only state for the enforcement middleware.
///
/// Built once at startup; every request-handling task reads it through an
/// `Arc` with no locking, since nothing here is mutated at runtime.
pub struct GateState {
    pub gate: PolicyGate,
    pub exclusions: ExclusionFilter,
    pub verifier: BoxedSessionVerifier,
    pub cookie_name: String,
    pub verify_timeout: Duration,
}

impl GateState {
    /// Compile gate state from configuration and a verifier
    pub fn from_config(
        config: &AppConfig,
        verifier: BoxedSessionVerifier,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            gate: PolicyGate::new(&config.gate)?,
            exclusions: ExclusionFilter::new(&config.gate.exclude)?,
            verifier,
            cookie_name: config.session.cookie_name.clone(),
            verify_timeout: Duration::from_millis(config.session.timeout_ms),
        })
    }
}

/// Axum middleware applying the gate's decision to every request
pub async fn enforce(
    State(state): State<Arc<GateState>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    if let Some(pattern) = state.exclusions.find_match(&path) {
        trace!(path, pattern, "Path excluded from gate");
        return next.run(req).await;
    }

    let session = resolve_session(&state, req.headers()).await;

    match state.gate.decide(&path, session.as_ref()) {
        Decision::Allow => next.run(req).await,
        Decision::Redirect(target) => Redirect::to(&target).into_response(),
        // Bare 403, empty body: API callers get a status code, not a page
        Decision::Forbidden => StatusCode::FORBIDDEN.into_response(),
    }
}

/// Extract and verify the session token, if any.
///
/// Every failure mode - missing token, malformed token, store rejection,
/// timeout - resolves to `None` (fail closed). No retries: a transient
/// verification failure denies this request and the client retries the
/// navigation.
async fn resolve_session(state: &GateState, headers: &HeaderMap) -> Option<Session> {
    let token = find_cookie(headers, &state.cookie_name).or_else(|| bearer_token(headers))?;

    match tokio::time::timeout(state.verify_timeout, state.verifier.verify(&token)).await {
        Ok(Ok(session)) => Some(session),
        Ok(Err(e)) => {
            debug!(
                error = %e,
                verifier = state.verifier.verifier_type(),
                "Session verification failed, treating as unauthenticated"
            );
            None
        }
        Err(_) => {
            warn!(
                timeout_ms = state.verify_timeout.as_millis() as u64,
                verifier = state.verifier.verifier_type(),
                "Session verification timed out, treating as unauthenticated"
            );
            None
        }
    }
}
