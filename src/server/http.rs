//! HTTP server
//!
//! Wires the enforcement middleware in front of a downstream router and
//! serves it. The downstream router is the rest of the application - page
//! and API handlers the gate knows nothing about.

use crate::error::ServerError;
use crate::server::middleware::{GateState, enforce};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Default port for the gateway
pub const DEFAULT_PORT: u16 = 8990;

/// Wrap a downstream router with the enforcement middleware.
///
/// The gate layer runs before every downstream handler; request tracing
/// sits outside it so denied requests are logged too.
pub fn gateway_router(state: Arc<GateState>, downstream: Router) -> Router {
    downstream
        .layer(axum::middleware::from_fn_with_state(state, enforce))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Parse a bind address from host and port
pub fn bind_addr(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e: std::net::AddrParseError| ServerError::InvalidAddr {
            addr: format!("{}:{}", host, port),
            reason: e.to_string(),
        })
}

/// Serve the router until the cancellation token fires.
///
/// Returns once the listener is closed and in-flight requests have
/// drained.
pub async fn serve(
    bind: SocketAddr,
    router: Router,
    ct: CancellationToken,
) -> Result<(), ServerError> {
    let listener = TcpListener::bind(bind).await?;
    info!("Gateway listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await?;

    Ok(())
}

/// Serve the router and wait for a shutdown signal (Ctrl+C)
pub async fn serve_blocking(bind: SocketAddr, router: Router) -> Result<(), ServerError> {
    let ct = CancellationToken::new();
    let signal_ct = ct.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            signal_ct.cancel();
        }
    });

    info!("Press Ctrl+C to stop the gateway");
    serve(bind, router, ct).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_valid() {
        let addr = bind_addr("127.0.0.1", 9000).unwrap();
        assert_eq!(addr.port(), 9000);
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
    }

    #[test]
    fn test_bind_addr_ipv6() {
        let addr = bind_addr("[::1]", 8080).unwrap();
        assert!(addr.ip().is_ipv6());
    }

    #[test]
    fn test_bind_addr_invalid() {
        let result = bind_addr("not-an-ip", 8080);
        assert!(matches!(result, Err(ServerError::InvalidAddr { .. })));
    }
}
