//! Concierge
//!
//! Role-based route-authorization gateway for the admin portal.

use axum::Router;
use axum::http::StatusCode;
use clap::Parser;
use concierge::{
    auth::create_verifier,
    config::{LogFormat, load_config},
    server::{GateState, bind_addr, gateway_router, serve_blocking},
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Concierge - route authorization gateway for the admin portal
#[derive(Parser, Debug)]
#[command(name = "concierge")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "CONCIERGE_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CONCIERGE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Bind host (overrides configuration)
    #[arg(long, env = "CONCIERGE_HOST")]
    host: Option<String>,

    /// Bind port (overrides configuration)
    #[arg(long, env = "CONCIERGE_PORT")]
    port: Option<u16>,
}

/// Placeholder downstream handler.
///
/// The real application mounts its page and API routers behind the gate;
/// the standalone binary answers 200 for anything the gate lets through
/// so operators can smoke-test a policy.
async fn downstream_stub() -> StatusCode {
    StatusCode::OK
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration; refuses to start under a missing or malformed policy
    let config = load_config(args.config.as_deref())
        .inspect_err(|e| eprintln!("Failed to load configuration: {e}"))?;

    // Initialize logging
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting concierge");

    // Create the session verifier
    let verifier = create_verifier(&config.session)
        .inspect_err(|e| error!(error = %e, "Failed to create session verifier"))?;
    info!(verifier = verifier.verifier_type(), "Session verifier ready");

    // Compile the policy gate and exclusion filter
    let state = Arc::new(
        GateState::from_config(&config, verifier)
            .inspect_err(|e| error!(error = %e, "Failed to compile policy gate"))?,
    );

    let host = args.host.as_deref().unwrap_or(&config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let bind = bind_addr(host, port)
        .inspect_err(|e| error!(error = %e, "Invalid bind address"))?;

    let router = gateway_router(state, Router::new().fallback(downstream_stub));

    serve_blocking(bind, router).await?;

    Ok(())
}
