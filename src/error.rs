//! Error types for concierge
//!
//! We use `thiserror` for library-style errors that are part of the API.
//! A denied request is NOT an error: the gate returns a [`Decision`] for
//! those. The hierarchy below covers genuine faults only, and every fatal
//! variant surfaces at startup, before the server begins accepting requests.
//!
//! [`Decision`]: crate::access::Decision

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session verification error: {0}")]
    Auth(#[from] AuthError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

/// Configuration-related errors
///
/// Any of these at startup means the process refuses to serve: running
/// under an empty or malformed policy would be an open gate.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("Invalid exclusion pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Session verification errors
///
/// Every variant is treated as "no session" by the request path (fail
/// closed); none of them aborts a request or produces a 500.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No session verifier configured")]
    NotConfigured,

    #[error("Malformed session token")]
    MalformedToken,

    #[error("Unknown or revoked session token")]
    Unknown,

    #[error("Session store request failed: {0}")]
    Store(#[from] reqwest::Error),

    #[error("Session store returned HTTP {status}")]
    Rejected { status: u16 },

    #[error("Invalid session payload from store: {0}")]
    InvalidPayload(String),
}

/// Server/runtime errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid bind address '{addr}': {reason}")]
    InvalidAddr { addr: String, reason: String },
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;
