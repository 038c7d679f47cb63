//! Configuration module
//!
//! Handles loading and validating configuration from TOML files and
//! environment variables. The policy tables are configuration data, not
//! behavior: validation failures here are fatal at startup by design.

pub mod loader;
pub mod types;

pub use loader::{load_config, load_config_from_str};
pub use types::*;
