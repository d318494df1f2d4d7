//! Configuration module
//!
//! Handles loading and validating configuration from TOML files and environment variables.

pub mod loader;
pub mod types;

pub use loader::{
    PATTERNS_ENV_VAR, SECRET_ENV_VAR, load_config, load_config_from_str, validate_log_level,
};
pub use types::*;
