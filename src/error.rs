//! Error types for firewall-gate
//!
//! The decision engine itself never fails. Errors only arise while loading
//! configuration, compiling patterns, or when a host asks for a decision to be
//! turned into a `Result` via `Policy::require`.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Firewall error: {0}")]
    Firewall(#[from] FirewallError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An attempt was caught by a deny rule and must be sent elsewhere
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Redirect required to '{target}'")]
pub struct RedirectRequired {
    pub target: String,
}

impl RedirectRequired {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

/// Errors produced when a decision is converted into a `Result`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FirewallError {
    #[error(transparent)]
    Redirect(#[from] RedirectRequired),

    #[error("Evaluation failed: {0}")]
    Evaluation(String),
}

impl FirewallError {
    /// Redirect target, if this error asks for one
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            FirewallError::Redirect(r) => Some(&r.target),
            FirewallError::Evaluation(_) => None,
        }
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;
