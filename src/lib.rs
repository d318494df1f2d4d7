//! Firewall Gate
//!
//! An embeddable request gate that decides whether an access attempt may
//! proceed or must be redirected.
//!
//! ## Features
//!
//! - **Bypass rules** - a shared secret or an accepted role always lets an attempt through
//! - **Deny rules** - group membership, exact paths and regex path patterns trigger a redirect
//! - **Pluggable roles** - anything implementing [`firewall::Role`] can be used as a credential
//! - **Flexible configuration** via TOML files and environment variables
//!
//! The gate never enforces anything itself. It hands back a [`firewall::Decision`]
//! and leaves redirecting or proceeding to the host.
//!
//! ## Example Configuration
//!
//! ```toml
//! [firewall]
//! enabled = true
//! name = "admin-area"
//! groups = ["suspended"]          # Always redirect suspended users
//! paths = ["/metrics"]            # Exact path
//! patterns = ["^/admin"]          # Anything under /admin
//! roles = ["admin"]               # Admins bypass every deny rule
//! redirect = "/login"
//! # secret from FIREWALL_GATE_SECRET env var
//! ```

pub mod config;
pub mod error;
pub mod firewall;
pub mod util;

// Re-export main types
pub use config::{AppConfig, load_config};
pub use error::{AppError, FirewallError, Result};
pub use firewall::{Attempt, Decision, Policy, Role, decide};
