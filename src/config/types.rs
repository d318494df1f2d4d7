//! Configuration types for firewall-gate
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::util::SecretString;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Firewall policy settings
    pub firewall: FirewallConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Firewall policy configuration
///
/// List settings become sets of deny rules or accepted roles. Patterns are
/// regular expressions matched against the attempt path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FirewallConfig {
    /// Whether the firewall evaluates rules at all
    pub enabled: bool,

    /// Descriptive name used in logs
    pub name: String,

    /// Groups whose members are redirected
    pub groups: Vec<String>,

    /// Exact paths that are redirected
    pub paths: Vec<String>,

    /// Path patterns (regex) that are redirected
    pub patterns: Vec<String>,

    /// Where redirected attempts are sent
    pub redirect: String,

    /// Roles that bypass the deny rules
    pub roles: Vec<String>,

    /// Shared secret that bypasses the deny rules (prefer env var FIREWALL_GATE_SECRET)
    pub secret: Option<SecretString>,

    /// Keys this version does not recognise; filled in by the loader and
    /// reported with a warning when the policy is built
    #[serde(skip)]
    pub unknown: BTreeMap<String, ::config::Value>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
