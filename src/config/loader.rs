//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. `FIREWALL_GATE_SECRET` for the shared secret
//! 2. Environment variables (FIREWALL_GATE__*)
//! 3. Configuration file (TOML)
//! 4. Default values

use crate::config::types::{AppConfig, FirewallConfig};
use crate::error::ConfigError;
use crate::firewall::PatternMatcher;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "firewall-gate.toml",
    ".firewall-gate.toml",
    "~/.config/firewall-gate/config.toml",
    "/etc/firewall-gate/config.toml",
];

/// Environment variable holding the shared secret
pub const SECRET_ENV_VAR: &str = "FIREWALL_GATE_SECRET";

/// Environment variable holding deny patterns, separated by whitespace.
///
/// Regexes may contain commas, so patterns do not use the comma list
/// separator of the other list keys. A literal space in a pattern has to be
/// written as `\x20` (or `\s`) here, or the pattern set from the file instead.
pub const PATTERNS_ENV_VAR: &str = "FIREWALL_GATE__FIREWALL__PATTERNS";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Keys understood in the `[firewall]` section
const FIREWALL_KEYS: &[&str] = &[
    "enabled", "name", "groups", "paths", "patterns", "redirect", "roles", "secret",
];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    finish(config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Start with defaults (handled by serde defaults on AppConfig)

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with FIREWALL_GATE prefix
    // e.g., FIREWALL_GATE__FIREWALL__ENABLED, FIREWALL_GATE__LOGGING__LEVEL
    // Double underscore (__) maps to nested keys (firewall.enabled)
    // List keys take comma separated values, except patterns (see PATTERNS_ENV_VAR)
    builder = builder.add_source(
        Environment::with_prefix("FIREWALL_GATE")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("firewall.groups")
            .with_list_parse_key("firewall.paths")
            .with_list_parse_key("firewall.roles")
            .try_parsing(true),
    );

    // Patterns are split on whitespace and override the raw string picked up above
    if let Ok(raw) = std::env::var(PATTERNS_ENV_VAR) {
        let patterns: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
        builder = builder
            .set_override("firewall.patterns", patterns)
            .map_err(|e| ConfigError::Load(e.to_string()))?;
    }

    // 4. Dedicated secret variable, so the secret can stay out of files
    if let Ok(secret) = std::env::var(SECRET_ENV_VAR) {
        builder = builder
            .set_override("firewall.secret", secret)
            .map_err(|e| ConfigError::Load(e.to_string()))?;
    }

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    finish(config)
}

/// Deserialize, record unknown firewall keys, and validate
fn finish(config: Config) -> Result<AppConfig, ConfigError> {
    let firewall_table = config.get_table("firewall").unwrap_or_default();

    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    collect_unknown_keys(&mut app_config.firewall, firewall_table);
    validate_config(&app_config)?;

    Ok(app_config)
}

fn collect_unknown_keys(
    firewall: &mut FirewallConfig,
    table: impl IntoIterator<Item = (String, config::Value)>,
) {
    firewall.unknown = table
        .into_iter()
        .filter(|(key, _)| !FIREWALL_KEYS.contains(&key.as_str()))
        .collect();
}

/// Check that a log level is one of the supported names
pub fn validate_log_level(level: &str) -> Result<(), ConfigError> {
    if LOG_LEVELS.contains(&level) {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        message: format!(
            "log level must be one of {}, got: {}",
            LOG_LEVELS.join(", "),
            level
        ),
    })
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_log_level(&config.logging.level)?;

    validate_patterns(&config.firewall.patterns, "firewall.patterns")?;

    Ok(())
}

/// Validate that all patterns are valid regex
fn validate_patterns(patterns: &[String], field_path: &str) -> Result<(), ConfigError> {
    PatternMatcher::new(patterns).map(drop).map_err(|e| match e {
        ConfigError::InvalidPattern { pattern, reason } => ConfigError::InvalidPattern {
            pattern,
            reason: format!("in {}: {}", field_path, reason),
        },
        other => other,
    })
}
