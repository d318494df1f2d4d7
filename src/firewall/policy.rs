//! Firewall policy
//!
//! A `Policy` is assembled once through `PolicyBuilder` and is read-only
//! afterwards. List-valued settings accumulate across calls; scalar settings
//! keep the last value written.

use crate::config::FirewallConfig;
use crate::error::ConfigError;
use crate::firewall::patterns::PatternMatcher;
use crate::util::SecretString;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Immutable access policy evaluated by the decision engine
#[derive(Debug, Clone)]
pub struct Policy<R> {
    enabled: bool,
    name: String,
    groups: HashSet<String>,
    paths: HashSet<String>,
    matchers: PatternMatcher,
    redirect: String,
    roles: Vec<R>,
    secret: Option<SecretString>,
}

impl<R> Default for Policy<R> {
    fn default() -> Self {
        Self {
            enabled: false,
            name: String::new(),
            groups: HashSet::new(),
            paths: HashSet::new(),
            matchers: PatternMatcher::empty(),
            redirect: String::new(),
            roles: Vec::new(),
            secret: None,
        }
    }
}

impl<R> Policy<R> {
    /// Start building a policy (disabled, with no rules)
    pub fn builder() -> PolicyBuilder<R> {
        PolicyBuilder::default()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groups(&self) -> &HashSet<String> {
        &self.groups
    }

    pub fn paths(&self) -> &HashSet<String> {
        &self.paths
    }

    pub fn matchers(&self) -> &PatternMatcher {
        &self.matchers
    }

    pub fn redirect(&self) -> &str {
        &self.redirect
    }

    pub fn roles(&self) -> &[R] {
        &self.roles
    }

    /// Configured shared secret; `None` when secret bypass is off
    pub fn secret(&self) -> Option<&SecretString> {
        self.secret.as_ref()
    }

    /// Whether any group, path, or pattern deny rule is configured
    pub fn has_deny_rules(&self) -> bool {
        !self.groups.is_empty() || !self.paths.is_empty() || !self.matchers.is_empty()
    }
}

impl Policy<String> {
    /// Build a policy with named roles from its configuration section
    ///
    /// Patterns are compiled here; an invalid one fails the whole policy.
    pub fn from_config(config: &FirewallConfig) -> Result<Self, ConfigError> {
        let mut builder = Policy::builder()
            .enabled(config.enabled)
            .name(config.name.as_str())
            .groups(config.groups.iter().cloned())
            .paths(config.paths.iter().cloned())
            .matchers(PatternMatcher::new(&config.patterns)?)
            .redirect(config.redirect.as_str())
            .roles(config.roles.iter().cloned());
        if let Some(secret) = &config.secret {
            builder = builder.secret(secret.expose_secret());
        }

        let policy = builder.build();
        for key in config.unknown.keys() {
            warn!(
                policy = policy.name(),
                key = key.as_str(),
                "Ignoring unknown firewall configuration key"
            );
        }
        if policy.enabled && policy.has_deny_rules() && policy.redirect.is_empty() {
            warn!(
                policy = policy.name(),
                "Deny rules are configured but redirect is empty"
            );
        }
        debug!(
            policy = policy.name(),
            enabled = policy.enabled,
            groups = policy.groups.len(),
            paths = policy.paths.len(),
            patterns = policy.matchers.len(),
            roles = policy.roles.len(),
            secret = policy.secret.is_some(),
            "Built firewall policy"
        );
        Ok(policy)
    }
}

/// Typed builder for `Policy`
///
/// Construction never fails: every setting is checked by the type system.
#[derive(Debug)]
pub struct PolicyBuilder<R> {
    policy: Policy<R>,
}

impl<R> Default for PolicyBuilder<R> {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
        }
    }
}

impl<R> PolicyBuilder<R> {
    /// Turn the policy on or off (last call wins)
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.policy.enabled = enabled;
        self
    }

    /// Set the display name (last call wins)
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.policy.name = name.into();
        self
    }

    /// Add groups whose members are redirected
    pub fn groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// Add exact paths that are redirected
    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add compiled path patterns, evaluated after any already added
    pub fn matchers(mut self, matchers: impl IntoIterator<Item = Regex>) -> Self {
        self.policy.matchers.extend(matchers);
        self
    }

    /// Set the redirect target used by every deny rule (last call wins)
    pub fn redirect(mut self, redirect: impl Into<String>) -> Self {
        self.policy.redirect = redirect.into();
        self
    }

    /// Add roles that bypass the deny rules
    pub fn roles(mut self, roles: impl IntoIterator<Item = R>) -> Self {
        self.policy.roles.extend(roles);
        self
    }

    /// Set the shared bypass secret (last call wins; empty turns it off)
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        let secret = SecretString::new(secret);
        self.policy.secret = (!secret.is_empty()).then_some(secret);
        self
    }

    pub fn build(self) -> Policy<R> {
        self.policy
    }
}
