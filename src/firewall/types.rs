//! Firewall types
//!
//! Per-call values exchanged with the decision engine.

use std::fmt;

/// One access attempt as presented by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt<R> {
    pub group: String,
    pub path: String,
    pub role: R,
    /// Presented shared secret; empty when none was supplied
    pub secret: String,
}

impl<R> Attempt<R> {
    pub fn new(group: impl Into<String>, path: impl Into<String>, role: R) -> Self {
        Self {
            group: group.into(),
            path: path.into(),
            role,
            secret: String::new(),
        }
    }

    /// Attach a presented secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = secret.into();
        self
    }
}

impl<R: Default> Attempt<R> {
    /// Attempt carrying only a path, with an empty group and the default role
    pub fn for_path(path: impl Into<String>) -> Self {
        Self::new(String::new(), path, R::default())
    }
}

/// Outcome of evaluating an attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the attempt through
    Allow,
    /// Send the attempt to the given target
    Redirect(String),
    /// Evaluation could not complete. Reserved: the current rules never produce it.
    Error(String),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Decision::Redirect(_))
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Decision::Redirect(target) => Some(target),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Decision::Error(reason) => Some(reason),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Redirect(_) => "redirect",
            Decision::Error(_) => "error",
        }
    }
}

/// The rule that produced a decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Policy is disabled
    Disabled,
    /// Shared secret matched
    Secret,
    /// An accepted role matched
    Role,
    /// Attempt group is in the deny set
    Group,
    /// Attempt path is in the exact-path deny set
    Path,
    /// Attempt path matched the contained pattern
    Pattern(String),
    /// No rule fired
    Default,
}

impl Rule {
    /// Whether this rule grants access ahead of the deny checks
    pub const fn is_bypass(&self) -> bool {
        matches!(self, Rule::Secret | Rule::Role)
    }

    /// Whether this rule is a deny signal
    pub const fn is_deny(&self) -> bool {
        matches!(self, Rule::Group | Rule::Path | Rule::Pattern(_))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Disabled => f.write_str("disabled"),
            Rule::Secret => f.write_str("secret"),
            Rule::Role => f.write_str("role"),
            Rule::Group => f.write_str("group"),
            Rule::Path => f.write_str("path"),
            Rule::Pattern(p) => write!(f, "pattern '{}'", p),
            Rule::Default => f.write_str("default"),
        }
    }
}

/// A decision together with the rule it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub decision: Decision,
    pub rule: Rule,
}

impl Evaluation {
    pub(crate) fn allow(rule: Rule) -> Self {
        Self {
            decision: Decision::Allow,
            rule,
        }
    }

    pub(crate) fn redirect(target: &str, rule: Rule) -> Self {
        Self {
            decision: Decision::Redirect(target.to_string()),
            rule,
        }
    }
}
