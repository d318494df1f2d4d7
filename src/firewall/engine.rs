//! Decision engine
//!
//! Evaluates an attempt against a policy. Bypass rules are tested before deny
//! rules and the first rule that fires decides:
//! 1. Disabled policy: allow
//! 2. Matching shared secret: allow
//! 3. Accepted role: allow
//! 4. Group in the deny set: redirect
//! 5. Path in the exact-path deny set: redirect
//! 6. Path matching a pattern: redirect
//! 7. Otherwise: allow

use crate::error::{FirewallError, RedirectRequired};
use crate::firewall::policy::Policy;
use crate::firewall::role::Role;
use crate::firewall::types::{Attempt, Decision, Evaluation, Rule};
use tracing::{debug, trace};

/// Decide whether `attempt` is allowed or redirected by `policy`
pub fn decide<R: Role>(policy: &Policy<R>, attempt: &Attempt<R>) -> Decision {
    policy.decide(attempt)
}

impl<R: Role> Policy<R> {
    /// Decide whether `attempt` is allowed or redirected
    pub fn decide(&self, attempt: &Attempt<R>) -> Decision {
        self.evaluate(attempt).decision
    }

    /// Decide, and report which rule produced the decision
    pub fn evaluate(&self, attempt: &Attempt<R>) -> Evaluation {
        debug!(
            policy = self.name(),
            group = attempt.group.as_str(),
            path = attempt.path.as_str(),
            "Evaluating attempt"
        );

        if !self.enabled() {
            trace!("Policy disabled");
            return Evaluation::allow(Rule::Disabled);
        }

        if let Some(secret) = self.secret()
            && secret.matches(&attempt.secret)
        {
            trace!("Matched shared secret");
            return Evaluation::allow(Rule::Secret);
        }

        if self.roles().iter().any(|r| r.accepts(&attempt.role)) {
            trace!("Matched accepted role");
            return Evaluation::allow(Rule::Role);
        }

        if self.groups().contains(&attempt.group) {
            trace!(group = attempt.group.as_str(), "Matched denied group");
            return Evaluation::redirect(self.redirect(), Rule::Group);
        }

        if self.paths().contains(&attempt.path) {
            trace!(path = attempt.path.as_str(), "Matched denied path");
            return Evaluation::redirect(self.redirect(), Rule::Path);
        }

        if let Some(pattern) = self.matchers().find_match(&attempt.path) {
            trace!("Matched deny pattern: {}", pattern);
            return Evaluation::redirect(self.redirect(), Rule::Pattern(pattern.to_string()));
        }

        trace!("No rule matched");
        Evaluation::allow(Rule::Default)
    }

    /// Decide, returning an error when the attempt may not proceed
    pub fn require(&self, attempt: &Attempt<R>) -> Result<(), FirewallError> {
        match self.decide(attempt) {
            Decision::Allow => Ok(()),
            Decision::Redirect(target) => Err(RedirectRequired::new(target).into()),
            Decision::Error(reason) => Err(FirewallError::Evaluation(reason)),
        }
    }
}
