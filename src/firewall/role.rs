//! Role comparison
//!
//! The engine only needs to know whether a role held by the policy accepts the
//! role presented by an attempt. Hosts pick the representation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A credential that can grant bypass
pub trait Role {
    /// Whether this (policy-held) role accepts the role presented by an attempt
    fn accepts(&self, presented: &Self) -> bool;
}

/// Plain named roles compare by equality
impl Role for String {
    fn accepts(&self, presented: &Self) -> bool {
        self == presented
    }
}

/// Hierarchical role: a required level accepts any level at or above it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleLevel {
    Anonymous,
    Guest,
    Member,
    Maintainer,
    Admin,
}

impl RoleLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RoleLevel::Anonymous => "anonymous",
            RoleLevel::Guest => "guest",
            RoleLevel::Member => "member",
            RoleLevel::Maintainer => "maintainer",
            RoleLevel::Admin => "admin",
        }
    }

    /// Try to parse a level from a string
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "anonymous" => Some(RoleLevel::Anonymous),
            "guest" => Some(RoleLevel::Guest),
            "member" => Some(RoleLevel::Member),
            "maintainer" => Some(RoleLevel::Maintainer),
            "admin" => Some(RoleLevel::Admin),
            _ => None,
        }
    }

    /// All levels, lowest first
    pub fn all() -> &'static [RoleLevel] {
        &[
            RoleLevel::Anonymous,
            RoleLevel::Guest,
            RoleLevel::Member,
            RoleLevel::Maintainer,
            RoleLevel::Admin,
        ]
    }
}

impl Role for RoleLevel {
    fn accepts(&self, presented: &Self) -> bool {
        presented >= self
    }
}

impl fmt::Display for RoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Claim-set role: accepted when the presented scopes cover every required scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(scopes.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Role for ScopeSet {
    fn accepts(&self, presented: &Self) -> bool {
        // An empty requirement would accept everyone; treat it as unusable instead.
        !self.0.is_empty() && self.0.is_subset(&presented.0)
    }
}
