//! Firewall module
//!
//! Decides whether an access attempt is allowed or redirected.
//!
//! ## Rule Model
//!
//! Bypass rules take precedence over deny rules:
//!
//! 1. **Disabled** - a disabled policy lets everything through
//! 2. **Secret** - a matching shared secret lets the attempt through
//! 3. **Role** - an accepted role lets the attempt through
//! 4. **Group** - members of a denied group are redirected
//! 5. **Path** - exact denied paths are redirected
//! 6. **Pattern** - paths matching a deny regex are redirected
//!
//! Anything not caught by a deny rule is allowed. All deny rules share the
//! policy's single redirect target. Empty rule sets are skipped.
//!
//! ## Example
//!
//! ```
//! use firewall_gate::firewall::{Attempt, Decision, Policy};
//! use regex::Regex;
//!
//! let policy = Policy::builder()
//!     .enabled(true)
//!     .matchers([Regex::new("^/admin").unwrap()])
//!     .roles(["admin".to_string()])
//!     .redirect("/login")
//!     .build();
//!
//! let guest = Attempt::new("visitors", "/admin/users", "guest".to_string());
//! assert_eq!(policy.decide(&guest), Decision::Redirect("/login".into()));
//!
//! let admin = Attempt::new("staff", "/admin/users", "admin".to_string());
//! assert!(policy.decide(&admin).is_allowed());
//! ```

pub mod engine;
pub mod patterns;
pub mod policy;
pub mod role;
pub mod types;

pub use engine::decide;
pub use patterns::PatternMatcher;
pub use policy::{Policy, PolicyBuilder};
pub use role::{Role, RoleLevel, ScopeSet};
pub use types::{Attempt, Decision, Evaluation, Rule};
