//! Firewall decision integration tests
//!
//! Covers rule precedence, bypass rules, deny rules, construction semantics and
//! concurrent evaluation against a shared policy.
//!
//! Evaluation order: disabled -> secret -> role -> group -> path -> pattern -> allow.

use firewall_gate::firewall::{
    Attempt, Decision, Policy, Role, RoleLevel, Rule, ScopeSet, decide,
};
use regex::Regex;
use rstest::rstest;
use std::sync::Arc;
use std::thread;

// =============================================================================
// Test Helpers
// =============================================================================

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

fn attempt(group: &str, path: &str) -> Attempt<String> {
    Attempt::new(group, path, String::new())
}

/// Policy with every deny rule configured and both bypass rules available
fn guarded_policy() -> Policy<String> {
    Policy::builder()
        .enabled(true)
        .name("guarded")
        .groups(["blocked"])
        .paths(["/private"])
        .matchers([re("^/admin")])
        .roles(["admin".to_string()])
        .secret("s")
        .redirect("/denied")
        .build()
}

// =============================================================================
// 1. Disabled policy
// =============================================================================

mod disabled {
    use super::*;

    #[rstest]
    #[case("blocked", "/private", "", "")]
    #[case("blocked", "/admin/x", "guest", "wrong")]
    #[case("", "", "", "")]
    fn test_disabled_allows_everything(
        #[case] group: &str,
        #[case] path: &str,
        #[case] role: &str,
        #[case] secret: &str,
    ) {
        let policy = Policy::builder()
            .enabled(false)
            .groups(["blocked"])
            .paths(["/private"])
            .matchers([re("^/admin")])
            .redirect("/denied")
            .build();

        let a = Attempt::new(group, path, role.to_string()).with_secret(secret);
        let eval = policy.evaluate(&a);
        assert_eq!(eval.decision, Decision::Allow);
        assert_eq!(eval.rule, Rule::Disabled);
    }

    #[test]
    fn test_default_policy_is_disabled() {
        let policy: Policy<String> = Policy::default();
        assert!(decide(&policy, &attempt("blocked", "/private")).is_allowed());
    }
}

// =============================================================================
// 2. Secret bypass
// =============================================================================

mod secret_bypass {
    use super::*;

    #[rstest]
    #[case("blocked", "/")]
    #[case("", "/private")]
    #[case("", "/admin/panel")]
    fn test_secret_overrides_every_deny_rule(#[case] group: &str, #[case] path: &str) {
        let policy = guarded_policy();
        let eval = policy.evaluate(&attempt(group, path).with_secret("s"));
        assert_eq!(eval.decision, Decision::Allow);
        assert_eq!(eval.rule, Rule::Secret);
    }

    #[rstest]
    #[case("")]
    #[case("S")]
    #[case("s ")]
    fn test_other_secrets_do_not_bypass(#[case] secret: &str) {
        let policy = guarded_policy();
        let decision = policy.decide(&attempt("blocked", "/").with_secret(secret));
        assert_eq!(decision, Decision::Redirect("/denied".into()));
    }

    #[test]
    fn test_empty_policy_secret_disables_bypass() {
        let policy = Policy::builder()
            .enabled(true)
            .secret("")
            .groups(["blocked"])
            .redirect("/denied")
            .build();

        let eval = policy.evaluate(&attempt("blocked", "/").with_secret(""));
        assert_eq!(eval.rule, Rule::Group);
    }

    #[test]
    fn test_secret_checked_before_role() {
        let policy = guarded_policy();
        let a = Attempt::new("", "/", "admin".to_string()).with_secret("s");
        assert_eq!(policy.evaluate(&a).rule, Rule::Secret);
    }
}

// =============================================================================
// 3. Role bypass
// =============================================================================

mod role_bypass {
    use super::*;

    #[test]
    fn test_accepted_role_overrides_deny_rules() {
        let policy = guarded_policy();
        let a = Attempt::new("blocked", "/private", "admin".to_string());
        let eval = policy.evaluate(&a);
        assert_eq!(eval.decision, Decision::Allow);
        assert_eq!(eval.rule, Rule::Role);
    }

    #[test]
    fn test_unaccepted_role_is_redirected() {
        let policy = guarded_policy();
        let a = Attempt::new("blocked", "/", "editor".to_string());
        assert!(policy.decide(&a).is_redirect());
    }

    #[test]
    fn test_any_one_accepting_role_is_enough() {
        let policy = Policy::builder()
            .enabled(true)
            .roles(["ops".to_string(), "admin".to_string()])
            .roles(["auditor".to_string()])
            .paths(["/private"])
            .redirect("/denied")
            .build();

        for role in ["ops", "admin", "auditor"] {
            let a = Attempt::new("", "/private", role.to_string());
            assert!(policy.decide(&a).is_allowed(), "role {role} should bypass");
        }
    }

    #[rstest]
    #[case(RoleLevel::Guest, false)]
    #[case(RoleLevel::Member, false)]
    #[case(RoleLevel::Maintainer, true)]
    #[case(RoleLevel::Admin, true)]
    fn test_hierarchical_roles(#[case] presented: RoleLevel, #[case] allowed: bool) {
        let policy = Policy::builder()
            .enabled(true)
            .roles([RoleLevel::Maintainer])
            .matchers([re("^/settings")])
            .redirect("/login")
            .build();

        let a = Attempt::new("", "/settings/billing", presented);
        assert_eq!(policy.decide(&a).is_allowed(), allowed);
    }

    #[test]
    fn test_scope_set_roles() {
        let policy = Policy::builder()
            .enabled(true)
            .roles([ScopeSet::new(["deploy", "write"])])
            .paths(["/deploy"])
            .redirect("/forbidden")
            .build();

        let full = Attempt::new("", "/deploy", ScopeSet::new(["read", "write", "deploy"]));
        assert!(policy.decide(&full).is_allowed());

        let partial = Attempt::new("", "/deploy", ScopeSet::new(["write"]));
        assert_eq!(
            policy.decide(&partial),
            Decision::Redirect("/forbidden".into())
        );
    }

    /// Host-defined role type: tenant-scoped role names
    #[derive(Debug, Clone, Default, PartialEq)]
    struct TenantRole {
        tenant: String,
        name: String,
    }

    impl Role for TenantRole {
        fn accepts(&self, presented: &Self) -> bool {
            self.name == presented.name && (self.tenant == "*" || self.tenant == presented.tenant)
        }
    }

    #[test]
    fn test_custom_role_type() {
        let superuser = TenantRole {
            tenant: "*".into(),
            name: "superuser".into(),
        };
        let policy = Policy::builder()
            .enabled(true)
            .roles([superuser])
            .groups(["everyone"])
            .redirect("/nope")
            .build();

        let presented = TenantRole {
            tenant: "acme".into(),
            name: "superuser".into(),
        };
        assert!(
            policy
                .decide(&Attempt::new("everyone", "/", presented))
                .is_allowed()
        );
        assert!(
            policy
                .decide(&Attempt::new("everyone", "/", TenantRole::default()))
                .is_redirect()
        );
    }
}

// =============================================================================
// 4. Deny rules
// =============================================================================

mod deny_rules {
    use super::*;

    #[test]
    fn test_group_redirect() {
        let policy = Policy::builder()
            .enabled(true)
            .groups(["g"])
            .redirect("/denied")
            .build();

        let decision = policy.decide(&attempt("g", "/anything"));
        assert!(!decision.is_allowed());
        assert_eq!(decision.redirect_target(), Some("/denied"));
    }

    #[test]
    fn test_exact_path_only() {
        let policy = Policy::builder()
            .enabled(true)
            .paths(["/private"])
            .redirect("/denied")
            .build();

        assert!(policy.decide(&attempt("", "/private")).is_redirect());
        assert!(policy.decide(&attempt("", "/private/sub")).is_allowed());
        assert!(policy.decide(&attempt("", "/Private")).is_allowed());
    }

    #[rstest]
    #[case("/admin/x", Some("/login"))]
    #[case("/admin", Some("/login"))]
    #[case("/public", None)]
    #[case("/public/admin", None)]
    fn test_pattern_redirect(#[case] path: &str, #[case] expected: Option<&str>) {
        let policy = Policy::builder()
            .enabled(true)
            .matchers([re("^/admin")])
            .redirect("/login")
            .build();

        assert_eq!(policy.decide(&attempt("", path)).redirect_target(), expected);
    }

    #[test]
    fn test_first_matching_pattern_is_reported() {
        let policy = Policy::builder()
            .enabled(true)
            .matchers([re(r"\.php$"), re("^/wp-")])
            .redirect("/blocked")
            .build();

        assert_eq!(
            policy.evaluate(&attempt("", "/wp-login.php")).rule,
            Rule::Pattern(r"\.php$".into())
        );
        assert_eq!(
            policy.evaluate(&attempt("", "/wp-admin/")).rule,
            Rule::Pattern("^/wp-".into())
        );
    }

    #[test]
    fn test_all_deny_rules_share_one_target() {
        let policy = guarded_policy();
        for a in [
            attempt("blocked", "/"),
            attempt("", "/private"),
            attempt("", "/admin/panel"),
        ] {
            assert_eq!(policy.decide(&a), Decision::Redirect("/denied".into()));
        }
    }

    #[test]
    fn test_deny_attribution_order() {
        let policy = guarded_policy();
        assert_eq!(policy.evaluate(&attempt("blocked", "/admin")).rule, Rule::Group);
        assert_eq!(policy.evaluate(&attempt("", "/private")).rule, Rule::Path);
    }

    #[test]
    fn test_unmatched_attempt_is_allowed() {
        let policy = guarded_policy();
        let eval = policy.evaluate(&attempt("staff", "/home"));
        assert_eq!(eval.decision, Decision::Allow);
        assert_eq!(eval.rule, Rule::Default);
    }

    #[test]
    fn test_enabled_policy_without_rules_allows() {
        let policy: Policy<String> = Policy::builder().enabled(true).build();
        assert!(policy.decide(&attempt("blocked", "/admin")).is_allowed());
    }

    #[test]
    fn test_require_reports_redirect_target() {
        let policy = guarded_policy();
        assert!(policy.require(&attempt("staff", "/home")).is_ok());

        let err = policy.require(&attempt("blocked", "/")).unwrap_err();
        assert_eq!(err.redirect_target(), Some("/denied"));
    }
}

// =============================================================================
// 5. Construction semantics
// =============================================================================

mod construction {
    use super::*;

    #[test]
    fn test_repeated_list_settings_accumulate() {
        let policy = Policy::builder()
            .enabled(true)
            .groups(["a"])
            .groups(["b"])
            .paths(["/x"])
            .paths(["/y"])
            .matchers([re("^/p")])
            .matchers([re("^/q")])
            .redirect("/r")
            .build();

        for a in [
            attempt("a", "/"),
            attempt("b", "/"),
            attempt("", "/x"),
            attempt("", "/y"),
            attempt("", "/p1"),
            attempt("", "/q1"),
        ] {
            assert!(policy.decide(&a).is_redirect());
        }
    }

    #[test]
    fn test_duplicates_are_harmless() {
        let policy: Policy<String> = Policy::builder()
            .groups(["a", "a"])
            .groups(["a"])
            .paths(["/x", "/x"])
            .build();

        assert_eq!(policy.groups().len(), 1);
        assert_eq!(policy.paths().len(), 1);
    }

    #[test]
    fn test_scalar_settings_last_write_wins() {
        let policy: Policy<String> = Policy::builder()
            .enabled(false)
            .enabled(true)
            .redirect("/first")
            .redirect("/second")
            .groups(["g"])
            .build();

        assert_eq!(
            policy.decide(&attempt("g", "/")),
            Decision::Redirect("/second".into())
        );
    }

    #[test]
    fn test_empty_settings_leave_policy_unchanged() {
        let plain: Policy<String> = Policy::builder()
            .enabled(true)
            .paths(["/x"])
            .redirect("/r")
            .build();
        let padded: Policy<String> = Policy::builder()
            .enabled(true)
            .paths(["/x"])
            .groups(Vec::<String>::new())
            .matchers(Vec::new())
            .roles(Vec::new())
            .secret("")
            .redirect("/r")
            .build();

        for a in [attempt("", "/x"), attempt("g", "/y"), attempt("", "")] {
            assert_eq!(plain.evaluate(&a), padded.evaluate(&a));
        }
        assert_eq!(plain.groups(), padded.groups());
        assert!(padded.secret().is_none());
    }

    #[test]
    fn test_policy_debug_redacts_secret() {
        let policy = guarded_policy();
        let debug = format!("{:?}", policy);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret: Some(\"s\")"));
    }
}

// =============================================================================
// 6. Concurrent evaluation
// =============================================================================

mod concurrency {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_policy_is_send_and_sync() {
        assert_send_sync::<Policy<String>>();
        assert_send_sync::<Policy<RoleLevel>>();
        assert_send_sync::<Policy<ScopeSet>>();
    }

    #[test]
    fn test_concurrent_decisions_on_shared_policy() {
        let policy = Arc::new(guarded_policy());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let policy = Arc::clone(&policy);
                thread::spawn(move || {
                    for n in 0..200 {
                        let a = if (i + n) % 2 == 0 {
                            attempt("blocked", "/")
                        } else {
                            attempt("staff", "/home")
                        };
                        let expected_redirect = (i + n) % 2 == 0;
                        assert_eq!(policy.decide(&a).is_redirect(), expected_redirect);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
