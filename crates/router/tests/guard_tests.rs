//! The access policy table, checked without building any views.

use sitegate_router::{
    check_access, match_route, normalize_location, Access, GuardDecision, RedirectReason, Screen,
    ROUTE_TABLE,
};
use sitegate_users::{User, UserRole};

fn sessions() -> Vec<Option<User>> {
    vec![
        None,
        Some(User::new("1", "member", UserRole::Member)),
        Some(User::new("2", "moderator", UserRole::Moderator)),
        Some(User::new("3", "admin", UserRole::Admin)),
    ]
}

fn decide(path: &str, user: Option<&User>) -> Option<GuardDecision> {
    match_route(&normalize_location(path)).map(|route| check_access(route.access(), user))
}

#[test]
fn every_table_entry_is_reachable_by_its_own_pattern() {
    for spec in ROUTE_TABLE {
        let concrete = spec
            .pattern
            .replace(":username", "someone")
            .replace(":slug", "about");
        let matched = match_route(&concrete).expect("pattern should match itself");
        assert_eq!(matched.spec, spec);
    }
}

#[test]
fn public_routes_allow_every_session() {
    for path in ["/", "/sms", "/stories", "/jobs", "/exam", "/page/anything"] {
        for user in sessions() {
            assert_eq!(decide(path, user.as_ref()), Some(GuardDecision::Allow), "{path}");
        }
    }
}

#[test]
fn auth_screens_only_for_anonymous_visitors() {
    for path in ["/login", "/register"] {
        for user in sessions() {
            let expected = match user {
                None => GuardDecision::Allow,
                Some(_) => GuardDecision::Redirect {
                    to: "/",
                    reason: RedirectReason::AlreadyAuthenticated,
                },
            };
            assert_eq!(decide(path, user.as_ref()), Some(expected), "{path}");
        }
    }
}

#[test]
fn profile_routes_require_any_session() {
    for path in ["/profile", "/profile/rahim"] {
        for user in sessions() {
            let allowed = decide(path, user.as_ref()).map(|d| d.is_allowed());
            assert_eq!(allowed, Some(user.is_some()), "{path}");
        }
    }
}

#[test]
fn admin_allows_exactly_admin_and_moderator() {
    for user in sessions() {
        let decision = decide("/admin", user.as_ref());
        let expected = match user.as_ref().map(|u| u.role) {
            Some(UserRole::Admin | UserRole::Moderator) => GuardDecision::Allow,
            Some(UserRole::Member) => GuardDecision::Redirect {
                to: "/login",
                reason: RedirectReason::InsufficientRole,
            },
            None => GuardDecision::Redirect {
                to: "/login",
                reason: RedirectReason::Unauthenticated,
            },
        };
        assert_eq!(decision, Some(expected));
    }
}

#[test]
fn unmatched_paths_have_no_policy() {
    for path in ["/nope", "/admin/users", "/page", "/profile/a/b", "#/Sms"] {
        assert!(decide(path, None).is_none(), "{path}");
    }
}

#[test]
fn hash_locations_match_like_bare_paths() {
    let route = match_route(&normalize_location("#/page/about?utm=1")).expect("route");
    assert_eq!(route.screen(), Screen::DynamicPage);
    assert_eq!(route.param("slug"), Some("about"));
    assert_eq!(route.access(), Access::Public);
}
