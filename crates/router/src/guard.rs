//! Access policy evaluation.

use crate::routes::Access;
use crate::{HOME_PATH, LOGIN_PATH};
use sitegate_users::User;

/// Why a navigation was sent elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// The route needs a session and there is none.
    Unauthenticated,
    /// There is a session but its role is not allowed.
    InsufficientRole,
    /// The route is for anonymous visitors only.
    AlreadyAuthenticated,
    /// No route matches the path.
    UnknownRoute,
    /// The page slug resolved to nothing.
    PageNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect {
        to: &'static str,
        reason: RedirectReason,
    },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Decide whether `user` may see a route guarded by `access`.
///
/// Runs before any screen is built, so a denied route never renders.
pub fn check_access(access: Access, user: Option<&User>) -> GuardDecision {
    match (access, user) {
        (Access::Public, _) => GuardDecision::Allow,
        (Access::AnonymousOnly, None) => GuardDecision::Allow,
        (Access::AnonymousOnly, Some(_)) => GuardDecision::Redirect {
            to: HOME_PATH,
            reason: RedirectReason::AlreadyAuthenticated,
        },
        (Access::Authenticated, Some(_)) => GuardDecision::Allow,
        (Access::Authenticated | Access::Roles(_), None) => GuardDecision::Redirect {
            to: LOGIN_PATH,
            reason: RedirectReason::Unauthenticated,
        },
        (Access::Roles(allowed), Some(user)) if allowed.contains(&user.role) => {
            GuardDecision::Allow
        }
        (Access::Roles(_), Some(_)) => GuardDecision::Redirect {
            to: LOGIN_PATH,
            reason: RedirectReason::InsufficientRole,
        },
    }
}
