//! The route table.
//!
//! Each entry pairs a path pattern with the screen it shows and the access
//! policy guarding it. Patterns are `/`-separated; a segment starting with
//! `:` captures one non-empty path segment.

use once_cell::sync::Lazy;
use sitegate_users::UserRole;

/// Roles allowed into the admin dashboard. No other role implies these.
pub const STAFF_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Moderator];

/// Access policy attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Only without a session; signed-in visitors go home.
    AnonymousOnly,
    /// Any session.
    Authenticated,
    /// A session whose role is one of these.
    Roles(&'static [UserRole]),
}

/// The screens a route can lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    SmsZone,
    Stories,
    BdJobs,
    JobExam,
    Login,
    Register,
    Profile,
    DynamicPage,
    AdminDashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub pattern: &'static str,
    pub screen: Screen,
    pub access: Access,
}

pub const ROUTE_TABLE: &[RouteSpec] = &[
    RouteSpec { pattern: "/", screen: Screen::Home, access: Access::Public },
    RouteSpec { pattern: "/sms", screen: Screen::SmsZone, access: Access::Public },
    RouteSpec { pattern: "/stories", screen: Screen::Stories, access: Access::Public },
    RouteSpec { pattern: "/jobs", screen: Screen::BdJobs, access: Access::Public },
    RouteSpec { pattern: "/exam", screen: Screen::JobExam, access: Access::Public },
    RouteSpec { pattern: "/login", screen: Screen::Login, access: Access::AnonymousOnly },
    RouteSpec { pattern: "/register", screen: Screen::Register, access: Access::AnonymousOnly },
    RouteSpec { pattern: "/profile", screen: Screen::Profile, access: Access::Authenticated },
    RouteSpec { pattern: "/profile/:username", screen: Screen::Profile, access: Access::Authenticated },
    RouteSpec { pattern: "/page/:slug", screen: Screen::DynamicPage, access: Access::Public },
    RouteSpec { pattern: "/admin", screen: Screen::AdminDashboard, access: Access::Roles(STAFF_ROLES) },
];

#[derive(Debug)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

struct CompiledRoute {
    spec: &'static RouteSpec,
    segments: Vec<Segment>,
}

static COMPILED: Lazy<Vec<CompiledRoute>> = Lazy::new(|| {
    ROUTE_TABLE
        .iter()
        .map(|spec| CompiledRoute {
            spec,
            segments: split_segments(spec.pattern)
                .map(|segment| match segment.strip_prefix(':') {
                    Some(name) => Segment::Param(name),
                    None => Segment::Literal(segment),
                })
                .collect(),
        })
        .collect()
});

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .filter(|segment| !segment.is_empty())
}

/// A route table entry matched against a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub spec: &'static RouteSpec,
    params: Vec<(&'static str, String)>,
}

impl RouteMatch {
    pub fn screen(&self) -> Screen {
        self.spec.screen
    }

    pub fn access(&self) -> Access {
        self.spec.access
    }

    /// Decoded value of a `:name` segment.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Match a normalized path against the route table. `None` means no route.
pub fn match_route(path: &str) -> Option<RouteMatch> {
    if path.split('/').skip(1).any(str::is_empty) && path != "/" {
        return None;
    }

    let parts: Vec<&str> = split_segments(path).collect();

    COMPILED.iter().find_map(|route| {
        if route.segments.len() != parts.len() {
            return None;
        }

        let mut params = Vec::new();
        for (segment, part) in route.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    let value = urlencoding::decode(part)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or_else(|_| (*part).to_string());
                    params.push((*name, value));
                }
            }
        }

        Some(RouteMatch {
            spec: route.spec,
            params,
        })
    })
}
