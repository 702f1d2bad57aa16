use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The signed-in identity as persisted under `current_user`.
///
/// Only `role` drives access decisions. Any JSON object counts as a user;
/// missing fields fall back to their defaults. Fields written by the login and
/// profile screens that this crate does not model are kept in `extra` and
/// written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier assigned by the registering screen
    #[serde(default)]
    pub id: String,
    /// Handle used in `/profile/:username`
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Closed set of roles. Only the exact strings `ADMIN` and `MODERATOR` name a
/// staff role; anything else, including no role or a non-string, is a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Value>", into = "String")]
pub enum UserRole {
    Admin,
    Moderator,
    #[default]
    Member,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Moderator => "MODERATOR",
            UserRole::Member => "MEMBER",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            "ADMIN" => UserRole::Admin,
            "MODERATOR" => UserRole::Moderator,
            _ => UserRole::Member,
        }
    }
}

impl From<Option<Value>> for UserRole {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(Value::String(role)) => UserRole::from(role.as_str()),
            _ => UserRole::Member,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            display_name: None,
            email: None,
            role,
            extra: Map::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Get user's display name or fallback
    pub fn display_name_or_fallback(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    pub fn is_moderator(&self) -> bool {
        matches!(self.role, UserRole::Moderator)
    }
}
