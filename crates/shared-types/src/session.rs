use crate::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in user as seen by the rest of the site. Read-only outside
/// the session provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub display_name: String,
}

impl Session {
    /// Name for greetings and avatars; falls back to the email's local part.
    pub fn greeting_name(&self) -> &str {
        let name = self.display_name.trim();
        if !name.is_empty() {
            return name;
        }
        self.email.split('@').next().unwrap_or(&self.email)
    }

    /// Up to two uppercase initials for avatar fallbacks.
    pub fn initials(&self) -> String {
        self.greeting_name()
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// Client-side view of the session lifecycle.
///
/// `Pending` means the session check has not resolved yet. It builds the
/// same navigation as `Anonymous`, but guards wait on it instead of
/// redirecting.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionStatus {
    #[default]
    Pending,
    Anonymous,
    Authenticated(Session),
}

impl SessionStatus {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionStatus::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Role fed to the navigation builder; `None` unless signed in.
    pub fn role(&self) -> Option<Role> {
        self.session().map(|s| s.role)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SessionStatus::Pending)
    }

    pub fn from_lookup(session: Option<Session>) -> Self {
        match session {
            Some(session) => SessionStatus::Authenticated(session),
            None => SessionStatus::Anonymous,
        }
    }
}

/// Sign-in form payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct SignInRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}
