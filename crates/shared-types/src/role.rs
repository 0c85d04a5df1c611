use serde::{Deserialize, Serialize};

/// Role tag carried by a session.
///
/// - `Guest` — no elevated access; also the fallback for unknown strings.
/// - `Student` — member access.
/// - `Lecturer` — staff access to the lecturer hub.
/// - `Admin` / `Superadmin` — site administration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    Student,
    Lecturer,
    Admin,
    Superadmin,
}

/// The optional entry group a role unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGroup {
    Admin,
    Lecturer,
}

impl Role {
    /// Parse a role string from the `profiles` table. Unknown values are `Guest`.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "student" => Role::Student,
            "lecturer" => Role::Lecturer,
            "admin" => Role::Admin,
            "superadmin" => Role::Superadmin,
            _ => Role::Guest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Student => "student",
            Role::Lecturer => "lecturer",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }

    /// Human-readable label for badges.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Guest => "Guest",
            Role::Student => "Student",
            Role::Lecturer => "Lecturer",
            Role::Admin => "Admin",
            Role::Superadmin => "Superadmin",
        }
    }

    /// Admin and superadmin share a group; lecturer has its own; nobody has both.
    pub fn group(&self) -> Option<RoleGroup> {
        match self {
            Role::Admin | Role::Superadmin => Some(RoleGroup::Admin),
            Role::Lecturer => Some(RoleGroup::Lecturer),
            Role::Guest | Role::Student => None,
        }
    }

    /// Whether this role may open pages gated on `required`.
    pub fn can_access(&self, required: RoleGroup) -> bool {
        self.group() == Some(required)
    }
}
