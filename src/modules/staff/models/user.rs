// A user is either the owner or a staff member. Authentication and
// authorization live outside this crate; reporting only needs identities
// for attributing washes and revenue.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Business owner, excluded from the seeded performance roster
    Owner,
    /// Staff member handling washes
    Staff,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Owner => write!(f, "OWNER"),
            Role::Staff => write!(f, "STAFF"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OWNER" => Ok(Role::Owner),
            "STAFF" => Ok(Role::Staff),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// A member of the car-wash team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: String,

    /// Login name (managed by the external auth layer)
    pub username: String,

    /// Display name used on reports
    pub name: String,

    /// Role within the business
    pub role: Role,
}

impl User {
    /// Create a new user with a generated ID
    pub fn new(username: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            name: name.into(),
            role,
        }
    }

    /// True for staff members (the seeded performance roster)
    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }
}
