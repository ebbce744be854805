use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role a user acts in for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Farmer,
    Buyer,
}

/// The signed-in user, passed explicitly to the sessions that need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub role: UserRole,
    pub display_name: String,
}

impl UserIdentity {
    pub fn farmer(id: u64, display_name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            role: UserRole::Farmer,
            display_name: display_name.into(),
        }
    }

    pub fn buyer(id: u64, display_name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            role: UserRole::Buyer,
            display_name: display_name.into(),
        }
    }
}
