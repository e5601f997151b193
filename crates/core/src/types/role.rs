//! Account roles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Role attached to an account at signup and echoed back on login.
///
/// Anything the API returns other than `"admin"` is treated as a regular
/// user, so an unexpected role never grants the admin landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    /// Wire value (`"user"` or `"admin"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse a role chosen in a form. Unlike deserialization this is strict.
    #[must_use]
    pub fn from_form(value: &str) -> Option<Self> {
        match value.trim() {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
