//! Session-related types.
//!
//! The session stands in for browser local storage: it holds the signed-in
//! identity and the opaque token the store API issued at login.

use serde::{Deserialize, Serialize};

use aszmart_core::{Email, Role};

/// Session-stored identity of the signed-in visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: Email,
    pub role: Role,
}

impl SessionUser {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Page the visitor lands on after login.
    #[must_use]
    pub const fn landing_path(&self) -> &'static str {
        if self.is_admin() { "/adminhome" } else { "/home" }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for the signed-in [`super::SessionUser`].
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the opaque token returned by the store API's login endpoint.
    pub const AUTH_TOKEN: &str = "authToken";
}
