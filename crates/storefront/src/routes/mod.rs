//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Login page
//! POST /                              - Login action
//! GET  /signup                        - Signup page
//! POST /signup                        - Signup action
//! POST /logout                        - Clear the session
//!
//! # Catalog
//! GET  /home                          - Product cards
//!
//! # Admin (no access guard)
//! GET  /adminhome                     - Add-product form and product list
//! POST /adminhome                     - Add product (multipart)
//! POST /adminhome/products/{id}/delete - Delete product
//!
//! # Pages
//! GET  /about                         - About page
//! GET  /contact                       - Contact page
//! POST /contact                       - Contact form submission
//! ```

pub mod admin;
pub mod auth;
pub mod contact;
pub mod home;
pub mod pages;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::models::SessionUser;
use crate::state::AppState;

/// Multipart ceiling for the add-product form: a 2 MiB image plus text
/// fields, with headroom so oversized images reach the form's own check.
const ADMIN_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Header/nav state shared by every page template.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub signed_in: bool,
    pub is_admin: bool,
    pub email: String,
    /// Path of the current screen, for highlighting its link.
    pub active: &'static str,
}

impl Nav {
    #[must_use]
    pub fn new(user: Option<&SessionUser>, active: &'static str) -> Self {
        user.map_or(
            Self {
                active,
                ..Self::default()
            },
            |user| Self {
                signed_in: true,
                is_admin: user.is_admin(),
                email: user.email.to_string(),
                active,
            },
        )
    }
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
        // Catalog
        .route("/home", get(home::home))
        // Admin
        .route(
            "/adminhome",
            get(admin::admin_page)
                .post(admin::add_product)
                .layer(DefaultBodyLimit::max(ADMIN_BODY_LIMIT)),
        )
        .route("/adminhome/products/{id}/delete", post(admin::delete_product))
        // Pages
        .route("/about", get(pages::about))
        .route("/contact", get(contact::contact_page).post(contact::submit))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use aszmart_core::{Email, Role};

    use super::*;

    #[test]
    fn test_nav_for_guest() {
        let nav = Nav::new(None, "/home");
        assert!(!nav.signed_in);
        assert!(!nav.is_admin);
        assert_eq!(nav.active, "/home");
    }

    #[test]
    fn test_nav_for_admin() {
        let user = SessionUser {
            email: Email::parse("boss@aszmart.com").unwrap(),
            role: Role::Admin,
        };
        let nav = Nav::new(Some(&user), "/adminhome");
        assert!(nav.signed_in);
        assert!(nav.is_admin);
        assert_eq!(nav.email, "boss@aszmart.com");
    }
}
