//! Contact page route handlers.
//!
//! Messages are logged, not forwarded: the store API has no contact endpoint.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::forms::{ContactForm, FormController};
use crate::middleware::OptionalAuth;
use crate::routes::Nav;
use crate::routes::auth::PostedFields;

/// A line in the "Get in Touch" panel.
#[derive(Debug, Clone, Copy)]
pub struct ContactDetail {
    pub title: &'static str,
    pub content: &'static str,
}

pub const CONTACT_DETAILS: [ContactDetail; 3] = [
    ContactDetail {
        title: "Address",
        content: "123 E-Commerce Street, Digital City, Tech State 12345",
    },
    ContactDetail {
        title: "Phone",
        content: "+1 (555) 123-4567",
    },
    ContactDetail {
        title: "Email",
        content: "support@aszmart.com",
    },
];

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub nav: Nav,
    pub details: &'static [ContactDetail],
    pub form: ContactForm,
}

/// Display the contact page.
pub async fn contact_page(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    ContactTemplate {
        nav: Nav::new(user.as_ref(), "/contact"),
        details: &CONTACT_DETAILS,
        form: ContactForm::default(),
    }
}

/// Handle a contact form submission.
#[instrument(skip_all)]
pub async fn submit(OptionalAuth(user): OptionalAuth, Form(fields): Form<PostedFields>) -> Response {
    let mut form = ContactForm::default();
    form.apply(fields);

    let status = if form.submit() {
        add_breadcrumb("contact", "Sent contact message", None);
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    let page = ContactTemplate {
        nav: Nav::new(user.as_ref(), "/contact"),
        details: &CONTACT_DETAILS,
        form,
    };
    (status, page).into_response()
}
