//! Static content pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::Nav;

/// A year on the company timeline.
#[derive(Debug, Clone, Copy)]
pub struct Milestone {
    pub year: u16,
    pub event: &'static str,
    pub description: &'static str,
}

/// A "Why Choose ASZMart" tile.
#[derive(Debug, Clone, Copy)]
pub struct ValueProp {
    pub title: &'static str,
    pub description: &'static str,
}

const MILESTONES: [Milestone; 3] = [
    Milestone {
        year: 2023,
        event: "ASZMart Founding",
        description: "Launching our innovative e-commerce platform",
    },
    Milestone {
        year: 2024,
        event: "Global Expansion",
        description: "Extending our reach to international markets",
    },
    Milestone {
        year: 2025,
        event: "Technology Innovation",
        description: "Introducing AI-powered shopping experiences",
    },
];

const VALUE_PROPS: [ValueProp; 3] = [
    ValueProp {
        title: "Global Reach",
        description: "Connecting customers worldwide with seamless online shopping experiences.",
    },
    ValueProp {
        title: "Secure Transactions",
        description: "Advanced encryption and fraud protection for worry-free purchases.",
    },
    ValueProp {
        title: "Fast Shipping",
        description: "Swift and reliable delivery across multiple regions and countries.",
    },
];

const CORE_VALUES: [&str; 4] = [
    "Customer-Centric Approach",
    "Continuous Innovation",
    "Transparency and Trust",
    "Sustainable Practices",
];

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub nav: Nav,
    pub milestones: &'static [Milestone],
    pub value_props: &'static [ValueProp],
    pub core_values: &'static [&'static str],
}

/// Display the About page.
pub async fn about(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    AboutTemplate {
        nav: Nav::new(user.as_ref(), "/about"),
        milestones: &MILESTONES,
        value_props: &VALUE_PROPS,
        core_values: &CORE_VALUES,
    }
}
