//! Admin dashboard route handlers.
//!
//! Reachable by anyone who knows the URL; the store API decides what an
//! unauthenticated caller may do.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use aszmart_core::ProductId;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::forms::{FormController, ImageUpload, Notice, ProductForm, Submission};
use crate::middleware::OptionalAuth;
use crate::routes::Nav;
use crate::routes::auth::rerender_status;
use crate::routes::home::ProductListing;
use crate::state::AppState;

const IMAGE_FIELD: &str = "product_image";

/// Query parameters set by the delete redirect.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub deleted: Option<String>,
    pub error: Option<String>,
}

impl MessageQuery {
    fn notice(&self) -> Option<Notice> {
        if self.error.as_deref() == Some("delete_failed") {
            return Some(Notice::error("Error deleting product. Please try again."));
        }
        self.deleted
            .as_ref()
            .map(|_| Notice::success("Product deleted successfully!"))
    }
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub nav: Nav,
    pub form: ProductForm,
    pub listing: ProductListing,
    /// Result of the last delete, carried through the redirect.
    pub flash: Option<Notice>,
}

/// Display the admin dashboard.
#[instrument(skip_all)]
pub async fn admin_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    AdminTemplate {
        nav: Nav::new(user.as_ref(), "/adminhome"),
        form: ProductForm::default(),
        listing: ProductListing::fetch(state.api()).await,
        flash: query.notice(),
    }
}

/// Handle the add-product form.
///
/// The listing is fetched after the submission so a new product shows up
/// in the same response.
///
/// # Errors
///
/// Returns 400 if the multipart body cannot be read.
#[instrument(skip_all)]
pub async fn add_product(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let content_type = field.content_type().unwrap_or_default().to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            form.set_image(&ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            form.set_field(&name, value);
        }
    }

    let outcome = form.submit(state.api()).await;
    if let Submission::Accepted(product) = &outcome {
        add_breadcrumb(
            "admin",
            "Added product",
            Some(&[("product_id", product.id.as_str())]),
        );
    }

    let page = AdminTemplate {
        nav: Nav::new(user.as_ref(), "/adminhome"),
        form,
        listing: ProductListing::fetch(state.api()).await,
        flash: None,
    };
    Ok((rerender_status(&outcome), page).into_response())
}

/// Delete a product, then return to the dashboard.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn delete_product(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = ProductId::new(id);

    match state.api().delete_product(&id).await {
        Ok(()) => {
            tracing::info!(product_id = %id, "Product deleted");
            add_breadcrumb("admin", "Deleted product", Some(&[("product_id", id.as_str())]));
            Redirect::to("/adminhome?deleted=1").into_response()
        }
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "Deleting product failed");
            Redirect::to("/adminhome?error=delete_failed").into_response()
        }
    }
}
