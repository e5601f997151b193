//! Catalog (home) route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use aszmart_core::Product;

use crate::api::ApiClient;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::Nav;
use crate::state::AppState;

const MSG_FETCH_FAILED: &str = "Failed to fetch products.";

// =============================================================================
// View Types
// =============================================================================

/// Product card display data.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub discounted_price: String,
    pub discount: String,
    pub has_discount: bool,
    pub image_src: String,
    pub has_image: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            discounted_price: product.discounted_price().display(),
            discount: product.discount.display(),
            has_discount: product.discount.is_active(),
            image_src: product.image.src(),
            has_image: !product.image.is_empty(),
        }
    }
}

/// Snapshot of the product list taken when a page renders.
#[derive(Debug, Clone, Default)]
pub struct ProductListing {
    pub cards: Vec<ProductCard>,
    pub error: Option<&'static str>,
}

impl ProductListing {
    /// Fetch the current listing. A failed fetch yields an empty listing with an error.
    pub async fn fetch(api: &ApiClient) -> Self {
        match api.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "Fetched product listing");
                Self {
                    cards: products.iter().map(ProductCard::from).collect(),
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch products");
                Self {
                    cards: Vec::new(),
                    error: Some(MSG_FETCH_FAILED),
                }
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Nav,
    pub listing: ProductListing,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product catalog.
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>, OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    HomeTemplate {
        nav: Nav::new(user.as_ref(), "/home"),
        listing: ProductListing::fetch(state.api()).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_card_from_product() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "product_name": "Kettle",
            "product_price": "19.99",
            "discount": "10",
            "description": "Steel",
            "product_image": "aGVsbG8="
        }))
        .unwrap();

        let card = ProductCard::from(&product);
        assert_eq!(card.price, "$19.99");
        assert_eq!(card.discounted_price, "$17.99");
        assert_eq!(card.discount, "10%");
        assert!(card.has_discount);
        assert_eq!(card.image_src, "data:image/jpeg;base64,aGVsbG8=");
    }

    #[test]
    fn test_card_without_discount() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "_id": "p2",
            "product_name": "Cup",
            "product_price": 4
        }))
        .unwrap();

        let card = ProductCard::from(&product);
        assert!(!card.has_discount);
        assert!(!card.has_image);
        assert_eq!(card.price, card.discounted_price);
    }

    #[test]
    fn test_card_with_huge_api_price() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "_id": "p3",
            "product_name": "Yacht",
            "product_price": "79228162514264337593543950335",
            "discount": "10"
        }))
        .unwrap();

        let card = ProductCard::from(&product);
        assert_eq!(card.price, card.discounted_price);
        assert!(card.price.starts_with("$79228162514264337593543950335"));
    }
}
