//! Request and response payloads for the store API.

use serde::{Deserialize, Serialize};

use aszmart_core::{Discount, Price, ProductImage, Role};

/// Successful login payload.
///
/// Older API builds omit `token`; the login still succeeds, the session
/// just has no token to store.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub token: Option<String>,
}

/// Response of `GET /api/check-email/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmailCheck {
    pub exists: bool,
}

/// A validated product ready to be created.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub discount: Discount,
    pub description: String,
    pub image: ProductImage,
}

impl NewProduct {
    /// Multipart body using the API's field names.
    #[must_use]
    pub fn to_multipart(&self) -> reqwest::multipart::Form {
        reqwest::multipart::Form::new()
            .text("product_name", self.name.clone())
            .text("product_price", self.price.amount().to_string())
            .text("discount", self.discount.percent().to_string())
            .text("description", self.description.clone())
            .text("product_image", self.image.as_str().to_owned())
    }
}
