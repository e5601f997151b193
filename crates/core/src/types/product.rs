//! Product records as served by the store API.

use serde::{Deserialize, Serialize};

use super::{Discount, Price, ProductId};

/// A product snapshot fetched from `GET /api/products/`.
///
/// Field names follow the API's wire format (`_id`, `product_name`, ...).
/// Missing optional text fields decode as empty strings rather than failing
/// the whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(rename = "product_name")]
    pub name: String,
    #[serde(rename = "product_price")]
    pub price: Price,
    #[serde(default)]
    pub discount: Discount,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "product_image", default)]
    pub image: ProductImage,
}

impl Product {
    /// Price after the product's discount, rounded to two decimals.
    #[must_use]
    pub fn discounted_price(&self) -> Price {
        self.price.discounted(self.discount)
    }
}

/// Encoded product image as stored by the API.
///
/// The admin form uploads a full `data:` URL, older records hold a bare
/// base64 JPEG payload, and file-backed records hold an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ProductImage(String);

impl ProductImage {
    const BARE_BASE64_PREFIX: &'static str = "data:image/jpeg;base64,";

    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Value usable as an `<img src>`.
    #[must_use]
    pub fn src(&self) -> String {
        let value = self.0.trim();
        if value.starts_with("data:")
            || value.starts_with("http://")
            || value.starts_with("https://")
        {
            value.to_owned()
        } else {
            format!("{}{value}", Self::BARE_BASE64_PREFIX)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wire_format() {
        let json = r#"{
            "_id": "65a1",
            "product_name": "Kettle",
            "product_price": "40",
            "discount": 25,
            "description": "Boils water",
            "product_image": "aGVsbG8="
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id.as_str(), "65a1");
        assert_eq!(product.name, "Kettle");
        assert_eq!(product.discounted_price().display(), "$30.00");
        assert_eq!(product.image.src(), "data:image/jpeg;base64,aGVsbG8=");
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{"_id": "1", "product_name": "Mug", "product_price": 5}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.discount, Discount::NONE);
        assert!(product.description.is_empty());
        assert!(product.image.is_empty());
    }

    #[test]
    fn test_image_src_passthrough() {
        let data_url = ProductImage::new("data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(data_url.src(), "data:image/png;base64,iVBORw0KGgo=");

        let remote = ProductImage::new("http://localhost:8000/media/product_images/a.png");
        assert_eq!(remote.src(), "http://localhost:8000/media/product_images/a.png");
    }
}
