//! Admin "add product" form controller.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use aszmart_core::{Discount, DiscountError, Price, PriceError, Product, ProductImage};

use super::{FailureMessages, FormController, FormState, Submission};
use crate::api::{ApiClient, NewProduct};

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

const FAILURES: FailureMessages =
    FailureMessages::with_fallback("Error adding product. Please try again.");

pub const MSG_INVALID_IMAGE_TYPE: &str = "Invalid file type. Only JPEG and PNG are allowed.";
pub const MSG_IMAGE_TOO_LARGE: &str = "File size exceeds 2MB. Please upload a smaller file.";
const MSG_ALL_REQUIRED: &str = "All fields are required, including a product image.";
const MSG_ADDED: &str = "Product added successfully!";

/// A file picked in the image input, as received from the multipart body.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Browsers send an empty part with no filename when nothing was picked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty() && self.bytes.is_empty()
    }

    /// Media type without parameters, lowercased.
    fn media_type(&self) -> String {
        self.content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// Check type and size, then encode as a `data:` URL.
    fn encode(&self) -> Result<ProductImage, &'static str> {
        let media_type = self.media_type();
        if !ALLOWED_IMAGE_TYPES.contains(&media_type.as_str()) {
            return Err(MSG_INVALID_IMAGE_TYPE);
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(MSG_IMAGE_TOO_LARGE);
        }

        Ok(ProductImage::new(format!(
            "data:{media_type};base64,{}",
            STANDARD.encode(&self.bytes)
        )))
    }
}

/// New product details entered on the admin dashboard.
#[derive(Debug, Default)]
pub struct ProductForm {
    product_name: String,
    product_price: String,
    discount: String,
    description: String,
    image: Option<ProductImage>,
    image_rejection: Option<&'static str>,
    state: FormState,
}

impl ProductForm {
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    #[must_use]
    pub fn product_price(&self) -> &str {
        &self.product_price
    }

    #[must_use]
    pub fn discount(&self) -> &str {
        &self.discount
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Accept or reject the picked file.
    ///
    /// A rejected file clears any previously accepted image and shows the
    /// rejection immediately. An empty part (nothing picked) is ignored.
    pub fn set_image(&mut self, upload: &ImageUpload) {
        if upload.is_empty() {
            return;
        }

        match upload.encode() {
            Ok(image) => {
                tracing::debug!(
                    file_name = %upload.file_name,
                    bytes = upload.bytes.len(),
                    "Accepted product image"
                );
                self.image = Some(image);
                self.image_rejection = None;
                self.state.clear_error("product_image");
            }
            Err(message) => {
                tracing::info!(
                    file_name = %upload.file_name,
                    content_type = %upload.content_type,
                    bytes = upload.bytes.len(),
                    reason = message,
                    "Rejected product image"
                );
                self.image = None;
                self.image_rejection = Some(message);
                self.state.set_error("product_image", message);
                self.state.fail(message);
            }
        }
    }

    /// Validate, then create the product. Clears the form on success.
    pub async fn submit(&mut self, api: &ApiClient) -> Submission<Product> {
        let Some(product) = self.build() else {
            return Submission::Invalid;
        };
        if !self.state.begin() {
            return Submission::InFlight;
        }

        let result = api.add_product(&product).await;
        self.state.finish();

        match result {
            Ok(created) => {
                tracing::info!(product_id = %created.id, name = %created.name, "Product added");
                self.reset();
                self.state.succeed(MSG_ADDED);
                Submission::Accepted(created)
            }
            Err(e) => {
                tracing::warn!(name = %product.name, error = %e, "Adding product failed");
                self.state.fail(FAILURES.describe(&e));
                Submission::Failed
            }
        }
    }

    /// Validate and assemble the payload.
    fn build(&mut self) -> Option<NewProduct> {
        if !self.validate() {
            return None;
        }

        Some(NewProduct {
            name: self.product_name.trim().to_string(),
            price: Price::parse(&self.product_price).ok()?,
            discount: Discount::parse(&self.discount).ok()?,
            description: self.description.trim().to_string(),
            image: self.image.clone()?,
        })
    }

    fn reset(&mut self) {
        self.product_name.clear();
        self.product_price.clear();
        self.discount.clear();
        self.description.clear();
        self.image = None;
        self.image_rejection = None;
        self.state.clear_errors();
    }
}

impl FormController for ProductForm {
    fn state(&self) -> &FormState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    fn assign(&mut self, name: &str, value: String) -> bool {
        match name {
            "product_name" => self.product_name = value,
            "product_price" => self.product_price = value,
            "discount" => self.discount = value,
            "description" => self.description = value,
            _ => return false,
        }
        true
    }

    fn validate(&mut self) -> bool {
        self.state.clear_errors();

        if let Some(message) = self.image_rejection {
            self.state.set_error("product_image", message);
            self.state.fail(message);
            return false;
        }

        let blank = [
            ("product_name", self.product_name.as_str()),
            ("product_price", self.product_price.as_str()),
            ("discount", self.discount.as_str()),
            ("description", self.description.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect::<Vec<_>>();

        if !blank.is_empty() || self.image.is_none() {
            for name in blank {
                self.state.set_error(name, "Required");
            }
            if self.image.is_none() {
                self.state.set_error("product_image", "Required");
            }
            self.state.fail(MSG_ALL_REQUIRED);
            return false;
        }

        if let Err(e) = Price::parse(&self.product_price) {
            let message = match e {
                PriceError::Negative => "Price cannot be negative",
                PriceError::TooLarge => "Price is too large",
                PriceError::Empty | PriceError::NotANumber => "Price must be a number",
            };
            self.state.set_error("product_price", message);
        }

        if let Err(e) = Discount::parse(&self.discount) {
            let message = match e {
                DiscountError::OutOfRange => "Discount must be between 0 and 100",
                DiscountError::Empty | DiscountError::NotANumber => "Discount must be a number",
            };
            self.state.set_error("discount", message);
        }

        if self.state.has_errors() {
            self.state.fail("Please correct the highlighted fields.");
            return false;
        }

        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn upload(content_type: &str, len: usize) -> ImageUpload {
        ImageUpload {
            file_name: "mug.png".to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0xAB; len],
        }
    }

    fn filled() -> ProductForm {
        let mut form = ProductForm::default();
        form.apply([
            ("product_name".to_string(), "Mug".to_string()),
            ("product_price".to_string(), "12.50".to_string()),
            ("discount".to_string(), "10".to_string()),
            ("description".to_string(), "Stoneware".to_string()),
        ]);
        form.set_image(&upload("image/png", 16));
        form
    }

    #[test]
    fn test_image_encoded_as_data_url() {
        let image = upload("image/png", 3).encode().unwrap();
        assert_eq!(image.as_str(), "data:image/png;base64,q6ur");
    }

    #[test]
    fn test_content_type_parameters_ignored() {
        assert!(upload("Image/JPEG; charset=binary", 3).encode().is_ok());
        assert!(upload("image/jpg", 3).encode().is_ok());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let mut form = filled();
        form.set_image(&upload("image/gif", 16));

        assert!(!form.has_image());
        assert_eq!(
            form.state().notice().map(|n| n.text()),
            Some(MSG_INVALID_IMAGE_TYPE)
        );
        assert!(!form.validate());
        assert_eq!(form.state().error("product_image"), Some(MSG_INVALID_IMAGE_TYPE));
    }

    #[test]
    fn test_oversized_image_rejected() {
        assert_eq!(
            upload("image/jpeg", MAX_IMAGE_BYTES + 1).encode().unwrap_err(),
            MSG_IMAGE_TOO_LARGE
        );
        assert!(upload("image/jpeg", MAX_IMAGE_BYTES).encode().is_ok());
    }

    #[test]
    fn test_empty_part_ignored() {
        let mut form = filled();
        form.set_image(&ImageUpload {
            file_name: String::new(),
            content_type: "application/octet-stream".to_string(),
            bytes: Vec::new(),
        });
        assert!(form.has_image());
    }

    #[test]
    fn test_all_fields_required() {
        let mut form = ProductForm::default();
        form.set_field("product_name", "Mug".to_string());

        assert!(!form.validate());
        assert_eq!(
            form.state().notice().map(|n| n.text()),
            Some("All fields are required, including a product image.")
        );
        assert!(form.state().error("product_name").is_none());
        assert!(form.state().error("product_image").is_some());
    }

    #[test]
    fn test_numeric_checks() {
        let mut form = filled();
        form.set_field("product_price", "-1".to_string());
        form.set_field("discount", "120".to_string());

        assert!(!form.validate());
        assert_eq!(form.state().error("product_price"), Some("Price cannot be negative"));
        assert_eq!(
            form.state().error("discount"),
            Some("Discount must be between 0 and 100")
        );
    }

    #[test]
    fn test_oversized_price_rejected() {
        let mut form = filled();
        form.set_field("product_price", "79228162514264337593543950335".to_string());

        assert!(!form.validate());
        assert_eq!(form.state().error("product_price"), Some("Price is too large"));
        assert!(form.build().is_none());
    }

    #[test]
    fn test_build_payload() {
        let mut form = filled();
        let product = form.build().unwrap();

        assert_eq!(product.name, "Mug");
        assert_eq!(product.price.display(), "$12.50");
        assert!(product.image.as_str().starts_with("data:image/png;base64,"));
    }
}
