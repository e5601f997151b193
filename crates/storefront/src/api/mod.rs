//! Client for the remote store API.
//!
//! Every persistent operation (accounts, login, products, images) lives
//! behind this API; the storefront only renders and forwards. Each call is a
//! single attempt: no retries, no backoff, no client-side timeouts.
//!
//! # Endpoints
//!
//! ```text
//! POST   /api/login/                 - Exchange credentials for {role, token}
//! POST   /api/signup/                - Create an account
//! GET    /api/check-email/?email=    - {exists: bool}
//! GET    /api/products/              - Product listing
//! POST   /api/add-product/           - Create a product (multipart)
//! DELETE /api/delete-product/{id}/   - Delete a product
//! ```

pub mod error;
pub mod types;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use aszmart_core::{Email, Product, ProductId, Role};

use crate::config::StoreApiConfig;

pub use error::ApiError;
pub use types::{EmailCheck, LoginResponse, NewProduct};

/// Request body for [`ApiClient::request`].
pub enum RequestBody {
    /// JSON-encoded body.
    Json(serde_json::Value),
    /// `multipart/form-data` body.
    Multipart(reqwest::multipart::Form),
}

/// Store API client.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new store API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StoreApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Unknown(format!("failed to build HTTP client: {e}")))?;

        // Relative joins replace the last path segment unless the base ends in '/'.
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// The base URL all endpoint paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Perform one call against the API and decode a JSON success payload.
    ///
    /// `path` is relative to the base URL (e.g. `"api/products/"`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for non-2xx responses, [`ApiError::Transport`]
    /// when no response arrives, and [`ApiError::Unknown`] for anything else
    /// (bad paths, undecodable bodies).
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let builder = with_body(self.client.request(method, url), body);
        let response = self.execute(builder).await?;
        decode(response).await
    }

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the credentials are rejected.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({
            "email": email.as_str(),
            "password": password.expose_secret(),
        });

        self.request(Method::POST, "api/login/", Some(RequestBody::Json(body)))
            .await
    }

    /// Create an account.
    ///
    /// The API echoes the created record; the storefront has no use for it.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects the account.
    #[instrument(skip(self, full_name, password), fields(email = %email, role = %role))]
    pub async fn signup(
        &self,
        full_name: &str,
        email: &Email,
        password: &SecretString,
        role: Role,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "full_name": full_name,
            "email": email.as_str(),
            "password": password.expose_secret(),
            "role": role,
        });

        let url = self.endpoint("api/signup/")?;
        let builder = self.client.post(url).json(&body);
        self.execute(builder).await?;
        Ok(())
    }

    /// Check whether an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn check_email(&self, email: &Email) -> Result<EmailCheck, ApiError> {
        let url = self.endpoint("api/check-email/")?;
        let builder = self.client.get(url).query(&[("email", email.as_str())]);
        let response = self.execute(builder).await?;
        decode(response).await
    }

    /// Fetch the product listing.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is not a product array.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.request(Method::GET, "api/products/", None).await
    }

    /// Create a product. Sent as `multipart/form-data`, image included as text.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects the product.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.request(
            Method::POST,
            "api/add-product/",
            Some(RequestBody::Multipart(product.to_multipart())),
        )
        .await
    }

    /// Delete a product by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API refuses the delete.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let mut url = self.endpoint("api/delete-product/")?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Unknown("store API URL cannot have a path".to_string()))?
            .pop_if_empty()
            .push(id.as_str())
            .push("");

        self.execute(self.client.delete(url)).await?;
        Ok(())
    }

    /// Resolve a relative endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Unknown(format!("invalid endpoint path '{path}': {e}")))
    }

    /// Send a request and turn non-2xx responses into [`ApiError::Status`].
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_send)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error::extract_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "Store API returned error");
            return Err(ApiError::Status { status, message });
        }

        tracing::debug!(status = status.as_u16(), "Store API call succeeded");
        Ok(response)
    }
}

fn with_body(builder: RequestBuilder, body: Option<RequestBody>) -> RequestBuilder {
    match body {
        Some(RequestBody::Json(value)) => builder.json(&value),
        Some(RequestBody::Multipart(form)) => builder.multipart(form),
        None => builder,
    }
}

/// Decode a JSON success body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(ApiError::from_send)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::Unknown(format!("could not decode store API response: {e}")))
}
