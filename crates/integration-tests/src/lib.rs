//! End-to-end test harness for the ASZMart storefront.
//!
//! Each test gets its own stub store API and its own storefront, both bound
//! to ephemeral loopback ports:
//!
//! ```text
//! reqwest client --> storefront (build_app) --> StubApi (axum, in-memory)
//! ```
//!
//! The stub records every request it receives, so tests can assert that a
//! rejected form never reached the network.

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use aszmart_storefront::{build_app, config::StorefrontConfig, state::AppState};

/// Password every seeded account uses.
pub const SEED_PASSWORD: &str = "correct-horse";
pub const ADMIN_EMAIL: &str = "admin@aszmart.com";
pub const SHOPPER_EMAIL: &str = "shopper@aszmart.com";

// =============================================================================
// Stub store API
// =============================================================================

#[derive(Debug, Clone)]
struct StubUser {
    email: String,
    password: String,
    role: String,
}

#[derive(Debug, Default)]
struct StubData {
    users: Vec<StubUser>,
    products: Vec<Value>,
    hits: Vec<String>,
    forced_status: Option<StatusCode>,
    next_id: usize,
}

/// In-memory stand-in for the remote store API.
#[derive(Debug, Clone, Default)]
pub struct StubApi {
    data: Arc<Mutex<StubData>>,
}

impl StubApi {
    /// Stub seeded with one admin, one shopper and two products.
    #[must_use]
    pub fn seeded() -> Self {
        let stub = Self::default();
        {
            let mut data = stub.lock();
            data.users = vec![
                StubUser {
                    email: ADMIN_EMAIL.to_string(),
                    password: SEED_PASSWORD.to_string(),
                    role: "admin".to_string(),
                },
                StubUser {
                    email: SHOPPER_EMAIL.to_string(),
                    password: SEED_PASSWORD.to_string(),
                    role: "user".to_string(),
                },
            ];
            data.products = vec![
                json!({
                    "_id": "p1",
                    "product_name": "Steel Kettle",
                    "product_price": "19.99",
                    "discount": "10",
                    "description": "Boils fast",
                    "product_image": "aGVsbG8="
                }),
                json!({
                    "_id": "p2",
                    "product_name": "Tea Towel",
                    "product_price": 4.5,
                    "discount": 0,
                    "description": "Cotton",
                    "product_image": "https://cdn.aszmart.com/towel.png"
                }),
            ];
            data.next_id = 3;
        }
        stub
    }

    fn lock(&self) -> MutexGuard<'_, StubData> {
        self.data.lock().expect("stub state poisoned")
    }

    /// Make every endpoint answer with `status`.
    pub fn force_status(&self, status: StatusCode) {
        self.lock().forced_status = Some(status);
    }

    /// Requests received so far, as `"METHOD /path"`.
    #[must_use]
    pub fn hits(&self) -> Vec<String> {
        self.lock().hits.clone()
    }

    /// Number of requests received for one `"METHOD /path"`.
    #[must_use]
    pub fn hits_for(&self, route: &str) -> usize {
        self.lock().hits.iter().filter(|hit| *hit == route).count()
    }

    /// Current product records.
    #[must_use]
    pub fn products(&self) -> Vec<Value> {
        self.lock().products.clone()
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/api/login/", post(stub_login))
            .route("/api/signup/", post(stub_signup))
            .route("/api/check-email/", get(stub_check_email))
            .route("/api/products/", get(stub_products))
            .route("/api/add-product/", post(stub_add_product))
            .route("/api/delete-product/{id}/", delete(stub_delete_product))
            .layer(middleware::from_fn_with_state(self.clone(), record_hit))
            .with_state(self.clone())
    }

    /// Serve the stub on an ephemeral port and return its base URL.
    pub async fn spawn(&self) -> Url {
        let addr = serve(self.router()).await;
        Url::parse(&format!("http://{addr}")).expect("stub URL")
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

async fn record_hit(State(stub): State<StubApi>, request: Request, next: Next) -> Response {
    let forced = {
        let mut data = stub.lock();
        data.hits
            .push(format!("{} {}", request.method(), request.uri().path()));
        data.forced_status
    };

    match forced {
        Some(status) => detail(status, "forced by test"),
        None => next.run(request).await,
    }
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

async fn stub_login(State(stub): State<StubApi>, Json(body): Json<Credentials>) -> Response {
    let data = stub.lock();
    match data
        .users
        .iter()
        .find(|u| u.email == body.email && u.password == body.password)
    {
        Some(user) => Json(json!({
            "_id": format!("u-{}", user.email),
            "email": user.email,
            "role": user.role,
            "token": format!("token-{}", user.email),
        }))
        .into_response(),
        None => detail(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

#[derive(Deserialize)]
struct SignupBody {
    full_name: String,
    email: String,
    password: String,
    #[serde(default)]
    role: Option<String>,
}

async fn stub_signup(State(stub): State<StubApi>, Json(body): Json<SignupBody>) -> Response {
    let mut data = stub.lock();
    if data.users.iter().any(|u| u.email == body.email) {
        return detail(StatusCode::BAD_REQUEST, "Email already exists");
    }

    let role = body.role.unwrap_or_else(|| "user".to_string());
    data.users.push(StubUser {
        email: body.email.clone(),
        password: body.password,
        role: role.clone(),
    });

    (
        StatusCode::CREATED,
        Json(json!({
            "_id": format!("u-{}", body.email),
            "full_name": body.full_name,
            "email": body.email,
            "role": role,
        })),
    )
        .into_response()
}

#[derive(Deserialize)]
struct EmailQuery {
    email: String,
}

async fn stub_check_email(
    State(stub): State<StubApi>,
    Query(query): Query<EmailQuery>,
) -> Json<Value> {
    let exists = stub.lock().users.iter().any(|u| u.email == query.email);
    Json(json!({ "exists": exists }))
}

async fn stub_products(State(stub): State<StubApi>) -> Json<Value> {
    Json(Value::Array(stub.lock().products.clone()))
}

async fn stub_add_product(State(stub): State<StubApi>, mut multipart: Multipart) -> Response {
    let mut product = serde_json::Map::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let Ok(value) = field.text().await else {
            return detail(StatusCode::BAD_REQUEST, "unreadable field");
        };
        product.insert(name, Value::String(value));
    }

    for required in [
        "product_name",
        "product_price",
        "discount",
        "description",
        "product_image",
    ] {
        if product.get(required).is_none_or(|v| v.as_str() == Some("")) {
            return detail(StatusCode::BAD_REQUEST, &format!("{required} is required."));
        }
    }

    let mut data = stub.lock();
    let id = format!("p{}", data.next_id);
    data.next_id += 1;
    product.insert("_id".to_string(), Value::String(id));

    let product = Value::Object(product);
    data.products.push(product.clone());
    (StatusCode::CREATED, Json(product)).into_response()
}

async fn stub_delete_product(State(stub): State<StubApi>, Path(id): Path<String>) -> StatusCode {
    let mut data = stub.lock();
    let before = data.products.len();
    data.products.retain(|p| p["_id"] != Value::String(id.clone()));

    if data.products.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// =============================================================================
// Storefront under test
// =============================================================================

/// A running storefront plus a client that keeps its session cookie.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub stub: StubApi,
}

impl TestApp {
    /// Storefront in front of a freshly seeded stub API.
    pub async fn spawn() -> Self {
        let stub = StubApi::seeded();
        let api_url = stub.spawn().await;
        Self::spawn_against(stub, api_url).await
    }

    /// Storefront whose store API URL points at a port nobody listens on.
    pub async fn spawn_unreachable_api() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind probe port");
        let addr = listener.local_addr().expect("probe address");
        drop(listener);

        let api_url = Url::parse(&format!("http://{addr}")).expect("dead URL");
        Self::spawn_against(StubApi::default(), api_url).await
    }

    async fn spawn_against(stub: StubApi, api_url: Url) -> Self {
        let state = AppState::new(StorefrontConfig::local(api_url)).expect("app state");
        let addr = serve(build_app(state)).await;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("test client");

        Self {
            base_url: format!("http://{addr}"),
            client,
            stub,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("POST request")
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("multipart POST request")
    }

    /// Log in through the real form and return the redirect target.
    pub async fn login(&self, email: &str, password: &str) -> Option<String> {
        let response = self
            .post_form("/", &[("email", email), ("password", password)])
            .await;
        response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    }
}

/// Text fields of a complete add-product form, without the image.
#[must_use]
pub fn product_fields(name: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("product_name", name.to_string())
        .text("product_price", "12.50")
        .text("discount", "20")
        .text("description", "Made for tests")
}

/// An image part with the given media type and size.
#[must_use]
pub fn image_part(content_type: &str, len: usize) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(vec![0x42; len])
        .file_name("upload.bin")
        .mime_str(content_type)
        .expect("valid media type")
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    addr
}
