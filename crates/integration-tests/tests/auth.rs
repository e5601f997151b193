//! Login, signup and logout through the rendered forms.

use reqwest::StatusCode;

use aszmart_integration_tests::{ADMIN_EMAIL, SEED_PASSWORD, SHOPPER_EMAIL, TestApp};

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_page_renders() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("Email Address"));
    assert!(body.contains("Create Account"));
}

#[tokio::test]
async fn test_login_with_blank_fields_makes_no_call() {
    let app = TestApp::spawn().await;

    let response = app.post_form("/", &[("email", ""), ("password", "")]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.text().await.unwrap();
    assert!(body.contains("Please fill in all fields"));
    assert!(app.stub.hits().is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form("/", &[("email", SHOPPER_EMAIL), ("password", "wrong-password")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid email or password"));
    assert!(body.contains(SHOPPER_EMAIL), "email is kept in the form");
    assert_eq!(app.stub.hits_for("POST /api/login/"), 1);
}

#[tokio::test]
async fn test_admin_login_redirects_to_dashboard() {
    let app = TestApp::spawn().await;

    let location = app.login(ADMIN_EMAIL, SEED_PASSWORD).await;
    assert_eq!(location.as_deref(), Some("/adminhome"));

    let body = app.get("/home").await.text().await.unwrap();
    assert!(body.contains(ADMIN_EMAIL));
    assert!(body.contains("href=\"/adminhome\""));
}

#[tokio::test]
async fn test_user_login_redirects_to_catalog() {
    let app = TestApp::spawn().await;

    let location = app.login(SHOPPER_EMAIL, SEED_PASSWORD).await;
    assert_eq!(location.as_deref(), Some("/home"));

    let body = app.get("/home").await.text().await.unwrap();
    assert!(body.contains(SHOPPER_EMAIL));
    assert!(body.contains("Logout"));
    assert!(!body.contains("href=\"/adminhome\""));
}

#[tokio::test]
async fn test_login_server_error_message() {
    let app = TestApp::spawn().await;
    app.stub.force_status(StatusCode::INTERNAL_SERVER_ERROR);

    let response = app
        .post_form("/", &[("email", SHOPPER_EMAIL), ("password", SEED_PASSWORD)])
        .await;

    let body = response.text().await.unwrap();
    assert!(body.contains("Server error. Please try again later."));
}

#[tokio::test]
async fn test_login_not_found_message() {
    let app = TestApp::spawn().await;
    app.stub.force_status(StatusCode::NOT_FOUND);

    let response = app
        .post_form("/", &[("email", SHOPPER_EMAIL), ("password", SEED_PASSWORD)])
        .await;

    let body = response.text().await.unwrap();
    assert!(body.contains("User not found"));
}

#[tokio::test]
async fn test_login_other_status_message() {
    let app = TestApp::spawn().await;
    app.stub.force_status(StatusCode::FORBIDDEN);

    let response = app
        .post_form("/", &[("email", SHOPPER_EMAIL), ("password", SEED_PASSWORD)])
        .await;

    let body = response.text().await.unwrap();
    assert!(body.contains("An unexpected error occurred"));
}

#[tokio::test]
async fn test_login_with_unreachable_api() {
    let app = TestApp::spawn_unreachable_api().await;

    let response = app
        .post_form("/", &[("email", SHOPPER_EMAIL), ("password", SEED_PASSWORD)])
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("No response from server. Please check your connection."));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = TestApp::spawn().await;
    app.login(SHOPPER_EMAIL, SEED_PASSWORD).await;

    let response = app.post_form("/logout", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = app.get("/home").await.text().await.unwrap();
    assert!(!body.contains(SHOPPER_EMAIL));
    assert!(!body.contains("Logout"));
}

// =============================================================================
// Signup
// =============================================================================

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form(
            "/signup",
            &[
                ("full_name", "New Shopper"),
                ("email", "new@aszmart.com"),
                ("password", "long-enough"),
                ("role", "user"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("Signup successful! Please log in."));
    assert_eq!(app.stub.hits_for("GET /api/check-email/"), 1);
    assert_eq!(app.stub.hits_for("POST /api/signup/"), 1);

    let location = app.login("new@aszmart.com", "long-enough").await;
    assert_eq!(location.as_deref(), Some("/home"));
}

#[tokio::test]
async fn test_signup_with_taken_email_skips_create() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form(
            "/signup",
            &[
                ("full_name", "Copy Cat"),
                ("email", SHOPPER_EMAIL),
                ("password", "long-enough"),
                ("role", "user"),
            ],
        )
        .await;

    let body = response.text().await.unwrap();
    assert!(body.contains("Email is already in use. Please use a different email."));
    assert_eq!(app.stub.hits_for("GET /api/check-email/"), 1);
    assert_eq!(app.stub.hits_for("POST /api/signup/"), 0);
}

#[tokio::test]
async fn test_signup_short_password_makes_no_call() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form(
            "/signup",
            &[
                ("full_name", "Tiny"),
                ("email", "tiny@aszmart.com"),
                ("password", "short"),
                ("role", "user"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.text().await.unwrap();
    assert!(body.contains("Password must be at least 8 characters"));
    assert!(app.stub.hits().is_empty());
}

#[tokio::test]
async fn test_signup_api_failure_uses_fallback() {
    let app = TestApp::spawn().await;
    app.stub.force_status(StatusCode::BAD_REQUEST);

    let response = app
        .post_form(
            "/signup",
            &[
                ("full_name", "Unlucky"),
                ("email", "unlucky@aszmart.com"),
                ("password", "long-enough"),
                ("role", "admin"),
            ],
        )
        .await;

    let body = response.text().await.unwrap();
    assert!(body.contains("Something went wrong. Please try again."));
    assert!(body.contains("value=\"admin\" selected"));
}
