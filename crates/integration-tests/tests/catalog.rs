//! Catalog rendering, static pages and the middleware stack.

use reqwest::StatusCode;

use aszmart_integration_tests::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
    assert!(app.stub.hits().is_empty());
}

#[tokio::test]
async fn test_home_renders_one_card_per_product() {
    let app = TestApp::spawn().await;

    let response = app.get("/home").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert_eq!(body.matches("class=\"product-card\"").count(), 2);
    assert!(body.contains("Steel Kettle"));
    assert!(body.contains("Tea Towel"));
    assert_eq!(app.stub.hits_for("GET /api/products/"), 1);
}

#[tokio::test]
async fn test_home_shows_discounted_price() {
    let app = TestApp::spawn().await;

    let body = app.get("/home").await.text().await.unwrap();

    // 19.99 - 19.99 * 10 / 100 = 17.991
    assert!(body.contains("$17.99"));
    assert!(body.contains("$19.99"));
    assert!(body.contains("10% off"));
    assert!(body.contains("$4.50"));
}

#[tokio::test]
async fn test_home_image_sources() {
    let app = TestApp::spawn().await;

    let body = app.get("/home").await.text().await.unwrap();
    assert!(body.contains("src=\"data:image/jpeg;base64,aGVsbG8=\""));
    assert!(body.contains("src=\"https://cdn.aszmart.com/towel.png\""));
}

#[tokio::test]
async fn test_home_fetch_failure() {
    let app = TestApp::spawn().await;
    app.stub.force_status(StatusCode::INTERNAL_SERVER_ERROR);

    let response = app.get("/home").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("Failed to fetch products."));
    assert!(!body.contains("class=\"product-card\""));
}

#[tokio::test]
async fn test_about_page() {
    let app = TestApp::spawn().await;

    let body = app.get("/about").await.text().await.unwrap();
    assert!(body.contains("Our Milestones"));
    assert!(body.contains("ASZMart Founding"));
    assert!(body.contains("Sustainable Practices"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.get("/nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/about"))
        .header("x-request-id", "trace-me-123")
        .send()
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-request-id").unwrap(), "trace-me-123");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert!(headers.get("content-security-policy").is_some());
}

#[tokio::test]
async fn test_stylesheet_served() {
    let app = TestApp::spawn().await;

    let response = app.get("/static/css/main.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains(".product-grid"));
}
