//! Admin dashboard: add and delete products.

use reqwest::StatusCode;

use aszmart_integration_tests::{TestApp, image_part, product_fields};

const TWO_MIB: usize = 2 * 1024 * 1024;

#[tokio::test]
async fn test_dashboard_lists_products_with_delete_buttons() {
    let app = TestApp::spawn().await;

    let body = app.get("/adminhome").await.text().await.unwrap();
    assert!(body.contains("Admin Page - Add Product"));
    assert!(body.contains("/adminhome/products/p1/delete"));
    assert!(body.contains("/adminhome/products/p2/delete"));
}

#[tokio::test]
async fn test_added_product_appears_after_refetch() {
    let app = TestApp::spawn().await;

    let form = product_fields("Enamel Mug").part("product_image", image_part("image/png", 64));
    let response = app.post_multipart("/adminhome", form).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("Product added successfully!"));
    assert!(body.contains("Enamel Mug"));
    // 12.50 with 20% off
    assert!(body.contains("$10.00"));
    assert_eq!(app.stub.hits_for("POST /api/add-product/"), 1);

    let stored = app.stub.products();
    let mug = stored
        .iter()
        .find(|p| p["product_name"] == "Enamel Mug")
        .unwrap();
    assert!(
        mug["product_image"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );

    let catalog = app.get("/home").await.text().await.unwrap();
    assert!(catalog.contains("Enamel Mug"));
}

#[tokio::test]
async fn test_form_resets_after_success() {
    let app = TestApp::spawn().await;

    let form = product_fields("Reset Me").part("product_image", image_part("image/jpeg", 16));
    let body = app.post_multipart("/adminhome", form).await.text().await.unwrap();

    assert!(!body.contains("value=\"Reset Me\""));
    assert!(!body.contains("value=\"12.50\""));
}

#[tokio::test]
async fn test_wrong_image_type_rejected_without_call() {
    let app = TestApp::spawn().await;

    let form = product_fields("Gif").part("product_image", image_part("image/gif", 64));
    let response = app.post_multipart("/adminhome", form).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid file type. Only JPEG and PNG are allowed."));
    assert_eq!(app.stub.hits_for("POST /api/add-product/"), 0);
}

#[tokio::test]
async fn test_oversized_image_rejected_without_call() {
    let app = TestApp::spawn().await;

    let form = product_fields("Huge").part("product_image", image_part("image/png", TWO_MIB + 1));
    let response = app.post_multipart("/adminhome", form).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.text().await.unwrap();
    assert!(body.contains("File size exceeds 2MB. Please upload a smaller file."));
    assert_eq!(app.stub.hits_for("POST /api/add-product/"), 0);
}

#[tokio::test]
async fn test_missing_image_rejected_without_call() {
    let app = TestApp::spawn().await;

    let response = app.post_multipart("/adminhome", product_fields("No Image")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.text().await.unwrap();
    assert!(body.contains("All fields are required, including a product image."));
    assert!(body.contains("value=\"No Image\""), "entered values are kept");
    assert_eq!(app.stub.hits_for("POST /api/add-product/"), 0);
}

#[tokio::test]
async fn test_add_failure_uses_fallback_message() {
    let app = TestApp::spawn().await;
    app.stub.force_status(StatusCode::BAD_REQUEST);

    let form = product_fields("Rejected").part("product_image", image_part("image/png", 8));
    let body = app.post_multipart("/adminhome", form).await.text().await.unwrap();

    assert!(body.contains("Error adding product. Please try again."));
}

#[tokio::test]
async fn test_delete_product() {
    let app = TestApp::spawn().await;

    let response = app.post_form("/adminhome/products/p1/delete", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/adminhome?deleted=1"
    );
    assert_eq!(app.stub.hits_for("DELETE /api/delete-product/p1/"), 1);

    let body = app.get("/adminhome?deleted=1").await.text().await.unwrap();
    assert!(body.contains("Product deleted successfully!"));
    assert!(!body.contains("Steel Kettle"));
}

#[tokio::test]
async fn test_delete_missing_product() {
    let app = TestApp::spawn().await;

    let response = app.post_form("/adminhome/products/nope/delete", &[]).await;
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/adminhome?error=delete_failed"
    );
}
