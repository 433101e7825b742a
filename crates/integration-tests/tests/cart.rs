//! Cookie cart, checkout and purchase history.

use reqwest::{StatusCode, header::COOKIE};
use serde_json::{Value, json};

use flowershop_integration_tests::{TestApp, set_cookie_value};

#[tokio::test]
async fn test_adding_same_flower_twice() {
    let app = TestApp::spawn().await;

    let resp = app.add_to_cart(3).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(set_cookie_value(&resp, "cart").as_deref(), Some("3"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Flower added to cart"}));

    let resp = app.add_to_cart(3).await;
    assert_eq!(set_cookie_value(&resp, "cart").as_deref(), Some("3,3"));
}

#[tokio::test]
async fn test_checkout_records_one_row_per_entry() {
    let app = TestApp::spawn().await;
    for name in ["Rose", "Tulip", "Lily"] {
        app.create_flower(name, 10, "2.5").await;
    }
    app.login_as_new_user("ann@example.com").await;

    app.add_to_cart(3).await;
    app.add_to_cart(3).await;

    let resp = app.client.post(app.url("/purchased")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = set_cookie_value(&resp, "cart");
    assert_eq!(cleared.as_deref(), Some(""));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Purchase successful"}));

    assert_eq!(app.purchase_count(1).await, 2);

    let page = app
        .client
        .get(app.url("/purchased"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(page.matches("Lily").count(), 2);

    // The cart cookie was removed, so a second checkout is a no-op.
    let resp = app.client.post(app.url("/purchased")).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Cart is empty"}));
    assert_eq!(app.purchase_count(1).await, 2);
}

#[tokio::test]
async fn test_checkout_requires_login() {
    let app = TestApp::spawn().await;
    app.add_to_cart(1).await;

    let resp = app.client.post(app.url("/purchased")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"detail": "Not authenticated"}));
}

#[tokio::test]
async fn test_history_requires_login() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/purchased")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cart_page_skips_missing_flowers() {
    let app = TestApp::spawn().await;
    let rose = app.create_flower("Rose", 10, "2.5").await;

    app.add_to_cart(rose).await;
    app.add_to_cart(rose).await;
    app.add_to_cart(99).await;

    let resp = app.client.get(app.url("/cart/items")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page = resp.text().await.unwrap();
    assert_eq!(page.matches("Rose").count(), 2);
    assert!(page.contains("5.00"));
}

#[tokio::test]
async fn test_empty_cart_page() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/cart/items")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Your cart is empty"));
}

#[tokio::test]
async fn test_malformed_cart_cookie_is_400() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(app.url("/cart/items"))
        .header(COOKIE, "cart=1,rose")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
