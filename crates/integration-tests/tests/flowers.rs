//! Flower inventory endpoints.

use reqwest::StatusCode;
use serde_json::{Value, json};

use flowershop_integration_tests::TestApp;

#[tokio::test]
async fn test_create_then_patch_returns_updated_flower() {
    let app = TestApp::spawn().await;

    let id = app.create_flower("Rose", 10, "2.5").await;
    assert_eq!(id, 1);

    let resp = app
        .client
        .patch(app.url("/flowers/1"))
        .form(&[("quantity", "5")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({"flower": {"id": 1, "name": "Rose", "quantity": 5, "price": 2.5}})
    );
}

#[tokio::test]
async fn test_patch_blank_fields_are_ignored() {
    let app = TestApp::spawn().await;
    let id = app.create_flower("Tulip", 4, "1.75").await;

    let resp = app
        .client
        .patch(app.url(&format!("/flowers/{id}")))
        .form(&[("name", ""), ("quantity", ""), ("price", "2")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["flower"]["name"], "Tulip");
    assert_eq!(body["flower"]["quantity"], 4);
    assert_eq!(body["flower"]["price"], 2.0);
}

#[tokio::test]
async fn test_patch_unknown_flower_is_404() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .patch(app.url("/flowers/42"))
        .form(&[("name", "Ghost")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"detail": "Flower not found"}));
}

#[tokio::test]
async fn test_patch_without_body() {
    let app = TestApp::spawn().await;
    let id = app.create_flower("Daisy", 6, "1.5").await;

    let resp = app
        .client
        .patch(app.url(&format!("/flowers/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({"flower": {"id": id, "name": "Daisy", "quantity": 6, "price": 1.5}})
    );

    let resp = app.client.patch(app.url("/flowers/999")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"detail": "Flower not found"}));
}

#[tokio::test]
async fn test_patch_name_is_trimmed() {
    let app = TestApp::spawn().await;
    let id = app.create_flower("Iris", 2, "3").await;

    let resp = app
        .client
        .patch(app.url(&format!("/flowers/{id}")))
        .form(&[("name", "  Blue Iris  ")])
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["flower"]["name"], "Blue Iris");
}

#[tokio::test]
async fn test_malformed_requests_get_json_detail() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/flowers"))
        .form(&[("name", "Rose"), ("price", "2")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("quantity"));

    let resp = app.client.delete(app.url("/flowers/abc")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_delete_flower() {
    let app = TestApp::spawn().await;
    let id = app.create_flower("Daisy", 1, "0.5").await;

    let resp = app
        .client
        .delete(app.url(&format!("/flowers/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"deleted_flower_id": id}));

    let resp = app
        .client
        .delete(app.url(&format!("/flowers/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let page = app
        .client
        .get(app.url("/flowers"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!page.contains("Daisy"));
}

#[tokio::test]
async fn test_flower_list_page() {
    let app = TestApp::spawn().await;
    app.create_flower("Rose", 10, "2.5").await;
    app.create_flower("Lily", 3, "4").await;

    let resp = app.client.get(app.url("/flowers")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let page = resp.text().await.unwrap();
    assert!(page.contains("Rose"));
    assert!(page.contains("2.50"));
    assert!(page.contains("Lily"));
}

#[tokio::test]
async fn test_create_with_bad_price_is_400() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/flowers"))
        .form(&[("name", "Rose"), ("quantity", "1"), ("price", "cheap")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("invalid price"));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = app.client.get(app.url("/health/ready")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
