//! Handler tests for Products domain
//!
//! These drive the products router with `oneshot` over the in-memory
//! repository and check:
//! - Request deserialization (camelCase JSON, numeric or string prices)
//! - Response envelopes and status codes
//! - Error responses for validation, bad UUIDs and missing products
//! - Rate limiting of mutating routes

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::http::RateLimit;
use domain_products::handlers::{self, MessageResponse, ProductListResponse, ProductResponse};
use domain_products::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app_with(repo: InMemoryProductRepository) -> Router {
    handlers::router(ProductUseCases::new(repo))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn seed(repo: &InMemoryProductRepository, name: &str, category: &str, price: i64) -> Product {
    repo.create(NewProduct {
        name: name.to_string(),
        description: None,
        price: Decimal::new(price, 2),
        category: Some(category.to_string()),
        stock: 10,
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_create_product_handler_returns_201() {
    let app = app_with(InMemoryProductRepository::new());

    let request = json_request(
        "POST",
        "/",
        json!({
            "name": "Apple",
            "description": "Crunchy",
            "price": "1.00",
            "category": "fruit"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: ProductResponse = json_body(response.into_body()).await;
    assert!(body.success);
    assert_eq!(body.data.name, "Apple");
    assert_eq!(body.data.price, Decimal::new(100, 2));
    assert_eq!(body.data.stock, 0);
    assert!(body.data.deleted_at.is_none());
}

#[tokio::test]
async fn test_create_product_accepts_numeric_price() {
    let app = app_with(InMemoryProductRepository::new());

    let request = json_request("POST", "/", json!({ "name": "Pear", "price": 2.5, "stock": 4 }));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["price"], "2.50");
    assert_eq!(body["data"]["stock"], 4);
}

#[tokio::test]
async fn test_create_product_rejects_invalid_price() {
    let app = app_with(InMemoryProductRepository::new());

    let request = json_request("POST", "/", json!({ "name": "Apple", "price": "free" }));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], INVALID_PRICE_MESSAGE);
}

const INVALID_PRICE_MESSAGE: &str = "Price must be a valid number greater than 0";

#[tokio::test]
async fn test_create_product_rejects_negative_stock() {
    let app = app_with(InMemoryProductRepository::new());

    let request = json_request("POST", "/", json!({ "name": "Apple", "price": 1, "stock": -1 }));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Quantity in stock cannot be negative");
}

#[tokio::test]
async fn test_create_product_validates_shape() {
    let app = app_with(InMemoryProductRepository::new());

    // Empty name fails the length rule before reaching the use case
    let request = json_request("POST", "/", json!({ "name": "", "price": 1 }));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn test_get_product_handler() {
    let repo = InMemoryProductRepository::new();
    let apple = seed(&repo, "Apple", "fruit", 100).await;
    let app = app_with(repo);

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", apple.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: ProductResponse = json_body(response.into_body()).await;
    assert_eq!(body.data.id, apple.id);
}

#[tokio::test]
async fn test_get_product_handler_returns_404() {
    let app = app_with(InMemoryProductRepository::new());

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn test_get_product_handler_rejects_invalid_uuid() {
    let app = app_with(InMemoryProductRepository::new());

    let response = app
        .oneshot(empty_request("GET", "/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_list_products_with_filters() {
    let repo = InMemoryProductRepository::new();
    let apple = seed(&repo, "Apple", "fruit", 100).await;
    let carrot = seed(&repo, "Carrot", "veg", 200).await;

    let response = app_with(repo.clone())
        .oneshot(empty_request("GET", "/?category=fruit&minPrice=0.5"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: ProductListResponse = json_body(response.into_body()).await;
    assert!(body.success);
    assert_eq!(body.pagination.total, 1);
    assert_eq!(body.data[0].id, apple.id);

    let response = app_with(repo)
        .oneshot(empty_request("GET", "/?search=car"))
        .await
        .unwrap();

    let body: ProductListResponse = json_body(response.into_body()).await;
    assert_eq!(body.pagination.total, 1);
    assert_eq!(body.data[0].id, carrot.id);
}

#[tokio::test]
async fn test_list_products_normalizes_pagination() {
    let repo = InMemoryProductRepository::new();
    for i in 0..25 {
        seed(&repo, &format!("Item {i}"), "misc", 100 + i).await;
    }

    let response = app_with(repo.clone())
        .oneshot(empty_request("GET", "/?page=0&limit=150"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 10);
    assert_eq!(body["pagination"]["total"], 25);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);

    let response = app_with(repo)
        .oneshot(empty_request("GET", "/?page=3&limit=10"))
        .await
        .unwrap();
    let body: ProductListResponse = json_body(response.into_body()).await;
    assert_eq!(body.data.len(), 5);
}

#[tokio::test]
async fn test_list_products_far_page_is_empty() {
    let repo = InMemoryProductRepository::new();
    seed(&repo, "Apple", "fruit", 100).await;

    let response = app_with(repo)
        .oneshot(empty_request("GET", "/?page=9223372036854775807&limit=100"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["pagination"]["page"], i64::MAX);
    assert_eq!(body["pagination"]["total"], 1);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_product_rejects_price_that_rounds_to_zero() {
    let repo = InMemoryProductRepository::new();

    let response = app_with(repo.clone())
        .oneshot(json_request("POST", "/", json!({ "name": "Dust", "price": "0.004" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], INVALID_PRICE_MESSAGE);

    let response = app_with(repo)
        .oneshot(empty_request("GET", "/"))
        .await
        .unwrap();
    let body: ProductListResponse = json_body(response.into_body()).await;
    assert_eq!(body.pagination.total, 0);
}

#[tokio::test]
async fn test_list_products_in_stock_flag() {
    let repo = InMemoryProductRepository::new();
    let sold_out = seed(&repo, "Sold out", "misc", 100).await;
    repo.update(
        sold_out.id,
        ProductChanges {
            stock: Some(0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    seed(&repo, "Available", "misc", 100).await;

    let response = app_with(repo.clone())
        .oneshot(empty_request("GET", "/?inStock=true"))
        .await
        .unwrap();
    let body: ProductListResponse = json_body(response.into_body()).await;
    assert_eq!(body.pagination.total, 1);
    assert_eq!(body.data[0].name, "Available");

    let response = app_with(repo)
        .oneshot(empty_request("GET", "/?inStock=false"))
        .await
        .unwrap();
    let body: ProductListResponse = json_body(response.into_body()).await;
    assert_eq!(body.pagination.total, 2);
}

#[tokio::test]
async fn test_update_product_handler() {
    let repo = InMemoryProductRepository::new();
    let apple = seed(&repo, "Apple", "fruit", 100).await;
    let app = app_with(repo);

    let request = json_request(
        "PUT",
        &format!("/{}", apple.id),
        json!({ "price": "1.20", "description": "Green" }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: ProductResponse = json_body(response.into_body()).await;
    assert_eq!(body.data.price, Decimal::new(120, 2));
    assert_eq!(body.data.description.as_deref(), Some("Green"));
    assert_eq!(body.data.name, "Apple");
    assert!(body.data.updated_at >= apple.updated_at);
}

#[tokio::test]
async fn test_update_product_handler_rejects_zero_price() {
    let repo = InMemoryProductRepository::new();
    let apple = seed(&repo, "Apple", "fruit", 100).await;
    let app = app_with(repo.clone());

    let request = json_request("PUT", &format!("/{}", apple.id), json!({ "price": 0 }));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unchanged = repo.find_by_id(apple.id).await.unwrap().unwrap();
    assert_eq!(unchanged.price, apple.price);
}

#[tokio::test]
async fn test_delete_product_handler_soft_deletes() {
    let repo = InMemoryProductRepository::new();
    let apple = seed(&repo, "Apple", "fruit", 100).await;
    let uri = format!("/{}", apple.id);

    let response = app_with(repo.clone())
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: MessageResponse = json_body(response.into_body()).await;
    assert!(body.success);
    assert_eq!(body.message, "Deleted successfully");

    // Second delete and subsequent reads report not found
    let response = app_with(repo.clone())
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app_with(repo.clone())
        .oneshot(empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app_with(repo.clone())
        .oneshot(json_request("PUT", &uri, json!({ "name": "Ghost" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The row itself is retained
    let raw = repo.raw_get(apple.id).await.unwrap();
    assert!(raw.deleted_at.is_some());
}

#[tokio::test]
async fn test_write_routes_are_rate_limited() {
    let repo = InMemoryProductRepository::new();
    let apple = seed(&repo, "Apple", "fruit", 100).await;
    let limit = RateLimit::new(
        1,
        Duration::from_secs(60),
        "Too many modification requests, please try again later.",
    );
    let app = handlers::rate_limited_router(ProductUseCases::new(repo), limit);

    let first = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "name": "Pear", "price": 2 })))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "name": "Plum", "price": 3 })))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    // Reads are not subject to the write limit
    let read = app
        .oneshot(empty_request("GET", &format!("/{}", apple.id)))
        .await
        .unwrap();
    assert_eq!(read.status(), StatusCode::OK);
}
