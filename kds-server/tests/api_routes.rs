//! HTTP 路由层集成测试
//!
//! 通过 tower 的 oneshot 直接驱动 Router，不占用端口

use std::sync::Arc;

use axum::body::Body;
use http::{Request, StatusCode, header::CONTENT_TYPE};
use serde_json::{Value, json};
use tower::ServiceExt;

use kds_server::{Config, MemoryOrderStore, ServerState};
use shared::models::{Category, Dish, DraftItem, OrderDraft};

fn state() -> ServerState {
    let dishes = vec![Dish {
        id: "d-paella".into(),
        name: "Paella".into(),
        course_type: "MAIN".into(),
        category_name: Some("Grill".into()),
        image: None,
        estimated_cook_minutes: 20,
    }];
    let categories = vec![Category {
        id: "c-grill".into(),
        name: "Grill".into(),
        sort_order: 1,
        is_active: true,
    }];
    ServerState::new(
        Config::default(),
        Arc::new(MemoryOrderStore::with_catalog(dishes, categories)),
    )
}

fn app(state: &ServerState) -> axum::Router {
    kds_server::api::router().with_state(state.clone())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = state();
    let response = app(&state).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["connected_displays"], 0);
}

#[tokio::test]
async fn test_projections_round_trip() {
    let state = state();

    let draft = OrderDraft {
        order_type: "DINE_IN".into(),
        table_name: Some("T1".into()),
        reservation: None,
        customer_name: None,
        items: vec![DraftItem {
            dish_id: "d-paella".into(),
            quantity: 2,
            note: Some("sin marisco".into()),
        }],
    };
    let response = app(&state)
        .oneshot(post_json(
            "/api/kitchen/orders",
            serde_json::to_value(&draft).unwrap(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let order = body_json(response).await;
    assert_eq!(order["status"], "PROCESSING");

    let response = app(&state).oneshot(get("/api/kitchen/tables")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tables = body_json(response).await;
    assert_eq!(tables[0]["heading"], "T1");
    assert_eq!(tables[0]["total_quantity"], 2);

    let response = app(&state)
        .oneshot(get("/api/kitchen/stations/grill"))
        .await
        .unwrap();
    let station = body_json(response).await;
    assert_eq!(station["all_items"].as_array().unwrap().len(), 1);

    let response = app(&state)
        .oneshot(get("/api/kitchen/categories"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!(["Grill"]));
}

#[tokio::test]
async fn test_missing_item_returns_404_body() {
    let state = state();
    let response = app(&state)
        .oneshot(post_json(
            "/api/kitchen/items/nope/status",
            json!({"status": "COOKING"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn test_complete_guard_rejection_is_structured() {
    let state = state();
    let order = state
        .kitchen
        .submit_order(OrderDraft {
            order_type: "DINE_IN".into(),
            table_name: Some("T2".into()),
            reservation: None,
            customer_name: None,
            items: vec![DraftItem {
                dish_id: "d-paella".into(),
                quantity: 1,
                note: None,
            }],
        })
        .await
        .unwrap();

    let response = app(&state)
        .oneshot(post_json(
            &format!("/api/kitchen/orders/{}/complete", order.id),
            json!({}),
        ))
        .await
        .unwrap();
    // Guard rejection is a successful exchange, not a transport error
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], 4003);
}

#[tokio::test]
async fn test_malformed_status_is_structured_rejection() {
    let state = state();
    let order = state
        .kitchen
        .submit_order(OrderDraft {
            order_type: "DINE_IN".into(),
            table_name: Some("T3".into()),
            reservation: None,
            customer_name: None,
            items: vec![DraftItem {
                dish_id: "d-paella".into(),
                quantity: 1,
                note: None,
            }],
        })
        .await
        .unwrap();
    let item_id = order.items[0].id.clone();

    let response = app(&state)
        .oneshot(post_json(
            &format!("/api/kitchen/items/{item_id}/status"),
            json!({"status": "BANANA"}),
        ))
        .await
        .unwrap();
    // Malformed input is a rejected command, never a bare transport error
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], 2);
    assert!(body["message"].as_str().unwrap().contains("BANANA"));
}

#[tokio::test]
async fn test_malformed_submit_body_is_structured_error() {
    let state = state();
    let response = app(&state)
        .oneshot(post_json("/api/kitchen/orders", json!({"items": []})))
        .await
        .unwrap();
    // Missing order_type: still a JSON error body, not axum's plain text
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "E0002");
    assert!(body["message"].as_str().unwrap().contains("order_type"));
}

#[tokio::test]
async fn test_empty_cart_is_bad_request() {
    let state = state();
    let response = app(&state)
        .oneshot(post_json(
            "/api/kitchen/orders",
            json!({"order_type": "TAKEAWAY", "items": []}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
