//! Integration tests for the paid listing flow.
//!
//! These tests drive the full router against the in-memory store:
//! 1. A signed-in user submits an item and starts a Creem checkout
//! 2. Creem delivers a signed `checkout.completed` webhook
//! 3. Redeliveries of the same event do not create a second order

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use directory_site::adapters::email::MockEmailSender;
use directory_site::adapters::http::{app_router, AppState};
use directory_site::adapters::memory::InMemoryStore;
use directory_site::adapters::stripe::MockCheckoutProvider;
use directory_site::application::handlers::checkout::CheckoutPricing;
use directory_site::domain::catalog::PricePlan;
use directory_site::domain::foundation::UserId;
use directory_site::domain::payment::{sign_payload, PaymentProviderKind};
use directory_site::domain::session::{Role, Session, SessionCodec};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SESSION_SECRET: &[u8] = b"an-adequately-long-test-session-secret";
const WEBHOOK_SECRET: &str = "whsec_integration";

struct Harness {
    store: Arc<InMemoryStore>,
    creem: MockCheckoutProvider,
    mailer: Arc<MockEmailSender>,
    app: Router,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let creem = MockCheckoutProvider::new(PaymentProviderKind::Creem);
        let mailer = Arc::new(MockEmailSender::new());

        let state = AppState::new(
            "https://dir.example",
            SessionCodec::new(SESSION_SECRET),
            store.clone(),
        )
        .with_creem(Arc::new(creem.clone()))
        .with_pricing(CheckoutPricing {
            creem_pro_product: Some("prod_pro".to_string()),
            creem_sponsor_product: Some("prod_sponsor".to_string()),
            ..Default::default()
        })
        .with_webhook_secret(WEBHOOK_SECRET)
        .with_mailer(mailer.clone());

        Self {
            store,
            creem,
            mailer,
            app: app_router(state, &[]),
        }
    }

    fn session_cookie(&self) -> String {
        let token = SessionCodec::new(SESSION_SECRET)
            .encode(&Session {
                id: UserId::new("user-1").unwrap(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                image: None,
                role: Role::User,
            })
            .unwrap();
        format!("auth-token={}", token)
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, self.session_cookie())
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn deliver(&self, payload: &[u8]) -> StatusCode {
        let request = Request::builder()
            .method("POST")
            .uri("/api/webhooks/creem")
            .header("creem-signature", sign_payload(WEBHOOK_SECRET, payload))
            .body(Body::from(payload.to_vec()))
            .unwrap();
        self.app.clone().oneshot(request).await.unwrap().status()
    }
}

fn checkout_completed(user_id: &str, item_id: &str, plan: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "id": "evt_100",
        "eventType": "checkout.completed",
        "object": {
            "id": "ch_100",
            "order": {"id": "ord_100"},
            "product": {"id": "prod_pro", "name": "Pro listing"},
            "customer": {"id": "cus_1", "email": "ada@example.com", "name": "Ada"},
            "metadata": {"userId": user_id, "itemId": item_id, "pricePlan": plan}
        }
    }))
    .unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn submitted_item_is_paid_once_across_redeliveries() {
    let harness = Harness::new();

    // Submit a free item
    let (status, body) = harness
        .post_json(
            "/api/submit",
            json!({
                "link": "https://tool.dev",
                "name": "Tool",
                "description": "A tool",
                "categories": ["cat-dev"]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let item_id = body["item"]["_id"].as_str().unwrap().to_string();

    // Start a Pro checkout for it
    let (status, body) = harness
        .post_json(
            "/api/checkout",
            json!({"itemId": item_id, "pricePlan": "pro"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "creem");
    let calls = harness.creem.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].item_id.as_str(), item_id);
    assert_eq!(calls[0].user_id.as_str(), "user-1");

    // Creem confirms, then redelivers
    let payload = checkout_completed("user-1", &item_id, "pro");
    assert_eq!(harness.deliver(&payload).await, StatusCode::OK);
    assert_eq!(harness.deliver(&payload).await, StatusCode::OK);

    let orders = harness.store.orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].external_order_id, "ord_100");

    let item = harness.store.item(&item_id).unwrap();
    assert!(item.paid);
    assert_eq!(item.price_plan, PricePlan::Pro);
    assert_eq!(item.order.as_ref(), Some(&orders[0].id));

    // Receipt only for the first recording
    assert_eq!(harness.mailer.sent().len(), 1);
}

#[tokio::test]
async fn tampered_delivery_changes_nothing() {
    let harness = Harness::new();
    let payload = checkout_completed("user-1", "item-1", "sponsor");

    let request = Request::builder()
        .method("POST")
        .uri("/api/webhooks/creem")
        .header("creem-signature", sign_payload("whsec_wrong", &payload))
        .body(Body::from(payload))
        .unwrap();
    let response = harness.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(harness.store.orders().is_empty());
}

#[tokio::test]
async fn checkout_without_session_is_rejected() {
    let harness = Harness::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/checkout")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"itemId": "item-1", "pricePlan": "pro"}).to_string()))
        .unwrap();
    let response = harness.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!harness.creem.was_called());
}
