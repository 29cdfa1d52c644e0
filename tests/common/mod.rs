#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use giftcard_webhook::{
    error::WebhookError,
    handlers::{router, AppState},
    models::TransactionStatus,
    services::{Analytics, GiftCardEmail, HoodpayVerifier, JsonFileStore, Notifier, PaymentVerifier},
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

/// Keeps every email instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<GiftCardEmail>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<GiftCardEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_gift_card(&self, email: &GiftCardEmail) -> Result<(), WebhookError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_gift_card(&self, _email: &GiftCardEmail) -> Result<(), WebhookError> {
        Err(WebhookError::Mail("535 authentication failed".into()))
    }
}

/// Answers every lookup with a fixed status and counts calls.
pub struct StubVerifier {
    status: Option<String>,
    calls: Mutex<usize>,
}

impl StubVerifier {
    pub fn reporting(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PaymentVerifier for StubVerifier {
    async fn verify(&self, _transaction_id: &str) -> Result<TransactionStatus, WebhookError> {
        *self.calls.lock().unwrap() += 1;
        Ok(TransactionStatus {
            status: self.status.clone(),
        })
    }
}

pub struct Harness {
    pub app: Router,
    pub store: Arc<JsonFileStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub analytics: Arc<Analytics>,
    _dir: TempDir,
}

impl Harness {
    pub async fn new(verifier: Arc<dyn PaymentVerifier>) -> Self {
        let notifier = Arc::new(RecordingNotifier::default());
        Self::with_notifier(verifier, notifier.clone(), notifier).await
    }

    pub async fn with_provider(provider_url: String) -> Self {
        Self::new(Arc::new(HoodpayVerifier::new(provider_url, "sk_test"))).await
    }

    pub async fn with_notifier(
        verifier: Arc<dyn PaymentVerifier>,
        notifier: Arc<dyn Notifier>,
        recorder: Arc<RecordingNotifier>,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(
            JsonFileStore::open(dir.path().join("orders.json"))
                .await
                .unwrap(),
        );
        let analytics = Arc::new(Analytics::new());

        let app = router(AppState {
            verifier,
            store: store.clone(),
            notifier,
            analytics: analytics.clone(),
        });

        Self {
            app,
            store,
            notifier: recorder,
            analytics,
            _dir: dir,
        }
    }

    pub async fn post_webhook(&self, body: &Value) -> (StatusCode, String) {
        self.post_raw("/hoodpay-webhook", body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub fn raw_orders(&self) -> Value {
        let raw = std::fs::read_to_string(self.store.path()).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}
