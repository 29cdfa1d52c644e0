pub mod health;
pub mod stats;
pub mod webhook;

pub use health::*;
pub use stats::*;
pub use webhook::*;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/hoodpay-webhook", post(handle_webhook))
        .route("/webhook", post(handle_webhook))
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
