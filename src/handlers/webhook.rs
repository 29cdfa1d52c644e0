use crate::{
    error::WebhookError,
    models::{Order, WebhookPayload},
    services::{
        generate_gift_card_code, Analytics, GiftCardEmail, Notifier, OrderStore, Outcome,
        PaymentVerifier,
    },
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn PaymentVerifier>,
    pub store: Arc<dyn OrderStore>,
    pub notifier: Arc<dyn Notifier>,
    pub analytics: Arc<Analytics>,
}

pub async fn handle_webhook(
    State(state): State<AppState>,
    payload: Result<Json<WebhookPayload>, JsonRejection>,
) -> Result<(StatusCode, &'static str), WebhookError> {
    let span = tracing::info_span!(
        "webhook",
        request_id = %Uuid::new_v4(),
        transaction_id = tracing::field::Empty
    );

    let result = async {
        let Json(payload) =
            payload.map_err(|rejection| WebhookError::InvalidPayload(rejection.body_text()))?;
        process(&state, payload).await
    }
    .instrument(span)
    .await;

    state.analytics.record(match &result {
        Ok(_) => Outcome::Fulfilled,
        Err(err) if err.status_code().is_client_error() => Outcome::Rejected,
        Err(_) => Outcome::Failed,
    });

    result.map(|()| (StatusCode::OK, "Webhook processed"))
}

async fn process(state: &AppState, payload: WebhookPayload) -> Result<(), WebhookError> {
    if !payload.is_success() {
        return Err(WebhookError::PaymentNotSuccessful(
            payload.status.unwrap_or_else(|| "<missing>".to_string()),
        ));
    }

    let WebhookPayload {
        transaction_id: Some(transaction_id),
        amount: Some(amount),
        email: Some(email),
        transaction_type: Some(transaction_type),
        ..
    } = payload
    else {
        return Err(WebhookError::InvalidPayload(
            "transaction_id, amount, email and type are required".to_string(),
        ));
    };

    tracing::Span::current().record("transaction_id", tracing::field::display(&transaction_id));

    let remote = state.verifier.verify(&transaction_id).await?;
    if !remote.is_success() {
        return Err(WebhookError::VerificationFailed(remote.status));
    }

    let order = Order::new(
        transaction_id,
        amount,
        email,
        transaction_type,
        generate_gift_card_code(),
    );
    state.store.append(&order).await?;

    tracing::info!(
        code = %order.gift_card_code,
        amount = %order.amount,
        "Order persisted"
    );

    let email = GiftCardEmail {
        to: order.email.clone(),
        amount: order.amount.clone(),
        transaction_type: order.transaction_type.clone(),
        gift_card_code: order.gift_card_code.clone(),
    };
    if let Err(err) = state.notifier.send_gift_card(&email).await {
        // The order stays on disk; this line is what reconciliation works from.
        tracing::error!(
            code = %order.gift_card_code,
            to = %order.email,
            "Order persisted but gift card email was not delivered"
        );
        return Err(err);
    }

    Ok(())
}
