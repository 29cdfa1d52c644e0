use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    #[error("Payment not successful: {0}")]
    PaymentNotSuccessful(String),

    #[error("Payment verification failed: provider reported {0:?}")]
    VerificationFailed(Option<String>),

    #[error("Payment provider error: {0}")]
    Verifier(#[from] reqwest::Error),

    #[error("Order storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Order serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidPayload(_)
            | WebhookError::PaymentNotSuccessful(_)
            | WebhookError::VerificationFailed(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text returned to the caller. Internal failures never leak details.
    pub fn public_message(&self) -> &'static str {
        match self {
            WebhookError::InvalidPayload(_) => "Invalid webhook payload",
            WebhookError::PaymentNotSuccessful(_) => "Payment not successful",
            WebhookError::VerificationFailed(_) => "Payment verification failed",
            _ => "Server error",
        }
    }
}

impl From<lettre::error::Error> for WebhookError {
    fn from(err: lettre::error::Error) -> Self {
        WebhookError::Mail(err.to_string())
    }
}

impl From<lettre::address::AddressError> for WebhookError {
    fn from(err: lettre::address::AddressError) -> Self {
        WebhookError::Mail(format!("invalid address: {}", err))
    }
}

impl From<lettre::transport::smtp::Error> for WebhookError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        WebhookError::Mail(err.to_string())
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Webhook processing failed");
        } else {
            tracing::warn!(error = %self, "Webhook rejected");
        }

        (status, self.public_message()).into_response()
    }
}
