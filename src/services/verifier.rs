use crate::{error::WebhookError, models::TransactionStatus};
use async_trait::async_trait;

#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    async fn verify(&self, transaction_id: &str) -> Result<TransactionStatus, WebhookError>;
}

/// Looks a transaction up on the Hoodpay API.
pub struct HoodpayVerifier {
    client: reqwest::Client,
    api_url: String,
    secret_key: String,
}

impl HoodpayVerifier {
    pub fn new(api_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            secret_key: secret_key.into(),
        }
    }

    fn transaction_url(&self, transaction_id: &str) -> Result<reqwest::Url, WebhookError> {
        let mut url = reqwest::Url::parse(&self.api_url)
            .map_err(|e| WebhookError::Configuration(format!("bad provider url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| WebhookError::Configuration("provider url cannot be a base".into()))?
            .pop_if_empty()
            .push("transaction")
            .push(transaction_id);
        Ok(url)
    }
}

#[async_trait]
impl PaymentVerifier for HoodpayVerifier {
    async fn verify(&self, transaction_id: &str) -> Result<TransactionStatus, WebhookError> {
        let url = self.transaction_url(transaction_id)?;

        let status: TransactionStatus = self
            .client
            .get(url)
            .bearer_auth(&self.secret_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(
            transaction_id,
            remote_status = ?status.status,
            "Transaction looked up"
        );

        Ok(status)
    }
}
