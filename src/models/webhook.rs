use serde::{Deserialize, Serialize};
use serde_json::Number;

pub const SUCCESS_STATUS: &str = "success";

/// Body posted by the payment provider. Every field is optional so that a
/// body without `status` is rejected by the status check, not the decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub amount: Option<Number>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
}

impl WebhookPayload {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }
}

/// Provider response for `GET /transaction/{id}`. Only `status` matters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionStatus {
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionStatus {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }
}
