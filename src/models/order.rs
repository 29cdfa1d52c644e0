use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One fulfilled webhook, as stored in the orders file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub transaction_id: String,
    pub amount: Number,
    pub email: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    #[serde(rename = "giftCardCode")]
    pub gift_card_code: String,
    pub timestamp: DateTime<Utc>,
}

impl Order {
    pub fn new(
        transaction_id: String,
        amount: Number,
        email: String,
        transaction_type: String,
        gift_card_code: String,
    ) -> Self {
        Self {
            transaction_id,
            amount,
            email,
            transaction_type,
            gift_card_code,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_stored_key_names() {
        let order = Order::new(
            "tx1".into(),
            Number::from(25),
            "a@b.com".into(),
            "standard".into(),
            "GC-ABCD1234".into(),
        );

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["transaction_id"], "tx1");
        assert_eq!(value["amount"], 25);
        assert_eq!(value["type"], "standard");
        assert_eq!(value["giftCardCode"], "GC-ABCD1234");
        assert!(value["timestamp"].is_string());
    }
}
