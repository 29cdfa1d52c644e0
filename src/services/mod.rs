pub mod analytics;
pub mod codegen;
pub mod notifier;
pub mod store;
pub mod verifier;

pub use analytics::{Analytics, Outcome};
pub use codegen::{generate_gift_card_code, is_gift_card_code};
pub use notifier::{GiftCardEmail, Notifier, SmtpNotifier};
pub use store::{JsonFileStore, OrderStore};
pub use verifier::{HoodpayVerifier, PaymentVerifier};
