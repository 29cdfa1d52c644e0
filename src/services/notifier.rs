use crate::error::WebhookError;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde_json::Number;

pub const DEFAULT_SIGNATURE: &str = "Netlify Support Team";

/// Everything the customer needs to redeem their purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct GiftCardEmail {
    pub to: String,
    pub amount: Number,
    pub transaction_type: String,
    pub gift_card_code: String,
}

impl GiftCardEmail {
    pub fn subject(&self) -> String {
        format!("Your ${} Gift Card is Ready", display_amount(&self.amount))
    }

    pub fn html_body(&self) -> String {
        self.html_body_signed(DEFAULT_SIGNATURE)
    }

    pub fn html_body_signed(&self, signature: &str) -> String {
        format!(
            r#"<h2>Thank you for your order! &#x1F497;</h2>
<p><strong>Transaction Type:</strong> {kind}</p>
<p><strong>Amount Purchased:</strong> ${amount}</p>
<p><strong>Your Gift Card Code:</strong> <code>{code}</code></p>
<p>The code will be delivered instantly. If you wish to cancel, you can get a full refund within 5 minutes.</p>
<p>Enjoy your gift card!<br>{signature}</p>
"#,
            kind = escape_html(&self.transaction_type),
            amount = display_amount(&self.amount),
            code = self.gift_card_code,
            signature = escape_html(signature),
        )
    }
}

/// Whole-valued floats render without a trailing `.0` (`25.0` -> `25`).
fn display_amount(amount: &Number) -> String {
    match amount.as_f64() {
        Some(value) if amount.is_f64() && value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", value as i64)
        }
        _ => amount.to_string(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_gift_card(&self, email: &GiftCardEmail) -> Result<(), WebhookError>;
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    signature: String,
}

impl SmtpNotifier {
    pub fn new(
        smtp_host: &str,
        username: &str,
        password: &str,
        from_name: &str,
    ) -> Result<Self, WebhookError> {
        let address: Address = username.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_host)?
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        tracing::info!("SMTP transport configured for {}", smtp_host);

        Ok(Self {
            transport,
            from: Mailbox::new(Some(from_name.to_string()), address),
            signature: DEFAULT_SIGNATURE.to_string(),
        })
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    fn build_message(&self, email: &GiftCardEmail) -> Result<Message, WebhookError> {
        let to: Mailbox = email.to.parse()?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body_signed(&self.signature))?;
        Ok(message)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_gift_card(&self, email: &GiftCardEmail) -> Result<(), WebhookError> {
        let message = self.build_message(email)?;
        self.transport.send(message).await?;

        tracing::info!(to = %email.to, "Gift card email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GiftCardEmail {
        GiftCardEmail {
            to: "a@b.com".into(),
            amount: Number::from(25),
            transaction_type: "standard".into(),
            gift_card_code: "GC-ABCD1234".into(),
        }
    }

    #[test]
    fn subject_mentions_amount() {
        assert_eq!(sample().subject(), "Your $25 Gift Card is Ready");
    }

    #[test]
    fn body_carries_code_amount_and_type() {
        let html = sample().html_body();
        assert!(html.contains("<code>GC-ABCD1234</code>"));
        assert!(html.contains("$25"));
        assert!(html.contains("standard"));
    }

    #[test]
    fn body_escapes_transaction_type() {
        let mut email = sample();
        email.transaction_type = "<script>alert(1)</script>".into();
        let html = email.html_body();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn fractional_amounts_render_as_sent() {
        let mut email = sample();
        email.amount = Number::from_f64(12.5).unwrap();
        assert_eq!(email.subject(), "Your $12.5 Gift Card is Ready");
    }

    #[test]
    fn whole_float_amounts_drop_trailing_zero() {
        let mut email = sample();
        email.amount = Number::from_f64(25.0).unwrap();
        assert_eq!(email.subject(), "Your $25 Gift Card is Ready");
        assert!(email.html_body().contains("$25<"));
        assert!(!email.html_body().contains("$25.0"));
    }

    #[test]
    fn default_sign_off_names_support_team() {
        let html = sample().html_body();
        assert!(html.contains("<br>Netlify Support Team</p>"));

        let html = sample().html_body_signed("Gift Shop Support");
        assert!(html.contains("<br>Gift Shop Support</p>"));
    }

    #[tokio::test]
    async fn message_carries_configured_signature() {
        let notifier =
            SmtpNotifier::new("smtp.example.com", "shop@example.com", "secret", "Gift Shop")
                .unwrap()
                .with_signature("Gift Shop Support");
        let message = notifier.build_message(&sample()).unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Gift Shop Support"));
    }

    #[tokio::test]
    async fn message_uses_configured_sender() {
        let notifier =
            SmtpNotifier::new("smtp.example.com", "shop@example.com", "secret", "Gift Shop")
                .unwrap();
        let message = notifier.build_message(&sample()).unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Gift Shop"));
        assert!(raw.contains("<shop@example.com>"));
        assert!(raw.contains("a@b.com"));
        assert!(raw.contains("text/html"));
    }

    #[tokio::test]
    async fn invalid_recipient_is_a_mail_error() {
        let notifier =
            SmtpNotifier::new("smtp.example.com", "shop@example.com", "secret", "Gift Shop")
                .unwrap();
        let mut email = sample();
        email.to = "not an address".into();

        let err = notifier.build_message(&email).unwrap_err();
        assert!(matches!(err, WebhookError::Mail(_)));
    }
}
