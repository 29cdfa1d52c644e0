use anyhow::{bail, Context, Result};
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // Hoodpay (payment verification)
    pub payment_api_url: String,
    pub hoodpay_secret_key: String,

    // Outbound mail
    pub smtp_host: String,
    pub email_user: String,
    pub email_pass: String,
    pub mail_from_name: String,
    pub mail_signature: String,

    // Order log
    pub orders_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let required = |key: &str| lookup(key).with_context(|| format!("{} required", key));

        let config = Self {
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "5000").parse().context("Invalid PORT")?,

            payment_api_url: var_or("PAYMENT_API_URL", "https://api.hoodpay.io")
                .trim_end_matches('/')
                .to_string(),
            hoodpay_secret_key: required("HOODPAY_SECRET_KEY")?,

            smtp_host: var_or("SMTP_HOST", "smtp.gmail.com"),
            email_user: required("EMAIL_USER")?,
            email_pass: required("EMAIL_PASS")?,
            mail_from_name: var_or("MAIL_FROM_NAME", "Netlify Gift Cards"),
            mail_signature: var_or("MAIL_SIGNATURE", "Netlify Support Team"),

            orders_file: PathBuf::from(var_or("ORDERS_FILE", "./orders.json")),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.payment_api_url.starts_with("http") {
            bail!("PAYMENT_API_URL must be HTTP(S) URL");
        }
        if self.email_user.trim().is_empty() {
            bail!("EMAIL_USER must not be empty");
        }

        tracing::info!(
            payment_api = %self.payment_api_url,
            smtp_host = %self.smtp_host,
            orders_file = %self.orders_file.display(),
            "Configuration validated"
        );

        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("payment_api_url", &self.payment_api_url)
            .field("smtp_host", &self.smtp_host)
            .field("email_user", &self.email_user)
            .field("mail_from_name", &self.mail_from_name)
            .field("mail_signature", &self.mail_signature)
            .field("orders_file", &self.orders_file)
            .finish_non_exhaustive()
    }
}
