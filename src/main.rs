use anyhow::{Context, Result};
use giftcard_webhook::{
    config::Config,
    handlers::{router, AppState},
    services::*,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting gift card webhook v{}", env!("CARGO_PKG_VERSION"));

    // Initialize services
    let store = JsonFileStore::open(&config.orders_file)
        .await
        .with_context(|| format!("Failed to initialize {}", config.orders_file.display()))?;
    let verifier = HoodpayVerifier::new(&config.payment_api_url, &config.hoodpay_secret_key);
    let notifier = SmtpNotifier::new(
        &config.smtp_host,
        &config.email_user,
        &config.email_pass,
        &config.mail_from_name,
    )
    .context("Failed to configure SMTP transport")?
    .with_signature(config.mail_signature.as_str());

    let state = AppState {
        verifier: Arc::new(verifier),
        store: Arc::new(store),
        notifier: Arc::new(notifier),
        analytics: Arc::new(Analytics::new()),
    };

    let app = router(state);

    // Start server
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Webhook endpoint: http://{}/hoodpay-webhook", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down gracefully...");
}
