use crate::{error::WebhookError, models::Order};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Creates an empty collection if the backing storage is missing.
    async fn ensure_initialized(&self) -> Result<(), WebhookError>;

    async fn append(&self, order: &Order) -> Result<(), WebhookError>;

    async fn load(&self) -> Result<Vec<Order>, WebhookError>;

    /// Cheap readiness check; does not read the records.
    async fn is_available(&self) -> bool;
}

/// Orders kept as a pretty-printed JSON array in a single file.
///
/// Every append reads the whole array and writes it back. Writers inside
/// this process are serialized; other processes sharing the file are not.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Builds the store and makes sure the file exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, WebhookError> {
        let store = Self::new(path);
        store.ensure_initialized().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Order>, WebhookError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_all(&self, orders: &[Order]) -> Result<(), WebhookError> {
        let bytes = serde_json::to_vec_pretty(orders)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for JsonFileStore {
    async fn ensure_initialized(&self) -> Result<(), WebhookError> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, b"[]").await?;

        tracing::info!("Created empty order log at {}", self.path.display());
        Ok(())
    }

    async fn append(&self, order: &Order) -> Result<(), WebhookError> {
        let _guard = self.write_lock.lock().await;

        // Covers stores built with `new` and files removed while running.
        self.ensure_initialized().await?;
        let mut orders = self.read_all().await?;
        orders.push(order.clone());
        self.write_all(&orders).await?;

        tracing::debug!(
            transaction_id = %order.transaction_id,
            total = orders.len(),
            "Order appended"
        );
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Order>, WebhookError> {
        let _guard = self.write_lock.lock().await;
        self.read_all().await
    }

    async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}
