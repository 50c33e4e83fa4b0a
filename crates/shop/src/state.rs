//! Application state shared across callers.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::ShopConfig;
use crate::db::{RecordStore, StoreSnapshot};
use crate::error::Result;
use crate::seed::seed_demo_data;
use crate::services::{
    CategoryService, IntegrityReport, OrderService, ProductService, UserService, audit,
};

/// Application state shared across all callers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the one record store
/// of the process behind a reader/writer lock; services borrow that lock.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShopConfig,
    store: RwLock<RecordStore>,
}

impl AppState {
    /// Create a new application state, seeding demo data if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding the demo data fails.
    pub fn new(config: ShopConfig) -> Result<Self> {
        let mut store = RecordStore::new();
        if config.seed_demo_data {
            seed_demo_data(&mut store)?;
        }
        Ok(Self::with_store(config, store))
    }

    /// Create an application state around an existing store.
    #[must_use]
    pub fn with_store(config: ShopConfig, store: RecordStore) -> Self {
        info!(
            seed_demo_data = config.seed_demo_data,
            order_history = %config.order_history,
            "Application state ready"
        );
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: RwLock::new(store),
            }),
        }
    }

    /// Get a reference to the shop configuration.
    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.inner.config
    }

    /// Get a reference to the locked record store.
    #[must_use]
    pub fn store(&self) -> &RwLock<RecordStore> {
        &self.inner.store
    }

    /// Order aggregate manager using the configured history policy.
    #[must_use]
    pub fn orders(&self) -> OrderService<'_> {
        OrderService::new(&self.inner.store, self.inner.config.order_history)
    }

    #[must_use]
    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.inner.store)
    }

    #[must_use]
    pub fn products(&self) -> ProductService<'_> {
        ProductService::new(&self.inner.store)
    }

    #[must_use]
    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(&self.inner.store)
    }

    /// Copy of the whole store.
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.inner.store.read().await.snapshot()
    }

    /// Audit the store for broken or dangling references.
    pub async fn audit(&self) -> IntegrityReport {
        let report = audit(&*self.inner.store.read().await);
        for finding in &report.findings {
            if finding.is_corruption() {
                warn!(%finding, "Integrity violation");
            } else {
                info!(%finding, "Dangling reference");
            }
        }
        report
    }
}
