//! Category management.

use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use hardstop_core::CategoryId;

use crate::db::RecordStore;
use crate::error::{EntityKind, Result, ShopError};
use crate::models::{Category, CategoryInput};

/// Service for product categories.
pub struct CategoryService<'a> {
    store: &'a RwLock<RecordStore>,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service over a shared store.
    #[must_use]
    pub const fn new(store: &'a RwLock<RecordStore>) -> Self {
        Self { store }
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(Category)` if the category does not exist.
    pub async fn get(&self, id: CategoryId) -> Result<Category> {
        self.store
            .read()
            .await
            .categories
            .get(&id)
            .cloned()
            .ok_or_else(|| ShopError::not_found(EntityKind::Category, id))
    }

    /// List all categories.
    pub async fn list(&self) -> Vec<Category> {
        self.store.read().await.categories.list()
    }

    /// Create a new category.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CategoryInput) -> Category {
        let category = Category::new(input);
        self.store.write().await.categories.insert(category.clone());
        info!(category_id = %category.id, "Created category");
        category
    }

    /// Rename a category.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(Category)` if the category does not exist.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: CategoryId, input: CategoryInput) -> Result<Category> {
        let mut store = self.store.write().await;
        let category = store
            .categories
            .get_mut(&id)
            .ok_or_else(|| ShopError::not_found(EntityKind::Category, id))?;
        category.name = input.name;
        Ok(category.clone())
    }

    /// Delete a category.
    ///
    /// Products filed under it keep their (now dangling) category ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(Category)` if the category does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CategoryId) -> Result<Category> {
        let mut store = self.store.write().await;
        let category = store
            .categories
            .remove(&id)
            .ok_or_else(|| ShopError::not_found(EntityKind::Category, id))?;
        let still_filed = store
            .products
            .iter()
            .filter(|p| p.category_id == Some(id))
            .count();
        drop(store);

        if still_filed == 0 {
            info!("Deleted category");
        } else {
            warn!(products = still_filed, "Deleted category that products still reference");
        }
        Ok(category)
    }
}
