//! Product catalog management.

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use hardstop_core::{CategoryId, ProductId};

use crate::db::RecordStore;
use crate::error::{EntityKind, Result, ShopError};
use crate::models::{Product, ProductInput};

/// Service for catalog products.
pub struct ProductService<'a> {
    store: &'a RwLock<RecordStore>,
}

impl<'a> ProductService<'a> {
    /// Create a new product service over a shared store.
    #[must_use]
    pub const fn new(store: &'a RwLock<RecordStore>) -> Self {
        Self { store }
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(Product)` if the product does not exist.
    pub async fn get(&self, id: ProductId) -> Result<Product> {
        self.store
            .read()
            .await
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| ShopError::not_found(EntityKind::Product, id))
    }

    /// List all products.
    pub async fn list(&self) -> Vec<Product> {
        self.store.read().await.products.list()
    }

    /// List the products filed under one category.
    pub async fn list_by_category(&self, category_id: CategoryId) -> Vec<Product> {
        self.store
            .read()
            .await
            .products
            .iter()
            .filter(|p| p.category_id == Some(category_id))
            .cloned()
            .collect()
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(Category)` if a category is given and does not exist.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> Result<Product> {
        let mut store = self.store.write().await;
        check_category(&store, input.category_id)?;
        let product = Product::new(input);
        store.products.insert(product.clone());
        drop(store);

        info!(product_id = %product.id, price = %product.price, "Created product");
        Ok(product)
    }

    /// Overwrite a product's fields.
    ///
    /// Existing cart items keep the unit price they captured.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(Product)` if the product does not exist, then
    /// `NotFound(Category)` if a category is given and does not exist.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ProductId, input: ProductInput) -> Result<Product> {
        let mut store = self.store.write().await;
        if !store.products.contains(&id) {
            return Err(ShopError::not_found(EntityKind::Product, id));
        }
        check_category(&store, input.category_id)?;
        let product = store
            .products
            .get_mut(&id)
            .ok_or_else(|| ShopError::not_found(EntityKind::Product, id))?;
        product.apply(input);
        Ok(product.clone())
    }

    /// Delete a product.
    ///
    /// Cart items that reference it are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(Product)` if the product does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<Product> {
        let mut store = self.store.write().await;
        let product = store
            .products
            .remove(&id)
            .ok_or_else(|| ShopError::not_found(EntityKind::Product, id))?;
        let referencing_carts = store
            .carts
            .iter()
            .filter(|cart| cart.items.iter().any(|item| item.product_id == id))
            .count();
        drop(store);

        debug!(referencing_carts, "Deleted product");
        Ok(product)
    }
}

fn check_category(store: &RecordStore, category_id: Option<CategoryId>) -> Result<()> {
    match category_id {
        Some(id) if !store.categories.contains(&id) => {
            Err(ShopError::not_found(EntityKind::Category, id))
        }
        _ => Ok(()),
    }
}
