//! User management and favorites.

use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use hardstop_core::{ProductId, UserId};

use crate::db::RecordStore;
use crate::error::{EntityKind, Result, ShopError};
use crate::models::{User, UserInput};

/// Service for users and their favorites.
pub struct UserService<'a> {
    store: &'a RwLock<RecordStore>,
}

impl<'a> UserService<'a> {
    /// Create a new user service over a shared store.
    #[must_use]
    pub const fn new(store: &'a RwLock<RecordStore>) -> Self {
        Self { store }
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(User)` if the user does not exist.
    pub async fn get(&self, id: UserId) -> Result<User> {
        self.store
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| ShopError::not_found(EntityKind::User, id))
    }

    /// List all users.
    pub async fn list(&self) -> Vec<User> {
        self.store.read().await.users.list()
    }

    /// Create a new user.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: UserInput) -> User {
        let user = User::new(input);
        self.store.write().await.users.insert(user.clone());
        info!(user_id = %user.id, "Created user");
        user
    }

    /// Overwrite a user's name, email and password.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(User)` if the user does not exist.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: UserId, input: UserInput) -> Result<User> {
        let mut store = self.store.write().await;
        let user = store
            .users
            .get_mut(&id)
            .ok_or_else(|| ShopError::not_found(EntityKind::User, id))?;
        user.apply(input);
        Ok(user.clone())
    }

    /// Delete a user.
    ///
    /// The user's orders are left in place.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(User)` if the user does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<User> {
        let mut store = self.store.write().await;
        let user = store
            .users
            .remove(&id)
            .ok_or_else(|| ShopError::not_found(EntityKind::User, id))?;
        drop(store);

        if user.orders.is_empty() {
            info!("Deleted user");
        } else {
            warn!(orders = user.orders.len(), "Deleted user who still has orders");
        }
        Ok(user)
    }

    /// Append a product to a user's favorites.
    ///
    /// Adding a product twice lists it twice. Returns the updated favorites.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(User)` if the user does not exist, then
    /// `NotFound(Product)` if the product does not exist.
    #[instrument(skip(self))]
    pub async fn add_favorite(&self, id: UserId, product_id: ProductId) -> Result<Vec<ProductId>> {
        let mut store = self.store.write().await;
        if !store.users.contains(&id) {
            return Err(ShopError::not_found(EntityKind::User, id));
        }
        if !store.products.contains(&product_id) {
            return Err(ShopError::not_found(EntityKind::Product, product_id));
        }
        let user = store
            .users
            .get_mut(&id)
            .ok_or_else(|| ShopError::not_found(EntityKind::User, id))?;
        user.favorites.push(product_id);
        Ok(user.favorites.clone())
    }

    /// Remove the first occurrence of a product from a user's favorites.
    ///
    /// Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(User)` if the user does not exist.
    #[instrument(skip(self))]
    pub async fn remove_favorite(&self, id: UserId, product_id: ProductId) -> Result<bool> {
        let mut store = self.store.write().await;
        let user = store
            .users
            .get_mut(&id)
            .ok_or_else(|| ShopError::not_found(EntityKind::User, id))?;
        let position = user.favorites.iter().position(|p| *p == product_id);
        if let Some(index) = position {
            user.favorites.remove(index);
        }
        Ok(position.is_some())
    }

    /// A user's favorites, in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(User)` if the user does not exist.
    pub async fn favorites(&self, id: UserId) -> Result<Vec<ProductId>> {
        Ok(self.get(id).await?.favorites)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hardstop_core::Price;
    use secrecy::ExposeSecret;

    use crate::models::{Product, ProductInput};

    fn alice() -> UserInput {
        UserInput {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "password123".to_string(),
        }
    }

    fn store_with_product() -> (RwLock<RecordStore>, ProductId) {
        let mut store = RecordStore::new();
        let product = Product::new(ProductInput {
            name: "Product A".to_string(),
            description: String::new(),
            price: Price::from_cents(10000),
            stock: 5,
            category_id: None,
        });
        let id = product.id;
        store.products.insert(product);
        (RwLock::new(store), id)
    }

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let store = RwLock::new(RecordStore::new());
        let users = UserService::new(&store);

        let created = users.create(alice()).await;
        assert_eq!(users.get(created.id).await.unwrap().name, "Alice");

        let updated = users
            .update(
                created.id,
                UserInput {
                    name: "Alicia".to_string(),
                    email: "alicia@example.com".to_string(),
                    password: "s3cret".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.email, "alicia@example.com");
        assert_eq!(updated.password.expose_secret(), "s3cret");

        users.delete(created.id).await.unwrap();
        assert!(users.list().await.is_empty());
        assert!(matches!(
            users.get(created.id).await,
            Err(ShopError::NotFound {
                kind: EntityKind::User,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let store = RwLock::new(RecordStore::new());
        let ghost = UserId::generate();
        let err = UserService::new(&store)
            .update(ghost, alice())
            .await
            .unwrap_err();
        assert_eq!(err, ShopError::not_found(EntityKind::User, ghost));
    }

    #[tokio::test]
    async fn test_favorites_allow_duplicates() {
        let (store, product) = store_with_product();
        let users = UserService::new(&store);
        let user = users.create(alice()).await;

        users.add_favorite(user.id, product).await.unwrap();
        let favorites = users.add_favorite(user.id, product).await.unwrap();
        assert_eq!(favorites, vec![product, product]);

        assert!(users.remove_favorite(user.id, product).await.unwrap());
        assert_eq!(users.favorites(user.id).await.unwrap(), vec![product]);
    }

    #[tokio::test]
    async fn test_remove_absent_favorite_is_noop() {
        let (store, product) = store_with_product();
        let users = UserService::new(&store);
        let user = users.create(alice()).await;

        assert!(!users.remove_favorite(user.id, product).await.unwrap());
        assert!(users.favorites(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_product_to_favorites() {
        let (store, _) = store_with_product();
        let users = UserService::new(&store);
        let user = users.create(alice()).await;
        let ghost = ProductId::generate();

        let err = users.add_favorite(user.id, ghost).await.unwrap_err();
        assert_eq!(err, ShopError::not_found(EntityKind::Product, ghost));
    }

    #[tokio::test]
    async fn test_add_favorite_reports_missing_user_first() {
        let store = RwLock::new(RecordStore::new());
        let (user, product) = (UserId::generate(), ProductId::generate());

        let err = UserService::new(&store)
            .add_favorite(user, product)
            .await
            .unwrap_err();
        assert_eq!(err, ShopError::not_found(EntityKind::User, user));
    }

    #[tokio::test]
    async fn test_favorites_for_unknown_user() {
        let (store, product) = store_with_product();
        let users = UserService::new(&store);
        let ghost = UserId::generate();

        assert!(users.add_favorite(ghost, product).await.is_err());
        assert!(users.remove_favorite(ghost, product).await.is_err());
        assert!(users.favorites(ghost).await.is_err());
    }
}
