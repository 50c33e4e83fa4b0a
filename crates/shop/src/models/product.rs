//! Product domain types.

use serde::{Deserialize, Serialize};

use hardstop_core::{CategoryId, Price, ProductId};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Current list price. Cart items snapshot their own unit price.
    pub price: Price,
    /// Units in stock.
    pub stock: u32,
    /// Category this product belongs to, if any.
    pub category_id: Option<CategoryId>,
}

impl Product {
    /// Build a new product with a fresh ID.
    #[must_use]
    pub fn new(input: ProductInput) -> Self {
        Self {
            id: ProductId::generate(),
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            category_id: input.category_id,
        }
    }

    /// Overwrite every mutable field.
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.stock = input.stock;
        self.category_id = input.category_id;
    }
}

/// Input for creating or updating a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    /// Product name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// List price.
    pub price: Price,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Category to file the product under.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}
