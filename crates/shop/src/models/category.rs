//! Category domain types.

use serde::{Deserialize, Serialize};

use hardstop_core::CategoryId;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
}

impl Category {
    /// Build a new category with a fresh ID.
    #[must_use]
    pub fn new(input: CategoryInput) -> Self {
        Self {
            id: CategoryId::generate(),
            name: input.name,
        }
    }
}

/// Input for creating or renaming a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    /// Category name.
    pub name: String,
}
