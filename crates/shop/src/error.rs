//! Unified error handling for shop operations.
//!
//! Every service returns [`Result<T>`]. Errors are request-scoped: they fail
//! the single operation and are never fatal to the process.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Kind of entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Product,
    Category,
    Cart,
    Payment,
    Order,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Product => write!(f, "product"),
            Self::Category => write!(f, "category"),
            Self::Cart => write!(f, "cart"),
            Self::Payment => write!(f, "payment"),
            Self::Order => write!(f, "order"),
        }
    }
}

/// Error type for shop operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShopError {
    /// A directly addressed entity does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was looked up.
        kind: EntityKind,
        /// The ID that did not resolve.
        id: Uuid,
    },

    /// A field of the request names an entity that does not exist.
    #[error("invalid reference in {field}: {id} does not exist")]
    InvalidReference {
        /// Request field holding the reference.
        field: &'static str,
        /// The ID that did not resolve.
        id: Uuid,
    },

    /// A cart line asks for zero units.
    #[error("invalid quantity for product {product_id}: must be at least 1")]
    InvalidQuantity {
        /// Product named by the offending line.
        product_id: Uuid,
    },

    /// A live order's cart or payment is missing from the store.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl ShopError {
    /// Build a [`ShopError::NotFound`].
    pub fn not_found(kind: EntityKind, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Build a [`ShopError::InvalidReference`].
    pub fn invalid_reference(field: &'static str, id: impl Into<Uuid>) -> Self {
        Self::InvalidReference {
            field,
            id: id.into(),
        }
    }

    /// Whether the caller sent something that does not resolve, as opposed
    /// to the store being inconsistent.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::InvalidReference { .. } | Self::InvalidQuantity { .. }
        )
    }
}

/// Result type alias for `ShopError`.
pub type Result<T> = std::result::Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;
    use hardstop_core::{OrderId, ProductId};

    #[test]
    fn test_not_found_display() {
        let id = OrderId::generate();
        let err = ShopError::not_found(EntityKind::Order, id);
        assert_eq!(err.to_string(), format!("order not found: {id}"));
    }

    #[test]
    fn test_invalid_reference_display() {
        let id = ProductId::generate();
        let err = ShopError::invalid_reference("items.product_id", id);
        assert_eq!(
            err.to_string(),
            format!("invalid reference in items.product_id: {id} does not exist")
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(ShopError::not_found(EntityKind::User, Uuid::nil()).is_client_error());
        assert!(ShopError::invalid_reference("items.product_id", Uuid::nil()).is_client_error());
        assert!(
            ShopError::InvalidQuantity {
                product_id: Uuid::nil()
            }
            .is_client_error()
        );
        assert!(!ShopError::DataCorruption("cart missing".to_string()).is_client_error());
    }
}
