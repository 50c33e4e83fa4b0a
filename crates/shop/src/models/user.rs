//! User domain types.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use hardstop_core::{OrderId, ProductId, UserId};

/// A shop user.
///
/// The password is an opaque string: it is neither hashed nor checked
/// anywhere, only stored. It is wrapped in a [`SecretString`] so it never
/// shows up in `Debug` output or serialized snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (stored verbatim).
    pub email: String,
    /// Opaque password.
    #[serde(skip)]
    pub password: SecretString,
    /// Favorite products, in the order they were added. May hold duplicates.
    pub favorites: Vec<ProductId>,
    /// Orders placed by this user, in creation order.
    pub orders: Vec<OrderId>,
}

impl User {
    /// Build a new user with a fresh ID and empty favorites and orders.
    #[must_use]
    pub fn new(input: UserInput) -> Self {
        Self {
            id: UserId::generate(),
            name: input.name,
            email: input.email,
            password: SecretString::from(input.password),
            favorites: Vec::new(),
            orders: Vec::new(),
        }
    }

    /// Overwrite name, email and password.
    pub fn apply(&mut self, input: UserInput) {
        self.name = input.name;
        self.email = input.email;
        self.password = SecretString::from(input.password);
    }
}

/// Input for creating or updating a user.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Opaque password.
    pub password: String,
}
