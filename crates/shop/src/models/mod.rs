//! Domain models held by the record store.
//!
//! Relationships are carried as typed ids, never as nested objects: an
//! order points at its cart and payment, a cart item at its product. The
//! record store keeps each entity in its own collection and the services
//! resolve references explicitly.

pub mod cart;
pub mod category;
pub mod order;
pub mod payment;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem, CartLineInput};
pub use category::{Category, CategoryInput};
pub use order::{Order, OrderDetails, OrderInput};
pub use payment::{Payment, PaymentInput};
pub use product::{Product, ProductInput};
pub use user::{User, UserInput};
