//! Business logic over the record store.
//!
//! Each service borrows the store lock from [`AppState`](crate::AppState)
//! and does its referential checks before writing.

pub mod categories;
pub mod integrity;
pub mod orders;
pub mod products;
pub mod users;

pub use categories::CategoryService;
pub use integrity::{Finding, IntegrityReport, audit};
pub use orders::OrderService;
pub use products::ProductService;
pub use users::UserService;
