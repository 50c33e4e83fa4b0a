//! Hardstop Shop library.
//!
//! An in-process, non-persistent e-commerce backend: users, products,
//! categories and orders held in a [`db::RecordStore`], with the order
//! aggregate (order + cart + payment) managed as one unit by
//! [`services::orders::OrderService`].
//!
//! The store is owned by [`state::AppState`], built once at startup and
//! shared by handle.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;

pub use config::ShopConfig;
pub use error::{EntityKind, Result, ShopError};
pub use state::AppState;
