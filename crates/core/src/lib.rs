//! Hardstop Core - Shared types library.
//!
//! This crate provides common types used across all Hardstop components:
//! - `shop` - Record store, order aggregate manager and resource managers
//! - `cli` - Command-line tools for seeding and replaying operations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no locking, no logging.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
