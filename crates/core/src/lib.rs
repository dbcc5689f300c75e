//! BookBuddy Core - Shared types library.
//!
//! This crate provides common types used across all BookBuddy components:
//! - `server` - JSON API for catalog, cart, orders, wishlist, and reviews
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices, and statuses
//! - [`order_number`] - Human-readable order number formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod order_number;
pub mod types;

pub use order_number::OrderNumber;
pub use types::*;
