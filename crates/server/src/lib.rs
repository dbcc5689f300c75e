//! BookBuddy API server library.
//!
//! An axum JSON API for an English-language manga/book storefront: catalog
//! browsing and search, accounts with bearer-token auth, cart persistence,
//! orders with status-driven inventory adjustment, wishlist, and reviews.
//!
//! The binary in `main.rs` wires these modules together; they are exposed as
//! a library so tests can reach them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
