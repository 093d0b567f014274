//! EduCart Core - Catalog and cart domain library.
//!
//! This crate provides the domain model shared by every EduCart front end:
//! - `storefront` - Server-rendered shop (axum + askama)
//! - `cli` - Command-line catalog browser and cart
//!
//! # Architecture
//!
//! The core crate contains types, pure catalog derivation, and the cart state
//! machine. Persistence goes through the [`storage::KeyValueStore`] trait, so
//! nothing here touches the network or the filesystem.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, and catalog item records
//! - [`catalog`] - The immutable catalog and its filtered/sorted views
//! - [`cart`] - Cart lines, cart state, and the persisting cart manager
//! - [`storage`] - Key-value storage adapter and an in-memory implementation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod storage;
pub mod types;

pub use cart::{
    CART_STORAGE_KEY, Cart, CartLine, CartManager, PLACEHOLDER_CHECKOUT_URL, ResolvedLine,
};
pub use catalog::{Catalog, CatalogError, CatalogFilter, SortKey, TypeFilter, derive_view};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use types::*;
