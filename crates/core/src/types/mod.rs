//! Core types for EduCart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod item;
pub mod price;

pub use id::ItemId;
pub use item::{CatalogItem, ItemType};
pub use price::{CurrencyCode, Price};
