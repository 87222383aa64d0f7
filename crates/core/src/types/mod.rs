//! Core types for Shop-Track.
//!
//! This module provides type-safe wrappers for the shopping-list domain.

pub mod catalog;
pub mod id;
pub mod list;
pub mod session;

pub use catalog::{Category, Product};
pub use id::*;
pub use list::ShoppingListEntry;
pub use session::SessionState;
