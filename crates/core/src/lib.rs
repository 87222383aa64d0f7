//! Shop-Track Core - Shared types library.
//!
//! This crate provides the domain types used across all Shop-Track components:
//! - `shop-track` - Session, registration, catalog and shopping-list services
//! - `shop-track-cli` - Terminal front end, migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, catalog records, list entries and session state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
