//! Business logic services for Shop-Track.
//!
//! # Services
//!
//! - [`session`] - Process-wide authentication state with change notification
//! - [`auth`] - Registration and policy-driven login against the credential store
//! - [`catalog`] - Static product catalog, categories and the filtered product view
//! - [`shopping_list`] - Append-only shopping list with display-only check marks
//!
//! Session and catalog/list services are independent of each other; the
//! front end composes them through [`crate::state::AppState`].

pub mod auth;
pub mod catalog;
pub mod session;
pub mod shopping_list;
