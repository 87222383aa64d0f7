//! Shop-Track service library.
//!
//! This crate holds everything between the front end and the embedded store:
//! authentication state, credential registration, the product catalog with
//! its filter, and the shopping list. The `shop-track-cli` binary is one front
//! end; anything that can hold an [`state::AppState`] can drive it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
