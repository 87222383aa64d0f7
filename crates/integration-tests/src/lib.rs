//! Integration tests for Shop-Track.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shop-track-integration-tests
//! ```
//!
//! No external services are needed: every test opens its own in-memory or
//! temporary-file `SQLite` store.
//!
//! # Test Categories
//!
//! - `session_flow` - Registration, login policies and session broadcasting
//! - `catalog_and_list` - Filtering and list accumulation through `AppState`
//! - `file_store` - Credentials surviving a reopen of an on-disk store

use std::path::Path;

use shop_track::config::AppConfig;
use shop_track::state::AppState;

/// Open fresh state backed by an in-memory store.
///
/// # Panics
///
/// Panics if the in-memory store cannot be created.
#[allow(clippy::expect_used)]
pub async fn in_memory_state() -> AppState {
    AppState::connect(AppConfig::in_memory())
        .await
        .expect("in-memory state")
}

/// Open state backed by a `SQLite` file at `path`.
///
/// # Panics
///
/// Panics if the store cannot be created.
#[allow(clippy::expect_used)]
pub async fn file_state(path: &Path, config: AppConfig) -> AppState {
    let config = AppConfig {
        database_url: format!("sqlite://{}", path.display()),
        ..config
    };
    AppState::connect(config).await.expect("file-backed state")
}
