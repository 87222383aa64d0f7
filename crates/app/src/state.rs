//! Application state shared with the front end.
//!
//! `AppState` is the composition root: it owns the store and every service,
//! and is passed by reference (or cloned cheaply) into whatever renders the
//! UI. There are no global singletons.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use crate::config::AppConfig;
use crate::db;
use crate::error::Result;
use crate::services::auth::AuthService;
use crate::services::catalog::{Catalog, CatalogService};
use crate::services::session::SessionManager;
use crate::services::shopping_list::ShoppingList;

/// Application state shared across the front end.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: SqlitePool,
    session: SessionManager,
    catalog: CatalogService,
    shopping_list: ShoppingList,
}

impl AppState {
    /// Create application state from an open pool and a catalog.
    #[must_use]
    pub fn new(config: AppConfig, pool: SqlitePool, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                session: SessionManager::new(),
                catalog: CatalogService::new(catalog),
                shopping_list: ShoppingList::new(),
            }),
        }
    }

    /// Open the store, apply migrations, load the catalog and build state.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the store cannot be opened or migrated.
    /// Returns `AppError::Catalog` if a configured catalog file is invalid.
    pub async fn connect(config: AppConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_yaml_file(path)?,
            None => Catalog::builtin(),
        };

        let pool = db::create_pool(&config.database_url)
            .await
            .map_err(db::RepositoryError::from)?;
        db::run_migrations(&pool).await?;
        info!(database_url = %config.database_url, "Store ready");

        Ok(Self::new(config, pool, catalog))
    }

    /// Build throwaway state for previews and demos.
    ///
    /// The store is always in memory regardless of `config.database_url`. It
    /// holds the preview user, and the shopping list starts with the sample
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`AppState::connect`], or
    /// `AppError::Database` if seeding fails.
    pub async fn preview(config: AppConfig) -> Result<Self> {
        let config = AppConfig {
            database_url: db::IN_MEMORY_URL.to_string(),
            ..config
        };
        let state = Self::connect(config).await?;
        db::seed_preview(state.pool()).await?;
        state.shopping_list().add_samples();
        info!("Preview state ready");
        Ok(state)
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the session.
    #[must_use]
    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }

    /// Get a reference to the catalog service.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// Get a reference to the shopping list.
    #[must_use]
    pub fn shopping_list(&self) -> &ShoppingList {
        &self.inner.shopping_list
    }

    /// Authentication service bound to this state's store and session.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(
            &self.inner.pool,
            &self.inner.session,
            self.inner.config.login_policy,
        )
    }
}
