//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{Clock, PostRepository, UserRepository};
use quill_core::{CatalogSettings, PostCatalog};
use quill_infra::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository, SystemClock};

#[cfg(feature = "postgres")]
use quill_infra::{DatabaseConnections, PostgresPostRepository, PostgresUserRepository};

type Repositories = (Arc<dyn PostRepository>, Arc<dyn UserRepository>);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PostCatalog>,
    /// Which store backs the catalog, reported by the health check.
    pub backend: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>, settings: CatalogSettings) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        if let Some((posts, users)) = connect(db_config).await {
            tracing::info!(backend = "postgres", "Application state initialized");
            return Self::with_repositories(posts, users, clock, settings, "postgres");
        }

        let users = Arc::new(InMemoryUserRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
        tracing::info!(backend = "memory", "Application state initialized");

        Self::with_repositories(posts, users, clock, settings, "memory")
    }

    pub fn with_repositories(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        settings: CatalogSettings,
        backend: &'static str,
    ) -> Self {
        Self {
            catalog: Arc::new(PostCatalog::new(posts, users, clock, settings)),
            backend,
        }
    }
}

#[cfg(feature = "postgres")]
async fn connect(db_config: Option<&DatabaseConfig>) -> Option<Repositories> {
    let Some(config) = db_config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return None;
    };

    match DatabaseConnections::init(config).await {
        Ok(connections) => {
            let posts: Arc<dyn PostRepository> =
                Arc::new(PostgresPostRepository::new(connections.main.clone()));
            let users: Arc<dyn UserRepository> =
                Arc::new(PostgresUserRepository::new(connections.main));
            Some((posts, users))
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            None
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn connect(_db_config: Option<&DatabaseConfig>) -> Option<Repositories> {
    tracing::info!("Running without postgres feature - using in-memory repository");
    None
}
