//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use quill_core::CatalogSettings;
use quill_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub catalog: CatalogSettings,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parsed("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(8080),
            database,
            catalog: Self::catalog_from_env(),
        }
    }

    fn catalog_from_env() -> CatalogSettings {
        let defaults = CatalogSettings::default();

        let page_size = match parsed::<u64>("POSTS_PAGE_SIZE") {
            Some(0) => {
                tracing::warn!(
                    default = defaults.page_size,
                    "POSTS_PAGE_SIZE must be positive, using default"
                );
                defaults.page_size
            }
            Some(size) => size,
            None => defaults.page_size,
        };

        CatalogSettings {
            page_size,
            order: parsed("POSTS_ORDER").unwrap_or(defaults.order),
            access_policy: parsed("POSTS_ACCESS_POLICY").unwrap_or(defaults.access_policy),
            base_path: defaults.base_path,
        }
    }
}

/// Read and parse one variable. Unparseable values are logged and ignored.
fn parsed<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "Ignoring invalid setting");
            None
        }
    }
}
