use once_cell::sync::Lazy;
use std::env;

/// Process configuration, sourced from the environment (a `.env` file is
/// loaded by `main` before this is first read).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Absent means "run on the in-memory store" — useful for development
    /// and the integration tests.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        // Allow tests or deployments to override port via env
        let port = env::var("HIERARCHY_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        Self {
            database_url,
            database_max_connections,
            port,
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
