use std::sync::Arc;

use hierarchy_api::store::{MemoryStore, PgStore, Store};
use hierarchy_api::{app, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = hierarchy_api::config::config();

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url, config.database_max_connections)
                .await
                .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, running on the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let app = app(AppState { store });

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("hierarchy API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
