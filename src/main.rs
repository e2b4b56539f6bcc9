use std::sync::Arc;

use storefront_api::config::config;
use storefront_api::routes;
use storefront_api::state::AppState;
use storefront_api::store::PgStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config();
    tracing::info!("Starting Storefront API in {:?} mode", config.environment);

    let store = PgStore::connect()
        .await
        .unwrap_or_else(|e| panic!("failed to connect document store: {}", e));

    let app = routes::app(AppState::new(Arc::new(store)));

    // Allow deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Storefront API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
