use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::config;
use crate::handlers;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        // Catalog: reads are public, writes admin-gated in the handlers
        .route(
            "/products",
            get(handlers::products::list).post(handlers::products::create),
        )
        .route(
            "/products/:id",
            get(handlers::products::show)
                .put(handlers::products::update)
                .delete(handlers::products::remove),
        )
        // Orders
        .route("/orders", post(handlers::orders::create))
        // Admin
        .route("/admin/stats", get(handlers::admin::stats))
        // Demo data
        .route("/seed", post(handlers::seed::seed))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config().security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Storefront API",
            "version": version,
            "description": "E-commerce backend API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/signup, /auth/login (public - token acquisition)",
                "products": "/products[/:id] (reads public, writes admin)",
                "orders": "/orders (protected)",
                "admin": "/admin/stats (admin)",
                "seed": "/seed (public, idempotent demo data)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
