//! Route registration: module routes under the API prefix plus system endpoints.

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;

/// Prefix every module route is nested under.
pub const API_PREFIX: &str = "/api/v2";

/// Build the complete router with all routes.
pub fn build_router(module_routes: Vec<(&str, Router)>) -> Router {
    let mut api = Router::new();
    for (name, router) in module_routes {
        tracing::debug!("mounting {} routes under {}", name, API_PREFIX);
        api = api.merge(router);
    }

    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .nest(API_PREFIX, api)
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "pokedexd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
