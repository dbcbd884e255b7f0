use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};

use pokedex_core::ServiceError;

use crate::service::{SeedService, SeedSummary};

pub type AppState = Arc<SeedService>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/seed", get(execute_seed))
        .with_state(state)
}

async fn execute_seed(State(svc): State<AppState>) -> Result<Json<SeedSummary>, ServiceError> {
    Ok(Json(svc.execute().await?))
}
