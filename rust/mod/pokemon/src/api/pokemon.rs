use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};

use pokedex_core::{ListParams, ListResult, ServiceError, is_valid_id};

use super::{AppState, ok_json};
use crate::model::{CreatePokemon, Pokemon, UpdatePokemon};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pokemon", post(create_pokemon).get(list_pokemon))
        .route(
            "/pokemon/{term}",
            get(get_pokemon).patch(update_pokemon).delete(delete_pokemon),
        )
}

async fn create_pokemon(
    State(svc): State<AppState>,
    body: Result<Json<CreatePokemon>, JsonRejection>,
) -> Result<Json<Pokemon>, ServiceError> {
    let Json(body) = body?;
    ok_json(svc.create(body))
}

async fn list_pokemon(
    State(svc): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResult<Pokemon>>, ServiceError> {
    let Query(params) = params?;
    ok_json(svc.list(&params))
}

async fn get_pokemon(
    State(svc): State<AppState>,
    Path(term): Path<String>,
) -> Result<Json<Pokemon>, ServiceError> {
    ok_json(svc.find_one(&term))
}

async fn update_pokemon(
    State(svc): State<AppState>,
    Path(term): Path<String>,
    patch: Result<Json<UpdatePokemon>, JsonRejection>,
) -> Result<Json<Pokemon>, ServiceError> {
    let Json(patch) = patch?;
    ok_json(svc.update(&term, patch))
}

async fn delete_pokemon(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    if !is_valid_id(&id) {
        return Err(ServiceError::Validation(format!("{} is not a valid id", id)));
    }
    svc.remove(&id)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
