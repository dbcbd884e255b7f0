pub mod pokemon;

use std::sync::Arc;

use axum::{Json, Router};
use serde::Serialize;

use pokedex_core::ServiceError;

use crate::service::{PokemonError, PokemonService};

/// Shared application state.
pub type AppState = Arc<PokemonService>;

/// Build the catalog router. The binary nests it under the API prefix.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(pokemon::routes())
        .with_state(state)
}

/// Wrap a service result into an API response.
pub(crate) fn ok_json<T: Serialize>(result: Result<T, PokemonError>) -> Result<Json<T>, ServiceError> {
    result.map(Json).map_err(ServiceError::from)
}
