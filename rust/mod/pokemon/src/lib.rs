pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;
use pokedex_core::Module;

use service::PokemonService;

/// Pokemon module: the catalog's read/write endpoints.
pub struct PokemonModule {
    service: Arc<PokemonService>,
}

impl PokemonModule {
    pub fn new(service: Arc<PokemonService>) -> Self {
        Self { service }
    }
}

impl Module for PokemonModule {
    fn name(&self) -> &str {
        "pokemon"
    }

    fn routes(&self) -> Router {
        api::router(self.service.clone())
    }
}
