pub mod api;
pub mod service;
pub mod source;

use std::sync::Arc;

use axum::Router;
use pokedex_core::Module;

use service::SeedService;

/// Seed module: resets the catalog from the listing source on request.
pub struct SeedModule {
    service: Arc<SeedService>,
}

impl SeedModule {
    pub fn new(service: Arc<SeedService>) -> Self {
        Self { service }
    }
}

impl Module for SeedModule {
    fn name(&self) -> &str {
        "seed"
    }

    fn routes(&self) -> Router {
        api::router(self.service.clone())
    }
}
