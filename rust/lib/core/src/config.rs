use std::path::PathBuf;

use crate::ServiceError;

/// Default page size for list endpoints when the caller gives no `limit`.
pub const DEFAULT_LIMIT: usize = 20;

/// Default listing endpoint used by the seed routine.
pub const DEFAULT_SEED_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Default number of entries requested from the listing endpoint.
pub const DEFAULT_SEED_PAGE_SIZE: usize = 650;

/// Service configuration.
///
/// `pokedexd` fills this from flags and environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the database file.
    pub data_dir: Option<PathBuf>,

    /// Path to the SQLite database file.
    /// Defaults to `{data_dir}/pokedex.sqlite` if not specified.
    pub sqlite_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,

    /// Page size used when a list request carries no `limit`.
    pub default_limit: usize,

    /// Listing endpoint the seed routine reads from.
    pub seed_url: String,

    /// How many entries the seed routine requests. Only one page is read.
    pub seed_page_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            sqlite_path: None,
            listen: "0.0.0.0:3000".to_string(),
            default_limit: DEFAULT_LIMIT,
            seed_url: DEFAULT_SEED_URL.to_string(),
            seed_page_size: DEFAULT_SEED_PAGE_SIZE,
        }
    }
}

impl ServiceConfig {
    /// Check the values that would otherwise fail later at request time.
    pub fn verify(&self) -> Result<(), ServiceError> {
        if self.default_limit == 0 {
            return Err(ServiceError::Validation("default limit must be at least 1".into()));
        }
        if self.seed_page_size == 0 {
            return Err(ServiceError::Validation("seed page size must be at least 1".into()));
        }
        if self.seed_url.trim().is_empty() {
            return Err(ServiceError::Validation("seed url is empty".into()));
        }
        Ok(())
    }

    /// Resolve the SQLite database path, falling back to `{data_dir}/pokedex.sqlite`.
    pub fn resolve_sqlite_path(&self) -> PathBuf {
        self.sqlite_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("pokedex.sqlite"))
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}
