//! `pokedexd`: the Pokedex catalog server.
//!
//! Usage:
//!   pokedexd [--listen <addr>] [--data-dir <dir>] [--db <file>] [--seed-only]
//!
//! Every flag also reads an environment variable; see `pokedexd --help`.

mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pokedex_core::{Module, ServiceConfig};
use pokedex_sql::{SQLStore, SqliteStore};
use tracing::info;

use pokemon::PokemonModule;
use pokemon::service::PokemonService;
use seed::SeedModule;
use seed::service::SeedService;
use seed::source::{ListingSource, PokeApiSource};

/// Pokedex catalog server.
#[derive(Parser, Debug)]
#[command(name = "pokedexd", about = "Pokedex catalog server")]
struct Cli {
    /// Listen address.
    #[arg(long, env = "POKEDEX_LISTEN", default_value = "0.0.0.0:3000")]
    listen: String,

    /// Port to listen on; replaces the port of `--listen` when set.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Directory holding the database file.
    #[arg(long, env = "POKEDEX_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Database file (defaults to `{data_dir}/pokedex.sqlite`).
    #[arg(long = "db", env = "POKEDEX_DB")]
    db: Option<PathBuf>,

    /// Page size for list requests without `limit`.
    #[arg(long, env = "DEFAULT_LIMIT", default_value_t = pokedex_core::DEFAULT_LIMIT)]
    default_limit: usize,

    /// Listing endpoint the seed routine reads from.
    #[arg(long, env = "POKEDEX_SEED_URL", default_value = pokedex_core::DEFAULT_SEED_URL)]
    seed_url: String,

    /// Number of entries requested by the seed routine.
    #[arg(long, env = "POKEDEX_SEED_PAGE_SIZE", default_value_t = pokedex_core::DEFAULT_SEED_PAGE_SIZE)]
    seed_page_size: usize,

    /// Run the seed routine once and exit instead of serving.
    #[arg(long)]
    seed_only: bool,
}

impl Cli {
    fn service_config(&self) -> ServiceConfig {
        let listen = match self.port {
            Some(port) => match self.listen.rsplit_once(':') {
                Some((host, _)) => format!("{}:{}", host, port),
                None => format!("0.0.0.0:{}", port),
            },
            None => self.listen.clone(),
        };
        ServiceConfig {
            data_dir: Some(self.data_dir.clone()),
            sqlite_path: self.db.clone(),
            listen,
            default_limit: self.default_limit,
            seed_url: self.seed_url.clone(),
            seed_page_size: self.seed_page_size,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.service_config();
    config.verify()?;

    // Initialize storage.
    if let Some(dir) = &config.data_dir {
        std::fs::create_dir_all(dir)?;
    }
    let sqlite_path = config.resolve_sqlite_path();
    info!("Opening catalog at {}", sqlite_path.display());
    let sql: Arc<dyn SQLStore> = Arc::new(
        SqliteStore::open(&sqlite_path)
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    let catalog = Arc::new(PokemonService::new(sql, config.default_limit)?);
    let source: Arc<dyn ListingSource> = Arc::new(
        PokeApiSource::new(config.seed_url.clone())
            .map_err(|e| anyhow::anyhow!("failed to build listing client: {}", e))?,
    );
    let seeder = Arc::new(SeedService::new(
        Arc::clone(&catalog),
        source,
        config.seed_page_size,
    ));

    if cli.seed_only {
        let summary = seeder.execute().await?;
        info!(
            "Seed finished: removed {}, inserted {}",
            summary.removed, summary.inserted
        );
        return Ok(());
    }

    let pokemon_module = PokemonModule::new(catalog);
    let seed_module = SeedModule::new(seeder);
    info!("Modules initialized");

    let module_routes = vec![
        (pokemon_module.name(), pokemon_module.routes()),
        (seed_module.name(), seed_module.routes()),
    ];
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("Pokedex server listening on {}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
