use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use pokedex_core::ServiceError;
use pokemon::model::CreatePokemon;
use pokemon::service::PokemonService;

use crate::source::{ListingEntry, ListingSource};

/// Where a seed run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStage {
    Reset,
    Fetch,
    Decode,
    Insert,
}

impl fmt::Display for SeedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeedStage::Reset => "reset",
            SeedStage::Fetch => "fetch",
            SeedStage::Decode => "decode",
            SeedStage::Insert => "insert",
        };
        f.write_str(s)
    }
}

/// A failed seed run. Any failure after the reset leaves the catalog empty.
#[derive(Debug, Error, PartialEq)]
#[error("seed failed at {stage}: {message}")]
pub struct SeedError {
    pub stage: SeedStage,
    pub message: String,
}

impl SeedError {
    fn new(stage: SeedStage, message: impl fmt::Display) -> Self {
        let message = message.to_string();
        error!("seed {} failed: {}", stage, message);
        Self { stage, message }
    }
}

impl From<SeedError> for ServiceError {
    fn from(e: SeedError) -> Self {
        ServiceError::SeedFailed(e.to_string())
    }
}

/// Outcome of a successful seed run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeedSummary {
    pub removed: u64,
    pub inserted: u64,
}

/// Wipes the catalog and reloads it from one page of the listing source.
///
/// Runs must not overlap with each other or with catalog writes; nothing here
/// serializes them.
pub struct SeedService {
    pokemon: Arc<PokemonService>,
    source: Arc<dyn ListingSource>,
    page_size: usize,
}

impl SeedService {
    pub fn new(pokemon: Arc<PokemonService>, source: Arc<dyn ListingSource>, page_size: usize) -> Self {
        Self { pokemon, source, page_size }
    }

    /// Reset, fetch one page, insert it in bulk. No retries.
    ///
    /// Entries past `page_size` are not imported, and seeded names keep the
    /// source's spelling.
    pub async fn execute(&self) -> Result<SeedSummary, SeedError> {
        let removed = self
            .pokemon
            .purge_all()
            .map_err(|e| SeedError::new(SeedStage::Reset, e))?;
        info!("seed: removed {} existing records", removed);

        let entries = self
            .source
            .fetch_page(self.page_size)
            .await
            .map_err(|e| SeedError::new(SeedStage::Fetch, e))?;

        let batch = entries
            .iter()
            .take(self.page_size)
            .map(to_record)
            .collect::<Result<Vec<_>, _>>()?;

        let inserted = self
            .pokemon
            .insert_many(batch)
            .map_err(|e| SeedError::new(SeedStage::Insert, e))?;
        info!("seed: inserted {} records", inserted);

        Ok(SeedSummary { removed, inserted })
    }
}

fn to_record(entry: &ListingEntry) -> Result<CreatePokemon, SeedError> {
    let code = code_from_url(&entry.url).ok_or_else(|| {
        SeedError::new(
            SeedStage::Decode,
            format!("no numeric code in url {:?} for {:?}", entry.url, entry.name),
        )
    })?;
    Ok(CreatePokemon::new(code, entry.name.clone()))
}

/// The code is the second-to-last `/` segment: `.../pokemon/25/` -> 25.
pub fn code_from_url(url: &str) -> Option<i64> {
    let segments: Vec<&str> = url.split('/').collect();
    let idx = segments.len().checked_sub(2)?;
    segments[idx].parse().ok()
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::source::SourceError;
    use pokedex_sql::{SQLStore, SqliteStore};

    /// In-memory listing source. Records the limit it was asked for.
    pub(crate) struct FakeSource {
        pub entries: Vec<ListingEntry>,
        pub fail: bool,
        pub requested: Mutex<Option<usize>>,
    }

    impl FakeSource {
        pub(crate) fn with(entries: Vec<(&str, i64)>) -> Self {
            Self {
                entries: entries
                    .into_iter()
                    .map(|(name, code)| ListingEntry {
                        name: name.to_string(),
                        url: format!("https://pokeapi.co/api/v2/pokemon/{}/", code),
                    })
                    .collect(),
                fail: false,
                requested: Mutex::new(None),
            }
        }

        pub(crate) fn failing() -> Self {
            Self { fail: true, ..Self::with(vec![]) }
        }
    }

    #[async_trait::async_trait]
    impl ListingSource for FakeSource {
        async fn fetch_page(&self, limit: usize) -> Result<Vec<ListingEntry>, SourceError> {
            *self.requested.lock().unwrap() = Some(limit);
            if self.fail {
                return Err(SourceError::Server { status: 503, message: "unavailable".into() });
            }
            Ok(self.entries.clone())
        }
    }

    pub(crate) fn catalog() -> Arc<PokemonService> {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        Arc::new(PokemonService::new(sql, 20).unwrap())
    }

    #[test]
    fn code_from_url_takes_second_to_last_segment() {
        assert_eq!(code_from_url("https://pokeapi.co/api/v2/pokemon/25/"), Some(25));
        assert_eq!(code_from_url("https://pokeapi.co/api/v2/pokemon/10001/"), Some(10001));
        assert_eq!(code_from_url("https://pokeapi.co/api/v2/pokemon/25"), None);
        assert_eq!(code_from_url("25/"), Some(25));
        assert_eq!(code_from_url(""), None);
    }

    #[tokio::test]
    async fn seed_replaces_existing_records() {
        let pokemon = catalog();
        pokemon.create(CreatePokemon::new(999, "fakemon")).unwrap();
        pokemon.create(CreatePokemon::new(1, "old-bulbasaur")).unwrap();

        let source = Arc::new(FakeSource::with(vec![
            ("bulbasaur", 1),
            ("ivysaur", 2),
            ("venusaur", 3),
        ]));
        let seed = SeedService::new(pokemon.clone(), source.clone(), 650);

        let summary = seed.execute().await.unwrap();
        assert_eq!(summary, SeedSummary { removed: 2, inserted: 3 });
        assert_eq!(*source.requested.lock().unwrap(), Some(650));

        assert_eq!(pokemon.count().unwrap(), 3);
        assert!(pokemon.find_one("999").is_err());
        assert!(pokemon.find_one("fakemon").is_err());
        assert_eq!(pokemon.find_one("1").unwrap().name, "bulbasaur");
    }

    #[tokio::test]
    async fn seed_is_idempotent() {
        let pokemon = catalog();
        let source = Arc::new(FakeSource::with(vec![("bulbasaur", 1), ("ivysaur", 2)]));
        let seed = SeedService::new(pokemon.clone(), source, 650);

        seed.execute().await.unwrap();
        let summary = seed.execute().await.unwrap();
        assert_eq!(summary, SeedSummary { removed: 2, inserted: 2 });
        assert_eq!(pokemon.count().unwrap(), 2);
    }

    #[tokio::test]
    async fn seeded_names_are_not_lowercased() {
        let pokemon = catalog();
        let source = Arc::new(FakeSource::with(vec![("Mr-Mime", 122)]));
        SeedService::new(pokemon.clone(), source, 650).execute().await.unwrap();

        assert_eq!(pokemon.find_one("Mr-Mime").unwrap().code, 122);
        assert!(pokemon.find_one("mr-mime").is_err());
    }

    #[tokio::test]
    async fn only_one_page_is_imported() {
        let pokemon = catalog();
        let source = Arc::new(FakeSource::with(vec![
            ("bulbasaur", 1),
            ("ivysaur", 2),
            ("venusaur", 3),
        ]));
        let summary = SeedService::new(pokemon.clone(), source.clone(), 2)
            .execute()
            .await
            .unwrap();

        assert_eq!(summary.inserted, 2);
        assert_eq!(*source.requested.lock().unwrap(), Some(2));
        assert!(pokemon.find_one("3").is_err());
    }

    #[tokio::test]
    async fn fetch_failure_leaves_store_empty() {
        let pokemon = catalog();
        pokemon.create(CreatePokemon::new(25, "pikachu")).unwrap();

        let err = SeedService::new(pokemon.clone(), Arc::new(FakeSource::failing()), 650)
            .execute()
            .await
            .unwrap_err();
        assert_eq!(err.stage, SeedStage::Fetch);
        assert_eq!(pokemon.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn bad_url_fails_decode() {
        let pokemon = catalog();
        let mut source = FakeSource::with(vec![("bulbasaur", 1)]);
        source.entries.push(ListingEntry {
            name: "glitch".into(),
            url: "https://pokeapi.co/api/v2/pokemon/glitch/".into(),
        });

        let err = SeedService::new(pokemon.clone(), Arc::new(source), 650)
            .execute()
            .await
            .unwrap_err();
        assert_eq!(err.stage, SeedStage::Decode);
        assert_eq!(pokemon.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_codes_fail_the_whole_insert() {
        let pokemon = catalog();
        let source = Arc::new(FakeSource::with(vec![
            ("bulbasaur", 1),
            ("ivysaur", 2),
            ("bulbasaur-clone", 1),
        ]));

        let err = SeedService::new(pokemon.clone(), source, 650)
            .execute()
            .await
            .unwrap_err();
        assert_eq!(err.stage, SeedStage::Insert);
        assert_eq!(err.message, "pokemon already exists - code=1");
        assert_eq!(pokemon.count().unwrap(), 0);
    }
}
