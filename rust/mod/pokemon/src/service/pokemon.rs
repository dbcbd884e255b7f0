use pokedex_core::{ListParams, ListResult, new_id};
use tracing::{info, warn};

use crate::model::{CreatePokemon, Pokemon, UpdatePokemon};

use super::{LookupKind, PokemonError, PokemonService};

impl PokemonService {
    /// Create one record. The name is lowercased before insert.
    pub fn create(&self, input: CreatePokemon) -> Result<Pokemon, PokemonError> {
        input.validate().map_err(PokemonError::Validation)?;

        let record = Pokemon {
            id: new_id(),
            code: input.code,
            name: input.name.to_lowercase(),
        };
        self.insert_record(&record).inspect_err(|e| {
            if let PokemonError::DuplicateKey { .. } = e {
                warn!("create rejected: {}", e);
            }
        })?;

        Ok(record)
    }

    /// List records ordered by code. A missing `limit` uses the configured default.
    pub fn list(&self, params: &ListParams) -> Result<ListResult<Pokemon>, PokemonError> {
        params
            .validate()
            .map_err(|e| PokemonError::Validation(e.to_string()))?;
        self.list_records(params.limit_or(self.default_limit), params.offset)
    }

    pub fn count(&self) -> Result<usize, PokemonError> {
        self.count_records()
    }

    /// Resolve `term`, merge `patch` into the record and store it.
    ///
    /// Absent patch fields are left untouched; a present name is lowercased.
    /// Returns the merged record.
    pub fn update(&self, term: &str, mut patch: UpdatePokemon) -> Result<Pokemon, PokemonError> {
        patch.validate().map_err(PokemonError::Validation)?;

        let current = self.find_one(term)?;
        if let Some(name) = patch.name.as_mut() {
            *name = name.to_lowercase();
        }

        let updated = Self::apply_patch(&current, &patch)?;
        let affected = self.update_record(&updated)?;
        if affected == 0 {
            // Deleted between resolve and write.
            return Err(PokemonError::not_found(LookupKind::Id, current.id));
        }

        Ok(updated)
    }

    /// Delete by id. A missing id is `NotFound`, never success.
    pub fn remove(&self, id: &str) -> Result<(), PokemonError> {
        let affected = self.delete_record(id)?;
        if affected == 0 {
            return Err(PokemonError::not_found(LookupKind::Id, id));
        }
        info!("deleted pokemon {}", id);
        Ok(())
    }

    // ── Bulk operations for seeding (trusted input, no validation) ──

    /// Delete every record. Returns how many were removed.
    pub fn purge_all(&self) -> Result<u64, PokemonError> {
        self.delete_all_records()
    }

    /// Insert a batch as-is in one transaction: names are not lowercased and
    /// input is not validated. Either all records land or none do.
    pub fn insert_many(&self, batch: Vec<CreatePokemon>) -> Result<u64, PokemonError> {
        let records: Vec<Pokemon> = batch
            .into_iter()
            .map(|p| Pokemon {
                id: new_id(),
                code: p.code,
                name: p.name,
            })
            .collect();
        self.insert_records(&records)
    }
}
