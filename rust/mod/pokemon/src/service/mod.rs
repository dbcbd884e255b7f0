pub mod schema;
pub mod resolve;
pub mod pokemon;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use pokedex_core::{ListResult, ServiceError, merge_patch};
use pokedex_sql::{SQLError, SQLStore, Value};

use crate::model::{Pokemon, UpdatePokemon};

pub use resolve::Term;

const TABLE: &str = "pokemon";

/// Which resolver branch failed to find a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Code,
    Id,
    Name,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Code => f.write_str("n°"),
            LookupKind::Id => f.write_str("id"),
            LookupKind::Name => f.write_str("name"),
        }
    }
}

/// Errors from catalog reads and writes.
///
/// Storage faults are logged where they happen and reduced to
/// `InternalLookup` / `InternalWrite`; the raw fault never leaves the service.
#[derive(Debug, Error, PartialEq)]
pub enum PokemonError {
    #[error("pokemon with {kind} \"{term}\" not found")]
    NotFound { kind: LookupKind, term: String },

    /// `fields` holds the offending `(field, value)` pairs.
    #[error("pokemon already exists - {}", format_fields(.fields))]
    DuplicateKey { fields: Vec<(String, String)> },

    #[error("can't find pokemon - check server logs")]
    InternalLookup,

    #[error("can't write pokemon - check server logs")]
    InternalWrite,

    #[error("{0}")]
    Validation(String),
}

impl PokemonError {
    pub fn not_found(kind: LookupKind, term: impl Into<String>) -> Self {
        PokemonError::NotFound { kind, term: term.into() }
    }

    /// Names of the conflicting fields, for `DuplicateKey`.
    pub fn conflicting_fields(&self) -> Vec<&str> {
        match self {
            PokemonError::DuplicateKey { fields } => fields.iter().map(|(f, _)| f.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn format_fields(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(f, v)| format!("{}={}", f, v))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<PokemonError> for ServiceError {
    fn from(e: PokemonError) -> Self {
        match e {
            PokemonError::NotFound { .. } => ServiceError::NotFound(e.to_string()),
            PokemonError::DuplicateKey { .. } => ServiceError::Conflict(e.to_string()),
            PokemonError::Validation(m) => ServiceError::Validation(m),
            PokemonError::InternalLookup => ServiceError::LookupFailed(e.to_string()),
            PokemonError::InternalWrite => ServiceError::WriteFailed(e.to_string()),
        }
    }
}

/// Catalog service: term resolution and guarded writes over the SQL store.
pub struct PokemonService {
    pub(crate) sql: Arc<dyn SQLStore>,
    pub(crate) default_limit: usize,
}

impl PokemonService {
    pub fn new(sql: Arc<dyn SQLStore>, default_limit: usize) -> Result<Self, ServiceError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Self { sql, default_limit })
    }

    // ── Record helpers ──

    /// Find one record by an indexed column. Storage faults become `InternalLookup`.
    pub(crate) fn find_by(&self, column: &str, value: Value) -> Result<Option<Pokemon>, PokemonError> {
        let sql = format!("SELECT data FROM {} WHERE {} = ?1", TABLE, column);
        let rows = self.sql.query(&sql, &[value]).map_err(|e| {
            error!("pokemon lookup by {} failed: {}", column, e);
            PokemonError::InternalLookup
        })?;
        match rows.first() {
            Some(row) => decode(row.get_str("data")).map(Some),
            None => Ok(None),
        }
    }

    /// Insert a single record. A UNIQUE violation becomes `DuplicateKey`.
    pub(crate) fn insert_record(&self, record: &Pokemon) -> Result<(), PokemonError> {
        let sql = format!(
            "INSERT INTO {} (id, data, code, name) VALUES (?1, ?2, ?3, ?4)",
            TABLE
        );
        self.sql
            .exec(&sql, &record_params(record)?)
            .map_err(|e| write_failure(e, |column| Some(column_value(record, column))))?;
        Ok(())
    }

    /// Insert many records in one transaction. Nothing is written on failure.
    pub(crate) fn insert_records(&self, records: &[Pokemon]) -> Result<u64, PokemonError> {
        let sql = format!(
            "INSERT INTO {} (id, data, code, name) VALUES (?1, ?2, ?3, ?4)",
            TABLE
        );
        let rows = records
            .iter()
            .map(record_params)
            .collect::<Result<Vec<_>, _>>()?;
        self.sql
            .exec_many(&sql, &rows)
            .map_err(|e| write_failure(e, |column| first_repeated(records, column)))
    }

    /// Rewrite a record's document and indexed columns. Returns the affected count.
    pub(crate) fn update_record(&self, record: &Pokemon) -> Result<u64, PokemonError> {
        let sql = format!(
            "UPDATE {} SET data = ?2, code = ?3, name = ?4 WHERE id = ?1",
            TABLE
        );
        self.sql
            .exec(&sql, &record_params(record)?)
            .map_err(|e| write_failure(e, |column| Some(column_value(record, column))))
    }

    /// Delete a record by id. Returns the affected count.
    pub(crate) fn delete_record(&self, id: &str) -> Result<u64, PokemonError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", TABLE);
        self.sql
            .exec(&sql, &[Value::Text(id.to_string())])
            .map_err(|e| {
                error!("pokemon delete {} failed: {}", id, e);
                PokemonError::InternalWrite
            })
    }

    /// Delete every record. Returns the affected count.
    pub(crate) fn delete_all_records(&self) -> Result<u64, PokemonError> {
        let sql = format!("DELETE FROM {}", TABLE);
        self.sql.exec(&sql, &[]).map_err(|e| {
            error!("pokemon purge failed: {}", e);
            PokemonError::InternalWrite
        })
    }

    /// Count all records.
    pub(crate) fn count_records(&self) -> Result<usize, PokemonError> {
        let sql = format!("SELECT COUNT(*) AS cnt FROM {}", TABLE);
        let rows = self.sql.query(&sql, &[]).map_err(|e| {
            error!("pokemon count failed: {}", e);
            PokemonError::InternalLookup
        })?;
        Ok(rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0) as usize)
    }

    /// List records ordered by code, with the total count.
    pub(crate) fn list_records(&self, limit: usize, offset: usize) -> Result<ListResult<Pokemon>, PokemonError> {
        let lookup_failed = |e: SQLError| {
            error!("pokemon list failed: {}", e);
            PokemonError::InternalLookup
        };

        let total = self.count_records()?;

        // SQLite takes LIMIT as a signed integer; clamp instead of wrapping.
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let sql = format!(
            "SELECT data FROM {} ORDER BY code ASC LIMIT ?1 OFFSET ?2",
            TABLE
        );
        let rows = self
            .sql
            .query(&sql, &[Value::Integer(limit), Value::Integer(offset)])
            .map_err(lookup_failed)?;

        let items = rows
            .iter()
            .map(|row| decode(row.get_str("data")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ListResult { items, total })
    }

    /// Merge a partial update into a record. `id` is never patched.
    pub(crate) fn apply_patch(current: &Pokemon, patch: &UpdatePokemon) -> Result<Pokemon, PokemonError> {
        let internal = |e: serde_json::Error| {
            error!("pokemon patch failed: {}", e);
            PokemonError::InternalWrite
        };
        let mut json = serde_json::to_value(current).map_err(internal)?;
        let mut patch = serde_json::to_value(patch).map_err(internal)?;
        if let Some(obj) = patch.as_object_mut() {
            obj.remove("id");
        }
        merge_patch(&mut json, &patch);
        serde_json::from_value(json).map_err(internal)
    }
}

fn decode(data: Option<&str>) -> Result<Pokemon, PokemonError> {
    let data = data.ok_or_else(|| {
        error!("pokemon row is missing its data column");
        PokemonError::InternalLookup
    })?;
    serde_json::from_str(data).map_err(|e| {
        error!("pokemon row failed to decode: {}", e);
        PokemonError::InternalLookup
    })
}

fn record_params(record: &Pokemon) -> Result<Vec<Value>, PokemonError> {
    let json = serde_json::to_string(record).map_err(|e| {
        error!("pokemon encode failed: {}", e);
        PokemonError::InternalWrite
    })?;
    Ok(vec![
        Value::Text(record.id.clone()),
        Value::Text(json),
        Value::Integer(record.code),
        Value::Text(record.name.clone()),
    ])
}

fn column_value(record: &Pokemon, column: &str) -> String {
    match column {
        "code" => record.code.to_string(),
        "name" => record.name.clone(),
        _ => record.id.clone(),
    }
}

/// The first value that appears twice in `column` within a batch.
fn first_repeated(records: &[Pokemon], column: &str) -> Option<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| column_value(r, column))
        .find(|v| !seen.insert(v.clone()))
}

/// Translate a store write failure. `value_of` supplies the offending value
/// for each constrained column.
fn write_failure(err: SQLError, value_of: impl Fn(&str) -> Option<String>) -> PokemonError {
    match err {
        SQLError::UniqueViolation { columns, .. } => PokemonError::DuplicateKey {
            fields: columns
                .into_iter()
                .map(|c| {
                    let value = value_of(&c).unwrap_or_default();
                    (c, value)
                })
                .collect(),
        },
        other => {
            error!("pokemon write failed: {}", other);
            PokemonError::InternalWrite
        }
    }
}
