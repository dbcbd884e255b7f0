use pokedex_core::ServiceError;
use pokedex_sql::SQLStore;

/// SQL DDL for the catalog.
///
/// The full JSON document lives in `data`; `code` and `name` are extracted
/// alongside so the engine can enforce uniqueness on them.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS pokemon (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        code INTEGER NOT NULL UNIQUE,
        name TEXT NOT NULL UNIQUE
    )",
];

pub fn init_schema(sql: &dyn SQLStore) -> Result<(), ServiceError> {
    for stmt in SCHEMA {
        sql.exec(stmt, &[])
            .map_err(|e| ServiceError::Storage(format!("schema init failed: {}", e)))?;
    }
    Ok(())
}
