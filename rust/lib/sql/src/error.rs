use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLError {
    #[error("query error: {0}")]
    Query(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("connection error: {0}")]
    Connection(String),

    /// A UNIQUE or PRIMARY KEY constraint rejected the write.
    /// `columns` lists the constrained columns as reported by the engine.
    #[error("unique constraint failed: {table}({})", .columns.join(", "))]
    UniqueViolation { table: String, columns: Vec<String> },
}
