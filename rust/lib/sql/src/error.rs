use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLError {
    #[error("query error: {0}")]
    Query(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("connection error: {0}")]
    Connection(String),

    /// A UNIQUE / NOT NULL / CHECK constraint rejected the statement.
    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl SQLError {
    /// Classify a rusqlite failure from a write statement.
    pub(crate) fn from_exec(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => SQLError::Constraint(e.to_string()),
            _ => SQLError::Execution(e.to_string()),
        }
    }
}
