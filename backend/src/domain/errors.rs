use thiserror::Error;

/// Domain errors carried inside `anyhow::Error` so the REST layer can map
/// them to status codes without string matching.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The referenced record does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// The request failed a validation rule
    #[error("{0}")]
    Validation(String),

    /// A uniqueness rule would be violated
    #[error("{0}")]
    Duplicate(String),

    /// The record is still referenced by lessons
    #[error("{0}")]
    InUse(String),
}
