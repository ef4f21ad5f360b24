use thiserror::Error;
use uuid::Uuid;

/// Error type shared by the core services and store implementations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("category not found: {0}")]
    CategoryNotFound(Uuid),
    #[error("budget not found: {0}")]
    BudgetNotFound(Uuid),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serde(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
