use thiserror::Error;

pub type PlacementResult<T> = Result<T, PlacementError>;

#[derive(Error, Debug)]
pub enum PlacementError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report query error: {0}")]
    Report(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Exclusion mutation error: {0}")]
    Mutation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
