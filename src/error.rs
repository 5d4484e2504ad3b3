#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("the product {0} does not exist")]
    NotFound(String),
    #[error("the product {0} already exists")]
    AlreadyExists(String),
    #[error("invalid state transition: {0}")]
    InvalidTransition(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("world state error: {0}")]
    Store(#[from] sled::Error),
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),
}
