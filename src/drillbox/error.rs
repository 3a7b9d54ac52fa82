use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    /// A field broke its contract: empty text, negative number, out of range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Structurally wrong input: not an object, missing key, not numeric.
    #[error("Type error: {0}")]
    Type(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientResource { requested: i64, available: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DrillError>;
