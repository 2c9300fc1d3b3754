use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A document addressed by id does not exist.
    #[error("Document not found")]
    NotFound,

    /// The backend rejected or failed the operation.
    #[error("Backend error: {0}")]
    Backend(String),

    /// A stored document does not have the shape the operation requires.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// JSON (de)serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
