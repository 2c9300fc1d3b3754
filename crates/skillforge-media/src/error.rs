use thiserror::Error;

/// Errors produced by the media layer.
#[derive(Error, Debug)]
pub enum MediaError {
    /// Zero-byte uploads are rejected before any transfer starts.
    #[error("File is empty")]
    EmptyFile,

    #[error("File too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },

    /// The file extension is not accepted for the target media kind.
    #[error("Unsupported file type: {0:?}")]
    UnsupportedType(String),

    /// The storage backend rejected or failed the transfer.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The file's container metadata could not be decoded.
    #[error("Metadata probe failed: {0}")]
    Probe(String),

    /// The upload task was aborted before completion.
    #[error("Upload cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MediaError>;
