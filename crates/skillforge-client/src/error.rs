use thiserror::Error;

use skillforge_media::MediaError;
use skillforge_store::StoreError;

/// Errors surfaced to the UI by the view-model layer.
///
/// `Validation` is raised before any remote call; the other variants wrap
/// a failed remote write.  Remote-read failures are not represented here:
/// they degrade locally (empty list, sentinel creator) and are only
/// logged.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected before the remote layer was reached.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Media(#[from] MediaError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
