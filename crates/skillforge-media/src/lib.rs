//! # skillforge-media
//!
//! Binary media handling for uploads: a [`MediaStorage`] trait returning a
//! publicly retrievable URL per stored object, a filesystem-backed
//! implementation, a monotone 0–100 progress stream with a cancellable
//! task wrapper, and MP4 duration probing for the upload form.

pub mod probe;
pub mod progress;
pub mod storage;

mod error;

pub use error::{MediaError, Result};
pub use progress::{ProgressSender, UploadTask};
pub use storage::{FsMediaStorage, MediaKind, MediaStorage};
