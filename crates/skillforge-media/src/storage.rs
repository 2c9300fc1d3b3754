//! Remote binary storage consumed through the [`MediaStorage`] trait.
//!
//! The hosted upload/transcoding service is an external collaborator; the
//! trait captures the only contract the application relies on: hand over a
//! file, watch a progress stream, get back a publicly retrievable URL.
//! [`FsMediaStorage`] is the filesystem-backed implementation used by
//! tests and self-hosted deployments.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};
use uuid::Uuid;

use skillforge_shared::constants::{
    IMAGE_EXTENSIONS, MAX_THUMBNAIL_BYTES, MAX_VIDEO_BYTES, VIDEO_EXTENSIONS,
};

use crate::error::{MediaError, Result};
use crate::progress::ProgressSender;

/// Copy chunk size for uploads.  One progress report per chunk.
const CHUNK_SIZE: usize = 64 * 1024;

/// What an upload slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Thumbnail,
}

impl MediaKind {
    fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Video => VIDEO_EXTENSIONS,
            Self::Thumbnail => IMAGE_EXTENSIONS,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        match self {
            Self::Video => MAX_VIDEO_BYTES,
            Self::Thumbnail => MAX_THUMBNAIL_BYTES,
        }
    }
}

/// Validate a file's extension against the accepted set for `kind`.
///
/// Runs before any remote call so a bad pick never reaches the network.
pub fn validate_file_type(path: &Path, kind: MediaKind) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if kind.extensions().contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(MediaError::UnsupportedType(ext))
    }
}

/// Binary storage accepting a file and returning its public URL.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Upload the file at `source`, reporting progress as it goes.
    /// Resolves to the publicly retrievable URL of the stored object.
    async fn upload(&self, source: &Path, progress: ProgressSender) -> Result<String>;
}

/// Filesystem-backed [`MediaStorage`].
///
/// Objects are stored under `base_path` with UUID names (original
/// extension kept) and addressed as `{public_base_url}/{object_name}`.
#[derive(Debug, Clone)]
pub struct FsMediaStorage {
    base_path: PathBuf,
    public_base_url: String,
    max_size: u64,
}

impl FsMediaStorage {
    pub async fn new(
        base_path: PathBuf,
        public_base_url: impl Into<String>,
        max_size: u64,
    ) -> Result<Self> {
        fs::create_dir_all(&base_path).await.map_err(|e| {
            MediaError::Storage(format!(
                "Failed to create media directory '{}': {}",
                base_path.display(),
                e
            ))
        })?;

        let public_base_url = public_base_url.into();
        info!(path = %base_path.display(), "media storage initialized");

        Ok(Self {
            base_path,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            max_size,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn object_name(source: &Path) -> String {
        match source.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase()),
            None => Uuid::new_v4().to_string(),
        }
    }
}

#[async_trait]
impl MediaStorage for FsMediaStorage {
    async fn upload(&self, source: &Path, mut progress: ProgressSender) -> Result<String> {
        let total = fs::metadata(source).await?.len();
        if total == 0 {
            return Err(MediaError::EmptyFile);
        }
        if total > self.max_size {
            return Err(MediaError::TooLarge {
                size: total,
                max: self.max_size,
            });
        }

        let object_name = Self::object_name(source);
        let dest = self.base_path.join(&object_name);

        let mut reader = fs::File::open(source).await?;
        let mut writer = fs::File::create(&dest).await?;

        progress.report(0);
        let written = match copy_chunks(&mut reader, &mut writer, total, &mut progress).await {
            Ok(written) => written,
            Err(e) => {
                // Nothing references the half-written object; remove it so a
                // failed upload leaves no orphan behind.
                drop(writer);
                let _ = fs::remove_file(&dest).await;
                return Err(e);
            }
        };
        progress.finish();

        debug!(object = %object_name, size = written, "stored media object");
        Ok(format!("{}/{}", self.public_base_url, object_name))
    }
}

async fn copy_chunks(
    reader: &mut fs::File,
    writer: &mut fs::File,
    total: u64,
    progress: &mut ProgressSender,
) -> Result<u64> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut written: u64 = 0;
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).await?;
        written += n as u64;
        progress.report((written * 100 / total) as u8);
    }
    writer.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_storage() -> (FsMediaStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = FsMediaStorage::new(
            dir.path().join("objects"),
            "https://media.test/",
            1024 * 1024,
        )
        .await
        .unwrap();
        (storage, dir)
    }

    async fn write_source(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).await.unwrap();
        path
    }

    #[tokio::test]
    async fn upload_returns_public_url_and_stores_bytes() {
        let (storage, dir) = test_storage().await;
        let source = write_source(&dir, "clip.mp4", b"fake-video-bytes").await;

        let url = storage
            .upload(&source, ProgressSender::discard())
            .await
            .unwrap();

        assert!(url.starts_with("https://media.test/"));
        assert!(url.ends_with(".mp4"));

        let object = url.rsplit('/').next().unwrap();
        let stored = fs::read(storage.base_path().join(object)).await.unwrap();
        assert_eq!(stored, b"fake-video-bytes");
    }

    #[tokio::test]
    async fn upload_progress_starts_at_zero_and_ends_at_hundred() {
        let (storage, dir) = test_storage().await;
        // Multiple chunks so intermediate percentages appear.
        let source = write_source(&dir, "clip.mp4", &vec![7u8; CHUNK_SIZE * 3 + 11]).await;

        let (sender, mut rx) = crate::progress::channel();
        storage.upload(&source, sender).await.unwrap();

        let mut seen = Vec::new();
        while let Ok(p) = rx.try_recv() {
            seen.push(p);
        }
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] < w[1]), "monotone: {seen:?}");
    }

    #[tokio::test]
    async fn empty_file_rejected() {
        let (storage, dir) = test_storage().await;
        let source = write_source(&dir, "empty.mp4", b"").await;
        assert!(matches!(
            storage
                .upload(&source, ProgressSender::discard())
                .await
                .unwrap_err(),
            MediaError::EmptyFile
        ));
    }

    #[tokio::test]
    async fn oversized_file_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = FsMediaStorage::new(dir.path().join("objects"), "https://media.test", 8)
            .await
            .unwrap();
        let source = write_source(&dir, "big.mp4", b"way-more-than-eight").await;
        assert!(matches!(
            storage
                .upload(&source, ProgressSender::discard())
                .await
                .unwrap_err(),
            MediaError::TooLarge { .. }
        ));
    }

    #[tokio::test]
    async fn failed_copy_leaves_no_partial_object() {
        let (storage, dir) = test_storage().await;
        // A directory opens fine but the first read fails, so the copy dies
        // after the destination file has been created.
        let source = dir.path().join("not-a-file.mp4");
        fs::create_dir(&source).await.unwrap();

        assert!(storage
            .upload(&source, ProgressSender::discard())
            .await
            .is_err());

        let mut entries = fs::read_dir(storage.base_path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[test]
    fn file_type_validation() {
        assert!(validate_file_type(Path::new("a/clip.MP4"), MediaKind::Video).is_ok());
        assert!(validate_file_type(Path::new("thumb.png"), MediaKind::Thumbnail).is_ok());
        assert!(validate_file_type(Path::new("clip.gif"), MediaKind::Video).is_err());
        assert!(validate_file_type(Path::new("noext"), MediaKind::Thumbnail).is_err());
    }
}
