//! Upload progress as a finite sequence of percentages.
//!
//! An upload reports through a [`ProgressSender`] feeding a channel the
//! caller drains.  The sender clamps the sequence monotone non-decreasing
//! and caps it at 100, so a consumer sees `0..=100` in order and the
//! stream ends when the upload settles (at 100 on success, early on
//! failure or cancellation).

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{MediaError, Result};
use crate::storage::MediaStorage;

/// Sending half of a progress stream.
///
/// Percentages are clamped to 100 and only ever emitted in non-decreasing
/// order; a stale lower report is silently dropped.
pub struct ProgressSender {
    tx: Option<mpsc::UnboundedSender<u8>>,
    last: u8,
    started: bool,
}

impl ProgressSender {
    /// A sender that throws every report away, for callers that do not
    /// display progress.
    pub fn discard() -> Self {
        Self {
            tx: None,
            last: 0,
            started: false,
        }
    }

    /// Report a percentage.  Values above 100 are clamped; after the first
    /// report, values at or below the previous one are dropped.
    pub fn report(&mut self, percent: u8) {
        let percent = percent.min(100);
        if self.started && percent <= self.last {
            return;
        }
        self.emit(percent);
    }

    /// Mark the upload complete, emitting the terminal 100.
    pub fn finish(&mut self) {
        if !self.started || self.last < 100 {
            self.emit(100);
        }
    }

    fn emit(&mut self, percent: u8) {
        self.started = true;
        self.last = percent;
        if let Some(tx) = &self.tx {
            // Receiver gone means nobody is watching; keep uploading.
            let _ = tx.send(percent);
        }
    }
}

/// Create a progress channel pair.
pub fn channel() -> (ProgressSender, mpsc::UnboundedReceiver<u8>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        ProgressSender {
            tx: Some(tx),
            last: 0,
            started: false,
        },
        rx,
    )
}

/// A running upload: the progress stream plus a handle to the result.
///
/// Dropping the task does not stop the transfer; call [`UploadTask::abort`]
/// to cancel it.
pub struct UploadTask {
    progress: mpsc::UnboundedReceiver<u8>,
    handle: JoinHandle<Result<String>>,
}

impl UploadTask {
    /// Start an upload on the runtime and return its handle.
    pub fn spawn(storage: Arc<dyn MediaStorage>, source: PathBuf) -> Self {
        let (sender, progress) = channel();
        let handle = tokio::spawn(async move { storage.upload(&source, sender).await });
        Self { progress, handle }
    }

    /// Next progress percentage, `None` once the stream has ended.
    pub async fn next_progress(&mut self) -> Option<u8> {
        self.progress.recv().await
    }

    /// Cancel the transfer.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the upload to settle and return the public URL.
    pub async fn join(self) -> Result<String> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(MediaError::Cancelled),
            Err(e) => Err(MediaError::Storage(format!("upload task failed: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_are_monotone_and_capped() {
        let (mut tx, mut rx) = channel();
        tx.report(0);
        tx.report(10);
        tx.report(5); // stale, dropped
        tx.report(10); // duplicate, dropped
        tx.report(250); // clamped
        tx.finish(); // already at 100
        drop(tx);

        let mut seen = Vec::new();
        while let Some(p) = rx.recv().await {
            seen.push(p);
        }
        assert_eq!(seen, [0, 10, 100]);
    }

    #[tokio::test]
    async fn finish_emits_terminal_hundred() {
        let (mut tx, mut rx) = channel();
        tx.report(40);
        tx.finish();
        drop(tx);

        let mut seen = Vec::new();
        while let Some(p) = rx.recv().await {
            seen.push(p);
        }
        assert_eq!(seen, [40, 100]);
    }

    #[test]
    fn discard_sender_accepts_reports() {
        let mut tx = ProgressSender::discard();
        tx.report(10);
        tx.report(90);
        tx.finish();
    }

    #[tokio::test]
    async fn spawned_upload_streams_progress_and_resolves_url() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = crate::storage::FsMediaStorage::new(
            dir.path().join("objects"),
            "https://media.test",
            1024 * 1024,
        )
        .await
        .unwrap();
        let source = dir.path().join("clip.mp4");
        tokio::fs::write(&source, vec![1u8; 1000]).await.unwrap();

        let mut task = UploadTask::spawn(Arc::new(storage), source);
        let mut last = None;
        while let Some(percent) = task.next_progress().await {
            last = Some(percent);
        }
        assert_eq!(last, Some(100));

        let url = task.join().await.unwrap();
        assert!(url.starts_with("https://media.test/"));
    }

    #[tokio::test]
    async fn aborted_upload_reports_cancelled() {
        struct StallingStorage;

        #[async_trait::async_trait]
        impl MediaStorage for StallingStorage {
            async fn upload(
                &self,
                _source: &std::path::Path,
                _progress: ProgressSender,
            ) -> Result<String> {
                std::future::pending().await
            }
        }

        let task = UploadTask::spawn(Arc::new(StallingStorage), PathBuf::from("clip.mp4"));
        task.abort();
        assert!(matches!(
            task.join().await.unwrap_err(),
            MediaError::Cancelled
        ));
    }
}
