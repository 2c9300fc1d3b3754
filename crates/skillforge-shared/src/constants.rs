//! Shared constants.

/// Display name used when a creator's profile cannot be resolved.
pub const UNKNOWN_CREATOR: &str = "Unknown Creator";

/// Maximum accepted video upload size in bytes (2 GiB).
pub const MAX_VIDEO_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Maximum accepted thumbnail upload size in bytes (8 MiB).
pub const MAX_THUMBNAIL_BYTES: u64 = 8 * 1024 * 1024;

/// File extensions accepted for video uploads.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// File extensions accepted for thumbnail uploads.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];
