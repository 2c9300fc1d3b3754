//! Duration probing from MP4 container metadata.
//!
//! The upload form needs a video's running time before the upload starts,
//! without decoding any frames.  For MP4-family files that is the `mvhd`
//! header inside the `moov` box: `duration / timescale` in seconds.  The
//! walk seeks over every other box, so only `moov` is ever read into
//! memory.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};
use tracing::debug;

use skillforge_shared::duration::format_duration;

use crate::error::{MediaError, Result};

/// Upper bound on the `moov` box we are willing to buffer.
const MAX_MOOV_BYTES: u64 = 64 * 1024 * 1024;

/// Probe an MP4 file's duration in whole seconds.
pub async fn video_duration_seconds(path: &Path) -> Result<u64> {
    let mut file = File::open(path).await?;
    let file_len = file.metadata().await?.len();
    let mut offset: u64 = 0;

    while offset.checked_add(8).is_some_and(|end| end <= file_len) {
        file.seek(SeekFrom::Start(offset)).await?;
        let mut header = [0u8; 8];
        file.read_exact(&mut header).await?;

        let size32 = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        let box_type = [header[4], header[5], header[6], header[7]];

        let (box_size, header_len) = match size32 {
            0 => (file_len - offset, 8u64), // box extends to end of file
            1 => {
                let mut large = [0u8; 8];
                file.read_exact(&mut large).await?;
                (u64::from_be_bytes(large), 16u64)
            }
            n => (n as u64, 8u64),
        };

        // Sizes come straight from the file; a crafted largesize can sit
        // near u64::MAX, so the end offset must be computed checked.
        let malformed = || {
            MediaError::Probe(format!(
                "malformed box {:?} at offset {offset}",
                printable(&box_type)
            ))
        };
        let box_end = offset.checked_add(box_size).ok_or_else(malformed)?;
        if box_size < header_len || box_end > file_len {
            return Err(malformed());
        }

        if &box_type == b"moov" {
            let payload_len = box_size - header_len;
            if payload_len > MAX_MOOV_BYTES {
                return Err(MediaError::Probe("moov box implausibly large".into()));
            }
            let mut payload = vec![0u8; payload_len as usize];
            file.read_exact(&mut payload).await?;
            let seconds = mvhd_duration(&payload)?;
            debug!(path = %path.display(), seconds, "probed video duration");
            return Ok(seconds);
        }

        offset = box_end;
    }

    Err(MediaError::Probe("no moov box found".into()))
}

/// Probe and format as the stored `mm:ss` / `hh:mm:ss` display string.
pub async fn video_duration_formatted(path: &Path) -> Result<String> {
    Ok(format_duration(video_duration_seconds(path).await?))
}

/// Find the `mvhd` child inside a `moov` payload and read its duration.
fn mvhd_duration(moov: &[u8]) -> Result<u64> {
    let mut offset = 0usize;

    while offset + 8 <= moov.len() {
        let size = u32::from_be_bytes([
            moov[offset],
            moov[offset + 1],
            moov[offset + 2],
            moov[offset + 3],
        ]) as usize;
        let box_type = &moov[offset + 4..offset + 8];

        if size < 8 || offset + size > moov.len() {
            return Err(MediaError::Probe("malformed box inside moov".into()));
        }

        if box_type == b"mvhd" {
            return parse_mvhd(&moov[offset + 8..offset + size]);
        }
        offset += size;
    }

    Err(MediaError::Probe("no mvhd box inside moov".into()))
}

fn parse_mvhd(payload: &[u8]) -> Result<u64> {
    let short = || MediaError::Probe("mvhd box too short".into());

    let version = *payload.first().ok_or_else(short)?;
    let (timescale, duration) = match version {
        0 => {
            // version+flags, creation(4), modification(4)
            if payload.len() < 20 {
                return Err(short());
            }
            let timescale = u32::from_be_bytes(payload[12..16].try_into().unwrap()) as u64;
            let duration = u32::from_be_bytes(payload[16..20].try_into().unwrap()) as u64;
            (timescale, duration)
        }
        1 => {
            // version+flags, creation(8), modification(8)
            if payload.len() < 32 {
                return Err(short());
            }
            let timescale = u32::from_be_bytes(payload[20..24].try_into().unwrap()) as u64;
            let duration = u64::from_be_bytes(payload[24..32].try_into().unwrap());
            (timescale, duration)
        }
        v => return Err(MediaError::Probe(format!("unknown mvhd version {v}"))),
    };

    if timescale == 0 {
        return Err(MediaError::Probe("mvhd timescale is zero".into()));
    }
    Ok(duration / timescale)
}

fn printable(box_type: &[u8; 4]) -> String {
    box_type
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() {
                b as char
            } else {
                '?'
            }
        })
        .collect()
}
