//! Buffering and encoding of upload payloads.
//!
//! Every allocation that scales with the video size is reserved fallibly, so running out
//! of memory becomes an `Encoding` error instead of an abort.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::io::AsyncReadExt;
use vidrepo_core::{VideoError, VideoResult};

use crate::source::ByteSource;

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Read a source fully into memory, failing with a validation error once it exceeds
/// `max_bytes`.
///
/// A declared length above the limit fails without reading. Reading stops at
/// `max_bytes + 1`, so a source that under-reports its length is still caught.
pub async fn read_limited<S: ByteSource>(source: S, max_bytes: usize) -> VideoResult<Vec<u8>> {
    let opened = source.open().await?;
    let declared = opened.declared_len;

    if let Some(len) = declared {
        if len > max_bytes as u64 {
            return Err(VideoError::too_large(len, max_bytes));
        }
    }

    let mut buffer: Vec<u8> = Vec::new();
    if let Some(len) = declared {
        buffer
            .try_reserve_exact(len as usize)
            .map_err(|_| VideoError::out_of_memory())?;
    }

    let mut reader = opened.reader.take((max_bytes as u64).saturating_add(1));
    let mut chunk = vec![0u8; READ_CHUNK_SIZE];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buffer
            .try_reserve(n)
            .map_err(|_| VideoError::out_of_memory())?;
        buffer.extend_from_slice(&chunk[..n]);
    }

    if buffer.len() > max_bytes {
        let observed = declared.unwrap_or(0).max(buffer.len() as u64);
        return Err(VideoError::too_large(observed, max_bytes));
    }

    Ok(buffer)
}

/// Standard, padded base64 without line breaks.
pub fn encode_base64(data: &[u8]) -> VideoResult<String> {
    let len = base64::encoded_len(data.len(), true).ok_or_else(VideoError::out_of_memory)?;
    let mut encoded = String::new();
    encoded
        .try_reserve_exact(len)
        .map_err(|_| VideoError::out_of_memory())?;
    STANDARD.encode_string(data, &mut encoded);
    Ok(encoded)
}
