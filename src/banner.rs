//! Banner capture for TCP connections.
//!
//! Sends the protocol probe (unless the service speaks first) and reads a
//! single bounded response from the peer.

use crate::error::{ScanError, ScanResult};
use crate::protocols::Probe;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::trace;

/// Maximum bytes to read for a banner.
pub const MAX_BANNER_SIZE: usize = 1024;

/// Run one probe/response exchange over an established stream.
///
/// Passive probes skip the write. Exactly one read of at most
/// [`MAX_BANNER_SIZE`] bytes is performed; both the write and the read are
/// bounded by `limit`. End-of-stream before any data yields an empty banner.
pub async fn exchange<S>(stream: &mut S, probe: &Probe, limit: Duration) -> ScanResult<String>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    if let Some(payload) = probe.payload.as_deref() {
        timeout(limit, stream.write_all(payload))
            .await
            .map_err(|_| ScanError::Timeout {
                stage: "send probe",
            })?
            .map_err(|e| ScanError::from_io("send probe", e))?;
        trace!(bytes = payload.len(), protocol = probe.protocol, "probe sent");
    }

    let mut buffer = [0u8; MAX_BANNER_SIZE];
    let n = timeout(limit, stream.read(&mut buffer))
        .await
        .map_err(|_| ScanError::Timeout {
            stage: "read banner",
        })?
        .map_err(|e| ScanError::from_io("read banner", e))?;
    trace!(bytes = n, "banner read");

    Ok(decode_banner(&buffer[..n]))
}

/// Decode raw banner bytes into text.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected, and
/// surrounding whitespace is trimmed.
pub fn decode_banner(data: &[u8]) -> String {
    String::from_utf8_lossy(data).trim().to_string()
}

/// First line of a banner, cut to at most `max_chars` characters.
pub fn first_line(banner: &str, max_chars: usize) -> &str {
    // Bare carriage returns end a line too.
    let line = banner.split(['\r', '\n']).next().unwrap_or("");
    match line.char_indices().nth(max_chars) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
