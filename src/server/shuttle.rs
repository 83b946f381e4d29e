//! One-directional byte shuttle between two stream halves

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Copy buffer size per shuttle direction
const BUF_SIZE: usize = 4096;

/// Copy bytes from `reader` to `writer` until the reader reaches EOF, then
/// half-close the writer so the opposite direction sees EOF in turn.
///
/// Peer resets and broken pipes are normal under concurrent teardown of the
/// two directions and terminate the loop without being treated as faults.
/// Any other I/O error also terminates the loop; nothing propagates to the
/// caller either way.
///
/// Returns the number of bytes copied.
pub async fn shuttle<R, W>(mut reader: R, mut writer: W, direction: &'static str) -> u64
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; BUF_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => {
                debug!("{}: EOF after {} bytes", direction, total_bytes);
                break;
            }
            Ok(n) => n,
            Err(e) if is_disconnect(&e) => {
                debug!("{}: peer disconnected after {} bytes", direction, total_bytes);
                break;
            }
            Err(e) => {
                warn!("{}: read error after {} bytes: {}", direction, total_bytes, e);
                break;
            }
        };

        trace!("{}: {} bytes", direction, n);

        if let Err(e) = write_chunk(&mut writer, &buf[..n]).await {
            if is_disconnect(&e) {
                debug!("{}: peer disconnected after {} bytes", direction, total_bytes);
            } else {
                warn!("{}: write error after {} bytes: {}", direction, total_bytes, e);
            }
            break;
        }
        total_bytes += n as u64;
    }

    // Half-close the write side to signal the peer that no more data is
    // coming. The peer may already be gone, in which case this is a no-op.
    let _ = writer.shutdown().await;

    total_bytes
}

/// Write one chunk fully before the next read.
async fn write_chunk<W>(writer: &mut W, chunk: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(chunk).await?;
    writer.flush().await
}

/// Errors that mean the peer went away mid-transfer rather than a fault.
fn is_disconnect(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::BrokenPipe
    )
}
