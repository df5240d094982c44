use std::{error::Error, fmt, io};

use serde::{Serialize, de::DeserializeOwned};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const MAX_FRAME_BYTES: usize = 64 * 1024;

#[derive(Debug)]
pub enum ProtocolError {
    Io(io::Error),
    Json(serde_json::Error),
    FrameTooLarge(usize),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Io(err) => write!(f, "I/O error: {}", err),
            ProtocolError::Json(err) => write!(f, "JSON error: {}", err),
            ProtocolError::FrameTooLarge(size) => write!(
                f,
                "frame is {} bytes, above configured maximum {}",
                size, MAX_FRAME_BYTES
            ),
        }
    }
}

impl Error for ProtocolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProtocolError::Io(err) => Some(err),
            ProtocolError::Json(err) => Some(err),
            ProtocolError::FrameTooLarge(_) => None,
        }
    }
}

impl From<io::Error> for ProtocolError {
    fn from(value: io::Error) -> Self {
        ProtocolError::Io(value)
    }
}

/// Writes one length-prefixed frame (big-endian `u32` length, then payload).
///
/// # Errors
/// Fails on I/O errors or when `payload` exceeds [`MAX_FRAME_BYTES`].
pub async fn write_bytes_frame<W>(writer: &mut W, payload: &[u8]) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let len = u32::try_from(payload.len())
        .ok()
        .filter(|_| payload.len() <= MAX_FRAME_BYTES)
        .ok_or(ProtocolError::FrameTooLarge(payload.len()))?;

    writer.write_u32(len).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads one frame, or `None` if the peer closed the stream before sending a
/// length prefix.
///
/// # Errors
/// Fails on I/O errors, a stream closed mid-frame, or an oversize length.
pub async fn read_bytes_frame<R>(reader: &mut R) -> Result<Option<Vec<u8>>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 4];
    // only a close before the first prefix byte counts as a clean end of stream
    if reader.read(&mut prefix[..1]).await? == 0 {
        return Ok(None);
    }
    reader.read_exact(&mut prefix[1..]).await?;
    let len = u32::from_be_bytes(prefix) as usize;
    if len > MAX_FRAME_BYTES {
        return Err(ProtocolError::FrameTooLarge(len));
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    Ok(Some(payload))
}

/// # Errors
/// See [`write_bytes_frame`]; also fails if `message` cannot be serialized.
pub async fn write_json_frame<W, T>(writer: &mut W, message: &T) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_vec(message).map_err(ProtocolError::Json)?;
    write_bytes_frame(writer, &payload).await
}

/// Reads the next JSON message, or `None` on a clean end of stream.
///
/// # Errors
/// See [`read_bytes_frame`]; also fails if the payload is not a valid `T`.
pub async fn read_json_frame<R, T>(reader: &mut R) -> Result<Option<T>, ProtocolError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let Some(payload) = read_bytes_frame(reader).await? else {
        return Ok(None);
    };
    serde_json::from_slice::<T>(&payload)
        .map(Some)
        .map_err(ProtocolError::Json)
}
