use anyhow::{Context, Result, bail};
use bincode::config;
use rebuild_runtime::MAX_MESSAGE_BYTES;
use serde::{Serialize, de::DeserializeOwned};
use std::io::{Read, Write};

/// Largest frame `read_message` accepts: a maximal message body plus room for the
/// topic and enum framing.
pub const MAX_FRAME_BYTES: usize = MAX_MESSAGE_BYTES + FRAME_HEADROOM;

/// Bytes allowed on top of a message body for the rest of a request.
pub const FRAME_HEADROOM: usize = 4 * 1024;

/// Read a single length-prefixed bincode message from `reader`.
///
/// Wire format:
///   - 4-byte big-endian length (u32)
///   - that many bytes of bincode payload
pub fn read_message<R, T>(reader: &mut R) -> Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    read_message_limited(reader, MAX_FRAME_BYTES)
}

/// Like [`read_message`], but rejects frames longer than `max_len` before allocating.
pub fn read_message_limited<R, T>(reader: &mut R, max_len: usize) -> Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut len_buf = [0u8; 4];
    reader
        .read_exact(&mut len_buf)
        .context("failed to read frame length")?;
    let len = u32::from_be_bytes(len_buf) as usize;
    if len > max_len {
        bail!("frame of {len} bytes exceeds limit of {max_len} bytes");
    }

    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .with_context(|| format!("failed to read {len}-byte frame"))?;

    let (msg, _bytes_read): (T, usize) =
        bincode::serde::decode_from_slice(&buf, config::standard())?;
    Ok(msg)
}

/// Write a single length-prefixed bincode message to `writer` and flush it.
pub fn write_message<W, T>(writer: &mut W, msg: &T) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    let bytes = bincode::serde::encode_to_vec(msg, config::standard())?;
    let len: u32 = bytes
        .len()
        .try_into()
        .with_context(|| format!("frame of {} bytes exceeds u32 length prefix", bytes.len()))?;

    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
