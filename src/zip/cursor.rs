//! Bounds-checked primitive reads over an in-memory buffer.
//!
//! Every read takes the buffer and an absolute offset and returns the decoded
//! value together with the offset immediately past it. The end of the
//! requested span is computed first and compared against the buffer length,
//! so a read can never slice out of bounds.

use byteorder::{ByteOrder, LittleEndian};

use super::error::{Result, ZipError};

/// Returns `offset + len` if that span lies within `buf`.
fn span_end(buf: &[u8], offset: usize, len: usize) -> Result<usize> {
    match offset.checked_add(len) {
        Some(end) if end <= buf.len() => Ok(end),
        _ => Err(ZipError::Overrun {
            offset,
            len,
            available: buf.len(),
        }),
    }
}

/// Read a little-endian `u16` at `offset`.
pub fn read_u16(buf: &[u8], offset: usize) -> Result<(u16, usize)> {
    let end = span_end(buf, offset, 2)?;
    Ok((LittleEndian::read_u16(&buf[offset..end]), end))
}

/// Read a little-endian `u32` at `offset`.
pub fn read_u32(buf: &[u8], offset: usize) -> Result<(u32, usize)> {
    let end = span_end(buf, offset, 4)?;
    Ok((LittleEndian::read_u32(&buf[offset..end]), end))
}

/// Borrow `len` bytes starting at `offset`.
///
/// The returned slice aliases `buf`; copy it if it has to outlive the buffer.
pub fn read_bytes(buf: &[u8], offset: usize, len: usize) -> Result<(&[u8], usize)> {
    let end = span_end(buf, offset, len)?;
    Ok((&buf[offset..end], end))
}

/// Read `len` bytes at `offset` as text.
///
/// No encoding is enforced: invalid UTF-8 sequences are replaced rather than
/// rejected.
pub fn read_string(buf: &[u8], offset: usize, len: usize) -> Result<(String, usize)> {
    let (bytes, end) = read_bytes(buf, offset, len)?;
    Ok((String::from_utf8_lossy(bytes).into_owned(), end))
}
