//! Local File Header decoding.
//!
//! A record is decoded strictly in layout order: every field is read with a
//! bounds-checked primitive that returns the offset just past it, and that
//! offset feeds the next read. The length fields for the file name and extra
//! field are read before those fields and bound them exactly.
//!
//! ```text
//! signature          4   0x04034b50
//! version needed     2
//! flags              2
//! compression        2   8 = DEFLATE, otherwise STORED
//! last mod time      2   MS-DOS
//! last mod date      2   MS-DOS
//! crc-32             4
//! compressed size    4
//! uncompressed size  4
//! file name length   2   N
//! extra field length 2   M
//! file name          N
//! extra field        M
//! payload            compressed size (DEFLATE) or uncompressed size (STORED)
//! ```

use std::io;

use flate2::{Decompress, FlushDecompress, Status};

use super::cursor::{read_bytes, read_string, read_u16, read_u32};
use super::date::decode_dos_timestamp;
use super::error::{Result, ZipError};
use super::structures::*;

const INFLATE_CHUNK: usize = 32 * 1024;

/// Upper bound on the preallocation, as a multiple of the compressed size.
const MAX_HINT_RATIO: usize = 8;

/// Decode the Local File Header starting at `offset` using the default options.
///
/// Returns the entry and the offset of the byte following its payload.
pub fn decode_header(buf: &[u8], offset: usize) -> Result<(LocalFileEntry, usize)> {
    decode_header_with(buf, offset, DecodeOptions::default())
}

/// Decode the Local File Header starting at `offset`.
///
/// # Errors
///
/// - [`ZipError::NotAZip`] if the bytes at `offset` are not the LFH signature,
///   including when fewer than four bytes remain
/// - [`ZipError::Overrun`] if any field or the payload runs past the buffer
/// - [`ZipError::Decompression`] if a DEFLATE payload cannot be inflated
/// - [`ZipError::UnsupportedCompression`] for unknown methods under
///   [`MethodPolicy::Strict`]
#[tracing::instrument(level = "trace", skip(buf), fields(len = buf.len()))]
pub fn decode_header_with(
    buf: &[u8],
    offset: usize,
    options: DecodeOptions,
) -> Result<(LocalFileEntry, usize)> {
    let (signature, i) = match read_u32(buf, offset) {
        Ok(read) => read,
        // Fewer than four bytes left cannot start a record.
        Err(ZipError::Overrun { .. }) => {
            return Err(ZipError::NotAZip {
                offset,
                found: partial_signature(buf, offset),
            });
        }
        Err(e) => return Err(e),
    };
    if signature != LFH_SIGNATURE {
        return Err(ZipError::NotAZip {
            offset,
            found: signature,
        });
    }

    let (version_needed, i) = read_u16(buf, i)?;
    let (flags, i) = read_u16(buf, i)?;
    let (method_code, i) = read_u16(buf, i)?;
    let compression_method = resolve_method(method_code, offset, options.method_policy)?;

    let (last_mod_time, i) = read_u16(buf, i)?;
    let (last_mod_date, i) = read_u16(buf, i)?;
    let last_modified = decode_dos_timestamp(last_mod_date, last_mod_time);

    let (crc32, i) = read_u32(buf, i)?;
    let (compressed_size, i) = read_u32(buf, i)?;
    let (uncompressed_size, i) = read_u32(buf, i)?;

    let (file_name_length, i) = read_u16(buf, i)?;
    let (extra_field_length, i) = read_u16(buf, i)?;

    let (file_name, i) = read_string(buf, i, file_name_length as usize)?;
    let (extra_field, i) = read_bytes(buf, i, extra_field_length as usize)?;

    let (contents, i) = match compression_method {
        CompressionMethod::Stored => {
            let (raw, end) = read_bytes(buf, i, uncompressed_size as usize)?;
            (raw.to_vec(), end)
        }
        CompressionMethod::Deflate => {
            let (raw, end) = read_bytes(buf, i, compressed_size as usize)?;
            let inflated = inflate(raw, uncompressed_size as usize)
                .map_err(|source| ZipError::Decompression { offset, source })?;
            (inflated, end)
        }
    };

    tracing::debug!(
        offset,
        next = i,
        name = %file_name,
        method = method_code,
        compressed_size,
        uncompressed_size,
        "decoded local file header"
    );

    let entry = LocalFileEntry {
        offset,
        signature,
        version_needed,
        flags,
        compression_method,
        method_code,
        last_modified,
        crc32,
        compressed_size,
        uncompressed_size,
        file_name,
        extra_field: extra_field.to_vec(),
        contents,
    };

    Ok((entry, i))
}

/// Little-endian value of whatever signature bytes remain at `offset`.
fn partial_signature(buf: &[u8], offset: usize) -> u32 {
    buf.get(offset..)
        .unwrap_or_default()
        .iter()
        .take(4)
        .rev()
        .fold(0, |acc, &b| (acc << 8) | b as u32)
}

fn resolve_method(code: u16, offset: usize, policy: MethodPolicy) -> Result<CompressionMethod> {
    match (policy, code) {
        (MethodPolicy::Strict, METHOD_STORED) => Ok(CompressionMethod::Stored),
        (MethodPolicy::Strict, METHOD_DEFLATE) => Ok(CompressionMethod::Deflate),
        (MethodPolicy::Strict, method) => Err(ZipError::UnsupportedCompression { offset, method }),
        (MethodPolicy::Lenient, code) => {
            if code != METHOD_STORED && code != METHOD_DEFLATE {
                tracing::warn!(offset, method = code, "unknown compression method, reading as stored");
            }
            Ok(CompressionMethod::from_u16(code))
        }
    }
}

/// Inflate a raw DEFLATE stream (no zlib or gzip framing).
///
/// The stream must reach its final block within `data`; running out of input
/// first is reported as `UnexpectedEof` instead of returning partial output.
///
/// `size_hint` comes from the unverified header and only seeds the initial
/// allocation, capped relative to the compressed input.
fn inflate(data: &[u8], size_hint: usize) -> io::Result<Vec<u8>> {
    let mut inflater = Decompress::new(false);
    let initial = size_hint
        .min(data.len().saturating_mul(MAX_HINT_RATIO))
        .max(INFLATE_CHUNK);
    let mut output = Vec::with_capacity(initial);

    loop {
        let total_in = inflater.total_in();
        let total_out = inflater.total_out();

        if output.len() == output.capacity() {
            output.reserve(INFLATE_CHUNK);
        }

        let input = &data[total_in as usize..];
        match inflater.decompress_vec(input, &mut output, FlushDecompress::Finish)? {
            Status::StreamEnd => {
                output.shrink_to_fit();
                return Ok(output);
            }
            Status::Ok | Status::BufError => {
                let stalled = inflater.total_in() == total_in && inflater.total_out() == total_out;
                if stalled && output.len() < output.capacity() {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "deflate stream ended before its final block",
                    ));
                }
            }
        }
    }
}
