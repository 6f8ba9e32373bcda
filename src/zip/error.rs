//! Error types produced while decoding local file headers.

use thiserror::Error;

/// A Result type alias over [`ZipError`].
pub type Result<T> = std::result::Result<T, ZipError>;

/// Errors that can occur while decoding an in-memory archive.
#[derive(Debug, Error)]
pub enum ZipError {
    /// A read of `len` bytes at `offset` would run past the end of the buffer.
    #[error("read of {len} bytes at offset {offset} overruns buffer of {available} bytes")]
    Overrun {
        offset: usize,
        len: usize,
        available: usize,
    },

    /// The bytes at `offset` are not a local file header signature.
    #[error("not a zip file: expected signature {expected:#010x} at offset {offset}, got {found:#010x}", expected = super::structures::LFH_SIGNATURE)]
    NotAZip { offset: usize, found: u32 },

    /// The DEFLATE payload of the record starting at `offset` could not be inflated.
    #[error("failed to inflate entry at offset {offset}: {source}")]
    Decompression {
        offset: usize,
        #[source]
        source: std::io::Error,
    },

    /// Strict method policy only.
    #[error("unsupported compression method {method} for entry at offset {offset}")]
    UnsupportedCompression { offset: usize, method: u16 },
}

impl ZipError {
    /// Whether this error marks the end of the local headers rather than corruption.
    pub fn is_not_a_zip(&self) -> bool {
        matches!(self, ZipError::NotAZip { .. })
    }
}
