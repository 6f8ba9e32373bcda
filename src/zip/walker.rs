//! Sequential walk over back-to-back Local File Headers.
//!
//! The walker starts at offset 0 and decodes one record at a time, moving the
//! cursor to the offset each record ends at. It stops when the buffer is
//! exhausted or when a signature mismatch follows at least one decoded record;
//! in a well-formed archive that mismatch is the start of the central
//! directory. A mismatch at offset 0 means the buffer is not an archive at all
//! and is reported as an error. Every other error is fatal and ends the walk.

use super::error::{Result, ZipError};
use super::parser::decode_header_with;
use super::structures::{DecodeOptions, LocalFileEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Done,
}

/// Iterator over the entries of an in-memory archive.
///
/// Yields `Ok(entry)` for each decoded record. After the first `Err` the
/// iterator is exhausted.
pub struct EntryWalker<'a> {
    buf: &'a [u8],
    cursor: usize,
    options: DecodeOptions,
    state: State,
}

impl<'a> EntryWalker<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_options(buf, DecodeOptions::default())
    }

    pub fn with_options(buf: &'a [u8], options: DecodeOptions) -> Self {
        let state = if buf.is_empty() { State::Done } else { State::Scanning };
        Self {
            buf,
            cursor: 0,
            options,
            state,
        }
    }

    /// Offset the next record will be decoded from.
    pub fn offset(&self) -> usize {
        self.cursor
    }
}

impl Iterator for EntryWalker<'_> {
    type Item = Result<LocalFileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Done {
            return None;
        }

        match decode_header_with(self.buf, self.cursor, self.options) {
            Ok((entry, next)) => {
                self.cursor = next;
                if self.cursor >= self.buf.len() {
                    self.state = State::Done;
                }
                Some(Ok(entry))
            }
            Err(ZipError::NotAZip { offset, found }) if self.cursor > 0 => {
                tracing::debug!(offset, found, "no further local file headers");
                self.state = State::Done;
                None
            }
            Err(e) => {
                self.state = State::Done;
                Some(Err(e))
            }
        }
    }
}

/// Decode every entry in `buf` with the default options.
pub fn walk_entries(buf: &[u8]) -> Result<Vec<LocalFileEntry>> {
    EntryWalker::new(buf).collect()
}

/// Decode every entry in `buf`.
pub fn walk_entries_with(buf: &[u8], options: DecodeOptions) -> Result<Vec<LocalFileEntry>> {
    EntryWalker::with_options(buf, options).collect()
}
