//! ZIP local file header decoding.
//!
//! This module reads an archive that is already fully loaded in memory by
//! walking its Local File Headers back-to-back. The central directory is
//! never consulted: entries are discovered in file order until a record with a
//! different signature (normally the central directory itself) is reached.
//!
//! ## Architecture
//!
//! - [`cursor`]: bounds-checked little-endian reads at an offset
//! - [`date`]: MS-DOS date/time decoding
//! - [`parser`]: decoding of a single Local File Header and its payload
//! - [`walker`]: the record-by-record walk over a whole buffer
//! - [`extractor`]: writing decoded entries to disk or stdout
//!
//! ## Supported Features
//!
//! - STORED (no compression) method
//! - DEFLATE compression method
//!
//! ## Limitations
//!
//! - No central directory, so entries written with a data descriptor
//!   (sizes after the payload) cannot be walked
//! - No encryption support
//! - No multi-disk archive support
//! - No ZIP64 extensions
//! - No CRC-32 verification

pub mod cursor;
pub mod date;
mod error;
mod extractor;
mod parser;
mod structures;
mod walker;

pub use date::{DosTimestamp, decode_dos_timestamp};
pub use error::{Result, ZipError};
pub use extractor::ZipExtractor;
pub use parser::{decode_header, decode_header_with};
pub use structures::*;
pub use walker::{EntryWalker, walk_entries, walk_entries_with};
