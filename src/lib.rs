//! # zipwalk
//!
//! A ZIP reader that walks an archive's Local File Headers back-to-back
//! instead of reading its central directory.
//!
//! The whole archive is loaded into memory first, from the local filesystem or
//! an HTTP URL. Entries are then decoded in file order, starting at offset 0,
//! until the buffer ends or a different record signature (normally the start
//! of the central directory) is found.
//!
//! ## Features
//!
//! - Bounds-checked decoding: malformed headers produce errors, never panics
//! - Support for STORED (uncompressed) and DEFLATE compression methods
//! - MS-DOS timestamp decoding
//! - Load archives from the local filesystem or HTTP/HTTPS URLs
//! - Selective file extraction with glob pattern matching
//!
//! ## Example
//!
//! ```no_run
//! use zipwalk::{ArchiveSource, LocalFileSource, ZipExtractor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = LocalFileSource::new(std::path::Path::new("archive.zip"));
//!     let extractor = ZipExtractor::new(source.load().await?);
//!
//!     for entry in extractor.entries()? {
//!         println!("{} {}", entry.last_modified, entry.file_name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod io;
pub mod zip;

pub use cli::Cli;
pub use io::{ArchiveSource, HttpSource, LocalFileSource};
pub use zip::{EntryWalker, LocalFileEntry, ZipError, ZipExtractor, decode_header, walk_entries};
