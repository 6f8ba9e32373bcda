use std::path::{Component, Path, PathBuf};

use super::date::DosTimestamp;

/// Local File Header (LFH) signature, `PK\x03\x04` read little-endian.
pub const LFH_SIGNATURE: u32 = 0x04034b50;

/// Size of the fixed part of a Local File Header, signature included.
pub const LFH_FIXED_SIZE: usize = 30;

/// Raw method code for DEFLATE.
pub const METHOD_DEFLATE: u16 = 8;

/// Raw method code for STORED.
pub const METHOD_STORED: u16 = 0;

/// ZIP compression methods understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
}

impl CompressionMethod {
    /// Map a raw method code leniently: 8 is DEFLATE, anything else is STORED.
    pub fn from_u16(value: u16) -> Self {
        match value {
            METHOD_DEFLATE => CompressionMethod::Deflate,
            _ => CompressionMethod::Stored,
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => METHOD_STORED,
            CompressionMethod::Deflate => METHOD_DEFLATE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CompressionMethod::Stored => "Stored",
            CompressionMethod::Deflate => "Defl:N",
        }
    }
}

/// How raw method codes other than STORED and DEFLATE are handled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MethodPolicy {
    /// Treat every code other than 8 as STORED.
    #[default]
    Lenient,
    /// Accept only 0 and 8; anything else is an error.
    Strict,
}

/// Options threaded through the header decoder and the walker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub method_policy: MethodPolicy,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            method_policy: MethodPolicy::Strict,
        }
    }
}

/// A decoded Local File Header together with its payload.
///
/// Everything here is owned; nothing borrows the buffer it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileEntry {
    /// Offset of the record's signature within the archive buffer.
    pub offset: usize,
    pub signature: u32,
    pub version_needed: u16,
    pub flags: u16,
    pub compression_method: CompressionMethod,
    /// The method field exactly as stored, before the lenient mapping.
    pub method_code: u16,
    pub last_modified: DosTimestamp,
    /// Carried through, never verified.
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name: String,
    pub extra_field: Vec<u8>,
    pub contents: Vec<u8>,
}

impl LocalFileEntry {
    /// Directory entries end with '/'
    pub fn is_directory(&self) -> bool {
        self.file_name.ends_with('/')
    }

    /// The last path component of the entry name.
    pub fn base_name(&self) -> String {
        Path::new(&self.file_name)
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file_name.clone())
    }

    /// The entry name as a relative path that stays inside the extraction root.
    ///
    /// Returns `None` for names containing NUL, absolute paths, drive prefixes,
    /// or `..` components that climb above the root (`a/../b` is fine,
    /// `a/../../b` is not).
    pub fn enclosed_name(&self) -> Option<PathBuf> {
        if self.file_name.contains('\0') {
            return None;
        }

        let path = Path::new(&self.file_name);
        let mut depth = 0usize;
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => return None,
                Component::ParentDir => depth = depth.checked_sub(1)?,
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
            }
        }

        Some(path.to_path_buf())
    }

    /// Contents as text, replacing invalid UTF-8.
    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.contents).into_owned()
    }

    /// Percentage of space saved by compression, 0 for empty entries.
    pub fn compression_ratio(&self) -> u64 {
        ratio(self.compressed_size as u64, self.uncompressed_size as u64)
    }
}

/// Percentage saved going from `uncompressed` to `compressed` bytes.
pub fn ratio(compressed: u64, uncompressed: u64) -> u64 {
    if uncompressed == 0 || compressed >= uncompressed {
        0
    } else {
        100 - (compressed * 100 / uncompressed)
    }
}
