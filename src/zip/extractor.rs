use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use anyhow::{Result, bail};

use super::structures::{DecodeOptions, LocalFileEntry};
use super::walker::walk_entries_with;

/// ZIP file extractor over a fully loaded archive
pub struct ZipExtractor {
    data: Vec<u8>,
    options: DecodeOptions,
}

impl ZipExtractor {
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    pub fn with_options(data: Vec<u8>, options: DecodeOptions) -> Self {
        Self { data, options }
    }

    /// Size of the loaded archive in bytes
    pub fn archive_size(&self) -> usize {
        self.data.len()
    }

    /// Decode all entries in the archive
    pub fn entries(&self) -> Result<Vec<LocalFileEntry>> {
        Ok(walk_entries_with(&self.data, self.options)?)
    }

    /// Resolve where `entry` lands under `root`.
    ///
    /// Names that would escape `root` are refused. With `junk_paths` only the
    /// last component of the (already enclosed) name is kept.
    pub fn output_path(&self, entry: &LocalFileEntry, root: &Path, junk_paths: bool) -> Result<PathBuf> {
        let Some(relative) = entry.enclosed_name() else {
            bail!("{}: path escapes the extraction directory", entry.file_name);
        };

        if !junk_paths {
            return Ok(root.join(relative));
        }

        match relative.file_name() {
            Some(name) => Ok(root.join(name)),
            None => bail!("{}: no file name to extract to", entry.file_name),
        }
    }

    /// Extract file to disk
    pub async fn extract_to_file(&self, entry: &LocalFileEntry, output_path: &Path) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        if entry.is_directory() {
            fs::create_dir_all(output_path).await?;
            return Ok(());
        }

        let mut file = fs::File::create(output_path).await?;
        file.write_all(&entry.contents).await?;
        file.flush().await?;

        tracing::debug!(name = %entry.file_name, path = %output_path.display(), "extracted");
        Ok(())
    }

    /// Extract file to stdout
    pub async fn extract_to_stdout(&self, entry: &LocalFileEntry) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&entry.contents).await?;
        stdout.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zip::LFH_SIGNATURE;

    fn archive() -> Vec<u8> {
        let mut buf = Vec::new();
        for (name, data) in [("docs/", &b""[..]), ("docs/readme.txt", &b"read me"[..])] {
            buf.extend_from_slice(&LFH_SIGNATURE.to_le_bytes());
            buf.extend_from_slice(&[20, 0, 0, 0, 0, 0, 0, 0, 0x21, 0, 0, 0, 0, 0]);
            buf.extend_from_slice(&(data.len() as u32).to_le_bytes());
            buf.extend_from_slice(&(data.len() as u32).to_le_bytes());
            buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
            buf.extend_from_slice(&0u16.to_le_bytes());
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(data);
        }
        buf.extend_from_slice(b"PK\x05\x06");
        buf
    }

    #[tokio::test]
    async fn extracts_entries_to_disk() {
        let dir = std::env::temp_dir().join(format!("zipwalk-extract-{}", std::process::id()));
        let extractor = ZipExtractor::new(archive());
        let entries = extractor.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_directory());

        for entry in &entries {
            extractor
                .extract_to_file(entry, &dir.join(&entry.file_name))
                .await
                .unwrap();
        }

        assert!(dir.join("docs").is_dir());
        let written = std::fs::read(dir.join("docs/readme.txt")).unwrap();
        assert_eq!(written, b"read me");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn escaping_names_are_refused() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&LFH_SIGNATURE.to_le_bytes());
        buf.extend_from_slice(&[20, 0, 0, 0, 0, 0, 0, 0, 0x21, 0, 0, 0, 0, 0]);
        buf.extend_from_slice(&4u32.to_le_bytes());
        buf.extend_from_slice(&4u32.to_le_bytes());
        buf.extend_from_slice(&7u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(b"../evil");
        buf.extend_from_slice(b"evil");

        let extractor = ZipExtractor::new(buf);
        let entries = extractor.entries().unwrap();
        assert_eq!(entries[0].file_name, "../evil");

        let root = Path::new("out");
        let err = extractor.output_path(&entries[0], root, false).unwrap_err();
        assert!(err.to_string().contains("escapes"));
        assert!(extractor.output_path(&entries[0], root, true).is_err());
    }

    #[test]
    fn output_paths_stay_under_root() {
        let extractor = ZipExtractor::new(archive());
        let entries = extractor.entries().unwrap();
        let root = Path::new("out");

        assert_eq!(
            extractor.output_path(&entries[1], root, false).unwrap(),
            Path::new("out/docs/readme.txt")
        );
        assert_eq!(
            extractor.output_path(&entries[1], root, true).unwrap(),
            Path::new("out/readme.txt")
        );
    }

    #[test]
    fn decode_errors_surface_through_anyhow() {
        let extractor = ZipExtractor::new(b"definitely not".to_vec());
        let err = extractor.entries().unwrap_err();
        assert!(err.downcast_ref::<crate::zip::ZipError>().unwrap().is_not_a_zip());
    }
}
