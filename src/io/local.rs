use super::ArchiveSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Archive stored on the local filesystem
pub struct LocalFileSource {
    path: PathBuf,
    display: String,
}

impl LocalFileSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            display: path.display().to_string(),
        }
    }
}

#[async_trait]
impl ArchiveSource for LocalFileSource {
    async fn load(&self) -> Result<Vec<u8>> {
        let data = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("cannot open {}", self.display))?;
        tracing::debug!(path = %self.display, size = data.len(), "loaded local archive");
        Ok(data)
    }

    fn describe(&self) -> &str {
        &self.display
    }
}
