mod http;
mod local;

pub use http::HttpSource;
pub use local::LocalFileSource;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for a data source that supplies a whole archive as one buffer
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Load the complete archive into memory
    async fn load(&self) -> Result<Vec<u8>>;

    /// Human readable location of the archive, for messages
    fn describe(&self) -> &str;
}
