use crate::{
    Result,
    config::DownloadsConfig,
    ui::{Downloads, Snippet},
};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Writes snippets into a fixed directory, replacing any previous file.
pub struct DirectoryDownloads {
    directory: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(config: DownloadsConfig) -> Self {
        Self {
            directory: config.directory,
        }
    }
}

#[async_trait]
impl Downloads for DirectoryDownloads {
    async fn save(&self, snippet: Snippet) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.directory).await?;
        let path = self.directory.join(snippet.file_name);

        debug!(
            "Writing {} ({}, {} bytes)",
            path.display(),
            snippet.mime,
            snippet.contents.len()
        );

        // The handle lives only for this block.
        {
            let mut file = tokio::fs::File::create(&path).await?;
            file.write_all(snippet.contents.as_bytes()).await?;
            file.flush().await?;
        }

        Ok(path)
    }
}
