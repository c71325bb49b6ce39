use std::path::PathBuf;

use anyhow::Context as _;
use async_trait::async_trait;

use crate::cli::FileNaming;
use crate::formats::ChapterResult;

/// Receives finished chapters. Called once per chapter, from that chapter's
/// task.
#[async_trait]
pub trait ChapterSink: Send + Sync {
    async fn write(&self, chapter: ChapterResult) -> anyhow::Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct FileSink {
    docs_dir: PathBuf,
    naming: FileNaming,
}

impl FileSink {
    pub fn new(docs_dir: impl Into<PathBuf>, naming: FileNaming) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            naming,
        }
    }

    pub fn path_for(&self, chapter: &ChapterResult) -> anyhow::Result<PathBuf> {
        let stem = match self.naming {
            FileNaming::Title => chapter.title.as_str(),
            FileNaming::Id => chapter.id.as_str(),
        };
        if stem.is_empty() || stem == "." || stem == ".." || stem.contains(['/', '\\']) {
            anyhow::bail!("not usable as a file name: {stem:?}");
        }
        Ok(self.docs_dir.join(format!("{stem}.md")))
    }
}

#[async_trait]
impl ChapterSink for FileSink {
    async fn write(&self, chapter: ChapterResult) -> anyhow::Result<PathBuf> {
        let path = self.path_for(&chapter)?;
        tokio::fs::write(&path, &chapter.content)
            .await
            .with_context(|| format!("write chapter: {}", path.display()))?;
        Ok(path)
    }
}
