use std::path::{Path, PathBuf};

use super::{local_url, storage_key, Disposition, ResumeStorage, ResumeUpload, StoredResume};
use crate::prelude::Result;

#[derive(Debug, Clone)]
pub struct LocalDisk {
    root: PathBuf,
}

impl LocalDisk {
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        Ok(LocalDisk { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes under a key chosen by the caller, used directly and as the
    /// managed store's fallback.
    pub async fn write(&self, key: &str, upload: &ResumeUpload) -> Result<StoredResume> {
        let path = self.root.join(key);
        tokio::fs::write(&path, &upload.bytes).await?;
        tracing::info!("saved resume locally to {}", path.display());
        Ok(StoredResume {
            key: key.to_string(),
            url: Some(local_url(key)),
        })
    }
}

#[async_trait::async_trait]
impl ResumeStorage for LocalDisk {
    async fn store(&self, upload: &ResumeUpload) -> Result<StoredResume> {
        upload.ensure_pdf()?;
        let key = storage_key(&upload.file_name);
        self.write(&key, upload).await
    }

    async fn retrieve(&self, key: &str, _disposition: Disposition) -> Result<String> {
        Ok(local_url(key))
    }

    fn describe(&self) -> &'static str {
        "local"
    }
}
