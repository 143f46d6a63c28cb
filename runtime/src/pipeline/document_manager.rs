use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn create_dir_all(&self, path: &Path) -> Result<()>;
    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<()>;
    /// Returns `false` when there was nothing to remove.
    async fn remove(&self, path: &Path) -> Result<bool>;
}

#[derive(Debug, Default, Clone)]
pub struct FsFileRepository;

#[async_trait]
impl FileRepository for FsFileRepository {
    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("failed to create directory {}", path.display()))
    }

    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        tokio::fs::write(path, bytes)
            .await
            .with_context(|| format!("failed to write file {}", path.display()))
    }

    async fn remove(&self, path: &Path) -> Result<bool> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove file {}", path.display()))
            }
        }
    }
}

/// Owns the upload directory: filename checks and on-disk copies of
/// accepted uploads.
#[derive(Clone)]
pub struct DocumentManager {
    upload_dir: PathBuf,
    file_repo: Arc<dyn FileRepository>,
}

impl DocumentManager {
    pub async fn new<P>(upload_dir: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::with_repository(upload_dir, Arc::new(FsFileRepository::default())).await
    }

    pub async fn with_repository<P>(
        upload_dir: P,
        file_repo: Arc<dyn FileRepository>,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let upload_dir = upload_dir.as_ref().to_path_buf();
        file_repo
            .create_dir_all(&upload_dir)
            .await
            .with_context(|| {
                format!(
                    "failed to create upload directory at {}",
                    upload_dir.display()
                )
            })?;

        Ok(Self {
            upload_dir,
            file_repo,
        })
    }

    pub fn sanitize_filename(&self, raw: &str) -> Result<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("filename cannot be empty"));
        }

        if trimmed.contains("..") || trimmed.contains('/') || trimmed.contains('\\') {
            return Err(anyhow!("invalid filename"));
        }

        Ok(trimmed.to_string())
    }

    /// Writes (or overwrites) the stored copy of an upload.
    pub async fn persist(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let target = self.upload_dir.join(filename);
        self.file_repo.write(&target, bytes).await?;
        Ok(target)
    }

    pub async fn remove(&self, filename: &str) -> Result<bool> {
        self.file_repo.remove(&self.upload_dir.join(filename)).await
    }
}
