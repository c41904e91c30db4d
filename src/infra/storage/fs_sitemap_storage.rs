use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::error;
use uuid::Uuid;

use crate::domain::ports::SitemapStorage;
use crate::error::AppError;

/// Filesystem-backed sitemap storage. Writes land in a temp file next to
/// the target and are moved into place with a rename, so readers and
/// concurrent generators never observe a partially written document.
pub struct FsSitemapStorage {
    root: PathBuf,
}

impl FsSitemapStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn full_path(&self, relative_path: &str) -> Result<PathBuf, AppError> {
        if relative_path.split('/').any(|seg| seg == "..") {
            return Err(AppError::Validation("Invalid sitemap path".into()));
        }
        Ok(self.root.join(relative_path))
    }

    fn io_err(context: &str, path: &Path, e: &std::io::Error) -> AppError {
        error!(path = %path.display(), error = %e, "{}", context);
        AppError::InternalWithMsg(format!("{}: {}", context, e))
    }
}

#[async_trait]
impl SitemapStorage for FsSitemapStorage {
    async fn write(&self, relative_path: &str, content: &str) -> Result<(), AppError> {
        let target = self.full_path(relative_path)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::InternalWithMsg(format!("Failed to create sitemap directory: {}", e)))?;
        }

        let tmp = target.with_extension(format!("tmp-{}", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp, content).await {
            return Err(Self::io_err("Failed to write sitemap file", &tmp, &e));
        }
        if let Err(e) = fs::rename(&tmp, &target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(Self::io_err("Failed to move sitemap file into place", &target, &e));
        }

        Ok(())
    }

    async fn read(&self, relative_path: &str) -> Result<Option<String>, AppError> {
        let target = self.full_path(relative_path)?;
        match fs::read_to_string(&target).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_err("Failed to read sitemap file", &target, &e)),
        }
    }

    async fn exists(&self, relative_path: &str) -> Result<bool, AppError> {
        let target = self.full_path(relative_path)?;
        Ok(fs::try_exists(&target).await.unwrap_or(false))
    }

    async fn modified_at(&self, relative_path: &str) -> Result<Option<DateTime<Utc>>, AppError> {
        let target = self.full_path(relative_path)?;
        match fs::metadata(&target).await {
            Ok(meta) => {
                let modified = meta
                    .modified()
                    .map_err(|e| AppError::InternalWithMsg(format!("Failed to read file mtime: {}", e)))?;
                Ok(Some(DateTime::<Utc>::from(modified)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_err("Failed to stat sitemap file", &target, &e)),
        }
    }
}
