use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::error::{AppError, AppResult};
use crate::services::DocumentStore;

pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentStore for LocalFs {
    async fn read_document(&self, path: &Path) -> AppResult<Vec<u8>> {
        fs::read(path).await.map_err(|err| {
            AppError::InvalidInput(format!("error reading {}: {err}", path.display()))
        })
    }

    async fn write_export(&self, path: &Path, contents: &str) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, contents).await?;
        Ok(())
    }
}
