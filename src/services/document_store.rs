use std::path::Path;

use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn read_document(&self, path: &Path) -> AppResult<Vec<u8>>;
    async fn write_export(&self, path: &Path, contents: &str) -> AppResult<()>;
}
