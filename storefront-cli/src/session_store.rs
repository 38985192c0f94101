//! 会话存储
//!
//! 使用 JSON 文件保存登录会话，实现 storefront-core 的 SessionStore trait

use std::path::PathBuf;

use async_trait::async_trait;
use storefront_core::types::Session;
use storefront_core::{CoreError, CoreResult, SessionStore};
use tokio::fs;
use tokio::sync::Mutex;

/// 基于 JSON 文件的会话存储
pub struct FileSessionStore {
    path: PathBuf,
    /// 内存缓存，`None` 表示尚未读取文件
    cache: Mutex<Option<Option<Session>>>,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cache: Mutex::new(None),
        }
    }

    async fn read_file(&self) -> CoreResult<Option<Session>> {
        if !fs::try_exists(&self.path)
            .await
            .map_err(|e| CoreError::Storage(e.to_string()))?
        {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CoreError::Storage(e.to_string()))?;
        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // 损坏的会话文件视为未登录
                log::warn!("Ignoring unreadable session file {}: {e}", self.path.display());
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> CoreResult<Option<Session>> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            return Ok(cached.clone());
        }
        let session = self.read_file().await?;
        *cache = Some(session.clone());
        Ok(session)
    }

    async fn save(&self, session: &Session) -> CoreResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| CoreError::Storage(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| CoreError::Storage(e.to_string()))?;

        *self.cache.lock().await = Some(Some(session.clone()));
        log::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(CoreError::Storage(e.to_string())),
        }
        *self.cache.lock().await = Some(None);
        Ok(())
    }
}
