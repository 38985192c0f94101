//! 会话存储抽象 Trait

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::types::Session;

/// 会话存储 Trait
///
/// 平台实现:
/// - CLI: `FileSessionStore` (JSON 文件)
/// - 测试: `InMemorySessionStore`
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 读取已保存的会话
    ///
    /// # Returns
    /// * `Ok(Some(session))` - 已登录
    /// * `Ok(None)` - 未登录
    async fn load(&self) -> CoreResult<Option<Session>>;

    /// 保存会话（覆盖已有会话）
    async fn save(&self, session: &Session) -> CoreResult<()>;

    /// 清除会话
    async fn clear(&self) -> CoreResult<()>;
}

/// 内存会话存储
#[derive(Default)]
pub struct InMemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已登录状态创建
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> CoreResult<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &Session) -> CoreResult<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        *self.session.write().await = None;
        Ok(())
    }
}
