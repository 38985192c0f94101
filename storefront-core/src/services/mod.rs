//! 业务逻辑服务层

mod auth_service;
mod listing_source;
mod listing_view;
mod navigation;
mod presenter;
mod query_state;

pub use auth_service::{
    AuthService, LOGIN_FALLBACK_MESSAGE, SIGNUP_FALLBACK_MESSAGE, SignupForm, validate_signup,
};
pub use listing_source::ListingDataSource;
pub use listing_view::{FetchTicket, ListingController, ListingView};
pub use navigation::NavigationService;
pub use presenter::{
    CategoryCard, ImageSource, ListingPage, PageStatus, ProductCard, format_price,
    resolve_image_url,
};
pub use query_state::{CATEGORY_NAME_PARAM, KEYWORD_PARAM, PAGE_PARAM, QueryStateStore};

use std::sync::Arc;

use storefront_api::{AuthApi, CatalogApi};

use crate::config::ListingConfig;
use crate::error::CoreResult;
use crate::traits::{History, SessionStore};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入 API 客户端、历史记录与会话存储实现。
pub struct ServiceContext {
    /// 商品目录 API
    pub catalog: Arc<dyn CatalogApi>,
    /// 认证 API
    pub auth_api: Arc<dyn AuthApi>,
    /// 导航历史
    pub history: Arc<dyn History>,
    /// 会话存储
    pub session_store: Arc<dyn SessionStore>,
    /// 列表配置
    pub config: ListingConfig,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogApi>,
        auth_api: Arc<dyn AuthApi>,
        history: Arc<dyn History>,
        session_store: Arc<dyn SessionStore>,
        config: ListingConfig,
    ) -> Self {
        Self {
            catalog,
            auth_api,
            history,
            session_store,
            config,
        }
    }

    pub fn query_state(&self) -> QueryStateStore {
        QueryStateStore::new(self.history.clone())
    }

    pub fn data_source(&self) -> ListingDataSource {
        ListingDataSource::new(self.catalog.clone())
    }

    /// 是否存在已保存的会话
    pub async fn is_authenticated(&self) -> CoreResult<bool> {
        Ok(self.session_store.load().await?.is_some())
    }
}
