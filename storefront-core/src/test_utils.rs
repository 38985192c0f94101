//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use storefront_api::{
    ApiError, AuthApi, CatalogApi, Category, LoginRequest, LoginResponse, PageIndex, PageRequest,
    PagedResult, PriceRange, Product, Result, SignupRequest, SignupResponse,
};
use tokio::sync::{RwLock, oneshot};

use crate::config::ListingConfig;
use crate::services::ServiceContext;
use crate::traits::{InMemoryHistory, InMemorySessionStore};
use crate::types::{Location, Session};

// ===== 工厂方法 =====

pub fn product(id: &str) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        description: None,
        price: Some(499.0),
        image_url: None,
        category_name: None,
        category: None,
        created_at: None,
    }
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        created_at: None,
    }
}

// ===== MockCatalogApi =====

pub struct MockCatalogApi {
    products: RwLock<PagedResult<Product>>,
    /// 按页码覆盖的商品结果
    product_pages: RwLock<HashMap<PageIndex, PagedResult<Product>>>,
    categories: RwLock<PagedResult<Category>>,
    /// 如果 Some，所有请求返回此错误
    failure: RwLock<Option<ApiError>>,
    /// 按页码挂起请求，直到对应 sender 发送
    gates: tokio::sync::Mutex<HashMap<PageIndex, oneshot::Receiver<()>>>,
    calls: RwLock<Vec<String>>,
}

impl MockCatalogApi {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(PagedResult::empty()),
            product_pages: RwLock::new(HashMap::new()),
            categories: RwLock::new(PagedResult::empty()),
            failure: RwLock::new(None),
            gates: tokio::sync::Mutex::new(HashMap::new()),
            calls: RwLock::new(Vec::new()),
        }
    }

    pub async fn set_products(&self, result: PagedResult<Product>) {
        *self.products.write().await = result;
    }

    pub async fn set_product_page(&self, page: PageIndex, result: PagedResult<Product>) {
        self.product_pages.write().await.insert(page, result);
    }

    pub async fn set_categories(&self, result: PagedResult<Category>) {
        *self.categories.write().await = result;
    }

    pub async fn fail_with(&self, error: ApiError) {
        *self.failure.write().await = Some(error);
    }

    /// Stop failing requests.
    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    /// Hold product requests for `page` until the returned sender fires.
    pub async fn gate(&self, page: PageIndex) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().await.insert(page, rx);
        tx
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    async fn record(&self, call: String) {
        self.calls.write().await.push(call);
    }

    async fn products_for(&self, page: &PageRequest) -> Result<PagedResult<Product>> {
        let gate = self.gates.lock().await.remove(&page.page);
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        if let Some(e) = self.failure.read().await.clone() {
            return Err(e);
        }
        if let Some(result) = self.product_pages.read().await.get(&page.page) {
            return Ok(result.clone());
        }
        Ok(self.products.read().await.clone())
    }
}

#[async_trait]
impl CatalogApi for MockCatalogApi {
    async fn list_products(&self, page: &PageRequest) -> Result<PagedResult<Product>> {
        self.record(format!("products page={} size={}", page.page, page.size))
            .await;
        self.products_for(page).await
    }

    async fn list_products_by_category(
        &self,
        category_id: &str,
        page: &PageRequest,
    ) -> Result<PagedResult<Product>> {
        self.record(format!(
            "category {category_id} page={} size={}",
            page.page, page.size
        ))
        .await;
        self.products_for(page).await
    }

    async fn search_products(
        &self,
        keyword: &str,
        page: &PageRequest,
    ) -> Result<PagedResult<Product>> {
        self.record(format!(
            "search q={keyword} page={} size={}",
            page.page, page.size
        ))
        .await;
        self.products_for(page).await
    }

    async fn filter_products_by_price(
        &self,
        range: &PriceRange,
        page: &PageRequest,
    ) -> Result<PagedResult<Product>> {
        self.record(format!(
            "filter {}..{} page={} size={}",
            range.min, range.max, page.page, page.size
        ))
        .await;
        self.products_for(page).await
    }

    async fn get_product(&self, product_id: &str) -> Result<Product> {
        self.record(format!("product {product_id}")).await;
        self.products
            .read()
            .await
            .items
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                resource: format!("product {product_id}"),
                raw_message: None,
            })
    }

    async fn list_categories(&self, page: &PageRequest) -> Result<PagedResult<Category>> {
        self.record(format!("categories page={} size={}", page.page, page.size))
            .await;
        if let Some(e) = self.failure.read().await.clone() {
            return Err(e);
        }
        Ok(self.categories.read().await.clone())
    }
}

// ===== MockAuthApi =====

pub struct MockAuthApi {
    sign_in_result: RwLock<Result<LoginResponse>>,
    sign_up_result: RwLock<Result<SignupResponse>>,
    token: Mutex<Option<String>>,
    calls: RwLock<Vec<String>>,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self {
            sign_in_result: RwLock::new(Ok(LoginResponse {
                token: "eyJhbGciOiJIUzI1NiJ9.test.token".to_string(),
                message: Some("Login successful!".to_string()),
                user_id: "7".to_string(),
            })),
            sign_up_result: RwLock::new(Ok(SignupResponse {
                message: Some("User registered successfully!".to_string()),
            })),
            token: Mutex::new(None),
            calls: RwLock::new(Vec::new()),
        }
    }

    pub async fn fail_sign_in(&self, error: ApiError) {
        *self.sign_in_result.write().await = Err(error);
    }

    pub async fn fail_sign_up(&self, error: ApiError) {
        *self.sign_up_result.write().await = Err(error);
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn sign_in(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.calls
            .write()
            .await
            .push(format!("signin {}", request.email));
        self.sign_in_result.read().await.clone()
    }

    async fn sign_up(&self, request: &SignupRequest) -> Result<SignupResponse> {
        self.calls
            .write()
            .await
            .push(format!("signup {}", request.email));
        self.sign_up_result.read().await.clone()
    }

    fn set_bearer_token(&self, token: Option<String>) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn has_bearer_token(&self) -> bool {
        self.token().is_some()
    }
}

// ===== 测试上下文 =====

pub struct TestHarness {
    pub catalog: Arc<MockCatalogApi>,
    pub auth: Arc<MockAuthApi>,
    pub history: Arc<InMemoryHistory>,
    pub sessions: Arc<InMemorySessionStore>,
    pub ctx: Arc<ServiceContext>,
}

impl TestHarness {
    /// 以已登录状态，从 `link` 开始
    pub fn signed_in_at(link: &str) -> Self {
        Self::build(
            link,
            InMemorySessionStore::with_session(Session::new("stored-token-value", "7")),
        )
    }

    /// 以未登录状态，从 `link` 开始
    pub fn anonymous_at(link: &str) -> Self {
        Self::build(link, InMemorySessionStore::new())
    }

    fn build(link: &str, sessions: InMemorySessionStore) -> Self {
        let catalog = Arc::new(MockCatalogApi::new());
        let auth = Arc::new(MockAuthApi::new());
        let history = Arc::new(InMemoryHistory::new(
            Location::parse(link).unwrap_or_default(),
        ));
        let sessions = Arc::new(sessions);
        let ctx = Arc::new(ServiceContext::new(
            catalog.clone(),
            auth.clone(),
            history.clone(),
            sessions.clone(),
            ListingConfig::default(),
        ));
        Self {
            catalog,
            auth,
            history,
            sessions,
            ctx,
        }
    }
}
