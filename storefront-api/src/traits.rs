use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::types::{
    Category, LoginRequest, LoginResponse, PageRequest, PagedResult, PriceRange, Product,
    SignupRequest, SignupResponse,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码
    pub status: u16,
    /// 后端返回的错误消息
    pub message: Option<String>,
}

impl RawApiError {
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }
}

/// 错误上下文信息（内部使用）
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 被访问的资源（用于 `NotFound`）
    pub resource: Option<String>,
}

impl ErrorContext {
    pub fn resource(resource: impl Into<String>) -> Self {
        Self {
            resource: Some(resource.into()),
        }
    }
}

/// 将非 2xx 响应映射到统一错误类型（内部使用）
pub(crate) trait ApiErrorMapper {
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ApiError;

    fn serialization_error(&self, detail: impl ToString) -> ApiError {
        ApiError::SerializationError {
            detail: detail.to_string(),
        }
    }
}

/// Read-only catalogue endpoints.
///
/// Every list operation returns a [`PagedResult`]; endpoints that answer with a
/// bare array are wrapped as a single page.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /products?page&size`
    async fn list_products(&self, page: &PageRequest) -> Result<PagedResult<Product>>;

    /// `GET /products/category/{id}?page&size`
    async fn list_products_by_category(
        &self,
        category_id: &str,
        page: &PageRequest,
    ) -> Result<PagedResult<Product>>;

    /// `GET /products/search?q&page&size`
    ///
    /// A blank keyword is rejected with [`ApiError::InvalidParameter`] without sending
    /// a request.
    async fn search_products(
        &self,
        keyword: &str,
        page: &PageRequest,
    ) -> Result<PagedResult<Product>>;

    /// `GET /products/filter?min&max&page&size`
    async fn filter_products_by_price(
        &self,
        range: &PriceRange,
        page: &PageRequest,
    ) -> Result<PagedResult<Product>>;

    /// `GET /products/{id}`
    async fn get_product(&self, product_id: &str) -> Result<Product>;

    /// `GET /categories?page&size`
    async fn list_categories(&self, page: &PageRequest) -> Result<PagedResult<Category>>;
}

/// Authentication endpoints and bearer-token handling.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/signin`
    async fn sign_in(&self, request: &LoginRequest) -> Result<LoginResponse>;

    /// `POST /auth/signup`
    async fn sign_up(&self, request: &SignupRequest) -> Result<SignupResponse>;

    /// Attach (or with `None`, detach) the bearer token sent with every request.
    fn set_bearer_token(&self, token: Option<String>);

    fn has_bearer_token(&self) -> bool;
}
