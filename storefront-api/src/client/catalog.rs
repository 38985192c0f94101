//! `CatalogApi` 实现

use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::traits::{CatalogApi, ErrorContext};
use crate::types::{Category, PageRequest, PagedResult, PriceRange, Product};

use super::StorefrontClient;
use super::http::query_string;

fn page_pairs(page: &PageRequest) -> Vec<(&'static str, String)> {
    let page = page.validated();
    vec![("page", page.page.to_string()), ("size", page.size.to_string())]
}

/// `min`/`max` ahead of the paging pair, as `/products/filter` expects.
fn price_pairs(range: &PriceRange, page: &PageRequest) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("min", range.min.to_string()), ("max", range.max.to_string())];
    pairs.extend(page_pairs(page));
    pairs
}

#[async_trait]
impl CatalogApi for StorefrontClient {
    async fn list_products(&self, page: &PageRequest) -> Result<PagedResult<Product>> {
        self.get_page(
            "/products",
            &query_string(&page_pairs(page)),
            ErrorContext::resource("products"),
        )
        .await
    }

    async fn list_products_by_category(
        &self,
        category_id: &str,
        page: &PageRequest,
    ) -> Result<PagedResult<Product>> {
        let category_id = category_id.trim();
        if category_id.is_empty() {
            return Err(ApiError::InvalidParameter {
                param: "category_id".to_string(),
                detail: "category id must not be empty".to_string(),
            });
        }
        let path = format!("/products/category/{}", urlencoding::encode(category_id));
        self.get_page(
            &path,
            &query_string(&page_pairs(page)),
            ErrorContext::resource(format!("category {category_id}")),
        )
        .await
    }

    async fn search_products(
        &self,
        keyword: &str,
        page: &PageRequest,
    ) -> Result<PagedResult<Product>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ApiError::InvalidParameter {
                param: "keyword".to_string(),
                detail: "search keyword must not be empty".to_string(),
            });
        }
        let mut pairs = vec![("q", keyword.to_string())];
        pairs.extend(page_pairs(page));
        self.get_page(
            "/products/search",
            &query_string(&pairs),
            ErrorContext::resource("search results"),
        )
        .await
    }

    async fn filter_products_by_price(
        &self,
        range: &PriceRange,
        page: &PageRequest,
    ) -> Result<PagedResult<Product>> {
        self.get_page(
            "/products/filter",
            &query_string(&price_pairs(range, page)),
            ErrorContext::resource("products"),
        )
        .await
    }

    async fn get_product(&self, product_id: &str) -> Result<Product> {
        let path = format!("/products/{}", urlencoding::encode(product_id.trim()));
        self.get_json(&path, ErrorContext::resource(format!("product {product_id}")))
            .await
    }

    async fn list_categories(&self, page: &PageRequest) -> Result<PagedResult<Category>> {
        self.get_page(
            "/categories",
            &query_string(&page_pairs(page)),
            ErrorContext::resource("categories"),
        )
        .await
    }
}
