//! Listing data source

use std::sync::Arc;

use storefront_api::{CatalogApi, PageIndex, PageRequest, PagedResult};

use crate::error::CoreResult;
use crate::types::{ListingItem, ListingQuery, ListingRequest, ProductQuery};

/// Fetches one page of any listing through the catalogue API.
#[derive(Clone)]
pub struct ListingDataSource {
    catalog: Arc<dyn CatalogApi>,
}

impl ListingDataSource {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self { catalog }
    }

    /// Fetch the page described by `request`.
    pub async fn fetch(&self, request: &ListingRequest) -> CoreResult<PagedResult<ListingItem>> {
        let page = &request.page;
        let result = match &request.query {
            ListingQuery::Categories => self
                .catalog
                .list_categories(page)
                .await?
                .map(ListingItem::Category),
            ListingQuery::Products(query) => self
                .fetch_products(query, page)
                .await?
                .map(ListingItem::Product),
        };
        log::debug!(
            "Fetched {:?} page {}: {} items of {} ({} pages)",
            request.query,
            page.page,
            result.items.len(),
            result.total_elements,
            result.total_pages
        );
        Ok(result)
    }

    async fn fetch_products(
        &self,
        query: &ProductQuery,
        page: &PageRequest,
    ) -> CoreResult<PagedResult<storefront_api::Product>> {
        let result = match query {
            ProductQuery::All => self.catalog.list_products(page).await?,
            ProductQuery::ByCategory(category_id) => {
                self.catalog
                    .list_products_by_category(category_id, page)
                    .await?
            }
            // 空关键字不发起搜索
            ProductQuery::BySearch(keyword) if keyword.trim().is_empty() => {
                self.catalog.list_products(page).await?
            }
            ProductQuery::BySearch(keyword) => self.catalog.search_products(keyword, page).await?,
        };
        Ok(result)
    }

    pub async fn fetch_all(&self, page: PageIndex, size: u32) -> CoreResult<PagedResult<ListingItem>> {
        self.fetch(&ListingRequest::new(
            ListingQuery::Products(ProductQuery::All),
            page,
            size,
        ))
        .await
    }

    pub async fn fetch_by_category(
        &self,
        category_id: &str,
        page: PageIndex,
        size: u32,
    ) -> CoreResult<PagedResult<ListingItem>> {
        self.fetch(&ListingRequest::new(
            ListingQuery::Products(ProductQuery::ByCategory(category_id.to_string())),
            page,
            size,
        ))
        .await
    }

    /// Search for `keyword`; a blank keyword lists all products instead.
    pub async fn fetch_by_search(
        &self,
        keyword: &str,
        page: PageIndex,
        size: u32,
    ) -> CoreResult<PagedResult<ListingItem>> {
        self.fetch(&ListingRequest::new(
            ListingQuery::Products(ProductQuery::from_keyword(keyword)),
            page,
            size,
        ))
        .await
    }

    pub async fn fetch_categories(
        &self,
        page: PageIndex,
        size: u32,
    ) -> CoreResult<PagedResult<ListingItem>> {
        self.fetch(&ListingRequest::new(ListingQuery::Categories, page, size))
            .await
    }
}
