//! Listing configuration

use serde::{Deserialize, Serialize};

/// 商品列表默认每页数量
pub const DEFAULT_PRODUCT_PAGE_SIZE: u32 = 10;
/// 首页分类默认每页数量
pub const DEFAULT_CATEGORY_PAGE_SIZE: u32 = 5;

/// Page sizes and asset origin used by the listing views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingConfig {
    pub product_page_size: u32,
    pub category_page_size: u32,
    /// Origin that relative image paths are resolved against.
    pub asset_origin: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            product_page_size: DEFAULT_PRODUCT_PAGE_SIZE,
            category_page_size: DEFAULT_CATEGORY_PAGE_SIZE,
            asset_origin: "http://localhost:8080".to_string(),
        }
    }
}
