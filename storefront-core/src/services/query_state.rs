//! Query state backed by the location

use std::sync::Arc;

use storefront_api::PageIndex;

use crate::pagination::{to_display_page, to_page_index};
use crate::traits::History;
use crate::types::{Location, QueryState, Route};

/// 关键字参数
pub const KEYWORD_PARAM: &str = "q";
/// 页码参数（1-based）
pub const PAGE_PARAM: &str = "page";
/// 分类名称参数（仅用于展示）
pub const CATEGORY_NAME_PARAM: &str = "name";

/// Reads and writes the listing state through the history.
///
/// Mutators only navigate; listing views refetch when they observe the change.
#[derive(Clone)]
pub struct QueryStateStore {
    history: Arc<dyn History>,
}

impl QueryStateStore {
    #[must_use]
    pub fn new(history: Arc<dyn History>) -> Self {
        Self { history }
    }

    pub fn read(&self) -> QueryState {
        Self::read_from(&self.history.current())
    }

    pub fn read_from(location: &Location) -> QueryState {
        QueryState {
            keyword: location.get(KEYWORD_PARAM).unwrap_or_default().to_string(),
            page: to_page_index(location.get(PAGE_PARAM)),
        }
    }

    /// Write `page=1` when the location has no page, replacing the current entry.
    ///
    /// Returns `true` if the location was changed.
    pub fn ensure_page_default(&self) -> bool {
        let mut location = self.history.current();
        if location.contains(PAGE_PARAM) {
            return false;
        }
        location.set(PAGE_PARAM, "1");
        self.history.replace(location);
        true
    }

    /// Navigate to `index`, keeping every other query parameter.
    pub fn set_page(&self, index: PageIndex) {
        let mut location = self.history.current();
        location.set(PAGE_PARAM, to_display_page(index).to_string());
        self.history.push(location);
    }

    /// Navigate to the product listing for `keyword`; blank keywords list everything.
    pub fn set_keyword(&self, keyword: &str) {
        let keyword = keyword.trim();
        let mut location = Route::AllProducts.location();
        if !keyword.is_empty() {
            location.set(KEYWORD_PARAM, keyword);
        }
        self.history.push(location);
    }

    /// Navigate to a category's products.
    pub fn open_category(&self, category_id: &str, name: &str) {
        let location = Route::CategoryProducts {
            category_id: category_id.to_string(),
        }
        .location()
        .with(CATEGORY_NAME_PARAM, name);
        self.history.push(location);
    }
}
