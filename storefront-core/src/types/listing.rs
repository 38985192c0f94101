use serde::Serialize;
use storefront_api::{Category, PageIndex, PageRequest, PagedResult, Product};

use crate::pagination::to_display_page;

/// What a listing view is showing, as read from the location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct QueryState {
    /// Search keyword as found in `q`; empty when absent.
    pub keyword: String,
    /// 0-based page index.
    pub page: PageIndex,
}

impl QueryState {
    /// 1-based page shown in links.
    pub fn display_page(&self) -> u64 {
        to_display_page(self.page)
    }

    /// Keyword with surrounding whitespace removed.
    pub fn trimmed_keyword(&self) -> &str {
        self.keyword.trim()
    }
}

/// The product fetch strategies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "camelCase")]
pub enum ProductQuery {
    All,
    ByCategory(String),
    BySearch(String),
}

impl ProductQuery {
    /// Search for `keyword`, or list everything when it is blank.
    pub fn from_keyword(keyword: &str) -> Self {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            Self::All
        } else {
            Self::BySearch(keyword.to_string())
        }
    }
}

/// Anything a listing view can fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "listing", content = "query", rename_all = "camelCase")]
pub enum ListingQuery {
    Categories,
    Products(ProductQuery),
}

impl ListingQuery {
    /// Fixed message shown when fetching this listing fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Categories => "Failed to load categories. Please try again.",
            Self::Products(_) => "Failed to load products. Please try again.",
        }
    }
}

/// One fetch: the query plus the page to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ListingRequest {
    pub query: ListingQuery,
    pub page: PageRequest,
}

impl ListingRequest {
    pub fn new(query: ListingQuery, page: PageIndex, size: u32) -> Self {
        Self {
            query,
            page: PageRequest::new(page, size),
        }
    }
}

/// A category card or a product card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "item", rename_all = "camelCase")]
pub enum ListingItem {
    Category(Category),
    Product(Product),
}

impl ListingItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Category(c) => &c.id,
            Self::Product(p) => &p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Category(c) => &c.name,
            Self::Product(p) => &p.name,
        }
    }
}

/// Listing view lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ViewState {
    #[default]
    Loading,
    Ready {
        result: PagedResult<ListingItem>,
    },
    Failed {
        message: String,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Items currently shown; empty unless `Ready`.
    pub fn items(&self) -> &[ListingItem] {
        match self {
            Self::Ready { result } => &result.items,
            _ => &[],
        }
    }

    pub fn total_pages(&self) -> u32 {
        match self {
            Self::Ready { result } => result.total_pages,
            _ => 0,
        }
    }
}

/// Which of the listing screens is on display, with the labels it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ListingKind {
    Categories,
    AllProducts,
    Search { keyword: String },
    CategoryProducts { category_id: String, name: String },
}

impl ListingKind {
    /// The fetch this screen issues.
    pub fn query(&self) -> ListingQuery {
        match self {
            Self::Categories => ListingQuery::Categories,
            Self::AllProducts => ListingQuery::Products(ProductQuery::All),
            Self::Search { keyword } => ListingQuery::Products(ProductQuery::from_keyword(keyword)),
            Self::CategoryProducts { category_id, .. } => {
                ListingQuery::Products(ProductQuery::ByCategory(category_id.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keyword_lists_everything() {
        assert_eq!(ProductQuery::from_keyword(""), ProductQuery::All);
        assert_eq!(ProductQuery::from_keyword(" \t "), ProductQuery::All);
        assert_eq!(
            ProductQuery::from_keyword("  phone "),
            ProductQuery::BySearch("phone".to_string())
        );
    }

    #[test]
    fn failure_messages() {
        assert_eq!(
            ListingQuery::Categories.failure_message(),
            "Failed to load categories. Please try again."
        );
        assert_eq!(
            ListingQuery::Products(ProductQuery::All).failure_message(),
            "Failed to load products. Please try again."
        );
    }

    #[test]
    fn view_state_defaults_to_loading() {
        let state = ViewState::default();
        assert!(state.is_loading());
        assert!(state.items().is_empty());
        assert_eq!(state.total_pages(), 0);
    }

    #[test]
    fn search_kind_with_blank_keyword_queries_all() {
        let kind = ListingKind::Search {
            keyword: "   ".to_string(),
        };
        assert_eq!(kind.query(), ListingQuery::Products(ProductQuery::All));
    }
}
