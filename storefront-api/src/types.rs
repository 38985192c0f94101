use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::utils::{datetime, id};

// ============ Pagination ============

/// Zero-based page number, as consumed by the backend's `page` query parameter.
pub type PageIndex = u32;

/// Largest page size the client will request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination parameters for list operations.
///
/// Pages are 0-indexed on the wire.
///
/// # Default
///
/// The default is `page = 0, size = 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page index (0-indexed).
    pub page: PageIndex,
    /// Number of items per page.
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}

impl PageRequest {
    pub fn new(page: PageIndex, size: u32) -> Self {
        Self { page, size }
    }

    /// Clamp `size` to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn validated(&self) -> Self {
        Self {
            page: self.page,
            size: self.size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Render as a `page=..&size=..` query fragment.
    pub fn to_query(&self) -> String {
        let v = self.validated();
        format!("page={}&size={}", v.page, v.size)
    }
}

/// A page of items plus total counts.
///
/// Produced fresh by each fetch and replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of items across all pages.
    pub total_elements: u64,
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_pages: u32, total_elements: u64) -> Self {
        Self {
            items,
            total_pages,
            total_elements,
        }
    }

    /// The sentinel result used when a fetch fails.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0)
    }

    /// Wrap a complete, unpaginated list as a single page.
    pub fn single_page(items: Vec<T>) -> Self {
        let total_elements = items.len() as u64;
        let total_pages = u32::from(!items.is_empty());
        Self::new(items, total_pages, total_elements)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform every item, keeping the totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
        }
    }
}

/// Spring-style page envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageEnvelope<T> {
    content: Vec<T>,
    #[serde(default)]
    total_pages: Option<u32>,
    #[serde(default)]
    total_elements: Option<u64>,
}

/// The two successful shapes a list endpoint may return.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PagePayload<T> {
    Envelope(PageEnvelope<T>),
    Bare(Vec<T>),
}

impl<T> From<PagePayload<T>> for PagedResult<T> {
    fn from(payload: PagePayload<T>) -> Self {
        match payload {
            PagePayload::Envelope(PageEnvelope {
                content,
                total_pages: Some(total_pages),
                total_elements,
            }) => {
                let total_elements = total_elements.unwrap_or(content.len() as u64);
                Self::new(content, total_pages, total_elements)
            }
            // 缺少分页元数据时与裸数组同等处理
            PagePayload::Envelope(PageEnvelope {
                content,
                total_pages: None,
                total_elements,
            }) => {
                let mut page = Self::single_page(content);
                if let Some(total) = total_elements {
                    page.total_elements = total;
                }
                page
            }
            PagePayload::Bare(items) => Self::single_page(items),
        }
    }
}

/// Decode a list response from an already-parsed JSON value.
///
/// Accepts a page envelope (`content`, `totalPages`, `totalElements`) or a bare array.
/// Anything else is [`ApiError::UnexpectedShape`].
pub fn decode_page<T>(value: serde_json::Value) -> Result<PagedResult<T>>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value::<PagePayload<T>>(value)
        .map(PagedResult::from)
        .map_err(|e| ApiError::UnexpectedShape {
            detail: format!("expected a page envelope or an array: {e}"),
        })
}

// ============ Catalogue Types ============

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Backend identifier.
    #[serde(rename = "categoryId", deserialize_with = "id::deserialize")]
    pub id: String,
    /// Display name (unique).
    #[serde(rename = "categoryName")]
    pub name: String,
    /// Optional description shown on the category card.
    #[serde(
        rename = "categoryDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        rename = "createdAt",
        default,
        with = "datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// A product, either a catalogue row or a search document.
///
/// Catalogue rows carry `productId` and a nested `category`; search documents carry
/// `id` and a denormalised `categoryName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier.
    #[serde(rename = "productId", alias = "id", deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(rename = "productName")]
    pub name: String,
    #[serde(
        rename = "productDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Unit price in rupees.
    #[serde(rename = "productPrice", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Raw image URL; may be relative to the backend origin.
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "categoryName", default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(
        rename = "createdAt",
        default,
        with = "datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Category label, from the search document or the nested category.
    pub fn category_label(&self) -> Option<&str> {
        self.category_name
            .as_deref()
            .or_else(|| self.category.as_ref().map(|c| c.name.as_str()))
    }
}

/// Inclusive price range for the filter endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ApiError::InvalidParameter {
                param: "price".to_string(),
                detail: format!("invalid range {min}..{max}"),
            });
        }
        Ok(Self { min, max })
    }
}

// ============ Auth Types ============

/// Body of `POST /auth/signin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful sign-in response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// JWT to attach as a bearer credential.
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(deserialize_with = "id::deserialize")]
    pub user_id: String,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Successful sign-up response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the backend.
///
/// Controllers answer `{"error": "..."}`; the global handler answers
/// `{"status": 404, "message": "...", "timestamp": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message).filter(|m| !m.trim().is_empty())
    }
}
