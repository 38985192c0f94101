//! # storefront-api
//!
//! Typed async client for the storefront backend: paginated catalogue listings,
//! keyword search, categories, and email/password authentication.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use storefront_api::{CatalogApi, ClientConfig, PageRequest, StorefrontClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StorefrontClient::new(ClientConfig::with_base_url("http://localhost:8080/api"))?;
//!
//!     let page = client.list_products(&PageRequest::new(0, 10)).await?;
//!     println!("page 1 of {} ({} products)", page.total_pages, page.total_elements);
//!     for product in &page.items {
//!         println!("{} {:?}", product.name, product.price);
//!     }
//!
//!     let hits = client.search_products("phone", &PageRequest::default()).await?;
//!     println!("{} matches", hits.total_elements);
//!     Ok(())
//! }
//! ```
//!
//! ## Response Shapes
//!
//! List endpoints answer either with a page envelope
//! (`{"content": [...], "totalPages": n, "totalElements": m}`) or with a bare JSON
//! array. Both decode into [`PagedResult`]; a bare array is a single page.
//! Any other JSON is reported as [`ApiError::UnexpectedShape`].
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError):
//!
//! - [`ApiError::Unauthorized`]: credentials rejected or token missing
//! - [`ApiError::NotFound`]: product or category does not exist
//! - [`ApiError::NetworkError`]: connectivity issue or gateway error (retryable)
//!
//! Transient errors are retried with exponential backoff only when
//! [`ClientConfig::max_retries`] is non-zero.

mod client;
mod config;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use client::StorefrontClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use traits::{AuthApi, CatalogApi};
pub use types::{
    Category, LoginRequest, LoginResponse, MAX_PAGE_SIZE, PageIndex, PageRequest, PagedResult,
    PriceRange, Product, SignupRequest, SignupResponse, decode_page,
};

pub use utils::datetime;
pub use utils::log_sanitizer::mask_secret;
