//! Storefront Core Library
//!
//! Platform-independent listing logic for the storefront client:
//! - Page index codec and sliding-window page controls
//! - Query state kept in a navigable location (`?q=&page=&name=`)
//! - Listing views that fetch on every state change and ignore stale responses
//! - Routes, the auth guard and the sign-in/sign-up flows
//!
//! Navigation history and session persistence are abstracted through traits,
//! so the same services run behind a terminal front end or in tests.

pub mod config;
pub mod error;
pub mod pagination;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::ListingConfig;
pub use error::{CoreError, CoreResult};
pub use services::{
    AuthService, ListingController, ListingPage, NavigationService, QueryStateStore,
    ServiceContext,
};
pub use traits::{History, InMemoryHistory, InMemorySessionStore, SessionStore};
pub use types::{Location, Route, Session};
