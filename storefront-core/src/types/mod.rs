//! Core type definitions

mod listing;
mod location;
mod route;
mod session;

pub use listing::{
    ListingItem, ListingKind, ListingQuery, ListingRequest, ProductQuery, QueryState, ViewState,
};
pub use location::Location;
pub use route::{Route, RouteDecision, resolve_route};
pub use session::Session;

// Re-export library types
pub use storefront_api::{
    Category, LoginRequest, LoginResponse, PageIndex, PageRequest, PagedResult, Product,
    SignupRequest, SignupResponse,
};
