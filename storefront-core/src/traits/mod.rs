//! Platform abstraction trait definitions

mod history;
mod session_store;

pub use history::{History, InMemoryHistory};
pub use session_store::{InMemorySessionStore, SessionStore};
