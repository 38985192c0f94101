//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use storefront_api::ApiError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Form input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// Session missing or unusable
    #[error("Session error: {0}")]
    Session(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Link that cannot be parsed into a location
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// Backend error (converting from library)
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation(_) | Self::Session(_) | Self::InvalidRoute(_) => true,
            Self::Api(e) => e.is_expected(),
            Self::Storage(_) | Self::Serialization(_) => false,
        }
    }

    /// Message the backend attached to the failure, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Api(e) => e.raw_message().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
