use serde::{Deserialize, Serialize};

/// Unified error type for all storefront API operations.
///
/// Every variant is serializable so front ends can forward structured errors.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError) - network connectivity issues, 502/503/504
/// - [`Timeout`](Self::Timeout) - request timed out
/// - [`RateLimited`](Self::RateLimited) - API rate limit exceeded
///
/// The HTTP layer only retries them when [`ClientConfig::max_retries`](crate::ClientConfig)
/// is non-zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The request lacks a valid bearer token, or the credentials were rejected (HTTP 401).
    Unauthorized {
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The authenticated user may not access the resource (HTTP 403).
    Forbidden {
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The requested resource does not exist (HTTP 404).
    NotFound {
        /// What was being looked up (e.g. `product 42`).
        resource: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The backend rejected the request body or parameters (HTTP 400).
    BadRequest {
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected before any request was sent.
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The backend failed with a 5xx status other than 502/503/504.
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The response body is not valid JSON.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// The response is valid JSON but matches none of the accepted shapes.
    UnexpectedShape {
        /// Details about the mismatch.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ApiError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::Forbidden { .. }
                | Self::NotFound { .. }
                | Self::BadRequest { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether the failure is transient and the same request may succeed later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// The backend's own message, when the error carries one.
    pub fn raw_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { raw_message }
            | Self::Forbidden { raw_message }
            | Self::NotFound { raw_message, .. }
            | Self::BadRequest { raw_message }
            | Self::RateLimited { raw_message, .. }
            | Self::ServerError { raw_message, .. } => raw_message.as_deref(),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::Unauthorized { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Unauthorized: {msg}")
                } else {
                    write!(f, "Unauthorized")
                }
            }
            Self::Forbidden { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Forbidden: {msg}")
                } else {
                    write!(f, "Forbidden")
                }
            }
            Self::NotFound {
                resource,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "{resource} not found: {msg}")
                } else {
                    write!(f, "{resource} not found")
                }
            }
            Self::BadRequest { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Bad request: {msg}")
                } else {
                    write!(f, "Bad request")
                }
            }
            Self::InvalidParameter { param, detail } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::ServerError {
                status,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "Server error (HTTP {status}): {msg}")
                } else {
                    write!(f, "Server error (HTTP {status})")
                }
            }
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::UnexpectedShape { detail } => write!(f, "Unexpected response shape: {detail}"),
            Self::SerializationError { detail } => write!(f, "Serialization error: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ApiError::NetworkError {
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "Network error: connection refused");
    }

    #[test]
    fn display_unauthorized_with_message() {
        let e = ApiError::Unauthorized {
            raw_message: Some("Invalid email or password!".to_string()),
        };
        assert_eq!(e.to_string(), "Unauthorized: Invalid email or password!");
    }

    #[test]
    fn display_unauthorized_without_message() {
        let e = ApiError::Unauthorized { raw_message: None };
        assert_eq!(e.to_string(), "Unauthorized");
    }

    #[test]
    fn display_not_found() {
        let e = ApiError::NotFound {
            resource: "product 42".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "product 42 not found");
    }

    #[test]
    fn display_invalid_parameter() {
        let e = ApiError::InvalidParameter {
            param: "q".to_string(),
            detail: "keyword must not be empty".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid parameter 'q': keyword must not be empty"
        );
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ApiError::RateLimited {
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Rate limited (retry after 30s)");
    }

    #[test]
    fn display_server_error() {
        let e = ApiError::ServerError {
            status: 500,
            raw_message: Some("boom".to_string()),
        };
        assert_eq!(e.to_string(), "Server error (HTTP 500): boom");
    }

    #[test]
    fn display_unexpected_shape() {
        let e = ApiError::UnexpectedShape {
            detail: "expected page or array".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Unexpected response shape: expected page or array"
        );
    }

    #[test]
    fn serialize_is_tagged_by_code() {
        let e = ApiError::RateLimited {
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }

    #[test]
    fn expected_variants_are_client_side() {
        assert!(ApiError::BadRequest { raw_message: None }.is_expected());
        assert!(
            ApiError::NotFound {
                resource: "category 1".into(),
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            !ApiError::ServerError {
                status: 500,
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            !ApiError::ParseError {
                detail: "x".into(),
            }
            .is_expected()
        );
    }

    #[test]
    fn retryable_variants() {
        assert!(
            ApiError::Timeout {
                detail: "30s".into(),
            }
            .is_retryable()
        );
        assert!(
            ApiError::RateLimited {
                retry_after: None,
                raw_message: None,
            }
            .is_retryable()
        );
        assert!(!ApiError::Unauthorized { raw_message: None }.is_retryable());
        assert!(
            !ApiError::UnexpectedShape {
                detail: "x".into(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn raw_message_is_exposed() {
        let e = ApiError::BadRequest {
            raw_message: Some("Email is already in use!".into()),
        };
        assert_eq!(e.raw_message(), Some("Email is already in use!"));
        assert_eq!(ApiError::Timeout { detail: "x".into() }.raw_message(), None);
    }
}
