//! Status code mapping

use crate::error::ApiError;
use crate::traits::{ApiErrorMapper, ErrorContext, RawApiError};

use super::StorefrontClient;

impl ApiErrorMapper for StorefrontClient {
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ApiError {
        map_status(raw, context)
    }
}

pub(crate) fn map_status(raw: RawApiError, context: ErrorContext) -> ApiError {
    let raw_message = raw.message;
    match raw.status {
        401 => ApiError::Unauthorized { raw_message },
        403 => ApiError::Forbidden { raw_message },
        404 => ApiError::NotFound {
            resource: context
                .resource
                .unwrap_or_else(|| "<unknown>".to_string()),
            raw_message,
        },
        // 其余 4xx 一律视为请求错误
        400..=499 => ApiError::BadRequest { raw_message },
        status => ApiError::ServerError {
            status,
            raw_message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16) -> RawApiError {
        RawApiError::new(status, Some("msg".to_string()))
    }

    #[test]
    fn auth_statuses() {
        assert!(matches!(
            map_status(raw(401), ErrorContext::default()),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            map_status(raw(403), ErrorContext::default()),
            ApiError::Forbidden { .. }
        ));
    }

    #[test]
    fn not_found_carries_resource() {
        let e = map_status(raw(404), ErrorContext::resource("product 42"));
        assert!(
            matches!(&e, ApiError::NotFound { resource, .. } if resource == "product 42"),
            "unexpected error: {e:?}"
        );
    }

    #[test]
    fn not_found_without_context() {
        let e = map_status(raw(404), ErrorContext::default());
        assert_eq!(e.to_string(), "<unknown> not found: msg");
    }

    #[test]
    fn other_client_errors_are_bad_request() {
        assert!(matches!(
            map_status(raw(400), ErrorContext::default()),
            ApiError::BadRequest { .. }
        ));
        assert!(matches!(
            map_status(raw(409), ErrorContext::default()),
            ApiError::BadRequest { .. }
        ));
    }

    #[test]
    fn server_errors_keep_status() {
        assert!(matches!(
            map_status(raw(500), ErrorContext::default()),
            ApiError::ServerError { status: 500, .. }
        ));
    }
}
