//! Shared HTTP request pipeline
//!
//! Sending, status pre-classification, body reading, and JSON parsing for every
//! storefront endpoint. Endpoint methods build their own `RequestBuilder` and map
//! non-success statuses themselves; this module only handles what is common.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ApiError;
use crate::utils::log_sanitizer::truncate_for_log;

const LOG_TARGET: &str = "storefront_api::http";

/// HTTP 工具函数集
pub struct HttpUtils;

impl HttpUtils {
    /// Send a request and return `(status, body)`.
    ///
    /// 429 becomes [`ApiError::RateLimited`] and 502/503/504 become
    /// [`ApiError::NetworkError`]; every other status is returned to the caller.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
    ) -> Result<(u16, String), ApiError> {
        log::debug!(target: LOG_TARGET, "{method_name} {path}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                ApiError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!(target: LOG_TARGET, "{method_name} {path} -> {status_code}");

        // 先取 Retry-After，再消费响应体
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!(target: LOG_TARGET, "Rate limited (HTTP 429) on {path}, retry_after={retry_after:?}");
            return Err(ApiError::RateLimited {
                retry_after,
                raw_message: Some(body).filter(|b| !b.is_empty()),
            });
        }

        // 网关类错误视为网络故障，可重试
        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!(target: LOG_TARGET, "Gateway error (HTTP {status_code}) on {path}");
            return Err(ApiError::NetworkError {
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::trace!(
            target: LOG_TARGET,
            "Response body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON body into `T`.
    pub fn parse_json<T>(response_text: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!(target: LOG_TARGET, "JSON parse failed: {e}");
            log::error!(
                target: LOG_TARGET,
                "Raw response: {}",
                truncate_for_log(response_text)
            );
            ApiError::ParseError {
                detail: e.to_string(),
            }
        })
    }

    /// [`execute_request`](Self::execute_request) with exponential backoff.
    ///
    /// Only [`ApiError::is_retryable`] failures are retried. `max_retries = 0`
    /// sends exactly once.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ApiError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, method_name, path).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder 只能使用一次
            let Some(req) = request_builder.try_clone() else {
                log::warn!(target: LOG_TARGET, "Cannot clone request for {path}, disabling retry");
                return Self::execute_request(request_builder, method_name, path).await;
            };

            match Self::execute_request(req, method_name, path).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        target: LOG_TARGET,
                        "{} {} failed (attempt {}/{}), retrying in {:.1}s: {}",
                        method_name,
                        path,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::NetworkError {
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Honour `Retry-After` (capped at 30s), otherwise back off exponentially.
fn retry_delay(error: &ApiError, attempt: u32) -> Duration {
    if let ApiError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, ... capped at 10s.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
