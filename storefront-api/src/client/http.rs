//! 请求辅助方法

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ApiErrorMapper, ErrorContext, RawApiError};
use crate::types::{ErrorBody, PagedResult, decode_page};

use super::StorefrontClient;

/// Encode `key=value` pairs into a query string (without the leading `?`).
pub(crate) fn query_string(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

impl StorefrontClient {
    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send, then split success bodies from mapped failures.
    async fn send(
        &self,
        builder: RequestBuilder,
        method: &str,
        path: &str,
        context: ErrorContext,
    ) -> Result<String> {
        let (status, body) = HttpUtils::execute_request_with_retry(
            self.with_auth(builder),
            method,
            path,
            self.config.max_retries,
        )
        .await?;

        if (200..300).contains(&status) {
            return Ok(body);
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message);
        let error = self.map_error(RawApiError::new(status, message), context);
        if error.is_expected() {
            log::warn!("{method} {path} failed: {error}");
        } else {
            log::error!("{method} {path} failed: {error}");
        }
        Err(error)
    }

    /// GET a list endpoint and decode it as a page.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
        context: ErrorContext,
    ) -> Result<PagedResult<T>> {
        let url = format!("{}?{query}", self.config.endpoint(path));
        let body = self
            .send(self.client.get(&url), "GET", path, context)
            .await?;
        let value: serde_json::Value = HttpUtils::parse_json(&body)?;
        decode_page(value)
    }

    /// GET a single JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = self.config.endpoint(path);
        let body = self
            .send(self.client.get(&url), "GET", path, context)
            .await?;
        HttpUtils::parse_json(&body)
    }

    /// POST a JSON body and parse the JSON reply.
    pub(crate) async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let payload = serde_json::to_vec(body).map_err(|e| self.serialization_error(e))?;
        let url = self.config.endpoint(path);
        let builder = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload);
        let body = self.send(builder, "POST", path, context).await?;
        HttpUtils::parse_json(&body)
    }
}
