//! `AuthApi` 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{AuthApi, ErrorContext};
use crate::types::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::utils::log_sanitizer::mask_secret;

use super::StorefrontClient;

#[async_trait]
impl AuthApi for StorefrontClient {
    async fn sign_in(&self, request: &LoginRequest) -> Result<LoginResponse> {
        log::info!("Signing in as {}", request.email);
        let response: LoginResponse = self
            .post_json("/auth/signin", request, ErrorContext::resource("account"))
            .await?;
        log::debug!(
            "Signed in user {} with token {}",
            response.user_id,
            mask_secret(&response.token)
        );
        Ok(response)
    }

    async fn sign_up(&self, request: &SignupRequest) -> Result<SignupResponse> {
        log::info!("Registering {}", request.email);
        self.post_json("/auth/signup", request, ErrorContext::resource("account"))
            .await
    }

    fn set_bearer_token(&self, token: Option<String>) {
        match &token {
            Some(t) => log::debug!("Bearer token set: {}", mask_secret(t)),
            None => log::debug!("Bearer token cleared"),
        }
        self.store_token(token);
    }

    fn has_bearer_token(&self) -> bool {
        self.token().is_some()
    }
}
