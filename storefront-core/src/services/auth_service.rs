//! 认证服务
//!
//! 登录、注册、登出，以及启动时恢复会话

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{LoginRequest, Route, Session, SignupRequest};

/// 登录失败且后端未给出原因时的提示
pub const LOGIN_FALLBACK_MESSAGE: &str = "Invalid email or password";
/// 注册失败且后端未给出原因时的提示
pub const SIGNUP_FALLBACK_MESSAGE: &str = "Registration failed.";

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// 注册表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl From<SignupForm> for SignupRequest {
    fn from(form: SignupForm) -> Self {
        Self {
            full_name: form.full_name,
            email: form.email,
            password: form.password,
            confirm_password: form.confirm_password,
        }
    }
}

/// Check a signup form before it is sent.
///
/// Rules run in order and the first failing one is reported; a weak password
/// reports every rule it misses.
pub fn validate_signup(form: &SignupForm) -> CoreResult<()> {
    let email_ok = EMAIL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(&form.email));
    if !email_ok {
        return Err(CoreError::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }

    if form.password != form.confirm_password {
        return Err(CoreError::Validation("Passwords do not match".to_string()));
    }

    let missing = missing_password_rules(&form.password);
    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "Password is missing: {}.",
            missing.join(", ")
        )));
    }
    Ok(())
}

fn missing_password_rules(password: &str) -> Vec<&'static str> {
    let len = password.chars().count();
    let mut missing = Vec::new();
    if !(8..=15).contains(&len) {
        missing.push("8-15 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        missing.push("one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        missing.push("one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        missing.push("one digit");
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        missing.push("one special character (@$!%*?&)");
    }
    missing
}

/// 认证服务
pub struct AuthService {
    ctx: Arc<ServiceContext>,
}

impl AuthService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 登录
    ///
    /// 成功后保存会话、附加 bearer token，并跳转到首页。
    pub async fn sign_in(&self, email: &str, password: &str) -> CoreResult<Session> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = self
            .ctx
            .auth_api
            .sign_in(&request)
            .await
            .map_err(|e| surface(e.into(), LOGIN_FALLBACK_MESSAGE))?;

        let session = Session::new(response.token, response.user_id);
        self.ctx.session_store.save(&session).await?;
        self.ctx
            .auth_api
            .set_bearer_token(Some(session.token.clone()));
        log::info!("Signed in as user {}", session.user_id);

        self.ctx.history.push(Route::Home.location());
        Ok(session)
    }

    /// 注册
    ///
    /// 本地校验通过后才发送请求；成功后跳转到登录页，返回后端消息。
    pub async fn sign_up(&self, form: SignupForm) -> CoreResult<Option<String>> {
        validate_signup(&form)?;

        let request = SignupRequest::from(form);
        let response = self
            .ctx
            .auth_api
            .sign_up(&request)
            .await
            .map_err(|e| surface(e.into(), SIGNUP_FALLBACK_MESSAGE))?;

        log::info!("Registered {}", request.email);
        self.ctx.history.push(Route::Login.location());
        Ok(response.message)
    }

    /// 登出
    pub async fn sign_out(&self) -> CoreResult<()> {
        self.ctx.session_store.clear().await?;
        self.ctx.auth_api.set_bearer_token(None);
        log::info!("Signed out");
        self.ctx.history.push(Route::Login.location());
        Ok(())
    }

    /// 启动时恢复已保存的会话
    pub async fn restore_session(&self) -> CoreResult<Option<Session>> {
        let session = self.ctx.session_store.load().await?;
        if let Some(session) = &session {
            self.ctx
                .auth_api
                .set_bearer_token(Some(session.token.clone()));
            log::debug!("Restored session for user {}", session.user_id);
        }
        Ok(session)
    }
}

/// Backend failure as the message shown next to the form.
fn surface(error: CoreError, fallback: &str) -> CoreError {
    if error.is_expected() {
        log::warn!("Auth request rejected: {error}");
    } else {
        log::error!("Auth request failed: {error}");
    }
    CoreError::Validation(error.backend_message().unwrap_or(fallback).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestHarness;
    use crate::traits::{History, SessionStore};
    use storefront_api::ApiError;

    fn form(email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            full_name: "Asha Rao".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    fn message(result: CoreResult<()>) -> String {
        match result {
            Err(CoreError::Validation(m)) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(validate_signup(&form("asha@shop.in", "Secret@123", "Secret@123")).is_ok());
    }

    #[test]
    fn email_checked_first() {
        for email in ["", "asha", "asha@shop", "as ha@shop.in", "@shop.in"] {
            assert_eq!(
                message(validate_signup(&form(email, "x", "y"))),
                "Please enter a valid email address."
            );
        }
    }

    #[test]
    fn confirmation_must_match() {
        assert_eq!(
            message(validate_signup(&form("asha@shop.in", "Secret@123", "Secret@124"))),
            "Passwords do not match"
        );
    }

    #[test]
    fn lists_every_missing_rule() {
        assert_eq!(
            message(validate_signup(&form("asha@shop.in", "", ""))),
            "Password is missing: 8-15 characters, one uppercase letter, one lowercase letter, one digit, one special character (@$!%*?&)."
        );
        assert_eq!(
            message(validate_signup(&form("asha@shop.in", "secret123", "secret123"))),
            "Password is missing: one uppercase letter, one special character (@$!%*?&)."
        );
        assert_eq!(
            message(validate_signup(&form(
                "asha@shop.in",
                "Secret@1234567890",
                "Secret@1234567890"
            ))),
            "Password is missing: 8-15 characters."
        );
    }

    #[tokio::test]
    async fn sign_in_persists_session_and_attaches_token() {
        let h = TestHarness::anonymous_at("/login");
        let auth = AuthService::new(h.ctx.clone());

        let session = auth.sign_in(" asha@shop.in ", "Secret@123").await.unwrap();

        assert_eq!(session.user_id, "7");
        assert_eq!(h.auth.calls().await, vec!["signin asha@shop.in"]);
        assert_eq!(h.auth.token().as_deref(), Some(session.token.as_str()));
        assert_eq!(h.sessions.load().await.unwrap(), Some(session));
        assert_eq!(h.history.current().to_string(), "/");
    }

    #[tokio::test]
    async fn sign_in_failure_surfaces_backend_message() {
        let h = TestHarness::anonymous_at("/login");
        h.auth
            .fail_sign_in(ApiError::Unauthorized {
                raw_message: Some("Bad credentials".into()),
            })
            .await;
        let result = AuthService::new(h.ctx.clone())
            .sign_in("asha@shop.in", "nope")
            .await;

        assert!(matches!(result, Err(CoreError::Validation(ref m)) if m == "Bad credentials"));
        assert!(!h.ctx.is_authenticated().await.unwrap());
        assert_eq!(h.history.current().to_string(), "/login");
    }

    #[tokio::test]
    async fn sign_in_failure_without_message_uses_fallback() {
        let h = TestHarness::anonymous_at("/login");
        h.auth
            .fail_sign_in(ApiError::NetworkError {
                detail: "connection refused".into(),
            })
            .await;
        let result = AuthService::new(h.ctx.clone())
            .sign_in("asha@shop.in", "Secret@123")
            .await;
        assert!(
            matches!(result, Err(CoreError::Validation(ref m)) if m == LOGIN_FALLBACK_MESSAGE)
        );
    }

    #[tokio::test]
    async fn invalid_signup_never_reaches_backend() {
        let h = TestHarness::anonymous_at("/signup");
        let result = AuthService::new(h.ctx.clone())
            .sign_up(form("asha@shop.in", "weak", "weak"))
            .await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert!(h.auth.calls().await.is_empty());
    }

    #[tokio::test]
    async fn sign_up_goes_to_login() {
        let h = TestHarness::anonymous_at("/signup");
        let message = AuthService::new(h.ctx.clone())
            .sign_up(form("asha@shop.in", "Secret@123", "Secret@123"))
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("User registered successfully!"));
        assert_eq!(h.auth.calls().await, vec!["signup asha@shop.in"]);
        assert_eq!(h.history.current().to_string(), "/login");
    }

    #[tokio::test]
    async fn sign_up_failure_uses_backend_error() {
        let h = TestHarness::anonymous_at("/signup");
        h.auth
            .fail_sign_up(ApiError::BadRequest {
                raw_message: Some("Email already exists".into()),
            })
            .await;
        let result = AuthService::new(h.ctx.clone())
            .sign_up(form("asha@shop.in", "Secret@123", "Secret@123"))
            .await;
        assert!(matches!(result, Err(CoreError::Validation(ref m)) if m == "Email already exists"));

        h.auth
            .fail_sign_up(ApiError::ServerError {
                status: 500,
                raw_message: None,
            })
            .await;
        let result = AuthService::new(h.ctx.clone())
            .sign_up(form("asha@shop.in", "Secret@123", "Secret@123"))
            .await;
        assert!(
            matches!(result, Err(CoreError::Validation(ref m)) if m == SIGNUP_FALLBACK_MESSAGE)
        );
    }

    #[tokio::test]
    async fn sign_out_clears_everything() {
        let h = TestHarness::signed_in_at("/all-products?page=1");
        let auth = AuthService::new(h.ctx.clone());
        auth.restore_session().await.unwrap();
        assert_eq!(h.auth.token().as_deref(), Some("stored-token-value"));

        auth.sign_out().await.unwrap();

        assert_eq!(h.auth.token(), None);
        assert_eq!(h.sessions.load().await.unwrap(), None);
        assert_eq!(h.history.current().to_string(), "/login");
    }

    #[tokio::test]
    async fn restore_without_session_is_noop() {
        let h = TestHarness::anonymous_at("/");
        let restored = AuthService::new(h.ctx.clone()).restore_session().await.unwrap();
        assert!(restored.is_none());
        assert_eq!(h.auth.token(), None);
    }
}
