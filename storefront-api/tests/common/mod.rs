//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use storefront_api::{AuthApi, CatalogApi, ClientConfig, SignupRequest, StorefrontClient};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_backend {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试邮箱
pub fn unique_email() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("test-{}@example.com", &uuid.to_string()[..8])
}

/// 合法的注册请求
pub fn signup_request(email: &str) -> SignupRequest {
    SignupRequest {
        full_name: "Integration Test".to_string(),
        email: email.to_string(),
        password: "Secret@123".to_string(),
        confirm_password: "Secret@123".to_string(),
    }
}

/// 测试上下文
pub struct TestContext {
    pub client: Arc<StorefrontClient>,
}

impl TestContext {
    /// 读取 `STOREFRONT_API_URL` 创建客户端
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("STOREFRONT_API_URL").ok()?;
        let client = StorefrontClient::new(ClientConfig::with_base_url(base_url)).ok()?;
        Some(Self {
            client: Arc::new(client),
        })
    }

    pub fn catalog(&self) -> Arc<dyn CatalogApi> {
        self.client.clone()
    }

    pub fn auth(&self) -> Arc<dyn AuthApi> {
        self.client.clone()
    }
}
