//! 配置加载
//!
//! `<config_dir>/storefront/config.json`，文件不存在时使用默认值，然后应用环境变量覆盖。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_api::ClientConfig;
use storefront_core::ListingConfig;

/// 后端地址覆盖
pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
/// 图片资源源站覆盖
pub const ENV_ASSET_ORIGIN: &str = "STOREFRONT_ASSET_ORIGIN";

/// 获取配置目录路径
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storefront")
}

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub api: ClientConfig,
    pub listing: ListingConfig,
    /// Session file; defaults to `session.json` next to the config file.
    pub session_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load from the default location and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_dir().join("config.json"))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(origin) = lookup(ENV_ASSET_ORIGIN).filter(|v| !v.trim().is_empty()) {
            self.listing.asset_origin = origin;
        }
    }

    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| config_dir().join("session.json"))
    }
}
