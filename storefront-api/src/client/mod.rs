//! Storefront backend client

mod auth;
mod catalog;
mod error;
mod http;

use std::sync::{PoisonError, RwLock};

use reqwest::Client;

use crate::config::{ClientConfig, create_http_client};
use crate::error::Result;

/// HTTP implementation of [`CatalogApi`](crate::CatalogApi) and [`AuthApi`](crate::AuthApi).
pub struct StorefrontClient {
    pub(crate) client: Client,
    pub(crate) config: ClientConfig,
    bearer_token: RwLock<Option<String>>,
}

impl StorefrontClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(&config)?,
            config,
            bearer_token: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.bearer_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn store_token(&self, token: Option<String>) {
        *self
            .bearer_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }
}

impl std::fmt::Debug for StorefrontClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontClient")
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.token().is_some())
            .finish_non_exhaustive()
    }
}
