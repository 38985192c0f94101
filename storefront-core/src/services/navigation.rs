//! Route resolution with the auth guard

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{Location, Route, RouteDecision, resolve_route};

/// 最多跟随的重定向次数
const MAX_REDIRECTS: usize = 3;

pub struct NavigationService {
    ctx: Arc<ServiceContext>,
}

impl NavigationService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Route for the current location, replacing it first if the guard redirects.
    pub async fn resolve_current(&self) -> CoreResult<Route> {
        let authenticated = self.ctx.is_authenticated().await?;
        let mut location = self.ctx.history.current();

        for _ in 0..=MAX_REDIRECTS {
            match resolve_route(&location, authenticated) {
                RouteDecision::Render(route) => return Ok(route),
                RouteDecision::Redirect(target) => {
                    log::debug!("Redirecting {location} -> {target}");
                    self.ctx.history.replace(target.clone());
                    location = target;
                }
            }
        }
        Err(CoreError::InvalidRoute(location.to_string()))
    }

    /// Push `link` and resolve it.
    pub async fn open(&self, link: &str) -> CoreResult<Route> {
        let location = Location::parse(link)?;
        self.ctx.history.push(location);
        self.resolve_current().await
    }
}
