//! 应用主体：把命令映射到核心服务，并渲染当前页面

use std::sync::Arc;

use anyhow::Result;
use storefront_core::pagination::to_page_index;
use storefront_core::{
    AuthService, CoreError, History, ListingController, NavigationService, QueryStateStore, Route,
    ServiceContext,
};

use crate::command::{Command, HELP};

/// What the loop should do after a command.
pub enum Outcome {
    Print(String),
    Quit,
}

pub struct App {
    ctx: Arc<ServiceContext>,
    controller: ListingController,
    auth: AuthService,
    nav: NavigationService,
    query: QueryStateStore,
}

impl App {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            controller: ListingController::new(ctx.clone()),
            auth: AuthService::new(ctx.clone()),
            nav: NavigationService::new(ctx.clone()),
            query: ctx.query_state(),
            ctx,
        }
    }

    /// Restore the saved session and render the starting location.
    pub async fn start(&self) -> Result<String> {
        if let Some(session) = self.auth.restore_session().await? {
            tracing::info!("Welcome back, user {}", session.user_id);
        }
        self.render().await
    }

    pub async fn execute(&self, command: Command) -> Result<Outcome> {
        let text = match command {
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
            Command::Open(link) => {
                self.nav.open(&link).await?;
                self.render().await?
            }
            Command::Page(n) => {
                self.query.set_page(to_page_index(Some(&n.to_string())));
                self.render().await?
            }
            Command::Next => self.turn(true).await?,
            Command::Prev => self.turn(false).await?,
            Command::Search(keyword) => {
                self.query.set_keyword(&keyword);
                self.render().await?
            }
            Command::Category { id, name } => {
                self.query.open_category(&id, &name);
                self.render().await?
            }
            Command::Back => {
                if !self.ctx.history.back() {
                    return Ok(Outcome::Print("Already at the first page visited.".into()));
                }
                self.render().await?
            }
            Command::Forward => {
                if !self.ctx.history.forward() {
                    return Ok(Outcome::Print("Nothing to go forward to.".into()));
                }
                self.render().await?
            }
            // 每次渲染都会重新挂载并拉取
            Command::Reload => self.render().await?,
            Command::Login { email, password } => {
                match self.auth.sign_in(&email, &password).await {
                    Ok(_) => self.render().await?,
                    Err(e) => form_error(e)?,
                }
            }
            Command::Signup(form) => match self.auth.sign_up(form).await {
                Ok(message) => {
                    let page = self.render().await?;
                    format!(
                        "{}\n\n{page}",
                        message.as_deref().unwrap_or("Registration successful.")
                    )
                }
                Err(e) => form_error(e)?,
            },
            Command::Logout => {
                self.auth.sign_out().await?;
                self.render().await?
            }
        };
        Ok(Outcome::Print(text))
    }

    /// Move to the neighbouring page, if there is one.
    async fn turn(&self, forward: bool) -> Result<String> {
        let current = self.query.read().page;
        let total = self.controller.view().state().await.total_pages();
        let target = if forward {
            (current + 1 < total).then_some(current + 1)
        } else {
            current.checked_sub(1)
        };
        match target {
            Some(page) => {
                self.query.set_page(page);
                self.render().await
            }
            None => Ok("No more pages in that direction.".to_string()),
        }
    }

    /// Resolve the route, fetch the listing if needed, and render it.
    async fn render(&self) -> Result<String> {
        let route = self.nav.resolve_current().await?;
        let text = match route {
            Route::Login => "Sign in\n\n  login <email> <password>\n  (no account? signup ...)".to_string(),
            Route::Signup => {
                "Create an account\n\n  signup <email> <password> <confirm> <full name>".to_string()
            }
            Route::Home | Route::AllProducts | Route::CategoryProducts { .. } => {
                if let Some(handle) = self.controller.mount().await {
                    handle.await?;
                }
                self.controller
                    .page()
                    .await
                    .map(|page| page.to_string())
                    .unwrap_or_default()
            }
        };
        Ok(format!("── {} ──\n{text}", self.ctx.history.current()))
    }
}

/// Form errors are shown to the user; anything else aborts the command.
fn form_error(error: CoreError) -> Result<String> {
    match error {
        CoreError::Validation(message) => Ok(message),
        other => Err(other.into()),
    }
}
