//! Listing view state machine and its history-driven controller

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::error::CoreResult;
use crate::pagination::to_page_index;
use crate::services::presenter::ListingPage;
use crate::services::query_state::{CATEGORY_NAME_PARAM, KEYWORD_PARAM, PAGE_PARAM};
use crate::services::{ListingDataSource, ServiceContext};
use crate::types::{
    ListingItem, ListingKind, ListingQuery, ListingRequest, Location, PagedResult, Route,
    ViewState,
};

/// Identifies one issued fetch. Only the ticket of the latest fetch may settle the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub request: ListingRequest,
}

#[derive(Debug, Default)]
struct ViewInner {
    generation: u64,
    request: Option<ListingRequest>,
    state: ViewState,
}

/// `Loading -> Ready | Failed`, re-entered on every new request.
pub struct ListingView {
    inner: RwLock<ViewInner>,
    source: ListingDataSource,
}

impl ListingView {
    #[must_use]
    pub fn new(source: ListingDataSource) -> Self {
        Self {
            inner: RwLock::new(ViewInner::default()),
            source,
        }
    }

    /// Enter `Loading` for `request` and return the ticket its result must present.
    pub async fn begin(&self, request: ListingRequest) -> FetchTicket {
        let mut inner = self.inner.write().await;
        Self::begin_locked(&mut inner, request)
    }

    /// Like [`begin`](Self::begin), but does nothing if `request` is already the
    /// current one.
    pub async fn begin_if_changed(&self, request: ListingRequest) -> Option<FetchTicket> {
        let mut inner = self.inner.write().await;
        if inner.request.as_ref() == Some(&request) {
            return None;
        }
        Some(Self::begin_locked(&mut inner, request))
    }

    fn begin_locked(inner: &mut ViewInner, request: ListingRequest) -> FetchTicket {
        inner.generation += 1;
        inner.request = Some(request.clone());
        inner.state = ViewState::Loading;
        FetchTicket {
            generation: inner.generation,
            request,
        }
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale and the result
    /// was dropped.
    pub async fn settle(
        &self,
        ticket: &FetchTicket,
        result: CoreResult<PagedResult<ListingItem>>,
    ) -> bool {
        let mut inner = self.inner.write().await;
        if inner.generation != ticket.generation || inner.request.as_ref() != Some(&ticket.request)
        {
            log::debug!(
                "Dropping stale result for generation {} (current {})",
                ticket.generation,
                inner.generation
            );
            return false;
        }

        inner.state = match result {
            Ok(result) => ViewState::Ready { result },
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Listing fetch failed for {:?}: {e}", ticket.request.query);
                } else {
                    log::error!("Listing fetch failed for {:?}: {e}", ticket.request.query);
                }
                ViewState::Failed {
                    message: ticket.request.query.failure_message().to_string(),
                }
            }
        };
        true
    }

    /// Issue exactly one fetch for `ticket` and settle with its result.
    pub async fn run(&self, ticket: &FetchTicket) -> bool {
        let result = self.source.fetch(&ticket.request).await;
        self.settle(ticket, result).await
    }

    /// `begin` + `run`.
    pub async fn load(&self, request: ListingRequest) -> bool {
        let ticket = self.begin(request).await;
        self.run(&ticket).await
    }

    pub async fn state(&self) -> ViewState {
        self.inner.read().await.state.clone()
    }

    pub async fn request(&self) -> Option<ListingRequest> {
        self.inner.read().await.request.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }
}

/// Keeps a [`ListingView`] in step with the history.
pub struct ListingController {
    ctx: Arc<ServiceContext>,
    view: Arc<ListingView>,
}

impl ListingController {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let view = Arc::new(ListingView::new(ctx.data_source()));
        Self { ctx, view }
    }

    pub fn view(&self) -> &Arc<ListingView> {
        &self.view
    }

    /// The listing screen for `location`, or `None` for non-listing routes.
    pub fn kind_for(location: &Location) -> Option<ListingKind> {
        match Route::parse(location)? {
            Route::Home => Some(ListingKind::Categories),
            Route::AllProducts => {
                let keyword = location.get(KEYWORD_PARAM).unwrap_or_default().trim();
                if keyword.is_empty() {
                    Some(ListingKind::AllProducts)
                } else {
                    Some(ListingKind::Search {
                        keyword: keyword.to_string(),
                    })
                }
            }
            Route::CategoryProducts { category_id } => Some(ListingKind::CategoryProducts {
                category_id,
                name: location
                    .get(CATEGORY_NAME_PARAM)
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or("Category")
                    .to_string(),
            }),
            Route::Login | Route::Signup => None,
        }
    }

    /// The fetch `location` calls for.
    pub fn request_for(&self, location: &Location) -> Option<ListingRequest> {
        let query = Self::kind_for(location)?.query();
        let size = match query {
            ListingQuery::Categories => self.ctx.config.category_page_size,
            ListingQuery::Products(_) => self.ctx.config.product_page_size,
        };
        let page = to_page_index(location.get(PAGE_PARAM));
        Some(ListingRequest::new(query, page, size))
    }

    /// Normalise the page parameter, enter `Loading` and fetch for the current location.
    ///
    /// Every mount fetches, even if the view already holds this request.
    pub async fn mount(&self) -> Option<JoinHandle<()>> {
        self.request_for(&self.ctx.history.current())?;
        self.ctx.query_state().ensure_page_default();
        self.reload().await
    }

    /// Fetch for the current location unless that request is already current.
    pub async fn sync(&self) -> Option<JoinHandle<()>> {
        let request = self.request_for(&self.ctx.history.current())?;
        let ticket = self.view.begin_if_changed(request).await?;
        Some(self.spawn_fetch(ticket))
    }

    /// Fetch for the current location even if nothing changed.
    pub async fn reload(&self) -> Option<JoinHandle<()>> {
        let request = self.request_for(&self.ctx.history.current())?;
        let ticket = self.view.begin(request).await;
        Some(self.spawn_fetch(ticket))
    }

    fn spawn_fetch(&self, ticket: FetchTicket) -> JoinHandle<()> {
        let view = self.view.clone();
        tokio::spawn(async move {
            view.run(&ticket).await;
        })
    }

    /// Refetch whenever the history changes, until the returned task is aborted.
    pub fn watch(self: Arc<Self>) -> JoinHandle<()> {
        let mut changes = self.ctx.history.subscribe();
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                self.sync().await;
            }
        })
    }

    /// Project the current state for display.
    pub async fn page(&self) -> Option<ListingPage> {
        let location = self.ctx.history.current();
        let kind = Self::kind_for(&location)?;
        let state = self.view.state().await;
        let current = self
            .view
            .request()
            .await
            .map_or_else(|| to_page_index(location.get(PAGE_PARAM)), |r| r.page.page);
        Some(ListingPage::project(
            &kind,
            &state,
            current,
            &self.ctx.config.asset_origin,
        ))
    }
}
