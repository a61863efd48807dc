//! Order listing controller
//!
//! Owns the two order collections behind the Online and Manual tabs, the
//! shared pagination, the page-level error banner and the per-row status
//! editors. Every network call is awaited while the controller is
//! exclusively borrowed, so fetches and confirms never interleave.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bfinit_client::OrderApi;
use tracing::instrument;

use crate::cache::{CacheState, CollectionCache};
use crate::config::DeskConfig;
use crate::error::{DeskError, DeskResult};
use crate::order::{Order, status_of};
use crate::pagination::{PageItem, Pagination};
use crate::row::{RowEditor, RowOutcome};
use crate::stats::OrderStats;
use crate::status::OrderStatus;
use crate::store::Record;
use crate::view::{self, MANUAL_COLUMNS, ONLINE_COLUMNS, RowView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Online,
    Manual,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Online => "online",
            Tab::Manual => "manual",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(Tab::Online),
            "manual" => Ok(Tab::Manual),
            other => Err(format!("unknown tab: {}", other)),
        }
    }
}

pub struct OrderListing<A> {
    api: Arc<A>,
    online: CollectionCache<Order>,
    manual: CollectionCache<Order>,
    pagination: Pagination,
    tab: Tab,
    banner: Option<String>,
    editors: HashMap<(Tab, String), RowEditor<OrderStatus>>,
}

impl<A: OrderApi> OrderListing<A> {
    pub fn new(api: Arc<A>, config: &DeskConfig) -> DeskResult<Self> {
        Ok(Self {
            api,
            online: CollectionCache::new(),
            manual: CollectionCache::new(),
            pagination: Pagination::new(config.page_size)?,
            tab: Tab::default(),
            banner: None,
            editors: HashMap::new(),
        })
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Page-level error for the active tab
    pub fn error(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn state(&self, tab: Tab) -> &CacheState {
        self.cache(tab).state()
    }

    pub fn is_loading(&self) -> bool {
        self.cache(self.tab).is_loading()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self.tab {
            Tab::Online => &ONLINE_COLUMNS,
            Tab::Manual => &MANUAL_COLUMNS,
        }
    }

    /// Fetch the active tab when it has not been loaded yet.
    ///
    /// A collection that failed last time is fetched again; a loaded one
    /// is served from memory.
    pub async fn activate(&mut self) -> DeskResult<()> {
        if self.cache(self.tab).needs_fetch() {
            self.fetch(self.tab).await?;
        }
        Ok(())
    }

    /// Switch tabs. Loaded data is kept; page and banner are reset.
    pub async fn select_tab(&mut self, tab: Tab) -> DeskResult<()> {
        self.tab = tab;
        self.pagination.reset();
        self.banner = None;
        self.activate().await
    }

    pub async fn fetch_online_orders(&mut self) -> DeskResult<()> {
        self.fetch(Tab::Online).await
    }

    pub async fn fetch_manual_orders(&mut self) -> DeskResult<()> {
        self.fetch(Tab::Manual).await
    }

    /// Fetch the active tab again, regardless of its cache state
    pub async fn retry(&mut self) -> DeskResult<()> {
        self.fetch(self.tab).await
    }

    /// Drop a loaded collection so the next activation fetches it
    pub fn invalidate(&mut self, tab: Tab) {
        self.cache_mut(tab).invalidate();
    }

    #[instrument(skip(self))]
    async fn fetch(&mut self, tab: Tab) -> DeskResult<()> {
        self.cache_mut(tab).begin_load();
        let result = match tab {
            Tab::Online => self
                .api
                .online_orders()
                .await
                .map(|orders| orders.into_iter().map(Order::from).collect::<Vec<_>>()),
            Tab::Manual => self
                .api
                .manual_orders()
                .await
                .map(|orders| orders.into_iter().map(Order::from).collect::<Vec<_>>()),
        };

        match result {
            Ok(orders) => {
                let count = orders.len();
                self.cache_mut(tab).load(orders);
                self.editors.retain(|(t, _), _| *t != tab);
                if tab == self.tab {
                    self.banner = None;
                    self.pagination.clamp(count);
                }
                tracing::info!(count, "Orders loaded");
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!(error = %message, "Failed to load orders");
                self.cache_mut(tab).fail(message.clone());
                if tab == self.tab {
                    self.banner = Some(message);
                }
                Err(e.into())
            }
        }
    }

    // ========== Pagination ==========

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.len())
    }

    /// Accepts 5, 10, 25, 50 or 100 and goes back to page 1
    pub fn set_page_size(&mut self, page_size: usize) -> DeskResult<()> {
        self.pagination.set_page_size(page_size)
    }

    pub fn set_page(&mut self, page: usize) -> usize {
        let total = self.len();
        self.pagination.set_page(page, total)
    }

    pub fn next_page(&mut self) -> bool {
        let total = self.len();
        self.pagination.next(total)
    }

    pub fn previous_page(&mut self) -> bool {
        self.pagination.previous()
    }

    pub fn page_window(&self) -> Vec<PageItem> {
        self.pagination.window(self.len())
    }

    // ========== Data ==========

    /// Number of orders in the active tab
    pub fn len(&self) -> usize {
        self.cache(self.tab).records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.cache(self.tab).records().get(id)
    }

    /// Orders on the current page
    pub fn visible_slice(&self) -> Vec<&Order> {
        let records = self.cache(self.tab).records();
        records.slice(self.pagination.range(records.len()))
    }

    /// Counters for the active tab
    pub fn stats(&self) -> OrderStats {
        self.stats_for(self.tab)
    }

    pub fn stats_for(&self, tab: Tab) -> OrderStats {
        OrderStats::tally(
            self.cache(tab)
                .records()
                .iter()
                .map(|order| status_of(order).bucket()),
        )
    }

    /// Rows on the current page, with their editor state
    pub fn rows(&self) -> Vec<RowView> {
        self.visible_slice()
            .into_iter()
            .map(|order| match self.editors.get(&(self.tab, order.id().to_string())) {
                Some(editor) => view::order_row(order, editor),
                None => view::order_row(order, &RowEditor::new(order.id(), order.status())),
            })
            .collect()
    }

    // ========== Row editing ==========

    pub fn editor(&self, id: &str) -> Option<&RowEditor<OrderStatus>> {
        self.editors.get(&(self.tab, id.to_string()))
    }

    /// Pick a new status for a row in the active tab
    pub fn select_status(&mut self, id: &str, status: OrderStatus) -> DeskResult<()> {
        self.editor_mut(id)?.select(status)
    }

    pub fn cancel_edit(&mut self, id: &str) -> DeskResult<()> {
        self.editor_mut(id)?.cancel();
        Ok(())
    }

    /// Send the pending status of a row.
    ///
    /// Manual orders go through the status update call, online orders
    /// through approve. The store only changes once the server accepted;
    /// a failure rolls the row back and is reported in the outcome.
    #[instrument(skip(self))]
    pub async fn confirm_edit(&mut self, id: &str) -> DeskResult<RowOutcome> {
        let tab = self.tab;
        let target = self.editor_mut(id)?.begin_submit()?;

        let result = match target {
            OrderStatus::Manual(status) => self.api.update_manual_status(id, status).await,
            OrderStatus::Online(_) => self.api.approve_order(id).await,
        };

        let outcome = match result {
            Ok(()) => {
                let previous = self
                    .cache_mut(tab)
                    .records_mut()
                    .update(id, |order| {
                        order.set_status(target);
                    });
                if let Some(previous) = previous {
                    tracing::info!(
                        order_id = %id,
                        from = %previous.status(),
                        to = %target,
                        "Order status changed"
                    );
                }
                self.editor_mut(id)?.finish(Ok(()))
            }
            Err(e) => {
                tracing::warn!(order_id = %id, error = %e, "Status change failed, rolled back");
                self.editor_mut(id)?.finish(Err(e.to_string()))
            }
        };
        Ok(outcome)
    }

    fn editor_mut(&mut self, id: &str) -> DeskResult<&mut RowEditor<OrderStatus>> {
        let tab = self.tab;
        let status = self
            .cache(tab)
            .records()
            .get(id)
            .map(Order::status)
            .ok_or_else(|| DeskError::UnknownRow(id.to_string()))?;
        Ok(self
            .editors
            .entry((tab, id.to_string()))
            .or_insert_with(|| RowEditor::new(id, status)))
    }

    fn cache(&self, tab: Tab) -> &CollectionCache<Order> {
        match tab {
            Tab::Online => &self.online,
            Tab::Manual => &self.manual,
        }
    }

    fn cache_mut(&mut self, tab: Tab) -> &mut CollectionCache<Order> {
        match tab {
            Tab::Online => &mut self.online,
            Tab::Manual => &mut self.manual,
        }
    }
}
