//! Bitss payment ledger
//!
//! Same shape as the order listing with one collection. Confirming a
//! payment marks it paid and locks its row for good.

use std::collections::HashMap;
use std::sync::Arc;

use bfinit_client::OrderApi;
use shared::models::{PaymentOrder, PaymentStatus};
use tracing::instrument;

use crate::cache::{CacheState, CollectionCache};
use crate::config::DeskConfig;
use crate::error::{DeskError, DeskResult};
use crate::pagination::{PageItem, Pagination};
use crate::row::{RowEditor, RowOutcome};
use crate::store::Record;
use crate::view::{self, RowView};

pub struct PaymentLedger<A> {
    api: Arc<A>,
    payments: CollectionCache<PaymentOrder>,
    pagination: Pagination,
    banner: Option<String>,
    editors: HashMap<String, RowEditor<PaymentStatus>>,
}

impl<A: OrderApi> PaymentLedger<A> {
    pub fn new(api: Arc<A>, config: &DeskConfig) -> DeskResult<Self> {
        Ok(Self {
            api,
            payments: CollectionCache::new(),
            pagination: Pagination::new(config.page_size)?,
            banner: None,
            editors: HashMap::new(),
        })
    }

    pub fn error(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn state(&self) -> &CacheState {
        self.payments.state()
    }

    /// Fetch unless already loaded
    pub async fn activate(&mut self) -> DeskResult<()> {
        if self.payments.needs_fetch() {
            self.fetch().await?;
        }
        Ok(())
    }

    pub async fn retry(&mut self) -> DeskResult<()> {
        self.fetch().await
    }

    #[instrument(skip(self))]
    async fn fetch(&mut self) -> DeskResult<()> {
        self.payments.begin_load();
        match self.api.bitss_payments().await {
            Ok(payments) => {
                let count = payments.len();
                self.payments.load(payments);
                self.editors.clear();
                self.banner = None;
                self.pagination.clamp(count);
                tracing::info!(count, "Payments loaded");
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!(error = %message, "Failed to load payments");
                self.payments.fail(message.clone());
                self.banner = Some(message);
                Err(e.into())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.payments.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn payment(&self, id: &str) -> Option<&PaymentOrder> {
        self.payments.records().get(id)
    }

    pub fn paid_count(&self) -> usize {
        self.payments.records().iter().filter(|p| p.status).count()
    }

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.len())
    }

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

    pub fn visible_slice(&self) -> Vec<&PaymentOrder> {
        let records = self.payments.records();
        records.slice(self.pagination.range(records.len()))
    }

    pub fn rows(&self) -> Vec<RowView> {
        self.visible_slice()
            .into_iter()
            .map(|payment| match self.editors.get(payment.id()) {
                Some(editor) => view::payment_row(payment, editor),
                None => view::payment_row(
                    payment,
                    &RowEditor::new(payment.id(), payment.payment_status()),
                ),
            })
            .collect()
    }

    pub fn editor(&self, id: &str) -> Option<&RowEditor<PaymentStatus>> {
        self.editors.get(id)
    }

    pub fn select_status(&mut self, id: &str, status: PaymentStatus) -> DeskResult<()> {
        self.editor_mut(id)?.select(status)
    }

    pub fn cancel_edit(&mut self, id: &str) -> DeskResult<()> {
        self.editor_mut(id)?.cancel();
        Ok(())
    }

    /// Send the pending "paid" for a payment
    #[instrument(skip(self))]
    pub async fn confirm_edit(&mut self, id: &str) -> DeskResult<RowOutcome> {
        let target = self.editor_mut(id)?.begin_submit()?;
        let outcome = match self.api.confirm_payment(id).await {
            Ok(()) => {
                self.payments
                    .records_mut()
                    .update(id, |p| p.status = target == PaymentStatus::Paid);
                tracing::info!(payment_id = %id, "Payment marked paid");
                self.editor_mut(id)?.finish(Ok(()))
            }
            Err(e) => {
                tracing::warn!(
                    payment_id = %id,
                    error = %e,
                    "Payment confirmation failed, rolled back"
                );
                self.editor_mut(id)?.finish(Err(e.to_string()))
            }
        };
        Ok(outcome)
    }

    fn editor_mut(&mut self, id: &str) -> DeskResult<&mut RowEditor<PaymentStatus>> {
        let status = self
            .payments
            .records()
            .get(id)
            .map(PaymentOrder::payment_status)
            .ok_or_else(|| DeskError::UnknownRow(id.to_string()))?;
        Ok(self
            .editors
            .entry(id.to_string())
            .or_insert_with(|| RowEditor::new(id, status)))
    }
}
