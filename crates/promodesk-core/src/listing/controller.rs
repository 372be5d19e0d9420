//! List state for one collection screen: filter, page, and load sequencing.
//!
//! Every filter or page change starts a new load generation. A load that
//! finishes after a newer one has started is discarded instead of being
//! shown, so the screen always reflects the latest request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::page::{clamp_page, paginate, Page};
use super::{filter_items, ListFilter};

/// Simulated latency applied before a load is revealed.
pub const DEFAULT_LOADING_DELAY: Duration = Duration::from_millis(500);

/// Generation counter shared by all loads of one list.
#[derive(Debug, Clone, Default)]
pub struct LoadGate {
    latest: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding every earlier ticket.
    pub fn begin(&self) -> LoadTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { generation }
    }

    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.generation
    }

    /// Wait `delay`, then run `produce` only if `ticket` is still current.
    pub async fn settle<T>(
        &self,
        ticket: LoadTicket,
        delay: Duration,
        produce: impl FnOnce() -> T,
    ) -> Option<T> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.is_current(ticket) {
            Some(produce())
        } else {
            tracing::debug!(
                generation = ticket.generation,
                "discarding superseded list load"
            );
            None
        }
    }
}

/// A load started by a filter or page change.
#[derive(Debug)]
#[must_use = "a pending load does nothing until resolved"]
pub struct PendingLoad<T> {
    gate: LoadGate,
    ticket: LoadTicket,
    delay: Duration,
    page: Page<T>,
}

impl<T> PendingLoad<T> {
    /// Resolves to the page, or `None` if a newer load superseded this one.
    pub async fn resolve(self) -> Option<Page<T>> {
        let page = self.page;
        self.gate.settle(self.ticket, self.delay, move || page).await
    }
}

#[derive(Debug)]
pub struct ListController<T, F> {
    items: Vec<T>,
    filter: F,
    page: usize,
    page_size: usize,
    delay: Duration,
    gate: LoadGate,
    view: Option<Page<T>>,
    loading: bool,
}

impl<T: Clone, F: ListFilter<T>> ListController<T, F> {
    #[must_use]
    pub fn new(items: Vec<T>, filter: F, page_size: usize) -> Self {
        Self {
            items,
            filter,
            page: 1,
            page_size,
            delay: DEFAULT_LOADING_DELAY,
            gate: LoadGate::new(),
            view: None,
            loading: false,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn filter(&self) -> &F {
        &self.filter
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last page revealed by a load, if any.
    #[must_use]
    pub fn view(&self) -> Option<&Page<T>> {
        self.view.as_ref()
    }

    #[must_use]
    pub fn filtered(&self) -> Vec<T> {
        filter_items(&self.items, &self.filter)
    }

    /// Compute the current page synchronously, without load sequencing.
    #[must_use]
    pub fn current_page(&self) -> Page<T> {
        paginate(&self.filtered(), self.page, self.page_size)
    }

    /// Apply a filter change. Always returns to page 1.
    pub fn update_filter(&mut self, change: impl FnOnce(&mut F)) -> PendingLoad<T> {
        change(&mut self.filter);
        self.page = 1;
        self.start_load()
    }

    pub fn set_page(&mut self, page: usize) -> PendingLoad<T> {
        self.page = clamp_page(page, self.filtered().len(), self.page_size);
        self.start_load()
    }

    /// Replace the backing collection after a create, edit, or delete.
    pub fn replace_items(&mut self, items: Vec<T>) -> PendingLoad<T> {
        self.items = items;
        self.page = clamp_page(self.page, self.filtered().len(), self.page_size);
        self.start_load()
    }

    /// Reveal a resolved page.
    pub fn show(&mut self, page: Page<T>) {
        self.view = Some(page);
        self.loading = false;
    }

    fn start_load(&mut self) -> PendingLoad<T> {
        self.loading = true;
        PendingLoad {
            gate: self.gate.clone(),
            ticket: self.gate.begin(),
            delay: self.delay,
            page: self.current_page(),
        }
    }
}
