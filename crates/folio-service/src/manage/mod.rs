//! Filterable list state for the admin pages.
//!
//! A [`ResourceManager`] owns the list, its loading/error flags, optional
//! aggregate stats and the page's filter state. Filter changes are
//! debounced: each change aborts the pending timer task and spawns a new
//! one, so only the last change inside the window produces a request.
//! Requests already dispatched are not cancelled; a generation counter
//! drops their responses when a newer list request has started.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use folio_core::AppResult;
use folio_entity::contact::Contact;
use folio_entity::project::Project;
use folio_entity::skill::Skill;

/// Default debounce window for filter changes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Records addressable by a string id.
pub trait Identifiable {
    fn id(&self) -> &str;
}

impl Identifiable for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identifiable for Skill {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identifiable for Contact {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Source of one admin list.
#[async_trait]
pub trait ListFetcher: Send + Sync + 'static {
    /// Page filter state.
    type Filters: Clone + Default + Debug + Send + Sync + 'static;
    /// One list row.
    type Item: Identifiable + Clone + Debug + Send + Sync + 'static;
    /// Aggregate counters shown next to the list.
    type Stats: Clone + Debug + Send + Sync + 'static;

    /// Message shown when the list cannot be loaded.
    const ERROR_MESSAGE: &'static str;

    /// Whether [`fetch_stats`](Self::fetch_stats) is meaningful.
    const HAS_STATS: bool = false;

    /// Load the list for the given filters.
    async fn fetch_list(&self, filters: &Self::Filters) -> AppResult<Vec<Self::Item>>;

    /// Load aggregate stats.
    async fn fetch_stats(&self) -> AppResult<Option<Self::Stats>> {
        Ok(None)
    }
}

/// Snapshot of a manager.
pub struct ManagerState<F: ListFetcher> {
    pub items: Vec<F::Item>,
    pub loading: bool,
    pub error: Option<String>,
    pub stats: Option<F::Stats>,
    pub filters: F::Filters,
}

impl<F: ListFetcher> Clone for ManagerState<F> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            loading: self.loading,
            error: self.error.clone(),
            stats: self.stats.clone(),
            filters: self.filters.clone(),
        }
    }
}

impl<F: ListFetcher> Debug for ManagerState<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerState")
            .field("items", &self.items.len())
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("stats", &self.stats)
            .field("filters", &self.filters)
            .finish()
    }
}

impl<F: ListFetcher> Default for ManagerState<F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            stats: None,
            filters: F::Filters::default(),
        }
    }
}

struct Shared<F: ListFetcher> {
    fetcher: F,
    state: Mutex<ManagerState<F>>,
    list_generation: AtomicU64,
}

impl<F: ListFetcher> Shared<F> {
    fn lock(&self) -> MutexGuard<'_, ManagerState<F>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn load_list(&self) {
        let generation = self.list_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let filters = {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
            state.filters.clone()
        };

        let result = self.fetcher.fetch_list(&filters).await;

        let mut state = self.lock();
        if self.list_generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Dropping stale list response");
            return;
        }
        match result {
            Ok(items) => {
                debug!(count = items.len(), "List loaded");
                state.items = items;
            }
            Err(err) => {
                warn!(error = %err, filters = ?filters, "{}", F::ERROR_MESSAGE);
                state.items.clear();
                state.error = Some(F::ERROR_MESSAGE.to_string());
            }
        }
        state.loading = false;
    }

    async fn load_stats(&self) {
        if !F::HAS_STATS {
            return;
        }
        match self.fetcher.fetch_stats().await {
            Ok(stats) => self.lock().stats = stats,
            Err(err) => warn!(error = %err, "Failed to load stats"),
        }
    }
}

/// Debounced, filterable list state for one resource.
pub struct ResourceManager<F: ListFetcher> {
    shared: Arc<Shared<F>>,
    debounce: Duration,
    mounted: AtomicBool,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<F: ListFetcher> Debug for ResourceManager<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManager")
            .field("debounce", &self.debounce)
            .field("mounted", &self.mounted.load(Ordering::SeqCst))
            .finish()
    }
}

impl<F: ListFetcher> ResourceManager<F> {
    /// Creates a manager with the default debounce window.
    pub fn new(fetcher: F) -> Self {
        Self::with_debounce(fetcher, DEFAULT_DEBOUNCE)
    }

    /// Creates a manager with a custom debounce window.
    pub fn with_debounce(fetcher: F, debounce: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                fetcher,
                state: Mutex::new(ManagerState::default()),
                list_generation: AtomicU64::new(0),
            }),
            debounce,
            mounted: AtomicBool::new(false),
            pending: Mutex::new(None),
        }
    }

    /// The underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.shared.fetcher
    }

    /// Current state.
    pub fn snapshot(&self) -> ManagerState<F> {
        self.shared.lock().clone()
    }

    /// Current list.
    pub fn items(&self) -> Vec<F::Item> {
        self.shared.lock().items.clone()
    }

    /// Current filter state.
    pub fn filters(&self) -> F::Filters {
        self.shared.lock().filters.clone()
    }

    /// Initial load. The filter state at this point is taken as-is, no
    /// debounced fetch is scheduled for it.
    pub async fn mount(&self) {
        self.mounted.store(true, Ordering::SeqCst);
        self.refetch_data().await;
    }

    /// Merge a change into the filter state and schedule a fetch after the
    /// debounce window, replacing any fetch still waiting on its timer.
    ///
    /// Before [`mount`](Self::mount) only the filter state changes. Must be
    /// called from within a tokio runtime.
    pub fn update_filters(&self, patch: impl FnOnce(&mut F::Filters)) {
        patch(&mut self.shared.lock().filters);
        if !self.mounted.load(Ordering::SeqCst) {
            return;
        }

        let shared = Arc::clone(&self.shared);
        let delay = self.debounce;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached so a later abort only ever hits the timer.
            tokio::spawn(async move { shared.load_list().await });
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }

    /// Re-run the list query and, when the fetcher has stats, the stats
    /// query concurrently.
    pub async fn refetch_data(&self) {
        futures::join!(self.shared.load_list(), self.shared.load_stats());
    }

    /// Append an item.
    pub fn add_item(&self, item: F::Item) {
        self.shared.lock().items.push(item);
    }

    /// Replace the item with the same id in place.
    pub fn update_item(&self, item: F::Item) {
        let mut state = self.shared.lock();
        if let Some(slot) = state.items.iter_mut().find(|i| i.id() == item.id()) {
            *slot = item;
        }
    }

    /// Rebuild the list from its current contents and the filter state in
    /// one step.
    pub fn reshape_items(
        &self,
        reshape: impl FnOnce(Vec<F::Item>, &F::Filters) -> Vec<F::Item>,
    ) {
        let mut state = self.shared.lock();
        let items = std::mem::take(&mut state.items);
        state.items = reshape(items, &state.filters);
    }

    /// Remove the item with `id`, keeping the order of the rest.
    pub fn remove_item(&self, id: &str) {
        self.shared.lock().items.retain(|i| i.id() != id);
    }

    /// Show `message` as the page error.
    pub fn set_error(&self, message: impl Into<String>) {
        self.shared.lock().error = Some(message.into());
    }

    /// Dismiss the page error.
    pub fn clear_error(&self) {
        self.shared.lock().error = None;
    }
}

impl<F: ListFetcher> Drop for ResourceManager<F> {
    fn drop(&mut self) {
        if let Some(task) = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}
