//! Search, category filter, sort, and incremental pagination over the
//! enriched catalog.
//!
//! The visible window is a pure function of
//! `(items, debounced_query, category, sort_key, page)`; see
//! [`visible_window`]. [`CatalogPipeline`] owns that tuple, debounces the
//! query, resets the page when the criteria change, and caches the sorted
//! order so paging does not re-filter.

use std::cmp::Ordering;
use std::time::Duration;

use memecart_core::{AppConfig, CategoryFilter, EnrichedItem, SortKey};
use tokio::sync::watch;

use crate::debounce::Debouncer;

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// User-controlled pipeline inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Search text exactly as typed.
    pub query: String,
    /// Search text after the debounce delay; the only query the filter reads.
    pub debounced_query: String,
    pub category: CategoryFilter,
    pub sort_key: SortKey,
    /// 1-based count of revealed pages.
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            debounced_query: String::new(),
            category: CategoryFilter::All,
            sort_key: SortKey::default(),
            page: 1,
        }
    }
}

/// The revealed prefix of the filtered and sorted catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window<'a> {
    pub items: Vec<&'a EnrichedItem>,
    /// Number of items matching the current filters.
    pub filtered_total: usize,
    pub page: usize,
    pub has_more: bool,
}

/// Orders two items under `sort_key`.
///
/// Names compare case-insensitively first; names equal up to case put the
/// lowercase spelling first (`"doge"` before `"Doge"`) so the order is total.
#[must_use]
pub fn compare_items(sort_key: SortKey, a: &EnrichedItem, b: &EnrichedItem) -> Ordering {
    match sort_key {
        SortKey::NameAsc => a
            .name()
            .to_lowercase()
            .cmp(&b.name().to_lowercase())
            .then_with(|| b.name().cmp(a.name())),
        SortKey::RatingDesc => b.rating.cmp(&a.rating),
        SortKey::PriceAsc => a.price.cmp(&b.price),
        SortKey::SizeAsc => a.item.area().cmp(&b.item.area()),
        SortKey::SizeDesc => b.item.area().cmp(&a.item.area()),
    }
}

/// Indices of the items passing the filters, in stable sorted order.
fn matching_order(
    items: &[EnrichedItem],
    query: &str,
    category: CategoryFilter,
    sort_key: SortKey,
) -> Vec<usize> {
    let needle = query.to_lowercase();
    let mut order: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| needle.is_empty() || item.name().to_lowercase().contains(&needle))
        .filter(|(_, item)| category.matches(item.category))
        .map(|(idx, _)| idx)
        .collect();
    // `sort_by` is stable: ties keep their catalog order.
    order.sort_by(|&a, &b| compare_items(sort_key, &items[a], &items[b]));
    order
}

/// Filters and sorts `items`. An empty `query` matches every name.
#[must_use]
pub fn filter_and_sort<'a>(
    items: &'a [EnrichedItem],
    query: &str,
    category: CategoryFilter,
    sort_key: SortKey,
) -> Vec<&'a EnrichedItem> {
    matching_order(items, query, category, sort_key)
        .into_iter()
        .map(|idx| &items[idx])
        .collect()
}

fn window_from_order<'a>(
    items: &'a [EnrichedItem],
    order: &[usize],
    page: usize,
    page_size: usize,
) -> Window<'a> {
    let visible = page.max(1).saturating_mul(page_size).min(order.len());
    Window {
        items: order[..visible].iter().map(|&idx| &items[idx]).collect(),
        filtered_total: order.len(),
        page,
        has_more: visible < order.len(),
    }
}

/// Computes the visible window: the first `page * page_size` filtered and
/// sorted items.
#[must_use]
pub fn visible_window<'a>(
    items: &'a [EnrichedItem],
    state: &FilterState,
    page_size: usize,
) -> Window<'a> {
    let order = matching_order(items, &state.debounced_query, state.category, state.sort_key);
    window_from_order(items, &order, state.page, page_size)
}

#[derive(Debug)]
struct SortedOrder {
    query: String,
    category: CategoryFilter,
    sort_key: SortKey,
    order: Vec<usize>,
}

impl SortedOrder {
    fn matches(&self, state: &FilterState) -> bool {
        self.query == state.debounced_query
            && self.category == state.category
            && self.sort_key == state.sort_key
    }
}

/// Stateful driver for the catalog view.
///
/// Must be used inside a tokio runtime: [`set_query`](Self::set_query)
/// schedules the debounce timer on it. Dropping the pipeline cancels any
/// pending debounce.
#[derive(Debug)]
pub struct CatalogPipeline {
    items: Vec<EnrichedItem>,
    state: FilterState,
    page_size: usize,
    debouncer: Debouncer<String>,
    debounced: watch::Receiver<String>,
    sorted: Option<SortedOrder>,
}

impl CatalogPipeline {
    /// A `page_size` of zero is treated as one.
    pub fn new(page_size: usize, debounce: Duration) -> Self {
        let debouncer = Debouncer::new(String::new(), debounce);
        let debounced = debouncer.subscribe();
        Self {
            items: Vec::new(),
            state: FilterState::default(),
            page_size: page_size.max(1),
            debouncer,
            debounced,
            sorted: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.page_size, config.debounce())
    }

    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn items(&self) -> &[EnrichedItem] {
        &self.items
    }

    /// Replaces the catalog. Filters and page are kept.
    pub fn set_items(&mut self, items: Vec<EnrichedItem>) {
        self.items = items;
        self.sorted = None;
    }

    /// Updates the displayed query now and the filtering query once typing
    /// has paused for the debounce delay.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.state.query.clone_from(&query);
        self.debouncer.push(query);
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        if self.state.category != category {
            self.state.category = category;
            self.reset_page();
        }
    }

    pub fn set_sort(&mut self, sort_key: SortKey) {
        if self.state.sort_key != sort_key {
            self.state.sort_key = sort_key;
            self.reset_page();
        }
    }

    /// Reveals one more page.
    pub fn load_more(&mut self) {
        self.state.page = self.state.page.saturating_add(1);
    }

    /// Applies a debounced query that has been published since the last call.
    pub fn sync(&mut self) {
        if !matches!(self.debounced.has_changed(), Ok(true)) {
            return;
        }
        let published = self.debounced.borrow_and_update().clone();
        if published != self.state.debounced_query {
            tracing::debug!(query = %published, "applying debounced query");
            self.state.debounced_query = published;
            self.reset_page();
        }
    }

    /// Waits for the last query passed to [`set_query`](Self::set_query) to
    /// be published, then applies it.
    pub async fn settle(&mut self) {
        self.debouncer.flush().await;
        self.sync();
    }

    /// Computes the current visible window, applying any debounced query
    /// first.
    pub fn window(&mut self) -> Window<'_> {
        self.sync();

        let stale = self.sorted.as_ref().is_none_or(|s| !s.matches(&self.state));
        if stale {
            let order = matching_order(
                &self.items,
                &self.state.debounced_query,
                self.state.category,
                self.state.sort_key,
            );
            self.sorted = Some(SortedOrder {
                query: self.state.debounced_query.clone(),
                category: self.state.category,
                sort_key: self.state.sort_key,
                order,
            });
        }

        let order = self.sorted.as_ref().map_or(&[][..], |s| s.order.as_slice());
        window_from_order(&self.items, order, self.state.page, self.page_size)
    }

    fn reset_page(&mut self) {
        self.state.page = 1;
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
