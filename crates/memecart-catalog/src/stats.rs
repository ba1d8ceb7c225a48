//! Dashboard figures derived from the enriched catalog.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use memecart_core::{EnrichedItem, Rating};

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total_items: usize,
    /// Number of distinct categories present in the catalog.
    pub total_categories: usize,
}

impl CatalogStats {
    #[must_use]
    pub fn compute(items: &[EnrichedItem]) -> Self {
        let categories: BTreeSet<_> = items.iter().map(|i| i.category).collect();
        Self {
            total_items: items.len(),
            total_categories: categories.len(),
        }
    }
}

/// Top-rated items in catalog order, at most `limit`.
#[must_use]
pub fn popular(items: &[EnrichedItem], limit: usize) -> Vec<&EnrichedItem> {
    items
        .iter()
        .filter(|i| i.rating.get() == Rating::MAX)
        .take(limit)
        .collect()
}

/// Other items in the same category as `id`, in catalog order, at most
/// `limit`. Empty when `id` is not in the catalog.
#[must_use]
pub fn related<'a>(items: &'a [EnrichedItem], id: &str, limit: usize) -> Vec<&'a EnrichedItem> {
    let Some(target) = items.iter().find(|i| i.id() == id) else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|i| i.category == target.category && i.id() != target.id())
        .take(limit)
        .collect()
}

fn date_hash(date: &str) -> u32 {
    date.chars()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(u32::from(c)))
}

/// Index of the item featured on `date`. `None` for an empty catalog.
///
/// The same date string always maps to the same index for a given length.
#[must_use]
pub fn daily_pick_index(date: &str, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let hash = usize::try_from(date_hash(date)).ok()?;
    Some(hash % len)
}

/// The item featured on `date`, hashed from its `YYYY-MM-DD` form.
#[must_use]
pub fn daily_pick(items: &[EnrichedItem], date: NaiveDate) -> Option<&EnrichedItem> {
    let key = date.format("%Y-%m-%d").to_string();
    daily_pick_index(&key, items.len()).and_then(|idx| items.get(idx))
}
