//! Quantity-counted shopping cart persisted through a [`DurableCell`].

use std::num::NonZeroU32;
use std::sync::Arc;

use memecart_core::EnrichedItem;
use serde::{Deserialize, Serialize};

use crate::cell::DurableCell;
use crate::medium::StorageMedium;

/// Storage key for the cart. The suffix is the schema version.
pub const CART_KEY: &str = "memecart.cart.v1";

/// One distinct item in the cart.
///
/// `item` is a snapshot taken when the line was created; re-enriching the
/// catalog later does not reprice lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: EnrichedItem,
    pub quantity: NonZeroU32,
}

impl CartLine {
    #[must_use]
    pub fn id(&self) -> &str {
        self.item.id()
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        u64::from(self.item.price) * u64::from(self.quantity.get())
    }
}

/// Ordered cart lines, at most one per item id, in first-added order.
#[derive(Debug)]
pub struct Cart {
    cell: DurableCell<Vec<CartLine>>,
    item_count: u64,
}

impl Cart {
    /// Opens the cart stored in `medium`.
    ///
    /// A stored cart containing the same id on several lines is folded into
    /// one line per id (quantities summed) and written back.
    pub fn open(medium: Arc<dyn StorageMedium>) -> Self {
        let mut cell = DurableCell::open(medium, CART_KEY, Vec::new());
        cell.update_if(merge_duplicate_lines);
        let item_count = count_items(cell.get());
        Self { cell, item_count }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cell.get()
    }

    #[must_use]
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines().iter().find(|line| line.id() == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.lines().iter().map(CartLine::line_total).sum()
    }

    /// Adds one unit of `item`, creating its line if needed.
    pub fn add_item(&mut self, item: &EnrichedItem) {
        self.mutate(|lines| {
            if let Some(line) = lines.iter_mut().find(|line| line.id() == item.id()) {
                line.quantity = line.quantity.saturating_add(1);
            } else {
                lines.push(CartLine {
                    item: item.clone(),
                    quantity: NonZeroU32::MIN,
                });
            }
            true
        });
        tracing::debug!(id = item.id(), item_count = self.item_count, "added item to cart");
    }

    /// Removes the line for `id`. Absent ids are ignored.
    pub fn remove_item(&mut self, id: &str) {
        self.mutate(|lines| {
            let before = lines.len();
            lines.retain(|line| line.id() != id);
            lines.len() != before
        });
    }

    /// Removes one unit of `id`, dropping the line when it reaches zero.
    /// Absent ids are ignored.
    pub fn decrease_count(&mut self, id: &str) {
        self.mutate(|lines| {
            let Some(pos) = lines.iter().position(|line| line.id() == id) else {
                return false;
            };
            match NonZeroU32::new(lines[pos].quantity.get() - 1) {
                Some(quantity) => lines[pos].quantity = quantity,
                None => {
                    lines.remove(pos);
                }
            }
            true
        });
    }

    pub fn clear(&mut self) {
        self.mutate(|lines| {
            let had_lines = !lines.is_empty();
            lines.clear();
            had_lines
        });
    }

    fn mutate<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Vec<CartLine>) -> bool,
    {
        if self.cell.update_if(f) {
            self.item_count = count_items(self.cell.get());
        }
    }
}

fn count_items(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity.get())).sum()
}

fn merge_duplicate_lines(lines: &mut Vec<CartLine>) -> bool {
    let before = lines.len();
    let mut merged: Vec<CartLine> = Vec::with_capacity(before);
    for line in lines.drain(..) {
        if let Some(existing) = merged.iter_mut().find(|m| m.id() == line.id()) {
            existing.quantity = existing.quantity.saturating_add(line.quantity.get());
        } else {
            merged.push(line);
        }
    }
    *lines = merged;
    if lines.len() != before {
        tracing::warn!(
            before,
            after = lines.len(),
            "merged duplicate cart lines from storage"
        );
    }
    lines.len() != before
}
