//! `stats` command: the dashboard summary.

use chrono::Local;
use memecart_catalog::{daily_pick, popular, CatalogStats};
use memecart_core::EnrichedItem;

use crate::browse::render_item;
use crate::context::Context;

const POPULAR_LIMIT: usize = 4;

/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub(crate) async fn run_stats(ctx: &Context) -> anyhow::Result<()> {
    let items = ctx.load_catalog().await?;
    let cart = ctx.cart();

    let summary = Summary {
        stats: CatalogStats::compute(&items),
        cart_items: cart.item_count(),
        popular: popular(&items, POPULAR_LIMIT),
        daily: daily_pick(&items, Local::now().date_naive()),
    };
    print!("{}", render_summary(&summary));
    Ok(())
}

pub(crate) struct Summary<'a> {
    pub(crate) stats: CatalogStats,
    pub(crate) cart_items: u64,
    pub(crate) popular: Vec<&'a EnrichedItem>,
    pub(crate) daily: Option<&'a EnrichedItem>,
}

pub(crate) fn render_summary(summary: &Summary<'_>) -> String {
    let mut out = format!(
        "total memes: {}\ncategories: {}\nin cart: {}\n",
        summary.stats.total_items, summary.stats.total_categories, summary.cart_items
    );

    out.push_str("\npopular:\n");
    if summary.popular.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in &summary.popular {
        out.push_str(&render_item(item));
        out.push('\n');
    }

    out.push_str("\nmeme of the day:\n");
    match summary.daily {
        Some(item) => {
            out.push_str(&render_item(item));
            out.push('\n');
        }
        None => out.push_str("  (catalog is empty)\n"),
    }
    out
}
