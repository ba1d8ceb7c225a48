//! `show` command: one item with a few others from its category.

use memecart_catalog::related;
use memecart_core::EnrichedItem;

use crate::browse::render_item;
use crate::context::Context;

const RELATED_LIMIT: usize = 3;

/// # Errors
///
/// Returns an error if the catalog cannot be fetched or `id` is not in it.
pub(crate) async fn run_show(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let items = ctx.load_catalog().await?;
    let item = items
        .iter()
        .find(|i| i.id() == id)
        .ok_or_else(|| anyhow::anyhow!("item '{id}' not found in catalog"))?;
    let related = related(&items, id, RELATED_LIMIT);
    print!("{}", render_detail(item, &related));
    Ok(())
}

pub(crate) fn render_detail(item: &EnrichedItem, related: &[&EnrichedItem]) -> String {
    let mut out = render_item(item);
    out.push_str(&format!("\n{}\n", item.item.image_ref));

    out.push_str(&format!("\nmore {}:\n", item.category));
    if related.is_empty() {
        out.push_str("  (none)\n");
    }
    for other in related {
        out.push_str(&render_item(other));
        out.push('\n');
    }
    out
}
