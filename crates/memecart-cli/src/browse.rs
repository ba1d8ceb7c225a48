//! `browse` command: run the catalog pipeline and print the visible window.

use memecart_catalog::{CatalogPipeline, Window};
use memecart_core::{CategoryFilter, EnrichedItem, SortKey};

use crate::context::Context;

#[derive(Debug)]
pub(crate) struct BrowseArgs {
    pub(crate) query: String,
    pub(crate) category: CategoryFilter,
    pub(crate) sort: SortKey,
    pub(crate) pages: usize,
}

/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub(crate) async fn run_browse(ctx: &Context, args: BrowseArgs) -> anyhow::Result<()> {
    let items = ctx.load_catalog().await?;
    let mut pipeline = apply_args(CatalogPipeline::from_config(&ctx.config), items, args).await;
    print!("{}", render_window(&pipeline.window()));
    Ok(())
}

/// Loads `items` into `pipeline` and applies the command-line filters.
pub(crate) async fn apply_args(
    mut pipeline: CatalogPipeline,
    items: Vec<EnrichedItem>,
    args: BrowseArgs,
) -> CatalogPipeline {
    pipeline.set_items(items);
    pipeline.set_category(args.category);
    pipeline.set_sort(args.sort);
    if !args.query.is_empty() {
        pipeline.set_query(args.query);
        pipeline.settle().await;
    }
    // Query and filter changes reset the page, so reveal pages last.
    for _ in 1..args.pages {
        pipeline.load_more();
    }
    pipeline
}

pub(crate) fn render_item(item: &EnrichedItem) -> String {
    format!(
        "{:>10}  {}  [{}, rating {}/5, ${}, {}x{}]",
        item.id(),
        item.name(),
        item.category,
        item.rating,
        item.price,
        item.item.width,
        item.item.height,
    )
}

pub(crate) fn render_window(window: &Window<'_>) -> String {
    if window.filtered_total == 0 {
        return "no memes match the current filters\n".to_string();
    }

    let mut out = String::new();
    for item in &window.items {
        out.push_str(&render_item(item));
        out.push('\n');
    }
    out.push_str(&format!(
        "showing {} of {} (page {}){}\n",
        window.items.len(),
        window.filtered_total,
        window.page,
        if window.has_more {
            "; more available with --pages"
        } else {
            ""
        },
    ));
    out
}
