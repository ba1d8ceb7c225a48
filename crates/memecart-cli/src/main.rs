mod browse;
mod cart;
mod context;
mod show;
mod stats;

use clap::{Parser, Subcommand};
use memecart_core::{CategoryFilter, SortKey};
use tracing_subscriber::EnvFilter;

use crate::browse::BrowseArgs;
use crate::cart::CartCommands;
use crate::context::Context;

#[derive(Debug, Parser)]
#[command(name = "memecart")]
#[command(about = "Browse the meme catalog and manage a persistent cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search, filter, sort, and page through the catalog
    Browse {
        /// Case-insensitive substring matched against item names
        #[arg(long, default_value = "")]
        query: String,

        /// Category to show, or "All"
        #[arg(long, default_value_t = CategoryFilter::All)]
        category: CategoryFilter,

        /// One of name-asc, rating-desc, price-asc, size-asc, size-desc
        #[arg(long, default_value_t = SortKey::NameAsc)]
        sort: SortKey,

        /// Number of pages to reveal
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Catalog totals, popular picks, and today's pick
    Stats,
    /// One item in detail, with related items from its category
    Show {
        /// Catalog item id
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = memecart_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, storage_dir = %config.storage_dir.display(), "starting");
    let ctx = Context::open(config)?;

    match cli.command {
        Commands::Browse {
            query,
            category,
            sort,
            pages,
        } => {
            let args = BrowseArgs {
                query,
                category,
                sort,
                pages: usize::try_from(pages)?,
            };
            browse::run_browse(&ctx, args).await
        }
        Commands::Cart { command } => cart::run_cart(&ctx, command).await,
        Commands::Stats => stats::run_stats(&ctx).await,
        Commands::Show { id } => show::run_show(&ctx, &id).await,
    }
}
