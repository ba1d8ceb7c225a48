//! `cart` command handlers.

use clap::Subcommand;
use memecart_store::Cart;

use crate::context::Context;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a catalog item
    Add {
        /// Catalog item id
        id: String,
    },
    /// Remove an item's line entirely
    Remove {
        /// Catalog item id
        id: String,
    },
    /// Take one unit off an item's line, dropping it at zero
    Decrease {
        /// Catalog item id
        id: String,
    },
    /// Empty the cart
    Clear,
}

/// # Errors
///
/// `add` returns an error when the catalog cannot be fetched or the id is
/// not in it. Other sub-commands only touch local storage and never fail.
pub(crate) async fn run_cart(ctx: &Context, command: CartCommands) -> anyhow::Result<()> {
    let mut cart = ctx.cart();

    match command {
        CartCommands::Show => {}
        CartCommands::Add { id } => {
            let items = ctx.load_catalog().await?;
            let item = items
                .iter()
                .find(|i| i.id() == id)
                .ok_or_else(|| anyhow::anyhow!("item '{id}' not found in catalog"))?;
            cart.add_item(item);
            println!("added {} to cart", item.name());
        }
        CartCommands::Remove { id } => {
            if cart.line(&id).is_none() {
                println!("item '{id}' is not in the cart");
            }
            cart.remove_item(&id);
        }
        CartCommands::Decrease { id } => {
            if cart.line(&id).is_none() {
                println!("item '{id}' is not in the cart");
            }
            cart.decrease_count(&id);
        }
        CartCommands::Clear => cart.clear(),
    }

    print!("{}", render_cart(&cart));
    Ok(())
}

pub(crate) fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "cart is empty\n".to_string();
    }

    let mut out = String::new();
    for line in cart.lines() {
        out.push_str(&format!(
            "{:>4} x {} ({}) @ ${} = ${}\n",
            line.quantity,
            line.item.name(),
            line.id(),
            line.item.price,
            line.line_total(),
        ));
    }
    out.push_str(&format!(
        "{} items, total ${}\n",
        cart.item_count(),
        cart.total_price()
    ));
    out
}
