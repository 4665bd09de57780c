//! Storefront product listing.

use std::time::Instant;

use anyhow::Result;
use checkout_commerce::summary::{AddedNotices, ProductGrid};

use crate::context::Context;
use crate::output::items_label;

/// Run the products command.
pub fn run(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    let grid = ProductGrid::build(
        &ctx.catalog,
        ctx.currency,
        cart.total_quantity(),
        &AddedNotices::default(),
        Instant::now(),
    );
    render(&grid, ctx);
    ctx.output.badge(grid.cart_quantity);
    Ok(())
}

/// Print a product grid.
pub fn render(grid: &ProductGrid, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(grid);
        return;
    }

    ctx.output
        .header(&format!("Products ({})", items_label(grid.cards.len())));

    let widths = [56, 10, 12, 36];
    ctx.output.table_row(&["Name", "Price", "Rating", "ID"], &widths);
    for card in &grid.cards {
        let rating = format!("{} ratings", card.rating_count);
        let name = if card.added {
            format!("{} ✓ Added", card.name)
        } else {
            card.name.clone()
        };
        ctx.output.table_row(
            &[&name, &card.price_label, &rating, card.product_id.as_str()],
            &widths,
        );
    }
}
