//! Cart mutation commands.
//!
//! Input is validated here, before the cart store is called.

use std::time::Instant;

use anyhow::{bail, Context as _, Result};
use checkout_commerce::cart::CartEvent;
use checkout_commerce::summary::{AddedNotices, ProductGrid};
use checkout_commerce::{DeliveryOptionId, ProductId};
use dialoguer::{Confirm, Input};

use super::{
    parse_quantity, parse_selector_quantity, AddArgs, ClearArgs, DeliveryArgs, RemoveArgs,
    UpdateArgs, INVALID_QUANTITY_MESSAGE,
};
use super::products;
use crate::context::Context;

/// Run the add command.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let product_id = ProductId::new(args.product_id);
    let quantity = parse_selector_quantity(&args.quantity)?;
    let product = ctx.catalog.product(&product_id)?;

    let mut cart = ctx.open_cart()?;
    let event = cart
        .add_to_cart(&product_id, quantity)
        .with_context(|| format!("Failed to add {} to cart", product_id))?;
    report(&event, ctx);

    if ctx.output.is_json() {
        ctx.output.json(&event);
        return Ok(());
    }

    ctx.output.success(&added_message(quantity, &product.name));

    // Re-render the storefront with the "Added" marker on this card.
    let now = Instant::now();
    let mut notices = AddedNotices::default();
    notices.mark(product_id, now);
    let grid = ProductGrid::build(&ctx.catalog, ctx.currency, cart.total_quantity(), &notices, now);
    products::render(&grid, ctx);
    Ok(())
}

/// Run the remove command.
pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let product_id = ProductId::new(args.product_id);
    let mut cart = ctx.open_cart()?;
    let event = cart
        .remove_from_cart(&product_id)
        .with_context(|| format!("Failed to remove {} from cart", product_id))?;
    report(&event, ctx);
    finish(&event, ctx);
    Ok(())
}

/// Run the update command.
pub fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let product_id = ProductId::new(args.product_id);

    let quantity = match args.quantity {
        Some(input) => parse_quantity(&input)?,
        None if ctx.output.is_interactive() => prompt_quantity(&product_id, ctx)?,
        None => bail!("Missing quantity for {}", product_id),
    };

    let mut cart = ctx.open_cart()?;
    if cart.get(&product_id).is_none() {
        ctx.output
            .warn(&format!("{} is not in the cart; nothing to update", product_id));
    }
    let event = cart
        .update_cart_item_quantity(&product_id, quantity)
        .with_context(|| format!("Failed to update quantity of {}", product_id))?;
    report(&event, ctx);
    finish(&event, ctx);
    Ok(())
}

/// Ask until the user enters a positive whole number.
fn prompt_quantity(product_id: &ProductId, ctx: &Context) -> Result<i64> {
    let name = ctx
        .catalog
        .find_by_id(product_id)
        .map_or_else(|| product_id.to_string(), |p| p.name.clone());

    let input: String = Input::new()
        .with_prompt(format!("New quantity for {}", name))
        .validate_with(|input: &String| -> Result<(), String> {
            parse_quantity(input)
                .map(|_| ())
                .map_err(|_| INVALID_QUANTITY_MESSAGE.to_string())
        })
        .interact_text()
        .context("Failed to read quantity")?;

    Ok(parse_quantity(&input)?)
}

/// Run the delivery command.
pub fn delivery(args: DeliveryArgs, ctx: &Context) -> Result<()> {
    let product_id = ProductId::new(args.product_id);
    let option_id = DeliveryOptionId::new(args.option_id);
    let Some(option) = ctx.catalog.delivery_option(&option_id) else {
        let known: Vec<&str> = ctx
            .catalog
            .delivery_options()
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        bail!(
            "Unknown delivery option: {} (available: {})",
            option_id,
            known.join(", ")
        );
    };

    let mut cart = ctx.open_cart()?;
    let event = cart
        .update_delivery_option(&product_id, option)
        .with_context(|| format!("Failed to change delivery option of {}", product_id))?;
    report(&event, ctx);
    finish(&event, ctx);
    Ok(())
}

/// Run the clear command.
pub fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    if cart.is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !args.yes && ctx.output.is_interactive() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} entries from the cart?", cart.len()))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    let event = cart.clear().context("Failed to clear cart")?;
    report(&event, ctx);
    finish(&event, ctx);
    Ok(())
}

fn added_message(quantity: i64, name: &str) -> String {
    format!("Added {} of {}", quantity, name)
}

fn report(event: &CartEvent, ctx: &Context) {
    ctx.output.debug(&format!("{:?}", event));
}

fn finish(event: &CartEvent, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(event);
        return;
    }
    match event {
        CartEvent::Removed { product_id, .. } => {
            ctx.output.success(&format!("Removed {}", product_id))
        }
        CartEvent::QuantityChanged { product_id, to, .. } => ctx
            .output
            .success(&format!("Quantity of {} set to {}", product_id, to)),
        CartEvent::DeliveryOptionChanged {
            product_id,
            delivery_option_id,
        } => ctx.output.success(&format!(
            "Delivery option of {} set to {}",
            product_id, delivery_option_id
        )),
        CartEvent::Cleared { removed } => {
            ctx.output.success(&format!("Removed {} entries", removed))
        }
        CartEvent::Added { .. } | CartEvent::Merged { .. } => {}
        CartEvent::Unchanged => ctx.output.info("Cart unchanged"),
    }
}
