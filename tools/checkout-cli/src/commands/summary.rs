//! Checkout page: the order summary.

use anyhow::Result;
use checkout_commerce::summary::{OrderSummary, OrderSummaryBuilder, SummaryFault};

use crate::context::Context;
use crate::output::{items_label, radio};

/// Run the summary command.
pub fn run(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    let summary = OrderSummaryBuilder::new(&ctx.catalog)
        .with_currency(ctx.currency)
        .build(cart.items(), ctx.today());
    render(&summary, ctx);
    Ok(())
}

/// Print an order summary.
pub fn render(summary: &OrderSummary, ctx: &Context) {
    let out = &ctx.output;
    if out.is_json() {
        out.json(summary);
        return;
    }

    out.header(&format!("Checkout ({})", items_label(summary.item_count)));

    if summary.is_empty() {
        out.info("Your cart is empty");
    }

    for row in &summary.rows {
        out.line("");
        out.line(&format!("Delivery date: {}", row.delivery_date_label));
        out.kv("Product", &row.name);
        out.kv("ID", row.product_id.as_str());
        out.kv("Price", &row.unit_price_label);
        out.kv("Quantity", &row.quantity.to_string());
        out.line("  Choose a delivery option:");
        for choice in &row.choices {
            out.line(&format!(
                "    {} {}  {} Shipping  [{}]",
                radio(choice.selected),
                choice.date_label,
                choice.price_label,
                choice.delivery_option_id
            ));
        }
    }

    for fault in &summary.faults {
        match fault {
            SummaryFault::UnknownProduct { product_id } => {
                out.warn(&format!("Skipped {}: no longer in the catalog", product_id))
            }
            SummaryFault::UnknownDeliveryOption {
                product_id,
                delivery_option_id,
            } => out.warn(&format!(
                "{} has unknown delivery option {}; using the default",
                product_id, delivery_option_id
            )),
            SummaryFault::Overflow { product_id } => {
                out.warn(&format!("Skipped {}: amount too large to total", product_id))
            }
        }
    }

    out.header("Order Summary");
    let payment = &summary.payment;
    out.kv(
        &format!("Items ({})", summary.total_quantity),
        &payment.items_subtotal.display(),
    );
    out.kv("Shipping & handling", &payment.shipping_total.display());
    out.kv("Order total", &payment.order_total.display());
}
