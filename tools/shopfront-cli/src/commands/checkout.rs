//! Checkout: turn the cart into an order request.

use anyhow::{Context as _, Result};
use shopfront_cart::checkout::Customer;
use shopfront_cart::price::format_price;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    let customer = Customer {
        name: args.name,
        phone: args.phone,
        email: args.email,
        address: args.address,
        notes: args.notes,
    };

    let order = cart.checkout(&customer).context("Cannot place order")?;
    let body = serde_json::to_string_pretty(&order)?;

    match args.output {
        Some(ref path) => {
            std::fs::write(path, format!("{}\n", body))
                .with_context(|| format!("Failed to write order request: {}", path))?;
            ctx.output.success(&format!("Order request written to {}", path));
        }
        None => println!("{}", body),
    }

    ctx.output.kv("items", &order.unit_count().to_string());
    ctx.output.kv("total", &format_price(cart.grand_total()));

    if args.clear {
        cart.clear();
        ctx.output.success("Cart cleared");
    }

    Ok(())
}
