//! Cart commands.

use std::io::Read;

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use serde::Serialize;
use serde_json::Value;
use shopfront_cart::catalog::{ProductDescriptor, SelectedVariant};
use shopfront_cart::price::format_price;
use shopfront_cart::{CartLine, CartStore, CartSummary, ProductId, ShippingPolicy, VariantId};
use shopfront_storage::FileStorage;

use super::{AddArgs, CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    match args.command {
        CartCommand::Show => show(&cart, ctx),
        CartCommand::Add(add_args) => add(&mut cart, add_args, ctx),
        CartCommand::AddJson { file, quantity } => add_json(&mut cart, &file, quantity, ctx),
        CartCommand::Update { key, quantity } => update(&mut cart, &key, quantity, ctx),
        CartCommand::Increase { key } => {
            report_change(cart.increase(&key), &key, "Increased", ctx);
            show(&cart, ctx)
        }
        CartCommand::Decrease { key } => {
            if !cart.decrease(&key) {
                ctx.output
                    .warn(&format!("{} is not in the cart or already at 1", key));
            } else {
                ctx.output.success(&format!("Decreased {}", key));
            }
            show(&cart, ctx)
        }
        CartCommand::Remove { key } => remove(&mut cart, &key, ctx),
        CartCommand::Clear { yes } => clear(&mut cart, yes, ctx),
        CartCommand::Contains { product, variant } => {
            let product = ProductId::new(product);
            let variant = variant.map(VariantId::new);
            let found = cart.is_in_cart(&product, variant.as_ref());

            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "in_cart": found }));
            } else {
                println!("{}", found);
            }
            Ok(())
        }
    }
}

/// JSON view of the cart.
#[derive(Serialize)]
struct CartView<'a> {
    lines: Vec<LineView<'a>>,
    summary: CartSummary,
}

#[derive(Serialize)]
struct LineView<'a> {
    key: String,
    #[serde(flatten)]
    line: &'a CartLine,
    line_total: f64,
}

fn show(cart: &CartStore<FileStorage>, ctx: &Context) -> Result<()> {
    let summary = cart.summary();

    if ctx.output.is_json() {
        let view = CartView {
            lines: cart
                .lines()
                .iter()
                .map(|line| LineView {
                    key: line.key().to_string(),
                    line,
                    line_total: line.line_total(),
                })
                .collect(),
            summary,
        };
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.header("Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let widths = [10, 32, 5, 16, 16];
    ctx.output
        .table_row(&["KEY", "PRODUCT", "QTY", "PRICE", "TOTAL"], &widths);

    for line in cart.lines() {
        let name = match line.variant_name() {
            Some(variant) if !variant.is_empty() => format!("{} ({})", line.name, variant),
            _ => line.name.clone(),
        };
        let price = if line.has_valid_price() {
            format_price(line.price)
        } else {
            "n/a".to_string()
        };

        ctx.output.table_row(
            &[
                &line.key().to_string(),
                &truncate(&name, 29),
                &line.quantity.to_string(),
                &price,
                &format_price(line.line_total()),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output
        .kv("items", &summary.item_count.to_string());
    ctx.output.kv("subtotal", &format_price(summary.subtotal));
    ctx.output.kv("shipping", &format_price(summary.shipping));
    ctx.output.kv("total", &format_price(summary.grand_total));

    if let Some(hint) = free_shipping_hint(&cart.config().shipping, summary.subtotal) {
        ctx.output.info(&hint);
    }

    Ok(())
}

/// Shipping is waived strictly above the threshold.
fn free_shipping_hint(policy: &ShippingPolicy, subtotal: f64) -> Option<String> {
    let remaining = policy.remaining_for_free_shipping(subtotal)?;
    Some(format!(
        "Free shipping on orders over {}; spend more than {} extra.",
        format_price(policy.free_over),
        format_price(remaining)
    ))
}

fn add(cart: &mut CartStore<FileStorage>, args: AddArgs, ctx: &Context) -> Result<()> {
    let mut product = ProductDescriptor {
        id: ProductId::new(args.id),
        name: args.name,
        price: Value::String(args.price),
        current_price: Value::Null,
        image: args.image,
        category_name: args.category,
        selected_variant: None,
    };

    if let Some(variant_id) = args.variant_id {
        let mut variant = SelectedVariant::new(variant_id, args.variant_name.unwrap_or_default());
        if let Some(price) = args.variant_price {
            variant.final_price = Value::String(price);
        }
        product.selected_variant = Some(variant);
    }

    add_products(cart, &[product], args.quantity, ctx)?;
    show(cart, ctx)
}

fn add_json(
    cart: &mut CartStore<FileStorage>,
    file: &str,
    quantity: u32,
    ctx: &Context,
) -> Result<()> {
    let content = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read product JSON from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read product file: {}", file))?
    };

    let value: Value = serde_json::from_str(&content).context("Invalid product JSON")?;
    let products: Vec<ProductDescriptor> = match value {
        Value::Array(_) => serde_json::from_value::<Vec<ProductDescriptor>>(value),
        other => serde_json::from_value::<ProductDescriptor>(other).map(|p| vec![p]),
    }
    .context("JSON does not describe a product")?;

    add_products(cart, &products, quantity, ctx)?;
    show(cart, ctx)
}

fn add_products(
    cart: &mut CartStore<FileStorage>,
    products: &[ProductDescriptor],
    quantity: u32,
    ctx: &Context,
) -> Result<()> {
    if quantity == 0 {
        anyhow::bail!("Quantity must be at least 1");
    }

    for product in products {
        if let Err(e) = product.unit_price() {
            ctx.output.warn(&format!(
                "{}: {}. The line counts as free and will not be saved.",
                product.name, e
            ));
        }
        let key = cart.add(product, quantity);
        ctx.output
            .success(&format!("Added {} × {} ({})", quantity, product.name, key));
    }
    Ok(())
}

fn update(
    cart: &mut CartStore<FileStorage>,
    key: &str,
    quantity: u32,
    ctx: &Context,
) -> Result<()> {
    if quantity < 1 {
        ctx.output
            .warn("Quantity must be at least 1; use `cart remove` to drop a line.");
    } else {
        report_change(cart.update_quantity(key, quantity), key, "Updated", ctx);
    }
    show(cart, ctx)
}

fn remove(cart: &mut CartStore<FileStorage>, key: &str, ctx: &Context) -> Result<()> {
    match cart.remove(key) {
        0 => ctx.output.warn(&format!("{} is not in the cart", key)),
        1 => ctx.output.success(&format!("Removed {}", key)),
        n => ctx.output.success(&format!("Removed {} lines for {}", n, key)),
    }
    show(cart, ctx)
}

fn clear(cart: &mut CartStore<FileStorage>, yes: bool, ctx: &Context) -> Result<()> {
    if cart.is_empty() {
        ctx.output.info("Cart is already empty.");
        return show(cart, ctx);
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from the cart?", cart.item_count()))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

        if !confirmed {
            ctx.output.info("Cancelled.");
            return Ok(());
        }
    }

    cart.clear();
    ctx.output.success("Cart cleared");
    show(cart, ctx)
}

fn report_change(changed: bool, key: &str, verb: &str, ctx: &Context) {
    if changed {
        ctx.output.success(&format!("{} {}", verb, key));
    } else {
        ctx.output.warn(&format!("{} is not in the cart", key));
    }
}
