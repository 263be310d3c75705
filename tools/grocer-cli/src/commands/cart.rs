//! Cart commands: show, add, remove, set, drop and checkout.

use anyhow::{anyhow, bail, Context as _, Result};
use dialoguer::Confirm;
use grocer_commerce::cart::{CartLine, CartPricing};
use grocer_commerce::catalog::Product;
use grocer_commerce::storefront::StorefrontView;
use serde::Serialize;

use super::{CheckoutArgs, LineArgs, ProductArgs, SetArgs};
use crate::context::{Context, Shop};

const WIDTHS: [usize; 5] = [6, 28, 5, 12, 12];

#[derive(Serialize)]
struct CartSummary<'a> {
    lines: &'a [CartLine],
    #[serde(flatten)]
    pricing: CartPricing,
}

/// Show the cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let shop = ctx.shop();
    let cart = load_cart(&shop, ctx).await?;
    print_cart(&cart, ctx)
}

/// Add one unit of a product.
pub async fn add(args: ProductArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.shop();
    let view = load_view(&shop, ctx).await?;
    let product = find_product(&view, &args.product_id)?;

    let cart = shop
        .cart()
        .increment(product, &view.cart)
        .await
        .with_context(|| format!("Failed to add {} to cart", product.name))?;
    ctx.output.success(&format!("Added {} to cart", product.name));
    print_cart(&cart, ctx)
}

/// Remove one unit of a product.
pub async fn remove(args: ProductArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.shop();
    let view = load_view(&shop, ctx).await?;
    let product = find_product(&view, &args.product_id)?;

    let cart = shop
        .cart()
        .decrement(product, &view.cart)
        .await
        .with_context(|| format!("Failed to remove {} from cart", product.name))?;
    print_cart(&cart, ctx)
}

/// Set a line to an exact quantity.
pub async fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.shop();
    let cart = load_cart(&shop, ctx).await?;
    let line = find_line(&cart, &args.line_id)?;

    let cart = shop
        .cart()
        .set_quantity(line, args.quantity)
        .await
        .context("Failed to update cart")?;
    print_cart(&cart, ctx)
}

/// Delete a line outright.
pub async fn drop_line(args: LineArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.shop();
    let cart = load_cart(&shop, ctx).await?;
    let line = find_line(&cart, &args.line_id)?;

    let cart = shop
        .cart()
        .remove(line)
        .await
        .context("Failed to remove line")?;
    ctx.output.success(&format!("Removed {}", line.name));
    print_cart(&cart, ctx)
}

/// Place the order.
pub async fn checkout(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.shop();
    let cart = load_cart(&shop, ctx).await?;

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let pricing = CartPricing::calculate(&cart)?;
    if !args.yes && !ctx.output.is_json() {
        print_cart(&cart, ctx)?;
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", pricing.grand_total.display()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.info("Checkout cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let outcome = shop.cart().checkout(&cart).await;
    spinner.finish_and_clear();
    let outcome = outcome.context("Checkout failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&outcome);
        return Ok(());
    }

    ctx.output.success(outcome.message);
    ctx.output.kv("Items", &pricing.item_count.to_string());
    ctx.output.kv("Paid", &pricing.grand_total.display());
    if !outcome.cart.is_empty() {
        ctx.output.warn(&format!(
            "{} line(s) were added elsewhere and are still in the cart",
            outcome.cart.len()
        ));
    }
    Ok(())
}

async fn load_view(shop: &Shop, ctx: &Context) -> Result<StorefrontView> {
    let spinner = ctx.output.spinner("Loading...");
    let view = shop.load().await;
    spinner.finish_and_clear();
    view.context("Failed to load storefront")
}

async fn load_cart(shop: &Shop, ctx: &Context) -> Result<Vec<CartLine>> {
    let spinner = ctx.output.spinner("Loading cart...");
    let cart = shop.cart().load().await;
    spinner.finish_and_clear();
    cart.context("Failed to load cart")
}

fn find_product<'a>(view: &'a StorefrontView, id: &str) -> Result<&'a Product> {
    view.product(id)
        .ok_or_else(|| anyhow!("Product not found: {}", id))
}

fn find_line<'a>(cart: &'a [CartLine], id: &str) -> Result<&'a CartLine> {
    match cart.iter().find(|line| line.id.as_str() == id) {
        Some(line) => Ok(line),
        None => bail!("No cart line with id {}. Run `grocer cart` to list lines.", id),
    }
}

fn print_cart(cart: &[CartLine], ctx: &Context) -> Result<()> {
    let pricing = CartPricing::calculate(cart)?;

    if ctx.output.is_json() {
        ctx.output.json(&CartSummary {
            lines: cart,
            pricing,
        });
        return Ok(());
    }

    ctx.output.header("Your Cart");
    if pricing.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    ctx.output
        .table_row(&["LINE", "NAME", "QTY", "PRICE", "TOTAL"], &WIDTHS);
    for (line, item) in cart.iter().zip(&pricing.line_items) {
        ctx.output.table_row(
            &[
                line.id.as_str(),
                &line.name,
                &item.quantity.to_string(),
                &item.unit_price.display(),
                &item.total.display(),
            ],
            &WIDTHS,
        );
    }
    ctx.output.kv("Total", &pricing.grand_total.display());
    Ok(())
}
