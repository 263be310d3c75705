//! Browse the catalog.

use anyhow::{Context as _, Result};
use grocer_commerce::catalog::Product;
use grocer_commerce::storefront::{BrowseItem, BrowseState};
use serde::Serialize;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::quantity_badge;

const WIDTHS: [usize; 5] = [6, 28, 22, 18, 4];

#[derive(Serialize)]
struct ProductRow<'a> {
    #[serde(flatten)]
    product: &'a Product,
    in_cart: i64,
}

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let mut state = BrowseState::new(args.category.as_str(), args.search.as_str());
    if args.featured {
        state = state.home();
    }

    let spinner = ctx.output.spinner("Loading products...");
    let view = ctx.shop().load().await;
    spinner.finish_and_clear();
    let view = view.context("Failed to load products")?;

    let items = view.browse(&state, &mut rand::thread_rng());

    if ctx.output.is_json() {
        let rows: Vec<ProductRow<'_>> = items
            .iter()
            .map(|item| ProductRow {
                product: item.product,
                in_cart: item.quantity,
            })
            .collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    let title = if args.featured {
        "Featured Products"
    } else {
        state.category.heading()
    };
    ctx.output.header(title);

    if items.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "CART"], &WIDTHS);
    for item in &items {
        print_item(item, ctx);
    }

    Ok(())
}

/// Price as decoded from the catalog, with the selling unit when known.
fn price_label(product: &Product) -> String {
    if product.unit.is_empty() {
        product.price.display()
    } else {
        format!("{} / {}", product.price.display(), product.unit)
    }
}

fn print_item(item: &BrowseItem<'_>, ctx: &Context) {
    let product = item.product;
    let price = price_label(product);
    ctx.output.table_row(
        &[
            product.id.as_str(),
            &product.name,
            &product.category,
            &price,
            &quantity_badge(item.quantity),
        ],
        &WIDTHS,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_label_uses_catalog_currency() {
        let milk: Product =
            serde_json::from_str(r#"{"id": 1, "name": "Milk", "price": 60, "unit": "litre"}"#)
                .unwrap();
        assert_eq!(price_label(&milk), "\u{20b9}60 / litre");

        let candy: Product =
            serde_json::from_str(r#"{"id": 2, "name": "Candy", "price": 12.5}"#).unwrap();
        assert_eq!(price_label(&candy), "\u{20b9}12.50");
    }
}
