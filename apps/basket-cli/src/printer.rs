//! # Summary Rendering
//!
//! Turns `BasketSummary` snapshots into terminal tables or JSON.
//!
//! ```text
//! Basket #2 Summary
//! +--------------+--------------+--------+-----+---------+
//! | Product Code | Product Name |  Price | Qty |   Total |
//! +==============+==============+========+=====+=========+
//! | R01          | Red Widget   | $32.95 |   2 |  $65.90 |
//! |--------------+--------------+--------+-----+---------|
//! | Subtotal     |              |        |     |  $65.90 |
//! |--------------+--------------+--------+-----+---------|
//! | Discounts    |              |        |     | -$16.48 |
//! |    ...       |              |        |     |         |
//! +--------------+--------------+--------+-----+---------+
//!   * Buy one R01, get the second half price (-$16.48)
//! ```
//!
//! Figures are formatted to cents here; only `total` was truncated upstream.

use anyhow::Result;
use basket_core::{BasketFactory, BasketSummary, Money};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{CellAlignment, Table};
use serde_json::json;

const HEADINGS: [&str; 5] = ["Product Code", "Product Name", "Price", "Qty", "Total"];

/// Columns holding figures, right-aligned.
const FIGURE_COLUMNS: [usize; 3] = [2, 3, 4];

fn new_table(headings: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(headings.to_vec());
    table
}

fn align_right(table: &mut Table, columns: &[usize]) {
    for &index in columns {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Renders one basket as a boxed table.
pub fn render_table(summary: &BasketSummary, number: usize) -> String {
    let mut table = new_table(&HEADINGS);

    for row in &summary.rows {
        table.add_row(vec![
            row.code.clone(),
            row.name.clone(),
            row.unit_price.to_string(),
            row.quantity.to_string(),
            row.line_total.to_string(),
        ]);
    }

    for (label, amount) in [
        ("Subtotal", summary.subtotal),
        ("Discounts", Money::zero() - summary.discounts),
        ("Delivery", summary.delivery),
        ("Total", summary.total),
    ] {
        table.add_row(vec![
            label.to_string(),
            String::new(),
            String::new(),
            String::new(),
            amount.to_string(),
        ]);
    }

    align_right(&mut table, &FIGURE_COLUMNS);

    let mut out = format!("Basket #{} Summary\n{}", number, table);
    for offer in &summary.offers {
        out.push_str(&format!("\n  * {} (-{})", offer.description, offer.discount));
    }
    out
}

/// Renders all baskets as one pretty-printed JSON array.
pub fn render_json(summaries: &[BasketSummary]) -> Result<String> {
    let baskets: Vec<_> = summaries
        .iter()
        .enumerate()
        .map(|(index, summary)| json!({ "number": index + 1, "summary": summary }))
        .collect();
    Ok(serde_json::to_string_pretty(&baskets)?)
}

/// Renders the catalogue and active offers as a table.
pub fn render_catalogue(factory: &BasketFactory) -> String {
    let mut table = new_table(&["Product Code", "Product Name", "Price"]);
    for product in factory.catalogue().products() {
        table.add_row(vec![
            product.code().to_string(),
            product.name().to_string(),
            product.price().to_string(),
        ]);
    }
    align_right(&mut table, &[2]);

    let mut out = format!("Catalogue\n{}", table);
    if !factory.offers().is_empty() {
        out.push_str("\nOffers");
        for offer in factory.offers() {
            out.push_str(&format!("\n  * {}", offer.description()));
        }
    }
    out
}

/// Renders the catalogue and active offers as pretty-printed JSON.
pub fn render_catalogue_json(factory: &BasketFactory) -> Result<String> {
    let products: Vec<_> = factory.catalogue().products().collect();
    let offers: Vec<String> = factory
        .offers()
        .iter()
        .map(|offer| offer.description())
        .collect();
    Ok(serde_json::to_string_pretty(
        &json!({ "products": products, "offers": offers }),
    )?)
}

// =============================================================================
// Unit Tests
// =============================================================================
