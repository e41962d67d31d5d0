//! # Basket Summary
//!
//! Read-only snapshot of a basket for presentation layers.
//!
//! ```text
//!  Product Code │ Product Name │ Price  │ Qty │ Total
//!  ─────────────┼──────────────┼────────┼─────┼────────
//!  R01          │ Red Widget   │ $32.95 │  2  │ $65.90     one row per code,
//!  B01          │ Blue Widget  │  $7.95 │  1  │  $7.95     first-seen order
//! ```
//!
//! Offers that gave a non-zero discount are listed by description.
//!
//! Only `total` is truncated. Renderers format the other figures to two
//! decimals themselves.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::basket::Basket;
use crate::money::Money;

/// One display row: all units of a single product code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub code: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

/// One offer that reduced the basket, e.g. `"10% off B01"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedOffer {
    pub description: String,
    pub discount: Money,
}

/// Computed figures of a basket at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasketSummary {
    pub basket_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub rows: Vec<SummaryRow>,
    pub offers: Vec<AppliedOffer>,
    pub subtotal: Money,
    pub discounts: Money,
    pub delivery: Money,
    pub total: Money,
}

impl BasketSummary {
    /// Total number of units across all rows.
    pub fn item_count(&self) -> u32 {
        self.rows.iter().map(|row| row.quantity).sum()
    }
}

impl From<&Basket> for BasketSummary {
    fn from(basket: &Basket) -> Self {
        let mut rows: Vec<SummaryRow> = Vec::new();

        for item in basket.items() {
            match rows.iter_mut().find(|row| row.code == item.code()) {
                Some(row) => {
                    row.quantity += 1;
                    row.line_total += item.price();
                }
                None => rows.push(SummaryRow {
                    code: item.code().to_string(),
                    name: item.name().to_string(),
                    unit_price: item.price(),
                    quantity: 1,
                    line_total: item.price(),
                }),
            }
        }

        let offers = basket
            .offer_discounts()
            .filter(|(_, discount)| !discount.is_zero())
            .map(|(offer, discount)| AppliedOffer {
                description: offer.description(),
                discount,
            })
            .collect();

        BasketSummary {
            basket_id: basket.id(),
            created_at: basket.created_at(),
            rows,
            offers,
            subtotal: basket.subtotal(),
            discounts: basket.discounts(),
            delivery: basket.delivery(),
            total: basket.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
