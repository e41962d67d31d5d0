//! # Offers
//!
//! Pluggable discount strategies evaluated over the whole basket.
//!
//! ## Evaluation
//! ```text
//!             items (full list, insertion order)
//!                 │
//!     ┌───────────┼───────────────┐
//!     ▼           ▼               ▼
//!  Offer #1    Offer #2   ...  Offer #N      each filters for itself
//!     │           │               │
//!     └───────────┴──────┬────────┘
//!                        ▼
//!                  Σ discounts                additive, no precedence
//! ```
//!
//! Offers never mutate the items and hold no state beyond their
//! construction parameters.

use std::fmt::Debug;

use tracing::trace;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Coded, Product};
use crate::validation::{validate_bundle_size, validate_code, validate_percentage_bps};

/// A discount strategy.
pub trait Offer: Debug + Send + Sync {
    /// Returns the amount to subtract for the given basket contents.
    fn apply(&self, items: &[Product]) -> Money;

    /// Human-readable label, e.g. `"10% off B01"`.
    fn description(&self) -> String;
}

/// Selects the items carrying `code`, preserving order.
///
/// ## Example
/// ```rust
/// use basket_core::offers::items_for;
/// use basket_core::{Money, Product};
///
/// let red = Product::new("R01", "Red Widget", Money::from_cents(3295)).unwrap();
/// let blue = Product::new("B01", "Blue Widget", Money::from_cents(795)).unwrap();
/// let items = vec![red.clone(), blue, red];
///
/// assert_eq!(items_for(&items, "R01").count(), 2);
/// ```
pub fn items_for<'a, T: Coded>(items: &'a [T], code: &'a str) -> impl Iterator<Item = &'a T> + 'a {
    items.iter().filter(move |item| item.code() == code)
}

/// `1250` -> `"12.5%"`, `1000` -> `"10%"`.
fn percent_label(bps: u32) -> String {
    let decimal = format!("{}.{:02}", bps / 100, bps % 100);
    format!("{}%", decimal.trim_end_matches('0').trim_end_matches('.'))
}

fn checked_code(code: String) -> CoreResult<String> {
    validate_code(&code)
        .map_err(|err| CoreError::Misconfigured(format!("offer product code: {}", err)))?;
    Ok(code)
}

// =============================================================================
// Buy One, Get Second Half Price
// =============================================================================

/// Every second unit of `code` is half price.
///
/// Discount = `floor(n / 2) * (unit_price / 2)` for `n` matching items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyOneGetSecondHalfPrice {
    code: String,
}

impl BuyOneGetSecondHalfPrice {
    /// ## Example
    /// ```rust
    /// use basket_core::offers::BuyOneGetSecondHalfPrice;
    ///
    /// assert!(BuyOneGetSecondHalfPrice::new("R01").is_ok());
    /// assert!(BuyOneGetSecondHalfPrice::new("").is_err());
    /// ```
    pub fn new(code: impl Into<String>) -> CoreResult<Self> {
        Ok(BuyOneGetSecondHalfPrice {
            code: checked_code(code.into())?,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Offer for BuyOneGetSecondHalfPrice {
    fn apply(&self, items: &[Product]) -> Money {
        let mut matched = items_for(items, &self.code);
        let Some(first) = matched.next() else {
            return Money::zero();
        };
        let count = 1 + matched.count() as i64;

        // Same code means same catalogue price, any match gives the unit price
        let discount = first.price().half() * (count / 2);
        trace!(offer = %self.description(), count, %discount, "offer applied");
        discount
    }

    fn description(&self) -> String {
        format!("Buy one {}, get the second half price", self.code)
    }
}

// =============================================================================
// Percentage Off
// =============================================================================

/// A percentage off every unit of `code`, in basis points (1000 = 10%).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentageOff {
    code: String,
    bps: u32,
}

impl PercentageOff {
    pub fn new(code: impl Into<String>, bps: u32) -> CoreResult<Self> {
        let code = checked_code(code.into())?;
        validate_percentage_bps(bps)
            .map_err(|err| CoreError::Misconfigured(format!("percentage offer: {}", err)))?;
        Ok(PercentageOff { code, bps })
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Offer for PercentageOff {
    fn apply(&self, items: &[Product]) -> Money {
        let matched: Money = items_for(items, &self.code).map(|item| item.price()).sum();
        let discount = matched.percentage(self.bps);
        trace!(offer = %self.description(), %matched, %discount, "offer applied");
        discount
    }

    fn description(&self) -> String {
        format!("{} off {}", percent_label(self.bps), self.code)
    }
}

// =============================================================================
// Buy N, Get One Free
// =============================================================================

/// For every `n` paid units of `code`, the next one is free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyNGetOneFree {
    code: String,
    n: u32,
}

impl BuyNGetOneFree {
    pub fn new(code: impl Into<String>, n: u32) -> CoreResult<Self> {
        let code = checked_code(code.into())?;
        validate_bundle_size(n)
            .map_err(|err| CoreError::Misconfigured(format!("multi-buy offer: {}", err)))?;
        Ok(BuyNGetOneFree { code, n })
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Offer for BuyNGetOneFree {
    fn apply(&self, items: &[Product]) -> Money {
        let mut matched = items_for(items, &self.code);
        let Some(first) = matched.next() else {
            return Money::zero();
        };
        let count = 1 + matched.count() as i64;

        let free = count / (i64::from(self.n) + 1);
        let discount = first.price() * free;
        trace!(offer = %self.description(), count, free, %discount, "offer applied");
        discount
    }

    fn description(&self) -> String {
        format!("Buy {} {}, get one free", self.n, self.code)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn red() -> Product {
        Product::new("R01", "Red Widget", Money::from_cents(3295)).unwrap()
    }

    fn blue() -> Product {
        Product::new("B01", "Blue Widget", Money::from_cents(795)).unwrap()
    }

    fn reds(n: usize) -> Vec<Product> {
        std::iter::repeat_with(red).take(n).collect()
    }

    #[test]
    fn test_items_for_filters_and_keeps_order() {
        let items = vec![red(), blue(), red(), blue()];
        let blues: Vec<&Product> = items_for(&items, "B01").collect();
        assert_eq!(blues.len(), 2);
        assert!(blues.iter().all(|p| p.code() == "B01"));
        assert_eq!(items_for(&items, "G01").count(), 0);
    }

    #[test]
    fn test_items_for_works_on_any_coded_type() {
        #[derive(Debug)]
        struct Line(&'static str);
        impl Coded for Line {
            fn code(&self) -> &str {
                self.0
            }
        }

        let lines = [Line("A"), Line("B"), Line("A")];
        assert_eq!(items_for(&lines, "A").count(), 2);
    }

    #[test]
    fn test_half_price_law() {
        let offer = BuyOneGetSecondHalfPrice::new("R01").unwrap();
        let half: Money = "16.475".parse().unwrap();

        assert_eq!(offer.apply(&reds(0)), Money::zero());
        assert_eq!(offer.apply(&reds(1)), Money::zero());
        assert_eq!(offer.apply(&reds(2)), half);
        assert_eq!(offer.apply(&reds(3)), half);
        assert_eq!(offer.apply(&reds(4)), Money::from_cents(3295));
    }

    #[test]
    fn test_half_price_ignores_other_codes() {
        let offer = BuyOneGetSecondHalfPrice::new("R01").unwrap();
        let items = vec![blue(), red(), blue(), blue()];
        assert_eq!(offer.apply(&items), Money::zero());
    }

    #[test]
    fn test_offer_does_not_mutate_items() {
        let offer = BuyOneGetSecondHalfPrice::new("R01").unwrap();
        let items = vec![red(), blue(), red()];
        let before = items.clone();
        offer.apply(&items);
        assert_eq!(items, before);
    }

    #[test]
    fn test_empty_code_is_misconfiguration() {
        assert!(matches!(
            BuyOneGetSecondHalfPrice::new(""),
            Err(CoreError::Misconfigured(_))
        ));
        assert!(matches!(
            PercentageOff::new("", 1000),
            Err(CoreError::Misconfigured(_))
        ));
        assert!(matches!(
            BuyNGetOneFree::new("", 2),
            Err(CoreError::Misconfigured(_))
        ));
    }

    #[test]
    fn test_percentage_off() {
        let offer = PercentageOff::new("B01", 1000).unwrap();
        let items = vec![blue(), red(), blue()];
        // 10% of 15.90
        assert_eq!(offer.apply(&items), Money::from_cents(159));
        assert!(PercentageOff::new("B01", 0).is_err());
        assert!(PercentageOff::new("B01", 10_001).is_err());
    }

    #[test]
    fn test_buy_two_get_one_free() {
        let offer = BuyNGetOneFree::new("R01", 2).unwrap();
        assert_eq!(offer.apply(&reds(2)), Money::zero());
        assert_eq!(offer.apply(&reds(3)), Money::from_cents(3295));
        assert_eq!(offer.apply(&reds(5)), Money::from_cents(3295));
        assert_eq!(offer.apply(&reds(6)), Money::from_cents(6590));
        assert!(BuyNGetOneFree::new("R01", 0).is_err());
    }

    #[test]
    fn test_descriptions() {
        let offers: Vec<Box<dyn Offer>> = vec![
            Box::new(BuyOneGetSecondHalfPrice::new("R01").unwrap()),
            Box::new(PercentageOff::new("B01", 1000).unwrap()),
            Box::new(PercentageOff::new("G01", 1250).unwrap()),
            Box::new(BuyNGetOneFree::new("R01", 2).unwrap()),
        ];
        let labels: Vec<String> = offers.iter().map(|o| o.description()).collect();
        assert_eq!(
            labels,
            vec![
                "Buy one R01, get the second half price",
                "10% off B01",
                "12.5% off G01",
                "Buy 2 R01, get one free",
            ]
        );
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(10_000), "100%");
        assert_eq!(percent_label(5), "0.05%");
        assert_eq!(percent_label(250), "2.5%");
    }

    proptest! {
        #[test]
        fn half_price_matches_formula(n in 0_usize..40, cents in 0_i64..100_000, noise in 0_usize..10) {
            let product = Product::new("X01", "Thing", Money::from_cents(cents)).unwrap();
            let mut items: Vec<Product> = std::iter::repeat(product).take(n).collect();
            items.extend(std::iter::repeat_with(blue).take(noise));

            let offer = BuyOneGetSecondHalfPrice::new("X01").unwrap();
            let expected = Money::from_cents(cents).half() * (n as i64 / 2);
            prop_assert_eq!(offer.apply(&items), expected);
        }
    }
}
