//! # Basket
//!
//! A shopping session: items resolved through a catalogue, priced with the
//! bound offers and delivery rule.
//!
//! ## Total Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  items ──► subtotal() = Σ price                                        │
//! │  items ──► discounts() = Σ offer.apply(items)                          │
//! │                                                                         │
//! │  delivery() = rule.calculate(subtotal - discounts)                     │
//! │                                                                         │
//! │  total() = truncate(subtotal - discounts + delivery, 2)                │
//! │            floor, never rounds up: 54.375 → 54.37                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is cached: every figure is recomputed from the current items.
//!
//! ## Sharing
//! Catalogue, delivery rule and offers are immutable and shared via `Arc`, so
//! many baskets (one per session or thread) can use one `BasketFactory`.
//! A single basket has a single writer: `add` takes `&mut self`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalogue::Catalogue;
use crate::delivery::DeliveryRule;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::offers::Offer;
use crate::summary::BasketSummary;
use crate::types::Product;

/// Decimal places of the final total.
pub const TOTAL_DECIMALS: u32 = 2;

/// Floors `amount` to `decimals` decimal places.
///
/// ## Example
/// ```rust
/// use basket_core::basket::truncate;
/// use basket_core::Money;
///
/// let m = |s: &str| s.parse::<Money>().unwrap();
/// assert_eq!(truncate(m("54.379"), 2), m("54.37"));
/// assert_eq!(truncate(m("54.3789"), 3), m("54.378"));
/// ```
pub fn truncate(amount: Money, decimals: u32) -> Money {
    amount.truncate(decimals)
}

// =============================================================================
// Basket
// =============================================================================

/// An append-only basket bound to a catalogue, a delivery rule and offers.
///
/// ## Invariants
/// - every item was resolved through `catalogue` when it was added
/// - items keep insertion order; duplicates are separate units
/// - there is no removal
#[derive(Debug)]
pub struct Basket {
    id: Uuid,
    created_at: DateTime<Utc>,
    catalogue: Arc<Catalogue>,
    delivery_rule: Arc<dyn DeliveryRule>,
    offers: Arc<[Arc<dyn Offer>]>,
    items: Vec<Product>,
}

impl Basket {
    /// Creates an empty basket.
    pub fn new(
        catalogue: Arc<Catalogue>,
        delivery_rule: Arc<dyn DeliveryRule>,
        offers: Arc<[Arc<dyn Offer>]>,
    ) -> Self {
        Basket {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            catalogue,
            delivery_rule,
            offers,
            items: Vec::new(),
        }
    }

    /// Adds one unit of `code`.
    ///
    /// ## Behavior
    /// - Unknown code: `CoreError::InvalidProduct(code)`, items unchanged
    /// - Known code: a copy of the catalogue product is appended
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{CoreError, PricingConfig};
    ///
    /// let factory = PricingConfig::widgets().build().unwrap();
    /// let mut basket = factory.create();
    ///
    /// basket.add("R01").unwrap();
    /// let err = basket.add("INVALID").unwrap_err();
    /// assert!(matches!(err, CoreError::InvalidProduct(code) if code == "INVALID"));
    /// assert_eq!(basket.items().len(), 1);
    /// ```
    pub fn add(&mut self, code: &str) -> CoreResult<&Product> {
        let Some(product) = self.catalogue.find(code) else {
            warn!(basket_id = %self.id, code, "rejected unknown product code");
            return Err(CoreError::InvalidProduct(code.to_string()));
        };

        self.items.push(product.clone());
        debug!(
            basket_id = %self.id,
            code,
            price = %product.price(),
            items = self.items.len(),
            "product added"
        );

        // Just pushed, so the list is non-empty
        Ok(&self.items[self.items.len() - 1])
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Session id, for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the basket was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sum of item prices. Zero for an empty basket.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(Product::price).sum()
    }

    /// Each bound offer with the discount it gives the current items.
    pub fn offer_discounts(&self) -> impl Iterator<Item = (&dyn Offer, Money)> + '_ {
        self.offers
            .iter()
            .map(|offer| (offer.as_ref(), offer.apply(&self.items)))
    }

    /// Sum of every offer's discount, each offer seeing the full item list.
    pub fn discounts(&self) -> Money {
        self.offer_discounts().map(|(_, discount)| discount).sum()
    }

    /// Delivery fee for the discounted subtotal.
    pub fn delivery(&self) -> Money {
        self.delivery_rule
            .calculate(self.subtotal() - self.discounts())
    }

    /// Final amount, floored to two decimal places.
    pub fn total(&self) -> Money {
        let subtotal = self.subtotal();
        let discounts = self.discounts();
        let delivery = self.delivery_rule.calculate(subtotal - discounts);
        let total = truncate(subtotal - discounts + delivery, TOTAL_DECIMALS);

        debug!(
            basket_id = %self.id,
            %subtotal,
            %discounts,
            %delivery,
            %total,
            "basket total calculated"
        );
        total
    }

    /// Read-only snapshot for presentation.
    pub fn summary(&self) -> BasketSummary {
        BasketSummary::from(self)
    }
}

// =============================================================================
// Basket Factory
// =============================================================================

/// Binds catalogue, delivery rule and offers once; hands out fresh baskets.
#[derive(Debug, Clone)]
pub struct BasketFactory {
    catalogue: Arc<Catalogue>,
    delivery_rule: Arc<dyn DeliveryRule>,
    offers: Arc<[Arc<dyn Offer>]>,
}

impl BasketFactory {
    pub fn new(
        catalogue: Catalogue,
        delivery_rule: impl DeliveryRule + 'static,
        offers: Vec<Arc<dyn Offer>>,
    ) -> Self {
        BasketFactory {
            catalogue: Arc::new(catalogue),
            delivery_rule: Arc::new(delivery_rule),
            offers: offers.into(),
        }
    }

    /// Same as `new`, for callers that already hold shared parts.
    pub fn from_shared(
        catalogue: Arc<Catalogue>,
        delivery_rule: Arc<dyn DeliveryRule>,
        offers: Vec<Arc<dyn Offer>>,
    ) -> Self {
        BasketFactory {
            catalogue,
            delivery_rule,
            offers: offers.into(),
        }
    }

    /// A new, empty basket sharing this factory's configuration.
    pub fn create(&self) -> Basket {
        Basket::new(
            Arc::clone(&self.catalogue),
            Arc::clone(&self.delivery_rule),
            Arc::clone(&self.offers),
        )
    }

    /// The bound catalogue, e.g. for listing what can be added.
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// The bound offers, in configuration order.
    pub fn offers(&self) -> &[Arc<dyn Offer>] {
        &self.offers
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::{FlatRateDelivery, TieredDelivery};
    use crate::offers::{BuyOneGetSecondHalfPrice, PercentageOff};
    use proptest::prelude::*;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn catalogue() -> Catalogue {
        Catalogue::new(vec![
            Product::new("R01", "Red Widget", money("32.95")).unwrap(),
            Product::new("G01", "Green Widget", money("24.95")).unwrap(),
            Product::new("B01", "Blue Widget", money("7.95")).unwrap(),
        ])
    }

    fn red_offer() -> Vec<Arc<dyn Offer>> {
        vec![Arc::new(BuyOneGetSecondHalfPrice::new("R01").unwrap())]
    }

    fn basket_with(offers: Vec<Arc<dyn Offer>>) -> Basket {
        BasketFactory::new(catalogue(), TieredDelivery::standard(), offers).create()
    }

    fn filled(offers: Vec<Arc<dyn Offer>>, codes: &[&str]) -> Basket {
        let mut basket = basket_with(offers);
        for code in codes {
            basket.add(code).unwrap();
        }
        basket
    }

    #[test]
    fn test_add_returns_resolved_product() {
        let mut basket = basket_with(Vec::new());
        let product = basket.add("G01").unwrap();
        assert_eq!(product.name(), "Green Widget");
        assert_eq!(basket.items().len(), 1);
    }

    #[test]
    fn test_add_same_product_twice() {
        let basket = filled(Vec::new(), &["R01", "R01"]);
        assert_eq!(basket.items().len(), 2);
    }

    #[test]
    fn test_invalid_code_leaves_basket_unchanged() {
        let mut basket = filled(Vec::new(), &["B01"]);
        let err = basket.add("INVALID").unwrap_err();

        assert!(matches!(err, CoreError::InvalidProduct(ref code) if code == "INVALID"));
        assert_eq!(err.to_string(), "Invalid product code: INVALID");
        assert_eq!(basket.items().len(), 1);
        assert!(basket.add("").is_err());
    }

    #[test]
    fn test_empty_basket() {
        let basket = basket_with(red_offer());
        assert!(basket.is_empty());
        assert_eq!(basket.subtotal(), Money::zero());
        assert_eq!(basket.discounts(), Money::zero());
        assert_eq!(basket.delivery(), money("4.95"));
        assert_eq!(basket.total(), money("4.95"));
    }

    #[test]
    fn test_totals_without_offers() {
        assert_eq!(filled(Vec::new(), &["B01"]).total(), money("12.90"));
        assert_eq!(filled(Vec::new(), &["B01", "G01"]).total(), money("37.85"));
        assert_eq!(filled(Vec::new(), &["G01", "R01"]).total(), money("60.85"));
        assert_eq!(filled(Vec::new(), &["R01", "R01", "R01"]).total(), money("98.85"));
    }

    #[test]
    fn test_totals_with_red_offer() {
        let basket = filled(red_offer(), &["R01", "R01"]);
        assert_eq!(basket.subtotal(), money("65.90"));
        assert_eq!(basket.discounts(), money("16.475"));
        assert_eq!(basket.delivery(), money("4.95"));
        assert_eq!(basket.total(), money("54.37"));

        let basket = filled(red_offer(), &["B01", "B01", "R01", "R01", "R01"]);
        assert_eq!(basket.delivery(), Money::zero());
        assert_eq!(basket.total(), money("98.27"));
    }

    #[test]
    fn test_delivery_uses_discounted_amount() {
        // 98.85 before the offer (free delivery), 82.375 after (2.95)
        let basket = filled(red_offer(), &["R01", "R01", "R01"]);
        assert_eq!(basket.delivery(), money("2.95"));
        assert_eq!(basket.total(), money("85.32"));
    }

    #[test]
    fn test_figures_follow_later_adds() {
        let mut basket = basket_with(red_offer());
        basket.add("R01").unwrap();
        assert_eq!(basket.discounts(), Money::zero());
        basket.add("R01").unwrap();
        assert_eq!(basket.discounts(), money("16.475"));
    }

    #[test]
    fn test_offers_are_additive() {
        let offers: Vec<Arc<dyn Offer>> = vec![
            Arc::new(BuyOneGetSecondHalfPrice::new("R01").unwrap()),
            Arc::new(PercentageOff::new("B01", 5000).unwrap()),
        ];
        let basket = filled(offers, &["R01", "R01", "B01"]);
        assert_eq!(basket.discounts(), money("16.475") + money("3.975"));
    }

    #[test]
    fn test_offer_discounts_break_down_the_total() {
        let offers: Vec<Arc<dyn Offer>> = vec![
            Arc::new(BuyOneGetSecondHalfPrice::new("R01").unwrap()),
            Arc::new(PercentageOff::new("G01", 1000).unwrap()),
        ];
        let basket = filled(offers, &["R01", "R01", "B01"]);
        let breakdown: Vec<(String, Money)> = basket
            .offer_discounts()
            .map(|(offer, discount)| (offer.description(), discount))
            .collect();

        assert_eq!(
            breakdown,
            vec![
                ("Buy one R01, get the second half price".to_string(), money("16.475")),
                ("10% off G01".to_string(), Money::zero()),
            ]
        );
    }

    #[test]
    fn test_created_at_is_set_on_creation() {
        let before = Utc::now();
        let basket = basket_with(Vec::new());
        assert!(basket.created_at() >= before);
        assert!(basket.created_at() <= Utc::now());
    }

    #[test]
    fn test_factory_exposes_bound_configuration() {
        let factory = BasketFactory::new(catalogue(), TieredDelivery::standard(), red_offer());
        assert_eq!(factory.catalogue().len(), 3);
        assert!(factory.catalogue().contains("G01"));
        assert_eq!(factory.offers().len(), 1);
        assert_eq!(
            factory.offers()[0].description(),
            "Buy one R01, get the second half price"
        );
    }

    #[test]
    fn test_baskets_from_one_factory_are_independent() {
        let factory = BasketFactory::new(
            catalogue(),
            FlatRateDelivery::new(money("1")).unwrap(),
            red_offer(),
        );
        let mut first = factory.create();
        let second = factory.create();

        first.add("R01").unwrap();
        assert_eq!(first.items().len(), 1);
        assert!(second.is_empty());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_factory_is_shareable_across_threads() {
        let factory = Arc::new(BasketFactory::new(
            catalogue(),
            TieredDelivery::standard(),
            red_offer(),
        ));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let factory = Arc::clone(&factory);
                std::thread::spawn(move || {
                    let mut basket = factory.create();
                    basket.add("R01").unwrap();
                    basket.add("R01").unwrap();
                    basket.total()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), money("54.37"));
        }
    }

    #[test]
    fn test_truncate_function() {
        assert_eq!(truncate(money("54.379"), 2), money("54.37"));
        assert_eq!(truncate(money("54.371"), 2), money("54.37"));
        assert_eq!(truncate(money("54.00"), 2), money("54.00"));
        assert_eq!(truncate(money("54.3789"), 3), money("54.378"));
    }

    proptest! {
        #[test]
        fn subtotal_is_sum_of_prices(picks in proptest::collection::vec(0_usize..3, 0..30)) {
            let codes = ["R01", "G01", "B01"];
            let mut basket = basket_with(Vec::new());
            let mut expected = Money::zero();
            for pick in picks {
                expected += basket.add(codes[pick]).unwrap().price();
            }
            prop_assert_eq!(basket.subtotal(), expected);
            prop_assert!(basket.total() <= basket.subtotal() + basket.delivery());
        }
    }
}
