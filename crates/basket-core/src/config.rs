//! # Pricing Configuration
//!
//! Serializable description of a catalogue, a delivery policy and a list of
//! offers. The core only parses and validates it; reading files is the
//! binary's job.
//!
//! ## Format
//! ```json
//! {
//!   "products": [
//!     { "code": "R01", "name": "Red Widget", "price": "32.95" }
//!   ],
//!   "delivery": {
//!     "kind": "tiered",
//!     "tiers": [
//!       { "up_to": "49.99", "fee": "4.95" },
//!       { "up_to": "89.99", "fee": "2.95" },
//!       { "fee": "0" }
//!     ]
//!   },
//!   "offers": [
//!     { "kind": "buy_one_get_second_half_price", "code": "R01" }
//!   ]
//! }
//! ```
//!
//! Amounts are decimal strings. `delivery` defaults to the standard tiers,
//! `offers` to none.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::basket::BasketFactory;
use crate::catalogue::Catalogue;
use crate::delivery::{DeliveryRule, FlatRateDelivery, FreeOverDelivery, Tier, TieredDelivery};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::offers::{BuyNGetOneFree, BuyOneGetSecondHalfPrice, Offer, PercentageOff};
use crate::types::Product;

/// Complete pricing setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    pub products: Vec<ProductConfig>,

    #[serde(default)]
    pub delivery: DeliveryConfig,

    #[serde(default)]
    pub offers: Vec<OfferConfig>,
}

/// A catalogue entry as written in the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductConfig {
    pub code: String,
    pub name: String,
    pub price: Money,
}

/// Delivery policy selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeliveryConfig {
    Tiered { tiers: Vec<Tier> },
    FlatRate { fee: Money },
    FreeOver { threshold: Money, fee: Money },
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        DeliveryConfig::Tiered {
            tiers: TieredDelivery::standard().tiers().to_vec(),
        }
    }
}

impl DeliveryConfig {
    fn build(&self) -> CoreResult<Arc<dyn DeliveryRule>> {
        let rule: Arc<dyn DeliveryRule> = match self {
            DeliveryConfig::Tiered { tiers } => Arc::new(TieredDelivery::new(tiers.clone())?),
            DeliveryConfig::FlatRate { fee } => Arc::new(FlatRateDelivery::new(*fee)?),
            DeliveryConfig::FreeOver { threshold, fee } => {
                Arc::new(FreeOverDelivery::new(*threshold, *fee)?)
            }
        };
        Ok(rule)
    }
}

/// Offer selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OfferConfig {
    BuyOneGetSecondHalfPrice { code: String },
    PercentageOff { code: String, bps: u32 },
    BuyNGetOneFree { code: String, n: u32 },
}

impl OfferConfig {
    /// Product code the offer targets.
    pub fn code(&self) -> &str {
        match self {
            OfferConfig::BuyOneGetSecondHalfPrice { code }
            | OfferConfig::PercentageOff { code, .. }
            | OfferConfig::BuyNGetOneFree { code, .. } => code,
        }
    }

    fn build(&self) -> CoreResult<Arc<dyn Offer>> {
        let offer: Arc<dyn Offer> = match self {
            OfferConfig::BuyOneGetSecondHalfPrice { code } => {
                Arc::new(BuyOneGetSecondHalfPrice::new(code.as_str())?)
            }
            OfferConfig::PercentageOff { code, bps } => {
                Arc::new(PercentageOff::new(code.as_str(), *bps)?)
            }
            OfferConfig::BuyNGetOneFree { code, n } => {
                Arc::new(BuyNGetOneFree::new(code.as_str(), *n)?)
            }
        };
        Ok(offer)
    }
}

impl PricingConfig {
    /// Parses a JSON pricing configuration.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The reference widget shop: three widgets, standard delivery tiers and
    /// "buy one red widget, get the second half price".
    pub fn widgets() -> Self {
        let product = |code: &str, name: &str, cents: i64| ProductConfig {
            code: code.to_string(),
            name: name.to_string(),
            price: Money::from_cents(cents),
        };

        PricingConfig {
            products: vec![
                product("R01", "Red Widget", 3295),
                product("G01", "Green Widget", 2495),
                product("B01", "Blue Widget", 795),
            ],
            delivery: DeliveryConfig::default(),
            offers: vec![OfferConfig::BuyOneGetSecondHalfPrice {
                code: "R01".to_string(),
            }],
        }
    }

    /// Validates everything and binds it into a `BasketFactory`.
    ///
    /// ## Errors
    /// - `Validation` for a bad product code, name or price
    /// - `Misconfigured` for a bad tier table, offer parameter, or an offer
    ///   targeting a code that is not in the catalogue
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::PricingConfig;
    ///
    /// let factory = PricingConfig::widgets().build().unwrap();
    /// let mut basket = factory.create();
    /// basket.add("R01").unwrap();
    /// basket.add("R01").unwrap();
    /// assert_eq!(basket.total().to_string(), "$54.37");
    /// ```
    pub fn build(&self) -> CoreResult<BasketFactory> {
        let products = self
            .products
            .iter()
            .map(|p| Product::new(p.code.as_str(), p.name.as_str(), p.price))
            .collect::<CoreResult<Vec<_>>>()?;
        let catalogue = Catalogue::new(products);

        let delivery = self.delivery.build()?;

        let offers = self
            .offers
            .iter()
            .map(|offer| {
                let built = offer.build()?;
                if !catalogue.contains(offer.code()) {
                    return Err(CoreError::Misconfigured(format!(
                        "offer targets unknown product code '{}'",
                        offer.code()
                    )));
                }
                Ok(built)
            })
            .collect::<CoreResult<Vec<_>>>()?;

        debug!(
            products = catalogue.len(),
            offers = offers.len(),
            "pricing configuration built"
        );
        Ok(BasketFactory::from_shared(Arc::new(catalogue), delivery, offers))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
