//! # basket-core: Pure Pricing Logic for Baskets
//!
//! Computes basket totals from a product catalogue, promotional offers and a
//! delivery-fee rule. Pure functions, zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    basket-cli (binary)                          │   │
//! │  │    load pricing config ──► add codes ──► print summary          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ catalogue │  │  basket   │  │  offers   │  │ delivery  │  │   │
//! │  │   │  Product  │  │  Basket   │  │  Offer    │  │ Delivery- │  │   │
//! │  │   │  lookup   │  │  Factory  │  │  trait    │  │ Rule trait│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Fixed-point Money with floor truncation
//! - [`types`] - Product and the `Coded` abstraction
//! - [`catalogue`] - Code → Product lookup
//! - [`delivery`] - `DeliveryRule` trait and tiered/flat/free-over policies
//! - [`offers`] - `Offer` trait and discount strategies
//! - [`basket`] - Basket and BasketFactory
//! - [`summary`] - Read-only presentation snapshot
//! - [`config`] - Serializable pricing configuration
//! - [`error`] / [`validation`] - Typed errors and input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::PricingConfig;
//!
//! let factory = PricingConfig::widgets().build().unwrap();
//!
//! let mut basket = factory.create();
//! for code in ["B01", "B01", "R01", "R01", "R01"] {
//!     basket.add(code).unwrap();
//! }
//!
//! // 114.75 - 16.475 discount, free delivery, floored: $98.27
//! assert_eq!(basket.total().to_string(), "$98.27");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod catalogue;
pub mod config;
pub mod delivery;
pub mod error;
pub mod money;
pub mod offers;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::{truncate, Basket, BasketFactory};
pub use catalogue::Catalogue;
pub use config::PricingConfig;
pub use delivery::{DeliveryRule, Tier, TieredDelivery};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use offers::{BuyOneGetSecondHalfPrice, Offer};
pub use summary::{AppliedOffer, BasketSummary, SummaryRow};
pub use types::{Coded, Product};
