//! # Delivery Rules
//!
//! Strategies mapping a post-discount amount to a delivery fee.
//!
//! ## Reference Tier Table
//! ```text
//! ┌──────────────────────────┬──────────┐
//! │  amount (inclusive)      │   fee    │
//! ├──────────────────────────┼──────────┤
//! │  ≤ 49.99                 │   4.95   │
//! │  ≤ 89.99                 │   2.95   │
//! │  unbounded (catch-all)   │   0.00   │
//! └──────────────────────────┴──────────┘
//!   50.00 → 2.95   (boundaries belong to the lower tier)
//! ```
//!
//! The basket only ever sees `dyn DeliveryRule`; new policies are new
//! implementers, never a change to `Basket`.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_fee;

/// A delivery pricing policy.
pub trait DeliveryRule: Debug + Send + Sync {
    /// Returns the delivery fee for `amount` (subtotal minus discounts).
    fn calculate(&self, amount: Money) -> Money;
}

// =============================================================================
// Tiered Delivery
// =============================================================================

/// One row of a tier table.
///
/// `up_to: None` marks the unbounded catch-all tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub up_to: Option<Money>,
    pub fee: Money,
}

impl Tier {
    /// A tier covering amounts up to and including `up_to`.
    pub const fn up_to(up_to: Money, fee: Money) -> Self {
        Tier {
            up_to: Some(up_to),
            fee,
        }
    }

    /// The final catch-all tier.
    pub const fn unbounded(fee: Money) -> Self {
        Tier { up_to: None, fee }
    }

    fn covers(&self, amount: Money) -> bool {
        match self.up_to {
            Some(bound) => amount <= bound,
            None => true,
        }
    }
}

/// Fee looked up from an ordered tier table.
///
/// ## Invariants (checked by `new`)
/// - at least one tier
/// - bounded tiers strictly ascending
/// - only the last tier is unbounded, so lookup always succeeds
/// - every fee passes `validate_fee`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredDelivery {
    tiers: Vec<Tier>,
}

impl TieredDelivery {
    /// Builds a validated tier table.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::delivery::{DeliveryRule, Tier, TieredDelivery};
    /// use basket_core::Money;
    ///
    /// let rule = TieredDelivery::new(vec![
    ///     Tier::up_to(Money::from_cents(1999), Money::from_cents(300)),
    ///     Tier::unbounded(Money::zero()),
    /// ])
    /// .unwrap();
    /// assert_eq!(rule.calculate(Money::from_cents(1999)), Money::from_cents(300));
    ///
    /// // No catch-all tier: rejected up front
    /// assert!(TieredDelivery::new(vec![
    ///     Tier::up_to(Money::from_cents(1999), Money::from_cents(300)),
    /// ])
    /// .is_err());
    /// ```
    pub fn new(tiers: Vec<Tier>) -> CoreResult<Self> {
        let Some((last, bounded)) = tiers.split_last() else {
            return Err(CoreError::Misconfigured(
                "delivery tier table is empty".to_string(),
            ));
        };

        if last.up_to.is_some() {
            return Err(CoreError::Misconfigured(
                "delivery tier table has no unbounded catch-all tier".to_string(),
            ));
        }

        let mut previous: Option<Money> = None;
        for tier in bounded {
            let Some(bound) = tier.up_to else {
                return Err(CoreError::Misconfigured(
                    "only the last delivery tier may be unbounded".to_string(),
                ));
            };
            if previous.is_some_and(|p| bound <= p) {
                return Err(CoreError::Misconfigured(format!(
                    "delivery tier bounds must be strictly ascending (found {} after {})",
                    bound,
                    previous.unwrap_or_default()
                )));
            }
            previous = Some(bound);
        }

        for tier in &tiers {
            checked_fee(tier.fee)?;
        }

        Ok(TieredDelivery { tiers })
    }

    /// The reference table: 4.95 up to 49.99, 2.95 up to 89.99, free above.
    pub fn standard() -> Self {
        TieredDelivery {
            tiers: vec![
                Tier::up_to(Money::from_cents(4999), Money::from_cents(495)),
                Tier::up_to(Money::from_cents(8999), Money::from_cents(295)),
                Tier::unbounded(Money::zero()),
            ],
        }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }
}

fn checked_fee(fee: Money) -> CoreResult<Money> {
    validate_fee(fee).map_err(|err| CoreError::Misconfigured(err.to_string()))?;
    Ok(fee)
}

impl DeliveryRule for TieredDelivery {
    fn calculate(&self, amount: Money) -> Money {
        // `new` guarantees a catch-all tier, the fallback is unreachable
        let fee = self
            .tiers
            .iter()
            .find(|tier| tier.covers(amount))
            .map_or(Money::zero(), |tier| tier.fee);
        trace!(%amount, %fee, "delivery tier selected");
        fee
    }
}

// =============================================================================
// Flat Rate Delivery
// =============================================================================

/// The same fee regardless of basket value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRateDelivery {
    fee: Money,
}

impl FlatRateDelivery {
    pub fn new(fee: Money) -> CoreResult<Self> {
        checked_fee(fee)?;
        Ok(FlatRateDelivery { fee })
    }
}

impl DeliveryRule for FlatRateDelivery {
    fn calculate(&self, _amount: Money) -> Money {
        self.fee
    }
}

// =============================================================================
// Free Over Threshold
// =============================================================================

/// Charges `fee` up to and including `threshold`, free strictly above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeOverDelivery {
    threshold: Money,
    fee: Money,
}

impl FreeOverDelivery {
    pub fn new(threshold: Money, fee: Money) -> CoreResult<Self> {
        checked_fee(fee)?;
        Ok(FreeOverDelivery { threshold, fee })
    }
}

impl DeliveryRule for FreeOverDelivery {
    fn calculate(&self, amount: Money) -> Money {
        if amount <= self.threshold {
            self.fee
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
