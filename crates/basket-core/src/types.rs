//! # Domain Types
//!
//! The catalogue entry type and the `Coded` abstraction offers filter on.
//!
//! ```text
//! ┌─────────────────┐
//! │    Product      │
//! │  ─────────────  │
//! │  code  "R01"    │  unique within a catalogue
//! │  name           │  display only
//! │  price  Money   │  non-negative
//! └─────────────────┘
//! ```

use serde::Serialize;

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{validate_code, validate_price, validate_product_name};

// =============================================================================
// Coded
// =============================================================================

/// Anything identified by a product code.
///
/// Lets filtering helpers work over catalogue products and over any other
/// line-item type a caller might hand to an offer.
pub trait Coded {
    fn code(&self) -> &str;
}

impl<T: Coded + ?Sized> Coded for &T {
    fn code(&self) -> &str {
        (**self).code()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalogue entry.
///
/// Immutable once built: fields are private and there are no setters.
/// Baskets keep their own copies, frozen at the moment of `add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    code: String,
    name: String,
    price: Money,
}

impl Product {
    /// Creates a validated product.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Money, Product};
    ///
    /// let red = Product::new("R01", "Red Widget", Money::from_cents(3295)).unwrap();
    /// assert_eq!(red.code(), "R01");
    ///
    /// assert!(Product::new("", "Nameless", Money::zero()).is_err());
    /// ```
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Money) -> CoreResult<Self> {
        let code = code.into();
        let name = name.into();

        validate_code(&code)?;
        validate_product_name(&name)?;
        validate_price(price)?;

        Ok(Product { code, name, price })
    }

    /// Product code, e.g. `"R01"`.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }
}

impl Coded for Product {
    fn code(&self) -> &str {
        &self.code
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    #[test]
    fn test_product_new() {
        let product = Product::new("R01", "Red Widget", Money::from_cents(3295)).unwrap();

        assert_eq!(product.code(), "R01");
        assert_eq!(product.name(), "Red Widget");
        assert_eq!(product.price(), Money::from_cents(3295));
    }

    #[test]
    fn test_product_rejects_invalid_fields() {
        let err = Product::new("", "Red Widget", Money::from_cents(3295)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { .. })
        ));

        assert!(Product::new("R01", " ", Money::from_cents(3295)).is_err());
        assert!(Product::new("R01", "Red Widget", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_coded_through_reference() {
        let product = Product::new("G01", "Green Widget", Money::from_cents(2495)).unwrap();
        let by_ref = &product;
        assert_eq!(Coded::code(&by_ref), "G01");
    }
}
