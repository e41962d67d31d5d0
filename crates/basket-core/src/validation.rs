//! # Validation Module
//!
//! Input validation for catalogue entries and offer parameters.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Pricing config (JSON)                                        │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product code / name / price rules                                 │
//! │  └── Offer parameter ranges                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Constructors (Product::new, TieredDelivery::new, offers)     │
//! │  └── Fail fast with CoreError before any basket exists                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::{Money, UNITS_PER_CENT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product code.
pub const MAX_CODE_LEN: usize = 50;

/// Longest accepted product name.
pub const MAX_NAME_LEN: usize = 200;

/// Highest accepted catalogue price or delivery fee ($1,000,000.00).
///
/// Keeps basket sums far inside `i64` for any basket that fits in memory.
pub const MAX_PRICE: Money = Money::from_cents(100_000_000);

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use basket_core::validation::validate_code;
///
/// assert!(validate_code("R01").is_ok());
/// assert!(validate_code("").is_err());
/// assert!(validate_code("R 01").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product display name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalogue price.
///
/// ## Rules
/// - Must be non-negative (free items are allowed)
/// - At most `MAX_PRICE`
/// - Whole cents only, so halving a price stays exact
///
/// ## Example
/// ```rust
/// use basket_core::money::Money;
/// use basket_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(3295)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// assert!(validate_price(Money::from_units(1)).is_err()); // $0.0001
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    validate_amount("price", price)
}

/// Validates a delivery fee. Same rules as `validate_price`.
pub fn validate_fee(fee: Money) -> ValidationResult<()> {
    validate_amount("delivery fee", fee)
}

fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() || amount > MAX_PRICE {
        return Err(ValidationError::AmountOutOfRange {
            field: field.to_string(),
            max: MAX_PRICE,
        });
    }

    if amount.units() % UNITS_PER_CENT != 0 {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number of cents".to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage expressed in basis points.
///
/// ## Rules
/// - Between 1 and 10000 (0.01% to 100%)
pub fn validate_percentage_bps(bps: u32) -> ValidationResult<()> {
    if bps == 0 || bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: 1,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates the paid quantity of a multi-buy offer ("buy N").
pub fn validate_bundle_size(n: u32) -> ValidationResult<()> {
    if n == 0 {
        return Err(ValidationError::MustBePositive {
            field: "bundle size".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
