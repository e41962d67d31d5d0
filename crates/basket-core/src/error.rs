//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basket-core errors (this file)                                        │
//! │  ├── CoreError        - Pricing domain errors                          │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── MoneyParseError  - Malformed decimal amounts                      │
//! │                                                                         │
//! │  basket-cli errors                                                     │
//! │  └── anyhow::Error    - What the user sees on stderr                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow::Error → exit code 1       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product code, field, etc.)
//! 3. Errors are enum variants, never String
//! 4. Misconfiguration is reported at construction, never at `total()`

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product code does not resolve in the bound catalogue.
    ///
    /// ## When This Occurs
    /// - `Basket::add` is called with a code the catalogue never saw
    /// - The code is empty
    ///
    /// ## User Workflow
    /// ```text
    /// basket.add("INVALID")
    ///      │
    ///      ▼
    /// catalogue.find("INVALID") → None
    ///      │
    ///      ▼
    /// InvalidProduct("INVALID")   (basket items untouched)
    /// ```
    #[error("Invalid product code: {0}")]
    InvalidProduct(String),

    /// A delivery rule, offer or pricing config violates its contract.
    ///
    /// ## When This Occurs
    /// - Tier table without a final catch-all tier
    /// - Tier bounds not strictly ascending
    /// - Offer configured with an empty product code
    /// - Offer targeting a code missing from the catalogue
    #[error("Misconfigured pricing: {0}")]
    Misconfigured(String),

    /// Pricing configuration could not be parsed.
    #[error("Invalid pricing configuration: {0}")]
    Config(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before pricing logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Monetary amount is negative or above the accepted ceiling.
    #[error("{field} must be between $0.00 and {max}")]
    AmountOutOfRange { field: String, max: Money },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., product code with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Money Parse Error
// =============================================================================

/// Errors produced when parsing a decimal string into `Money`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a decimal amount")]
    NotANumber(String),

    #[error("'{0}' has more than 4 decimal places")]
    TooPrecise(String),

    #[error("'{0}' is out of range")]
    Overflow(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
