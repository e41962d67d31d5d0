//! # Catalogue
//!
//! Read-only registry mapping a product code to its `Product`.
//!
//! ## Lifecycle
//! ```text
//! Vec<Product> ──► Catalogue::new ──► Arc<Catalogue> ──┬──► Basket #1
//!                  (built once)       (shared, no      ├──► Basket #2
//!                                      mutation)       └──► Basket #N
//! ```
//!
//! ## Duplicate Codes
//! Construction follows map-insert semantics: when two products share a code,
//! the **last one wins**. The surviving entry keeps the listing position of
//! the first occurrence.

use std::collections::HashMap;

use tracing::debug;

use crate::types::Product;

/// Product lookup table, built once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalogue {
    /// Builds a catalogue from a list of products. Last entry wins on duplicate codes.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Catalogue, Money, Product};
    ///
    /// let catalogue = Catalogue::new(vec![
    ///     Product::new("R01", "Red Widget", Money::from_cents(3295)).unwrap(),
    ///     Product::new("R01", "Red Widget v2", Money::from_cents(3000)).unwrap(),
    /// ]);
    ///
    /// assert_eq!(catalogue.len(), 1);
    /// assert_eq!(catalogue.find("R01").unwrap().name(), "Red Widget v2");
    /// ```
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalogue = Catalogue::default();

        for product in products {
            match catalogue.index.get(product.code()) {
                Some(&slot) => {
                    debug!(code = product.code(), "duplicate product code, replacing earlier entry");
                    catalogue.products[slot] = product;
                }
                None => {
                    catalogue
                        .index
                        .insert(product.code().to_string(), catalogue.products.len());
                    catalogue.products.push(product);
                }
            }
        }

        debug!(products = catalogue.products.len(), "catalogue built");
        catalogue
    }

    /// Looks up a product by exact code.
    ///
    /// Returns `None` for unknown and empty codes; never fails.
    pub fn find(&self, code: &str) -> Option<&Product> {
        self.index.get(code).map(|&slot| &self.products[slot])
    }

    /// Checks whether a code is catalogued.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Iterates products in listing order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn widget(code: &str, name: &str, cents: i64) -> Product {
        Product::new(code, name, Money::from_cents(cents)).unwrap()
    }

    fn widgets() -> Vec<Product> {
        vec![
            widget("R01", "Red Widget", 3295),
            widget("G01", "Green Widget", 2495),
            widget("B01", "Blue Widget", 795),
        ]
    }

    #[test]
    fn test_empty_catalogue_finds_nothing() {
        let catalogue = Catalogue::new(Vec::new());
        assert!(catalogue.is_empty());
        assert!(catalogue.find("R01").is_none());
    }

    #[test]
    fn test_find_returns_exact_product() {
        let products = widgets();
        let catalogue = Catalogue::new(products.clone());

        for product in &products {
            assert_eq!(catalogue.find(product.code()), Some(product));
        }
    }

    #[test]
    fn test_find_unknown_codes() {
        let catalogue = Catalogue::new(widgets());

        assert!(catalogue.find("INVALID").is_none());
        assert!(catalogue.find("").is_none());
        assert!(catalogue.find("r01").is_none());
        assert!(catalogue.find(" R01").is_none());
    }

    #[test]
    fn test_duplicate_codes_last_wins() {
        let catalogue = Catalogue::new(vec![
            widget("R01", "Red Widget", 3295),
            widget("B01", "Blue Widget", 795),
            widget("R01", "Discount Red Widget", 2000),
        ]);

        assert_eq!(catalogue.len(), 2);
        let red = catalogue.find("R01").unwrap();
        assert_eq!(red.name(), "Discount Red Widget");
        assert_eq!(red.price(), Money::from_cents(2000));

        let codes: Vec<&str> = catalogue.products().map(|p| p.code()).collect();
        assert_eq!(codes, vec!["R01", "B01"]);
    }
}
