//! # Pricing Settings
//!
//! Resolves which pricing configuration the CLI runs with.
//!
//! ## Sources (Priority Order)
//! 1. `--pricing <FILE>` argument
//! 2. `BASKET_PRICING_FILE` environment variable (via clap)
//! 3. The embedded widget shop (`PricingConfig::widgets()`)

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use basket_core::PricingConfig;
use tracing::info;

/// Loads the pricing configuration from `path`, or the embedded default.
pub fn load_pricing(path: Option<&Path>) -> Result<PricingConfig> {
    let Some(path) = path else {
        info!("using embedded widget pricing");
        return Ok(PricingConfig::widgets());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read pricing file {}", path.display()))?;
    let config = PricingConfig::from_json(&json)
        .with_context(|| format!("failed to parse pricing file {}", path.display()))?;

    info!(
        path = %path.display(),
        products = config.products.len(),
        offers = config.offers.len(),
        "pricing file loaded"
    );
    Ok(config)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn shipped_widgets() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("pricing/widgets.json")
    }

    #[test]
    fn test_default_is_embedded_widgets() {
        assert_eq!(load_pricing(None).unwrap(), PricingConfig::widgets());
    }

    #[test]
    fn test_shipped_file_matches_embedded_widgets() {
        let loaded = load_pricing(Some(&shipped_widgets())).unwrap();
        assert_eq!(loaded, PricingConfig::widgets());
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = load_pricing(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.json"));
    }
}
