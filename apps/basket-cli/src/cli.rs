//! # Command-Line Arguments
//!
//! ```text
//! basket [OPTIONS] [BASKET]...
//!
//!   BASKET                comma-separated product codes, e.g. B01,G01
//!                         (none given: the four documented example baskets)
//!   --pricing <FILE>      JSON pricing config   [env: BASKET_PRICING_FILE]
//!   --format <FORMAT>     table | json          [default: table]
//!   --list                print catalogue and offers instead of pricing
//!   --log-level <FILTER>  tracing filter        [env: BASKET_LOG]
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Baskets priced when none are given on the command line.
pub const EXAMPLE_BASKETS: [&[&str]; 4] = [
    &["B01", "G01"],
    &["R01", "R01"],
    &["R01", "G01"],
    &["B01", "B01", "R01", "R01", "R01"],
];

/// Price shopping baskets against a catalogue, offers and delivery rules.
#[derive(Parser, Debug)]
#[command(name = "basket", version, long_about = None)]
pub struct Cli {
    /// Baskets to price, each a comma-separated list of product codes.
    #[arg(value_name = "BASKET", value_parser = parse_basket)]
    pub baskets: Vec<BasketSpec>,

    /// JSON pricing configuration. Defaults to the embedded widget shop.
    #[arg(long, value_name = "FILE", env = "BASKET_PRICING_FILE")]
    pub pricing: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// List the catalogue and active offers, then exit.
    #[arg(long, conflicts_with = "baskets")]
    pub list: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, value_name = "FILTER", env = "BASKET_LOG", default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Product codes of one basket, in the order they are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketSpec(pub Vec<String>);

impl BasketSpec {
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Cli {
    /// Baskets from the command line, or the documented examples.
    pub fn baskets_or_examples(&self) -> Vec<BasketSpec> {
        if !self.baskets.is_empty() {
            return self.baskets.clone();
        }

        EXAMPLE_BASKETS
            .iter()
            .map(|codes| BasketSpec(codes.iter().map(|c| c.to_string()).collect()))
            .collect()
    }
}

/// Parses `"B01, G01"` into codes. An empty argument is an empty basket.
fn parse_basket(arg: &str) -> Result<BasketSpec, String> {
    if arg.trim().is_empty() {
        return Ok(BasketSpec(Vec::new()));
    }

    arg.split(',')
        .map(|code| {
            let code = code.trim();
            if code.is_empty() {
                Err(format!("empty product code in '{}'", arg))
            } else {
                Ok(code.to_string())
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(BasketSpec)
}

// =============================================================================
// Unit Tests
// =============================================================================
