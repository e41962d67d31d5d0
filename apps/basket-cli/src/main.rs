//! # Basket CLI Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr, `RUST_LOG` or `--log-level`)
//! 3. Load the pricing configuration and build a `BasketFactory`
//! 4. With `--list`, print the catalogue and offers and stop
//! 5. Price every basket, one fresh `Basket` each
//! 6. Print tables or JSON to stdout

mod cli;
mod printer;
mod settings;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use basket_core::BasketSummary;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, OutputFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over `--log-level` when both are set.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Prices every requested basket and writes the result to `out`.
fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = settings::load_pricing(cli.pricing.as_deref())?;
    let factory = config
        .build()
        .context("pricing configuration is invalid")?;

    if cli.list {
        let listing = match cli.format {
            OutputFormat::Table => printer::render_catalogue(&factory),
            OutputFormat::Json => printer::render_catalogue_json(&factory)?,
        };
        writeln!(out, "{}", listing)?;
        return Ok(());
    }

    let summaries = cli
        .baskets_or_examples()
        .iter()
        .enumerate()
        .map(|(index, spec)| -> Result<BasketSummary> {
            let mut basket = factory.create();
            for code in spec.codes() {
                basket
                    .add(code)
                    .with_context(|| format!("basket #{}", index + 1))?;
            }
            debug!(basket_id = %basket.id(), items = basket.items().len(), "basket priced");
            Ok(basket.summary())
        })
        .collect::<Result<Vec<BasketSummary>>>()?;

    info!(baskets = summaries.len(), "all baskets priced");

    match cli.format {
        OutputFormat::Table => {
            for (index, summary) in summaries.iter().enumerate() {
                writeln!(out)?;
                writeln!(out, "{}", printer::render_table(summary, index + 1))?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", printer::render_json(&summaries)?)?,
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
