//! Costing engine entry point: prices a quote snapshot from a JSON file.

use std::fs;
use std::process::ExitCode;

use backoffice_core::config::Config;
use backoffice_core::observability::init_tracing;
use costing_engine::models::Quote;
use costing_engine::services::{aggregate, validate_breakdown};

fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    init_tracing("costing-engine", &config.log_level);

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: costing-engine <quote.json>");
        return ExitCode::FAILURE;
    };

    match price_quote(&path, &config) {
        Ok(breakdown) => {
            println!("{}", breakdown);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Failed to price quote");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn price_quote(path: &str, config: &Config) -> anyhow::Result<String> {
    let raw = fs::read_to_string(path)?;
    let quote: Quote = serde_json::from_str(&raw)?;

    let breakdown = aggregate(&quote, &config.surcharges);
    validate_breakdown(&breakdown)?;

    tracing::info!(
        quote_id = %quote.quote_id,
        positions = quote.positions.len(),
        gross = %breakdown.gross,
        "Quote priced"
    );

    Ok(serde_json::to_string_pretty(&breakdown)?)
}
