//! Quote aggregator: folds positions and extra-service surcharges into the
//! net/tax/gross breakdown and the profit figure.

use anyhow::anyhow;
use backoffice_core::config::SurchargeSettings;
use backoffice_core::error::AppError;
use rust_decimal::Decimal;

use crate::models::{ExtraServices, Quote, QuoteBreakdown};
use crate::services::calculator::{position_totals, round_money};

/// Total of the flat extra-service fees plus the per-copy charge.
pub fn surcharge_total(extras: &ExtraServices, rates: &SurchargeSettings) -> Decimal {
    let mut total = Decimal::ZERO;
    if extras.certification {
        total += rates.certification.max(Decimal::ZERO);
    }
    if extras.apostille {
        total += rates.apostille.max(Decimal::ZERO);
    }
    if extras.express {
        total += rates.express.max(Decimal::ZERO);
    }
    if extras.classification {
        total += rates.classification.max(Decimal::ZERO);
    }
    if extras.copies > 0 {
        total += Decimal::from(extras.copies) * rates.copy_price.max(Decimal::ZERO);
    }
    total
}

/// Recompute a quote's breakdown from its full current position list.
///
/// Deterministic and side-effect free: nothing accumulates across calls, so
/// callers re-run it on every edit to a position or toggle.
pub fn aggregate(quote: &Quote, rates: &SurchargeSettings) -> QuoteBreakdown {
    let mut net = Decimal::ZERO;
    let mut partner_cost = Decimal::ZERO;
    for position in &quote.positions {
        let totals = position_totals(position);
        net += totals.customer_total;
        partner_cost += totals.partner_total;
    }
    net += surcharge_total(&quote.extras, rates);

    let tax = if quote.tax_enabled {
        round_money(net * quote.tax_rate_percent.max(Decimal::ZERO) / Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };
    let gross = net + tax;

    let profit = net - partner_cost;
    let profit_margin_percent = if net > Decimal::ZERO {
        round_money(Decimal::ONE_HUNDRED * profit / net)
    } else {
        Decimal::ZERO
    };

    QuoteBreakdown {
        net,
        tax,
        gross,
        partner_cost,
        profit,
        profit_margin_percent,
    }
}

/// Lenient numeric coercion for live form editing. Accepts a comma as the
/// decimal separator; anything unparsable becomes zero so the editing UI
/// stays renderable.
pub fn parse_amount(input: &str) -> Decimal {
    let normalized = input.trim().replace(',', ".");
    normalized.parse().unwrap_or(Decimal::ZERO)
}

/// Submission gate: a quote may be edited into any shape, but negative
/// aggregates must never be persisted.
pub fn validate_breakdown(breakdown: &QuoteBreakdown) -> Result<(), AppError> {
    if breakdown.net < Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow!(
            "The quote's net amount must not be negative"
        )));
    }
    if breakdown.gross < Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow!(
            "The quote's gross amount must not be negative"
        )));
    }
    Ok(())
}
