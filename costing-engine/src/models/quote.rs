//! Quote model: the priced aggregate of a project or offer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Position;

/// Extra services toggled on a quote. Each toggle maps to a flat configured
/// fee; copies are billed per piece.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExtraServices {
    pub certification: bool,
    pub apostille: bool,
    pub express: bool,
    pub classification: bool,
    pub copies: u32,
}

/// A project's or offer's billable content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub quote_id: Uuid,
    pub project_id: Uuid,
    pub positions: Vec<Position>,
    pub extras: ExtraServices,
    pub tax_enabled: bool,
    /// VAT percentage captured onto the quote from configuration.
    pub tax_rate_percent: Decimal,
}

/// Derived breakdown of a quote. Recomputed in full on every edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    pub net: Decimal,
    pub tax: Decimal,
    pub gross: Decimal,
    pub partner_cost: Decimal,
    pub profit: Decimal,
    pub profit_margin_percent: Decimal,
}
