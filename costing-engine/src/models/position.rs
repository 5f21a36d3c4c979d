//! Billable position model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Billing unit of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Words,
    Line,
    Page,
    Hour,
    Flat,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Words => "words",
            Unit::Line => "line",
            Unit::Page => "page",
            Unit::Hour => "hour",
            Unit::Flat => "flat",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "line" => Unit::Line,
            "page" => Unit::Page,
            "hour" => Unit::Hour,
            "flat" => Unit::Flat,
            _ => Unit::Words,
        }
    }
}

/// How the partner side of a position is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerMode {
    PerUnit,
    Flat,
}

impl PartnerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerMode::PerUnit => "per_unit",
            PartnerMode::Flat => "flat",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "flat" => PartnerMode::Flat,
            _ => PartnerMode::PerUnit,
        }
    }
}

/// How the customer side of a position is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerMode {
    PerUnit,
    FlatRate,
    MarginOnCost,
}

impl CustomerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerMode::PerUnit => "per_unit",
            CustomerMode::FlatRate => "flat_rate",
            CustomerMode::MarginOnCost => "margin_on_cost",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "flat_rate" => CustomerMode::FlatRate,
            "margin_on_cost" => CustomerMode::MarginOnCost,
            _ => CustomerMode::PerUnit,
        }
    }
}

/// Direction of a margin applied on partner cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginType {
    Markup,
    Discount,
}

impl MarginType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarginType::Markup => "markup",
            MarginType::Discount => "discount",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "discount" => MarginType::Discount,
            _ => MarginType::Markup,
        }
    }
}

/// One billable line of a project or offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub position_id: Uuid,
    pub project_id: Uuid,
    pub description: String,
    pub unit: Unit,
    /// Number of units.
    pub quantity: Decimal,
    /// Price-per-unit multiplier applied to the quantity.
    pub amount: Decimal,
    pub partner_mode: PartnerMode,
    pub partner_rate: Decimal,
    pub customer_mode: CustomerMode,
    /// Customer unit rate, or the flat amount when the mode is `flat_rate`.
    pub customer_rate: Decimal,
    pub margin_type: MarginType,
    pub margin_percent: Decimal,
    pub sort_order: i32,
    pub created_utc: DateTime<Utc>,
}

/// Derived totals of a position. Never persisted as source of truth;
/// always recomputed from the position's raw inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionTotals {
    pub partner_total: Decimal,
    pub customer_total: Decimal,
    /// Effective customer unit rate; only meaningful for `margin_on_cost`.
    pub customer_rate: Decimal,
}
