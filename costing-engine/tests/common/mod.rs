//! Shared helpers for costing-engine integration tests.

use backoffice_core::config::{NumberingSettings, PaymentSettings, SurchargeSettings};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use costing_engine::models::{
    CreatePayment, CustomerMode, ExtraServices, Invoice, MarginType, PartnerMode, Payment,
    PaymentEntry, PaymentMethod, PaymentOwner, Position, Quote, Unit,
};
use costing_engine::services::{aggregate, create_draft, issue, InMemorySequence};

pub fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

/// Fixed clock for deterministic snapshots.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 23, 10, 0, 0).unwrap()
}

/// Position billed per unit on both sides.
pub fn per_unit_position(quantity: &str, partner_rate: &str, customer_rate: &str) -> Position {
    Position {
        position_id: Uuid::new_v4(),
        project_id: Uuid::new_v4(),
        description: "Translation DE-EN".to_string(),
        unit: Unit::Words,
        quantity: dec(quantity),
        amount: Decimal::ONE,
        partner_mode: PartnerMode::PerUnit,
        partner_rate: dec(partner_rate),
        customer_mode: CustomerMode::PerUnit,
        customer_rate: dec(customer_rate),
        margin_type: MarginType::Markup,
        margin_percent: Decimal::ZERO,
        sort_order: 0,
        created_utc: test_now(),
    }
}

/// Position priced as a margin on the partner cost.
pub fn margin_position(
    quantity: &str,
    amount: &str,
    partner_rate: &str,
    margin_type: MarginType,
    margin_percent: &str,
) -> Position {
    Position {
        quantity: dec(quantity),
        amount: dec(amount),
        partner_rate: dec(partner_rate),
        customer_mode: CustomerMode::MarginOnCost,
        margin_type,
        margin_percent: dec(margin_percent),
        ..per_unit_position("0", "0", "0")
    }
}

/// Position with a fixed customer price and no partner cost.
pub fn flat_rate_position(total: &str) -> Position {
    Position {
        unit: Unit::Flat,
        quantity: Decimal::ONE,
        partner_mode: PartnerMode::Flat,
        customer_mode: CustomerMode::FlatRate,
        customer_rate: dec(total),
        ..per_unit_position("1", "0", "0")
    }
}

pub fn quote_of(positions: Vec<Position>) -> Quote {
    Quote {
        quote_id: Uuid::new_v4(),
        project_id: Uuid::new_v4(),
        positions,
        extras: ExtraServices::default(),
        tax_enabled: true,
        tax_rate_percent: dec("19"),
    }
}

pub fn draft_invoice(quote: &Quote) -> Invoice {
    let breakdown = aggregate(quote, &SurchargeSettings::default());
    create_draft(quote, &breakdown, "Muster GmbH", "Website relaunch", test_now())
}

pub fn issued_invoice(quote: &Quote, sequence: &mut InMemorySequence) -> Invoice {
    issue(
        &draft_invoice(quote),
        quote,
        &SurchargeSettings::default(),
        sequence,
        &NumberingSettings::default(),
        &PaymentSettings::default(),
        test_now(),
    )
    .expect("Failed to issue invoice")
}

pub fn payment_of(invoice: &Invoice, amount: &str) -> Payment {
    Payment {
        payment_id: Uuid::new_v4(),
        owner: PaymentOwner::Invoice(invoice.invoice_id),
        amount: dec(amount),
        date: test_now().date_naive(),
        method: PaymentMethod::BankTransfer,
        note: None,
        created_utc: test_now(),
    }
}

pub fn create_payment(amount: &str) -> CreatePayment {
    CreatePayment {
        entry: PaymentEntry::Absolute(dec(amount)),
        date: test_now().date_naive(),
        method: PaymentMethod::BankTransfer,
        note: None,
    }
}
