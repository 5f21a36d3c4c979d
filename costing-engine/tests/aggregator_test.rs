//! Quote aggregator tests.

mod common;

use backoffice_core::config::SurchargeSettings;
use common::{dec, flat_rate_position, per_unit_position, quote_of};
use costing_engine::models::ExtraServices;
use costing_engine::services::{aggregate, parse_amount, surcharge_total, validate_breakdown};
use rust_decimal::Decimal;

#[test]
fn nineteen_percent_tax_on_one_hundred_net() {
    let quote = quote_of(vec![flat_rate_position("100.00")]);
    let breakdown = aggregate(&quote, &SurchargeSettings::default());

    assert_eq!(breakdown.net, dec("100.00"));
    assert_eq!(breakdown.tax, dec("19.00"));
    assert_eq!(breakdown.gross, dec("119.00"));
}

#[test]
fn gross_is_always_net_plus_tax() {
    let mut quote = quote_of(vec![
        per_unit_position("431", "0.05", "0.083"),
        flat_rate_position("12.34"),
    ]);
    quote.extras.express = true;
    quote.extras.copies = 2;

    let breakdown = aggregate(&quote, &SurchargeSettings::default());
    assert_eq!(breakdown.gross, breakdown.net + breakdown.tax);

    quote.tax_enabled = false;
    let breakdown = aggregate(&quote, &SurchargeSettings::default());
    assert_eq!(breakdown.tax, Decimal::ZERO);
    assert_eq!(breakdown.gross, breakdown.net);
}

#[test]
fn each_surcharge_toggle_never_decreases_net() {
    let rates = SurchargeSettings::default();
    let base = quote_of(vec![flat_rate_position("50.00")]);
    let base_net = aggregate(&base, &rates).net;

    let toggles: Vec<Box<dyn Fn(&mut ExtraServices)>> = vec![
        Box::new(|e| e.certification = true),
        Box::new(|e| e.apostille = true),
        Box::new(|e| e.express = true),
        Box::new(|e| e.classification = true),
        Box::new(|e| e.copies = 1),
    ];

    for toggle in toggles {
        let mut quote = base.clone();
        toggle(&mut quote.extras);
        let net = aggregate(&quote, &rates).net;
        assert!(net >= base_net, "toggle decreased net: {} < {}", net, base_net);
    }
}

#[test]
fn copies_are_billed_per_piece() {
    let rates = SurchargeSettings::default();
    let extras = ExtraServices {
        copies: 3,
        ..ExtraServices::default()
    };

    assert_eq!(surcharge_total(&extras, &rates), dec("3") * rates.copy_price);
}

#[test]
fn surcharges_are_flat_configured_fees() {
    let rates = SurchargeSettings::default();
    let extras = ExtraServices {
        certification: true,
        apostille: true,
        ..ExtraServices::default()
    };

    assert_eq!(
        surcharge_total(&extras, &rates),
        rates.certification + rates.apostille
    );
}

#[test]
fn profit_is_net_minus_partner_cost() {
    // Partner cost 5.00, customer price 8.00
    let quote = quote_of(vec![per_unit_position("100", "0.05", "0.08")]);
    let breakdown = aggregate(&quote, &SurchargeSettings::default());

    assert_eq!(breakdown.partner_cost, dec("5.00"));
    assert_eq!(breakdown.profit, dec("3.00"));
    assert_eq!(breakdown.profit_margin_percent, dec("37.50"));
}

#[test]
fn empty_quote_has_zero_margin_not_a_division_error() {
    let quote = quote_of(vec![]);
    let breakdown = aggregate(&quote, &SurchargeSettings::default());

    assert_eq!(breakdown.net, Decimal::ZERO);
    assert_eq!(breakdown.profit_margin_percent, Decimal::ZERO);
}

#[test]
fn recomputation_does_not_accumulate() {
    let mut quote = quote_of(vec![flat_rate_position("80.00")]);
    quote.extras.certification = true;

    let rates = SurchargeSettings::default();
    let first = aggregate(&quote, &rates);
    let second = aggregate(&quote, &rates);

    assert_eq!(first, second);
}

#[test]
fn malformed_form_input_coerces_to_zero() {
    assert_eq!(parse_amount("12.50"), dec("12.50"));
    assert_eq!(parse_amount("12,50"), dec("12.50"));
    assert_eq!(parse_amount(" 3.14 "), dec("3.14"));
    assert_eq!(parse_amount("abc"), Decimal::ZERO);
    assert_eq!(parse_amount(""), Decimal::ZERO);
    assert_eq!(parse_amount("1.2.3"), Decimal::ZERO);
}

#[test]
fn submission_rejects_negative_aggregates() {
    let quote = quote_of(vec![flat_rate_position("100.00")]);
    let mut breakdown = aggregate(&quote, &SurchargeSettings::default());
    assert!(validate_breakdown(&breakdown).is_ok());

    breakdown.net = dec("-1.00");
    assert!(validate_breakdown(&breakdown).is_err());
}
