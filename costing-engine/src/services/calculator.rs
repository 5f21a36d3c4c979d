//! Position calculator: derives partner cost and customer price for one
//! billable line from its raw inputs.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CustomerMode, MarginType, PartnerMode, Position, PositionTotals};

const MONEY_DECIMALS: u32 = 2;

/// Round a monetary amount to cents, half away from zero. Applied once at
/// the calculator boundary, never on intermediates.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the derived totals of a position.
///
/// Pure and idempotent: the same raw inputs always produce the same totals,
/// independent of any previously derived values. Negative rates and
/// percentages are clamped to zero, so totals never go negative.
pub fn position_totals(position: &Position) -> PositionTotals {
    let quantity = position.quantity.max(Decimal::ZERO);
    let amount = position.amount.max(Decimal::ZERO);
    let total_units = quantity * amount;

    let partner_rate = position.partner_rate.max(Decimal::ZERO);
    let partner_total = match position.partner_mode {
        PartnerMode::PerUnit => partner_rate * total_units,
        PartnerMode::Flat => partner_rate,
    };
    let partner_total = round_money(partner_total);

    let entered_rate = position.customer_rate.max(Decimal::ZERO);
    let (customer_total, customer_rate) = match position.customer_mode {
        CustomerMode::FlatRate => (round_money(entered_rate), entered_rate),
        CustomerMode::PerUnit => (round_money(entered_rate * total_units), entered_rate),
        CustomerMode::MarginOnCost => {
            let percent = position.margin_percent.max(Decimal::ZERO);
            let factor = match position.margin_type {
                MarginType::Markup => Decimal::ONE + percent / Decimal::ONE_HUNDRED,
                // A discount above 100% would price below zero; the floor
                // keeps the total at exactly zero instead.
                MarginType::Discount => (Decimal::ONE - percent / Decimal::ONE_HUNDRED)
                    .max(Decimal::ZERO),
            };
            let customer_total = round_money(partner_total * factor);
            let customer_rate = if total_units > Decimal::ZERO {
                customer_total / total_units
            } else {
                Decimal::ZERO
            };
            (customer_total, customer_rate)
        }
    };

    PositionTotals {
        partner_total,
        customer_total,
        customer_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::round_money;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_money(dec("1.005")), dec("1.01"));
        assert_eq!(round_money(dec("-1.005")), dec("-1.01"));
        assert_eq!(round_money(dec("2.344")), dec("2.34"));
        assert_eq!(round_money(dec("2.345")), dec("2.35"));
    }
}
