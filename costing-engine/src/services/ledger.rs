//! Payment ledger: accumulates payments against a gross total and derives
//! the outstanding balance.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    CreatePayment, Invoice, InvoiceStatus, Payment, PaymentEntry, PaymentOwner, UpdatePayment,
};
use crate::services::calculator::round_money;

/// Residual balance at or below this is treated as fully paid.
pub static SETTLEMENT_TOLERANCE: Lazy<Decimal> = Lazy::new(|| Decimal::new(1, 2));

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("The payment amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Payments cannot be recorded on a {status} invoice")]
    ClosedInvoice { status: InvoiceStatus },

    #[error(
        "Payments on a {status} invoice cannot be changed; only new payments may be added"
    )]
    ImmutablePayment { status: InvoiceStatus },
}

/// Sum of all recorded payments.
pub fn total_paid(payments: &[Payment]) -> Decimal {
    payments.iter().map(|p| p.amount).sum()
}

/// Outstanding balance against a gross total. A negative balance means
/// overpayment and is reported as such, never clamped.
pub fn remaining_balance(gross: Decimal, payments: &[Payment]) -> Decimal {
    gross - total_paid(payments)
}

/// Whether a balance counts as settled, within the one-cent tolerance.
pub fn is_settled(balance: Decimal) -> bool {
    balance <= *SETTLEMENT_TOLERANCE
}

/// Resolve a payment entry to the absolute amount the ledger stores.
/// Percentage entries are converted against the gross at entry time, so a
/// later change of the gross cannot make stored payments drift.
pub fn resolve_entry(entry: &PaymentEntry, gross: Decimal) -> Decimal {
    match entry {
        PaymentEntry::Absolute(amount) => round_money(*amount),
        PaymentEntry::PercentOfGross(percent) => {
            round_money(gross * *percent / Decimal::ONE_HUNDRED)
        }
    }
}

/// Record a payment against an invoice.
///
/// Adding is the one mutation a locked invoice still accepts; cancelled,
/// archived and deleted documents accept none.
pub fn record_payment(
    invoice: &Invoice,
    input: &CreatePayment,
    now: DateTime<Utc>,
) -> Result<Payment, LedgerError> {
    input.validate()?;

    match invoice.status {
        InvoiceStatus::Cancelled | InvoiceStatus::Archived | InvoiceStatus::Deleted => {
            return Err(LedgerError::ClosedInvoice {
                status: invoice.status,
            });
        }
        _ => {}
    }

    let amount = resolve_entry(&input.entry, invoice.gross);
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }

    let payment = Payment {
        payment_id: Uuid::new_v4(),
        owner: PaymentOwner::Invoice(invoice.invoice_id),
        amount,
        date: input.date,
        method: input.method,
        note: input.note.clone(),
        created_utc: now,
    };

    info!(
        invoice_id = %invoice.invoice_id,
        payment_id = %payment.payment_id,
        amount = %payment.amount,
        method = payment.method.as_str(),
        "Payment recorded"
    );

    Ok(payment)
}

/// Record a pre-issuance deposit on a project. Percentage entries resolve
/// against the project's current quoted gross.
pub fn record_deposit(
    project_id: Uuid,
    quoted_gross: Decimal,
    input: &CreatePayment,
    now: DateTime<Utc>,
) -> Result<Payment, LedgerError> {
    input.validate()?;

    let amount = resolve_entry(&input.entry, quoted_gross);
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }

    let payment = Payment {
        payment_id: Uuid::new_v4(),
        owner: PaymentOwner::Project(project_id),
        amount,
        date: input.date,
        method: input.method,
        note: input.note.clone(),
        created_utc: now,
    };

    info!(
        project_id = %project_id,
        payment_id = %payment.payment_id,
        amount = %payment.amount,
        "Deposit recorded"
    );

    Ok(payment)
}

/// Amend a payment. Permitted for project deposits and while the owning
/// invoice is still a draft; existing rows on a locked invoice are
/// immutable.
pub fn amend_payment(
    owner: Option<&Invoice>,
    payment: &Payment,
    update: &UpdatePayment,
) -> Result<Payment, LedgerError> {
    update.validate()?;
    ensure_editable(owner)?;

    let amount = match update.amount {
        Some(amount) => {
            let amount = round_money(amount);
            if amount <= Decimal::ZERO {
                return Err(LedgerError::NonPositiveAmount);
            }
            amount
        }
        None => payment.amount,
    };

    Ok(Payment {
        amount,
        date: update.date.unwrap_or(payment.date),
        method: update.method.unwrap_or(payment.method),
        note: update.note.clone().or_else(|| payment.note.clone()),
        ..payment.clone()
    })
}

/// Check that a payment may be removed; same editability rule as amending.
pub fn remove_payment(owner: Option<&Invoice>, payment: &Payment) -> Result<(), LedgerError> {
    ensure_editable(owner)?;
    info!(payment_id = %payment.payment_id, "Payment removed");
    Ok(())
}

/// Re-home project deposits onto the invoice they are carried forward to at
/// issuance. Payments already owned by an invoice are left untouched.
pub fn attach_deposits(invoice_id: Uuid, payments: Vec<Payment>) -> Vec<Payment> {
    payments
        .into_iter()
        .map(|payment| match payment.owner {
            PaymentOwner::Project(_) => Payment {
                owner: PaymentOwner::Invoice(invoice_id),
                ..payment
            },
            PaymentOwner::Invoice(_) => payment,
        })
        .collect()
}

fn ensure_editable(owner: Option<&Invoice>) -> Result<(), LedgerError> {
    if let Some(invoice) = owner {
        if invoice.is_locked() {
            return Err(LedgerError::ImmutablePayment {
                status: invoice.status,
            });
        }
    }
    Ok(())
}
