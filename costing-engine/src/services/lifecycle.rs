//! Invoice lifecycle: guarded transitions from draft through issuance,
//! payment, cancellation and archival.
//!
//! Transitions are pure value-to-value functions: the input snapshot is
//! never mutated, so a failed guard observably changes nothing, and
//! validation plus mutation form a single atomic step. Every successful
//! transition bumps the `version` token by one; the persistence
//! collaborator serializes concurrent writers with a compare-and-set on it.

use backoffice_core::config::{NumberingSettings, PaymentSettings, SurchargeSettings};
use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    DisplayStatus, Invoice, InvoiceStatus, InvoiceType, PaidVia, Payment, Quote, QuoteBreakdown,
    ReminderKind,
};
use crate::services::aggregator::aggregate;
use crate::services::ledger::{is_settled, remaining_balance};
use crate::services::numbering::{format_number, NumberSequence, NumberingError, Series};

/// Result of cancelling an invoice: the cancelled original and the credit
/// note that offsets it.
#[derive(Debug, Clone)]
pub struct Cancellation {
    pub original: Invoice,
    pub credit_note: Invoice,
}

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("This invoice has already been issued and cannot be issued again")]
    AlreadyIssued,

    #[error("Only a draft invoice can be issued; this one is {status}")]
    NotDraft { status: InvoiceStatus },

    #[error("An invoice needs at least one position before it can be issued")]
    EmptyInvoice,

    #[error("An invoice cannot be issued over a negative gross amount ({gross})")]
    NegativeGross { gross: Decimal },

    #[error("This operation needs an issued invoice; this one is {status}")]
    NotIssued { status: InvoiceStatus },

    #[error("This invoice is already marked paid")]
    AlreadyPaid,

    #[error("This invoice is already cancelled")]
    AlreadyCancelled,

    #[error("This invoice already has a credit note")]
    HasCreditNote,

    #[error("Only a cancelled invoice can be archived; this one is {status}")]
    NotCancelled { status: InvoiceStatus },

    #[error("An archived invoice can no longer be changed")]
    ArchivedInvoice,

    #[error("The open balance of {remaining} is not settled yet")]
    BalanceNotSettled { remaining: Decimal },

    #[error(
        "Cannot delete a {status} invoice; an issued invoice is corrected \
         by cancellation, never erased"
    )]
    DeleteLocked { status: InvoiceStatus },

    #[error("The invoice was changed concurrently (expected version {expected}, found {actual})")]
    VersionConflict { expected: i64, actual: i64 },

    #[error(transparent)]
    Numbering(#[from] NumberingError),
}

/// Compare-and-set guard for callers persisting a transition result. The
/// loser of a concurrent write observes this instead of corrupting state.
pub fn ensure_version(invoice: &Invoice, expected: i64) -> Result<(), TransitionError> {
    if invoice.version != expected {
        return Err(TransitionError::VersionConflict {
            expected,
            actual: invoice.version,
        });
    }
    Ok(())
}

/// Create a draft invoice from a quote snapshot. Amounts are provisional
/// until issuance re-snapshots them.
pub fn create_draft(
    quote: &Quote,
    breakdown: &QuoteBreakdown,
    customer_name: &str,
    project_name: &str,
    now: DateTime<Utc>,
) -> Invoice {
    let invoice = Invoice {
        invoice_id: Uuid::new_v4(),
        number: None,
        invoice_type: InvoiceType::Invoice,
        status: InvoiceStatus::Draft,
        customer_name: customer_name.to_string(),
        project_name: project_name.to_string(),
        net: breakdown.net,
        tax: breakdown.tax,
        gross: breakdown.gross,
        issue_date: None,
        due_date: None,
        reminder_level: 0,
        last_reminder_date: None,
        linked_credit_note_id: None,
        reference_invoice_id: None,
        paid_via: None,
        paid_date: None,
        notes: None,
        version: 0,
        created_utc: now,
        issued_utc: None,
        cancelled_utc: None,
        paid_utc: None,
    };

    info!(
        invoice_id = %invoice.invoice_id,
        project_id = %quote.project_id,
        "Draft invoice created"
    );

    invoice
}

/// Issue a draft invoice.
///
/// Re-aggregates the quote, snapshots the amounts, assigns the next
/// sequential invoice number and locks the document. The number is
/// allocated only after every other guard has passed, so a numbering
/// failure aborts the transition with nothing half-applied.
pub fn issue(
    invoice: &Invoice,
    quote: &Quote,
    rates: &SurchargeSettings,
    sequence: &mut dyn NumberSequence,
    numbering: &NumberingSettings,
    payments: &PaymentSettings,
    now: DateTime<Utc>,
) -> Result<Invoice, TransitionError> {
    match invoice.status {
        InvoiceStatus::Draft => {}
        InvoiceStatus::Deleted => {
            return Err(TransitionError::NotDraft {
                status: invoice.status,
            })
        }
        _ => return Err(TransitionError::AlreadyIssued),
    }

    if quote.positions.is_empty() {
        return Err(TransitionError::EmptyInvoice);
    }

    let breakdown = aggregate(quote, rates);
    if breakdown.gross < Decimal::ZERO {
        return Err(TransitionError::NegativeGross {
            gross: breakdown.gross,
        });
    }

    let sequence_number = sequence.next(Series::Invoice)?;
    let number = format_number(numbering, Series::Invoice, sequence_number);

    let today = now.date_naive();
    let issued = Invoice {
        number: Some(number),
        status: InvoiceStatus::Issued,
        net: breakdown.net,
        tax: breakdown.tax,
        gross: breakdown.gross,
        issue_date: Some(today),
        due_date: Some(today + Days::new(u64::from(payments.due_days))),
        version: invoice.version + 1,
        issued_utc: Some(now),
        ..invoice.clone()
    };

    info!(
        invoice_id = %issued.invoice_id,
        number = %issued.number.as_deref().unwrap_or(""),
        gross = %issued.gross,
        "Invoice issued"
    );

    Ok(issued)
}

/// Cancel an issued or paid invoice by spawning an offsetting credit note.
///
/// The original keeps its number and amounts and stays locked; the credit
/// note carries the negative correction. A credit note may itself be
/// cancelled the same way, which re-negates its amounts.
pub fn cancel(
    invoice: &Invoice,
    reason: Option<&str>,
    sequence: &mut dyn NumberSequence,
    numbering: &NumberingSettings,
    now: DateTime<Utc>,
) -> Result<Cancellation, TransitionError> {
    match invoice.status {
        InvoiceStatus::Issued | InvoiceStatus::Paid => {}
        InvoiceStatus::Cancelled => return Err(TransitionError::AlreadyCancelled),
        InvoiceStatus::Archived => return Err(TransitionError::ArchivedInvoice),
        _ => {
            return Err(TransitionError::NotIssued {
                status: invoice.status,
            })
        }
    }

    if invoice.linked_credit_note_id.is_some() {
        return Err(TransitionError::HasCreditNote);
    }

    let sequence_number = sequence.next(Series::CreditNote)?;
    let number = format_number(numbering, Series::CreditNote, sequence_number);

    let today = now.date_naive();
    let credit_note = Invoice {
        invoice_id: Uuid::new_v4(),
        number: Some(number),
        invoice_type: InvoiceType::CreditNote,
        status: InvoiceStatus::Issued,
        customer_name: invoice.customer_name.clone(),
        project_name: invoice.project_name.clone(),
        net: -invoice.net,
        tax: -invoice.tax,
        gross: -invoice.gross,
        issue_date: Some(today),
        due_date: None,
        reminder_level: 0,
        last_reminder_date: None,
        linked_credit_note_id: None,
        reference_invoice_id: Some(invoice.invoice_id),
        paid_via: None,
        paid_date: None,
        notes: reason.map(str::to_string),
        version: 0,
        created_utc: now,
        issued_utc: Some(now),
        cancelled_utc: None,
        paid_utc: None,
    };

    let original = Invoice {
        status: InvoiceStatus::Cancelled,
        linked_credit_note_id: Some(credit_note.invoice_id),
        version: invoice.version + 1,
        cancelled_utc: Some(now),
        ..invoice.clone()
    };

    info!(
        invoice_id = %original.invoice_id,
        credit_note_id = %credit_note.invoice_id,
        credit_note_number = %credit_note.number.as_deref().unwrap_or(""),
        "Invoice cancelled, credit note created"
    );

    Ok(Cancellation {
        original,
        credit_note,
    })
}

/// Mark an issued invoice as paid.
///
/// `PaidVia::Ledger` requires the outstanding balance to be settled within
/// the one-cent tolerance; `PaidVia::Manual` is the explicit office
/// override. The trigger is persisted and logged distinctly.
pub fn mark_paid(
    invoice: &Invoice,
    payments: &[Payment],
    via: PaidVia,
    now: DateTime<Utc>,
) -> Result<Invoice, TransitionError> {
    match invoice.status {
        InvoiceStatus::Issued => {}
        InvoiceStatus::Paid => return Err(TransitionError::AlreadyPaid),
        InvoiceStatus::Cancelled => return Err(TransitionError::AlreadyCancelled),
        InvoiceStatus::Archived => return Err(TransitionError::ArchivedInvoice),
        _ => {
            return Err(TransitionError::NotIssued {
                status: invoice.status,
            })
        }
    }

    if via == PaidVia::Ledger {
        let remaining = remaining_balance(invoice.gross, payments);
        if !is_settled(remaining) {
            return Err(TransitionError::BalanceNotSettled { remaining });
        }
    }

    let paid = Invoice {
        status: InvoiceStatus::Paid,
        paid_via: Some(via),
        paid_date: Some(now.date_naive()),
        paid_utc: Some(now),
        version: invoice.version + 1,
        ..invoice.clone()
    };

    match via {
        PaidVia::Ledger => info!(
            invoice_id = %paid.invoice_id,
            paid_via = via.as_str(),
            "Invoice settled by payment ledger"
        ),
        PaidVia::Manual => info!(
            invoice_id = %paid.invoice_id,
            paid_via = via.as_str(),
            "Invoice marked paid by manual override"
        ),
    }

    Ok(paid)
}

/// Record a payment reminder on an open invoice. Escalation is a label,
/// not a gate: each call raises the level by exactly one.
pub fn record_reminder(
    invoice: &Invoice,
    now: DateTime<Utc>,
) -> Result<(Invoice, ReminderKind), TransitionError> {
    match invoice.status {
        InvoiceStatus::Issued => {}
        InvoiceStatus::Paid => return Err(TransitionError::AlreadyPaid),
        InvoiceStatus::Cancelled => return Err(TransitionError::AlreadyCancelled),
        InvoiceStatus::Archived => return Err(TransitionError::ArchivedInvoice),
        _ => {
            return Err(TransitionError::NotIssued {
                status: invoice.status,
            })
        }
    }

    let level = invoice.reminder_level + 1;
    let kind = ReminderKind::for_level(level);
    let reminded = Invoice {
        reminder_level: level,
        last_reminder_date: Some(now.date_naive()),
        version: invoice.version + 1,
        ..invoice.clone()
    };

    info!(
        invoice_id = %reminded.invoice_id,
        reminder_level = level,
        kind = kind.as_str(),
        "Payment reminder recorded"
    );

    Ok((reminded, kind))
}

/// Archive a cancelled invoice. Terminal: nothing transitions out of
/// archived.
pub fn archive(invoice: &Invoice) -> Result<Invoice, TransitionError> {
    match invoice.status {
        InvoiceStatus::Cancelled => {}
        InvoiceStatus::Archived => return Err(TransitionError::ArchivedInvoice),
        _ => {
            return Err(TransitionError::NotCancelled {
                status: invoice.status,
            })
        }
    }

    let archived = Invoice {
        status: InvoiceStatus::Archived,
        version: invoice.version + 1,
        ..invoice.clone()
    };

    info!(invoice_id = %archived.invoice_id, "Invoice archived");

    Ok(archived)
}

/// Delete a draft invoice. Any other status is rejected: an issued
/// document is corrected through cancellation, never erased.
pub fn delete(invoice: &Invoice) -> Result<Invoice, TransitionError> {
    if invoice.status != InvoiceStatus::Draft {
        return Err(TransitionError::DeleteLocked {
            status: invoice.status,
        });
    }

    let deleted = Invoice {
        status: InvoiceStatus::Deleted,
        version: invoice.version + 1,
        ..invoice.clone()
    };

    info!(invoice_id = %deleted.invoice_id, "Draft invoice deleted");

    Ok(deleted)
}

/// Project the display state of an invoice. Overdue is derived, never
/// stored: an issued invoice past its due date with an unsettled balance
/// shows as overdue while its stored status stays `issued`.
pub fn display_status(invoice: &Invoice, payments: &[Payment], today: NaiveDate) -> DisplayStatus {
    if invoice.status == InvoiceStatus::Issued {
        if let Some(due_date) = invoice.due_date {
            let remaining = remaining_balance(invoice.gross, payments);
            if due_date < today && !is_settled(remaining) {
                return DisplayStatus::Overdue;
            }
        }
    }
    DisplayStatus::Stored(invoice.status)
}
