//! Invoice model.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    Invoice,
    CreditNote,
}

impl InvoiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Invoice => "invoice",
            InvoiceType::CreditNote => "credit_note",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "credit_note" => InvoiceType::CreditNote,
            _ => InvoiceType::Invoice,
        }
    }
}

/// Stored invoice status. Overdue is never stored; see [`DisplayStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Cancelled,
    Archived,
    Deleted,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Issued => "issued",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
            InvoiceStatus::Archived => "archived",
            InvoiceStatus::Deleted => "deleted",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "issued" => InvoiceStatus::Issued,
            "paid" => InvoiceStatus::Paid,
            "cancelled" => InvoiceStatus::Cancelled,
            "archived" => InvoiceStatus::Archived,
            "deleted" => InvoiceStatus::Deleted,
            _ => InvoiceStatus::Draft,
        }
    }

    /// Every status except `draft` and `deleted` freezes the document.
    pub fn is_locked(&self) -> bool {
        !matches!(self, InvoiceStatus::Draft | InvoiceStatus::Deleted)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display state of an invoice: either the stored status, or the derived
/// overdue projection over an issued invoice past its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Stored(InvoiceStatus),
    Overdue,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Stored(status) => status.as_str(),
            DisplayStatus::Overdue => "overdue",
        }
    }
}

/// How an invoice came to be marked paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaidVia {
    /// Derived from the payment ledger covering the gross amount.
    Ledger,
    /// Explicit office override, regardless of the ledger balance.
    Manual,
}

impl PaidVia {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaidVia::Ledger => "ledger",
            PaidVia::Manual => "manual",
        }
    }
}

/// Label of a payment reminder. Level 1 is a friendly nudge, level 2 and up
/// are formal dunning notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    Friendly,
    Dunning,
}

impl ReminderKind {
    pub fn for_level(level: u32) -> Self {
        if level >= 2 {
            ReminderKind::Dunning
        } else {
            ReminderKind::Friendly
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Friendly => "friendly",
            ReminderKind::Dunning => "dunning",
        }
    }
}

/// Invoice document.
///
/// Customer, project and amount fields are snapshots: provisional while the
/// invoice is a draft, frozen from issuance on. Corrections to an issued
/// invoice go through cancellation and a credit note, never through edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: Uuid,
    /// Sequential document number, assigned at issuance and never reused.
    pub number: Option<String>,
    pub invoice_type: InvoiceType,
    pub status: InvoiceStatus,
    pub customer_name: String,
    pub project_name: String,
    pub net: Decimal,
    pub tax: Decimal,
    pub gross: Decimal,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub reminder_level: u32,
    pub last_reminder_date: Option<NaiveDate>,
    /// Credit note offsetting this document, once cancelled.
    pub linked_credit_note_id: Option<Uuid>,
    /// For a credit note: the document it offsets.
    pub reference_invoice_id: Option<Uuid>,
    pub paid_via: Option<PaidVia>,
    pub paid_date: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Compare-and-set token; bumped by every lifecycle transition.
    pub version: i64,
    pub created_utc: DateTime<Utc>,
    pub issued_utc: Option<DateTime<Utc>>,
    pub cancelled_utc: Option<DateTime<Utc>>,
    pub paid_utc: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn is_locked(&self) -> bool {
        self.status.is_locked()
    }
}
