//! Payment model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Cash,
    CreditCard,
    Paypal,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Other => "other",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "cash" => PaymentMethod::Cash,
            "credit_card" => PaymentMethod::CreditCard,
            "paypal" => PaymentMethod::Paypal,
            "other" => PaymentMethod::Other,
            _ => PaymentMethod::BankTransfer,
        }
    }
}

/// Owner of a payment: a project while no invoice exists yet (deposit), the
/// invoice afterwards. Exactly one owner at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOwner {
    Project(Uuid),
    Invoice(Uuid),
}

/// A received payment. Amounts are always stored as absolutes; percentage
/// entries are converted at the moment of entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: Uuid,
    pub owner: PaymentOwner,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub note: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// How a payment amount was entered in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentEntry {
    Absolute(Decimal),
    /// Percentage of the owning document's current gross, resolved to an
    /// absolute amount at entry time.
    PercentOfGross(Decimal),
}

/// Input for recording a payment.
#[derive(Debug, Clone, Validate)]
pub struct CreatePayment {
    pub entry: PaymentEntry,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// Input for amending a payment while its owner is still editable.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdatePayment {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub method: Option<PaymentMethod>,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}
