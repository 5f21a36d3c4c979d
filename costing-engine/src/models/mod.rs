//! Domain models for the costing engine.

mod invoice;
mod payment;
mod position;
mod quote;

pub use invoice::{
    DisplayStatus, Invoice, InvoiceStatus, InvoiceType, PaidVia, ReminderKind,
};
pub use payment::{
    CreatePayment, Payment, PaymentEntry, PaymentMethod, PaymentOwner, UpdatePayment,
};
pub use position::{CustomerMode, MarginType, PartnerMode, Position, PositionTotals, Unit};
pub use quote::{ExtraServices, Quote, QuoteBreakdown};
