//! Services module for the costing engine.

pub mod aggregator;
pub mod calculator;
pub mod ledger;
pub mod lifecycle;
pub mod numbering;

pub use aggregator::{aggregate, parse_amount, surcharge_total, validate_breakdown};
pub use calculator::position_totals;
pub use ledger::{
    is_settled, record_deposit, record_payment, remaining_balance, total_paid, LedgerError,
};
pub use lifecycle::{
    archive, cancel, create_draft, delete, display_status, ensure_version, issue, mark_paid,
    record_reminder, Cancellation, TransitionError,
};
pub use numbering::{
    format_number, InMemorySequence, NumberSequence, NumberingError, Series,
};
