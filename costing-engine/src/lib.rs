//! costing-engine: project costing and invoice compliance engine.
//!
//! Turns the billable positions of a translation/interpretation project into
//! partner cost, customer price and profit, and drives issued invoices
//! through their regulation-constrained lifecycle. All computation is
//! synchronous and pure; persistence, transport and document rendering are
//! collaborators behind the snapshot boundary.

pub mod models;
pub mod services;
