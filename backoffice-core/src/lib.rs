//! backoffice-core: shared infrastructure for the agency back-office crates.
pub mod config;
pub mod error;
pub mod observability;

pub use serde;
pub use tracing;
pub use validator;
