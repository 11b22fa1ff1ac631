//! Domain models for the transaction validator.

pub mod amount;
pub mod currency;
pub mod log_entry;
pub mod outcome;
pub mod transaction;

pub use currency::{CurrencyLimits, CurrencyPolicy};
pub use log_entry::LogEntry;
pub use outcome::{EvaluationReport, RuleOutcome, RuleResult, ValidationVerdict};
pub use transaction::Transaction;
