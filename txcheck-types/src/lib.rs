//! # Txcheck Types
//!
//! Domain types and port traits for the transaction validator.
//! This crate has ZERO external IO dependencies - only data structures,
//! policy tables, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Pure domain types (Transaction, CurrencyPolicy, verdicts, log entries)
//! - `ports/` - Trait definitions for the environment (clock, entropy)
//! - `dto/` - The loosely-shaped inbound transaction record
//! - `error/` - Structural, configuration, and rule error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CurrencyLimits, CurrencyPolicy, EvaluationReport, LogEntry, RuleOutcome, RuleResult,
    Transaction, ValidationVerdict,
};
pub use dto::TransactionRequest;
pub use error::{AmountError, ConfigError, RuleError, StructuralError, Violation};
pub use ports::{Clock, EntropySource, FixedClock, OsEntropy, SeededEntropy, SystemClock};
pub use rust_decimal::Decimal;
