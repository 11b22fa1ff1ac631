//! # Txcheck Core
//!
//! Rule engine and validator service for payment transactions.
//!
//! ## Architecture
//!
//! - `engine/` - Generic ordered rule engine with error isolation
//! - `rules/` - Built-in checks (amount, blacklist, self-transfer, memo, velocity, currency)
//! - `validator/` - The validator façade (fixed pipeline, log, blacklist)
//! - `log/` - Admitted-transaction log and id generation
//! - `config/` - Construction-time options
//!
//! The validator is generic over `C: Clock` and `E: EntropySource`, so
//! time and randomness can be swapped for fixed and seeded sources.

pub mod config;
pub mod engine;
pub mod log;
pub mod rules;
pub mod validator;


pub use config::ValidatorConfig;
pub use engine::{Rule, RuleEngine};
pub use log::TransactionLog;
pub use validator::TransactionValidator;
