//! Error types for the transaction validator.

use rust_decimal::Decimal;

/// Shape errors found before any business rule can run.
///
/// The `Display` output is the exact string placed in a verdict.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("Transaction object is required")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field: amount must be a finite number")]
    InvalidAmount,

    #[error("Invalid field: {0} must be a string")]
    NotAString(&'static str),
}

/// Business rule violations reported by the validation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("Amount {amount} exceeds single transaction limit of {limit}")]
    ExceedsSingleLimit { amount: Decimal, limit: Decimal },

    #[error("Amount must be at least {min}")]
    BelowMinimum { min: Decimal },

    #[error("Transaction involves a blacklisted account")]
    BlacklistedAccount,

    #[error("Self-transfers are not allowed")]
    SelfTransfer,

    #[error("Suspicious pattern detected in memo: {pattern}")]
    SuspiciousMemo { pattern: String },

    #[error("Daily transaction count limit ({limit}) exceeded")]
    DailyCountExceeded { limit: u32 },

    #[error("Daily amount limit ({limit}) would be exceeded")]
    DailyAmountExceeded { limit: Decimal },
}

/// Errors converting raw numbers into monetary amounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must be a finite number")]
    NotFinite,

    #[error("Amount is outside the representable decimal range")]
    OutOfRange,

    #[error("Amount must be numeric, not text")]
    NotNumeric,
}

/// Invalid validator configuration. Raised only at construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: Decimal },

    #[error("min_amount must not be negative, got {0}")]
    NegativeMinimum(Decimal),

    #[error("min_amount ({min}) must not exceed single_max ({max})")]
    AmountBoundsInverted { min: Decimal, max: Decimal },

    #[error("daily_count must be at least 1")]
    ZeroDailyCount,

    #[error("retain_days must be at least 1")]
    ZeroRetention,

    #[error("Suspicious patterns must not be empty")]
    EmptyPattern,

    #[error("Currency {code}: bounds must not be negative")]
    NegativeCurrencyBound { code: String },

    #[error("Currency {code}: minimum {min} exceeds maximum {max}")]
    CurrencyBoundsInverted {
        code: String,
        min: Decimal,
        max: Decimal,
    },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Failure raised from inside a rule check.
///
/// The rule engine turns these into failed outcomes; they never escape
/// `RuleEngine::evaluate`.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("{0}")]
    Message(String),

    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for RuleError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        RuleError::Other(err)
    }
}

impl From<&str> for RuleError {
    fn from(msg: &str) -> Self {
        RuleError::Message(msg.to_string())
    }
}

impl From<String> for RuleError {
    fn from(msg: String) -> Self {
        RuleError::Message(msg)
    }
}
