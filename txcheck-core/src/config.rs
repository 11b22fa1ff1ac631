//! Validator configuration.

use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use txcheck_types::{ConfigError, CurrencyPolicy};

/// Construction-time options for [`TransactionValidator`](crate::TransactionValidator).
///
/// Deserializing a partial document fills the remaining fields from
/// [`ValidatorConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Largest amount allowed in one transaction (inclusive)
    pub single_max: Decimal,
    /// Smallest amount allowed in one transaction (inclusive)
    pub min_amount: Decimal,
    /// Transactions allowed per originator per UTC day
    pub daily_count: u32,
    /// Aggregate amount allowed per originator per UTC day (inclusive)
    pub daily_max: Decimal,
    /// Memo substrings that flag a transaction, matched case-insensitively
    pub suspicious_patterns: Vec<String>,
    /// Per-currency bounds used by the currency rule
    pub currency_policy: CurrencyPolicy,
    /// Evict log entries older than this many days; `None` keeps everything
    pub retain_days: Option<u32>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            single_max: Decimal::from(10_000),
            min_amount: Decimal::ONE,
            daily_count: 20,
            daily_max: Decimal::from(50_000),
            suspicious_patterns: vec!["test".into(), "fraud".into(), "xxx".into()],
            currency_policy: CurrencyPolicy::default(),
            retain_days: None,
        }
    }
}

impl ValidatorConfig {
    /// Loads configuration from environment variables, falling back to the
    /// defaults for anything unset.
    ///
    /// Recognised variables: `TXCHECK_SINGLE_MAX`, `TXCHECK_MIN_AMOUNT`,
    /// `TXCHECK_DAILY_COUNT`, `TXCHECK_DAILY_MAX`,
    /// `TXCHECK_SUSPICIOUS_PATTERNS` (comma-separated) and
    /// `TXCHECK_RETAIN_DAYS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parsed(&lookup, "TXCHECK_SINGLE_MAX")? {
            config.single_max = v;
        }
        if let Some(v) = parsed(&lookup, "TXCHECK_MIN_AMOUNT")? {
            config.min_amount = v;
        }
        if let Some(v) = parsed(&lookup, "TXCHECK_DAILY_COUNT")? {
            config.daily_count = v;
        }
        if let Some(v) = parsed(&lookup, "TXCHECK_DAILY_MAX")? {
            config.daily_max = v;
        }
        if let Some(raw) = lookup("TXCHECK_SUSPICIOUS_PATTERNS") {
            config.suspicious_patterns = raw
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(v) = parsed(&lookup, "TXCHECK_RETAIN_DAYS")? {
            config.retain_days = Some(v);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_single_max(mut self, single_max: Decimal) -> Self {
        self.single_max = single_max;
        self
    }

    pub fn with_min_amount(mut self, min_amount: Decimal) -> Self {
        self.min_amount = min_amount;
        self
    }

    pub fn with_daily_count(mut self, daily_count: u32) -> Self {
        self.daily_count = daily_count;
        self
    }

    pub fn with_daily_max(mut self, daily_max: Decimal) -> Self {
        self.daily_max = daily_max;
        self
    }

    pub fn with_suspicious_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suspicious_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_currency_policy(mut self, policy: CurrencyPolicy) -> Self {
        self.currency_policy = policy;
        self
    }

    pub fn with_retain_days(mut self, days: u32) -> Self {
        self.retain_days = Some(days);
        self
    }

    /// Rejects configurations the validator cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.single_max <= Decimal::ZERO {
            return Err(ConfigError::NonPositive {
                field: "single_max",
                value: self.single_max,
            });
        }
        if self.daily_max <= Decimal::ZERO {
            return Err(ConfigError::NonPositive {
                field: "daily_max",
                value: self.daily_max,
            });
        }
        if self.min_amount.is_sign_negative() {
            return Err(ConfigError::NegativeMinimum(self.min_amount));
        }
        if self.min_amount > self.single_max {
            return Err(ConfigError::AmountBoundsInverted {
                min: self.min_amount,
                max: self.single_max,
            });
        }
        if self.daily_count == 0 {
            return Err(ConfigError::ZeroDailyCount);
        }
        if self.retain_days == Some(0) {
            return Err(ConfigError::ZeroRetention);
        }
        if self.suspicious_patterns.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::EmptyPattern);
        }
        self.currency_policy.validate()
    }
}

fn parsed<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value: raw }),
    }
}
