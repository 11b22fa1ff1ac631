//! Per-currency amount bounds.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::outcome::RuleResult;
use crate::error::ConfigError;

/// Inclusive amount bounds for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyLimits {
    pub min: Decimal,
    pub max: Decimal,
}

impl CurrencyLimits {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Returns true if `amount` lies within `[min, max]`.
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min && amount <= self.max
    }
}

/// Mapping from currency code to its amount bounds.
///
/// Codes are matched exactly. A currency missing from the table is not
/// supported and every amount in it is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyPolicy {
    limits: BTreeMap<String, CurrencyLimits>,
}

impl Default for CurrencyPolicy {
    /// The reference table: USD, EUR, INR, GBP.
    fn default() -> Self {
        Self::empty()
            .with_limits("USD", Decimal::new(1, 2), Decimal::from(100_000))
            .with_limits("EUR", Decimal::new(1, 2), Decimal::from(85_000))
            .with_limits("INR", Decimal::ONE, Decimal::from(5_000_000))
            .with_limits("GBP", Decimal::new(1, 2), Decimal::from(75_000))
    }
}

impl CurrencyPolicy {
    /// Creates a policy that supports no currencies.
    pub fn empty() -> Self {
        Self {
            limits: BTreeMap::new(),
        }
    }

    /// Adds or replaces the bounds for a currency.
    pub fn with_limits(mut self, code: impl Into<String>, min: Decimal, max: Decimal) -> Self {
        self.limits.insert(code.into(), CurrencyLimits::new(min, max));
        self
    }

    /// Returns the bounds for a currency, if supported.
    pub fn limits(&self, code: &str) -> Option<&CurrencyLimits> {
        self.limits.get(code)
    }

    /// Returns true if the currency has an entry.
    pub fn supports(&self, code: &str) -> bool {
        self.limits.contains_key(code)
    }

    /// Supported currency codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.limits.keys().map(String::as_str)
    }

    /// Checks an amount against the bounds of its currency.
    pub fn check(&self, amount: Decimal, code: &str) -> RuleResult {
        let Some(limits) = self.limits(code) else {
            return RuleResult::fail(format!("Currency {} not supported", code));
        };

        if amount < limits.min {
            return RuleResult::fail(format!("{} minimum is {}", code, limits.min));
        }
        if amount > limits.max {
            return RuleResult::fail(format!("{} maximum is {}", code, limits.max));
        }
        RuleResult::pass(format!("{} amount within limits", code))
    }

    /// Rejects tables with negative or inverted bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (code, limits) in &self.limits {
            if limits.min.is_sign_negative() || limits.max.is_sign_negative() {
                return Err(ConfigError::NegativeCurrencyBound { code: code.clone() });
            }
            if limits.min > limits.max {
                return Err(ConfigError::CurrencyBoundsInverted {
                    code: code.clone(),
                    min: limits.min,
                    max: limits.max,
                });
            }
        }
        Ok(())
    }
}
