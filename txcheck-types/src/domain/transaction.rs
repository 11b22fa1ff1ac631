//! Transaction domain model.

use rust_decimal::Decimal;
use serde::Serialize;

use super::amount;
use crate::error::AmountError;

/// A structurally valid payment transaction.
///
/// Every required field is present. The amount is a decimal, so numeric
/// comparison is the only kind available. Timestamps are never taken from
/// input; the validator assigns one when the transaction is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Monetary amount in major units (dollars, euros, rupees)
    pub amount: Decimal,
    /// Currency code, three-letter upper-case by convention
    pub currency: String,
    /// Originating account, compared by exact equality
    pub from_account: String,
    /// Receiving account, compared by exact equality
    pub to_account: String,
    /// Free-text memo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// External identifier. Assigned on record when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Transaction {
    /// Creates a transaction with no memo and no id.
    pub fn new(
        amount: Decimal,
        currency: impl Into<String>,
        from_account: impl Into<String>,
        to_account: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            from_account: from_account.into(),
            to_account: to_account.into(),
            memo: None,
            id: None,
        }
    }

    /// Creates a transaction from a float amount.
    ///
    /// Fails for NaN, infinities, and values outside the decimal range.
    pub fn from_f64(
        amount: f64,
        currency: impl Into<String>,
        from_account: impl Into<String>,
        to_account: impl Into<String>,
    ) -> Result<Self, AmountError> {
        Ok(Self::new(
            amount::from_f64(amount)?,
            currency,
            from_account,
            to_account,
        ))
    }

    /// Sets the memo.
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Sets the external identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns true if both legs name the same account.
    pub fn is_self_transfer(&self) -> bool {
        self.from_account == self.to_account
    }
}
