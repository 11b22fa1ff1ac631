//! Admitted-transaction log entries.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::transaction::Transaction;

/// An admitted transaction with its assigned id and timestamp.
///
/// Entries are immutable once created. They feed velocity checks only.
/// The id lives on the transaction and is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    #[serde(flatten)]
    transaction: Transaction,
    timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Creates an entry. The transaction's `id` is overwritten with `id`.
    pub fn new(id: impl Into<String>, timestamp: DateTime<Utc>, mut transaction: Transaction) -> Self {
        transaction.id = Some(id.into());
        Self {
            transaction,
            timestamp,
        }
    }

    pub fn id(&self) -> &str {
        self.transaction.id.as_deref().unwrap_or_default()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Timestamp as ISO-8601 with millisecond precision and a `Z` suffix.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }
}
