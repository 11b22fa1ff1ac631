//! Transaction Validator Service
//!
//! Runs the fixed validation pipeline, owns the admitted-transaction log
//! and the account blacklist. Contains NO I/O - time and randomness come
//! in through the [`Clock`] and [`EntropySource`] ports.

use std::collections::HashSet;

use chrono::TimeDelta;
use serde_json::Value;
use txcheck_types::{
    Clock, ConfigError, EntropySource, LogEntry, OsEntropy, RuleResult, StructuralError,
    SystemClock, Transaction, TransactionRequest, ValidationVerdict, Violation,
};

use crate::config::ValidatorConfig;
use crate::log::TransactionLog;
use crate::rules;

/// Validator façade.
///
/// Generic over the clock and entropy ports so tests can inject fixed
/// time and seeded randomness. Every mutating call takes `&mut self`;
/// hosts that share a validator across threads must serialize access.
pub struct TransactionValidator<C: Clock = SystemClock, E: EntropySource = OsEntropy> {
    config: ValidatorConfig,
    log: TransactionLog,
    blacklist: HashSet<String>,
    clock: C,
    entropy: E,
}

impl TransactionValidator {
    /// Creates a validator on the system clock with OS-seeded entropy.
    pub fn new(config: ValidatorConfig) -> Result<Self, ConfigError> {
        Self::with_environment(config, SystemClock, OsEntropy::new())
    }
}

impl Default for TransactionValidator {
    fn default() -> Self {
        Self::build(ValidatorConfig::default(), SystemClock, OsEntropy::new())
    }
}

impl<C: Clock, E: EntropySource> TransactionValidator<C, E> {
    /// Creates a validator with injected time and entropy sources.
    pub fn with_environment(
        config: ValidatorConfig,
        clock: C,
        entropy: E,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, clock, entropy))
    }

    fn build(config: ValidatorConfig, clock: C, entropy: E) -> Self {
        Self {
            config,
            log: TransactionLog::new(),
            blacklist: HashSet::new(),
            clock,
            entropy,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates a host-supplied record.
    pub fn validate(&mut self, request: &TransactionRequest) -> ValidationVerdict {
        self.evict_expired();
        match request.to_transaction() {
            Ok(tx) => self.run_pipeline(&tx),
            Err(errors) => self.structural_failure(request.id.as_deref(), errors),
        }
    }

    /// Validates an arbitrary JSON value.
    ///
    /// Anything other than an object fails with
    /// `"Transaction object is required"`.
    pub fn validate_value(&mut self, value: &Value) -> ValidationVerdict {
        self.evict_expired();
        let request = match TransactionRequest::from_value(value) {
            Ok(request) => request,
            Err(errors) => return self.structural_failure(None, errors),
        };
        match request.to_transaction() {
            Ok(tx) => self.run_pipeline(&tx),
            Err(errors) => self.structural_failure(request.id.as_deref(), errors),
        }
    }

    /// Validates a transaction that already passed the structural gate.
    #[tracing::instrument(skip(self, tx), fields(from = %tx.from_account, amount = %tx.amount))]
    pub fn validate_transaction(&mut self, tx: &Transaction) -> ValidationVerdict {
        self.evict_expired();
        self.run_pipeline(tx)
    }

    /// Checks the daily count and amount limits for the originator.
    pub fn check_velocity(&self, tx: &Transaction) -> RuleResult {
        rules::to_rule_result(self.velocity_violation(tx), "Within daily velocity limits")
    }

    fn run_pipeline(&self, tx: &Transaction) -> ValidationVerdict {
        let config = &self.config;
        let mut violations: Vec<Violation> =
            rules::amount_bounds(tx, config.single_max, config.min_amount);
        violations.extend(rules::blacklist(tx, &self.blacklist));
        violations.extend(rules::self_transfer(tx));
        violations.extend(rules::suspicious_memo(tx, &config.suspicious_patterns));
        violations.extend(self.velocity_violation(tx));

        tracing::debug!(
            transaction_id = tx.id.as_deref().unwrap_or("-"),
            from_account = %tx.from_account,
            errors = violations.len(),
            "transaction validated"
        );
        ValidationVerdict::from_errors(violations)
    }

    fn velocity_violation(&self, tx: &Transaction) -> Option<Violation> {
        let today = self.clock.now().date_naive();
        let activity = self.log.daily_activity(&tx.from_account, today);
        rules::velocity(tx, activity, self.config.daily_count, self.config.daily_max)
    }

    fn structural_failure(
        &self,
        id: Option<&str>,
        errors: Vec<StructuralError>,
    ) -> ValidationVerdict {
        tracing::debug!(
            transaction_id = id.unwrap_or("-"),
            errors = errors.len(),
            "transaction rejected at structural gate"
        );
        ValidationVerdict::from_errors(errors)
    }

    fn evict_expired(&mut self) {
        let Some(days) = self.config.retain_days else {
            return;
        };
        let Some(window) = TimeDelta::try_days(i64::from(days)) else {
            return;
        };
        // A cutoff before the representable range means nothing is old enough.
        let Some(cutoff) = self.clock.now().checked_sub_signed(window) else {
            return;
        };
        let evicted = self.log.evict_before(cutoff);
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.log.len(), "evicted expired log entries");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Record keeping
    // ─────────────────────────────────────────────────────────────────────────────

    /// Appends a transaction to the log. No rules are re-run.
    ///
    /// Callers are expected to validate first.
    #[tracing::instrument(skip(self, tx), fields(from = %tx.from_account))]
    pub fn record(&mut self, tx: Transaction) -> &LogEntry {
        let now = self.clock.now();
        let entry = self.log.append(tx, now, &mut self.entropy);
        tracing::info!(
            transaction_id = %entry.id(),
            amount = %entry.transaction().amount,
            "transaction recorded"
        );
        entry
    }

    pub fn transaction_count(&self) -> usize {
        self.log.len()
    }

    /// Read-only view of the admitted transactions, oldest first.
    pub fn log(&self) -> &[LogEntry] {
        self.log.entries()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Blacklist
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn add_to_blacklist(&mut self, account: impl Into<String>) {
        let account = account.into();
        tracing::info!(account = %account, "account blacklisted");
        self.blacklist.insert(account);
    }

    pub fn remove_from_blacklist(&mut self, account: &str) {
        if self.blacklist.remove(account) {
            tracing::info!(account = %account, "account removed from blacklist");
        }
    }

    pub fn is_blacklisted(&self, account: &str) -> bool {
        self.blacklist.contains(account)
    }
}
