//! Generic rule engine.
//!
//! Holds an ordered set of named rules and evaluates every one of them
//! against a transaction. A failing rule never short-circuits the run, and
//! a rule that errors or panics is recorded as a failure instead of
//! propagating.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

use rust_decimal::Decimal;
use txcheck_types::{
    CurrencyPolicy, EvaluationReport, RuleError, RuleOutcome, RuleResult, Transaction,
};

/// Key used to store results of transactions that carry no id.
pub const UNKNOWN_TRANSACTION: &str = "unknown";

static REFERENCE_POLICY: LazyLock<CurrencyPolicy> = LazyLock::new(CurrencyPolicy::default);

/// A transaction check registrable on a [`RuleEngine`].
///
/// Closures of the form `Fn(&Transaction) -> Result<RuleResult, RuleError>`
/// implement this trait; stateful checks can implement it directly.
pub trait Rule: Send + Sync {
    fn check(&self, tx: &Transaction) -> Result<RuleResult, RuleError>;
}

impl<F> Rule for F
where
    F: Fn(&Transaction) -> Result<RuleResult, RuleError> + Send + Sync,
{
    fn check(&self, tx: &Transaction) -> Result<RuleResult, RuleError> {
        self(tx)
    }
}

struct RegisteredRule {
    name: String,
    priority: i32,
    rule: Box<dyn Rule>,
}

/// Ordered collection of named rules.
///
/// Rules run in ascending `priority`; rules with equal priority run in the
/// order they were added. Duplicate names are allowed and each rule runs.
#[derive(Default)]
pub struct RuleEngine {
    rules: Vec<RegisteredRule>,
    results: HashMap<String, Vec<RuleOutcome>>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a closure rule. Lower priority runs first.
    pub fn add_rule<F>(&mut self, name: impl Into<String>, priority: i32, check: F)
    where
        F: Fn(&Transaction) -> Result<RuleResult, RuleError> + Send + Sync + 'static,
    {
        self.register(name, priority, check);
    }

    /// Registers any [`Rule`] implementation. Lower priority runs first.
    pub fn register<R: Rule + 'static>(&mut self, name: impl Into<String>, priority: i32, rule: R) {
        self.rules.push(RegisteredRule {
            name: name.into(),
            priority,
            rule: Box::new(rule),
        });
        // Stable sort keeps insertion order among equal priorities.
        self.rules.sort_by_key(|r| r.priority);
    }

    /// Runs every rule against `tx` and stores the outcomes under its id.
    pub fn evaluate(&mut self, tx: &Transaction) -> EvaluationReport {
        let results: Vec<RuleOutcome> = self
            .rules
            .iter()
            .map(|rule| RuleOutcome::new(rule.name.as_str(), run_rule(rule, tx)))
            .collect();

        let key = tx.id.as_deref().unwrap_or(UNKNOWN_TRANSACTION);
        self.results.insert(key.to_string(), results.clone());

        let report = EvaluationReport::from_results(results);
        tracing::debug!(
            transaction_id = key,
            rules = self.rules.len(),
            passed = report.passed,
            "rules evaluated"
        );
        report
    }

    /// Last stored outcomes for a transaction id, or an empty slice.
    pub fn results_for(&self, id: &str) -> &[RuleOutcome] {
        self.results.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Drops every stored evaluation.
    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    /// Checks an amount against the reference currency table.
    ///
    /// Unsupported currencies fail.
    pub fn check_currency_limits(amount: Decimal, currency: &str) -> RuleResult {
        REFERENCE_POLICY.check(amount, currency)
    }
}

fn run_rule(rule: &RegisteredRule, tx: &Transaction) -> RuleResult {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.rule.check(tx))) {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            tracing::warn!(rule = %rule.name, error = %err, "rule returned an error");
            RuleResult::fail(format!("Rule error: {}", err))
        }
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            tracing::warn!(rule = %rule.name, error = %msg, "rule panicked");
            RuleResult::fail(format!("Rule error: {}", msg))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "rule panicked".to_string()
    }
}
