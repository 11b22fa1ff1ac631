//! Rule results, evaluation reports and validation verdicts.

use serde::Serialize;

/// Outcome of a single rule check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleResult {
    pub pass: bool,
    pub message: String,
}

impl RuleResult {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            pass: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            pass: false,
            message: message.into(),
        }
    }
}

/// A rule result tagged with the name of the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub rule: String,
    pub pass: bool,
    pub message: String,
}

impl RuleOutcome {
    pub fn new(rule: impl Into<String>, result: RuleResult) -> Self {
        Self {
            rule: rule.into(),
            pass: result.pass,
            message: result.message,
        }
    }
}

/// Aggregated result of running every rule in an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationReport {
    pub passed: bool,
    pub results: Vec<RuleOutcome>,
}

impl EvaluationReport {
    /// Builds a report; `passed` is the conjunction of all outcomes.
    pub fn from_results(results: Vec<RuleOutcome>) -> Self {
        Self {
            passed: results.iter().all(|r| r.pass),
            results,
        }
    }

    /// Outcomes that failed, in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.results.iter().filter(|r| !r.pass)
    }
}

/// Final answer of the validator façade.
///
/// `valid` is true exactly when `errors` is empty. The fields are private
/// so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    valid: bool,
    errors: Vec<String>,
}

impl ValidationVerdict {
    /// A passing verdict with no errors.
    pub fn accepted() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Builds a verdict from errors in detection order.
    pub fn from_errors<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: ToString,
    {
        let errors: Vec<String> = errors.into_iter().map(|e| e.to_string()).collect();
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}
