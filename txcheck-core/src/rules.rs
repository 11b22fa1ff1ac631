//! Built-in transaction checks.
//!
//! Each check is a pure function of the transaction and the state it
//! needs. The validator runs them in a fixed sequence; the currency check
//! can also be registered on a [`RuleEngine`](crate::RuleEngine).

use std::collections::HashSet;

use rust_decimal::Decimal;
use txcheck_types::{CurrencyPolicy, RuleError, RuleResult, Transaction, Violation};

/// Single-transaction bounds. Both bounds may fail at once only if the
/// configuration is inverted, which construction rejects.
pub fn amount_bounds(tx: &Transaction, single_max: Decimal, min_amount: Decimal) -> Vec<Violation> {
    let mut violations = Vec::new();
    if tx.amount > single_max {
        violations.push(Violation::ExceedsSingleLimit {
            amount: tx.amount,
            limit: single_max,
        });
    }
    if tx.amount < min_amount {
        violations.push(Violation::BelowMinimum { min: min_amount });
    }
    violations
}

/// Fails when either leg is blacklisted.
pub fn blacklist(tx: &Transaction, blacklisted: &HashSet<String>) -> Option<Violation> {
    (blacklisted.contains(&tx.from_account) || blacklisted.contains(&tx.to_account))
        .then_some(Violation::BlacklistedAccount)
}

pub fn self_transfer(tx: &Transaction) -> Option<Violation> {
    tx.is_self_transfer().then_some(Violation::SelfTransfer)
}

/// Case-insensitive substring match of each pattern against the memo.
///
/// One violation per matched pattern, in pattern order.
pub fn suspicious_memo(tx: &Transaction, patterns: &[String]) -> Vec<Violation> {
    let Some(memo) = tx.memo.as_deref() else {
        return Vec::new();
    };
    let memo = memo.to_lowercase();

    patterns
        .iter()
        .filter(|p| memo.contains(&p.to_lowercase()))
        .map(|p| Violation::SuspiciousMemo { pattern: p.clone() })
        .collect()
}

/// Same-day activity of one originating account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DailyActivity {
    pub count: usize,
    pub total: Decimal,
}

/// Daily count and amount limits.
///
/// The count limit is checked first; the amount limit only when the count
/// is still under it. A total that overflows the decimal range exceeds
/// any daily limit.
pub fn velocity(
    tx: &Transaction,
    today: DailyActivity,
    daily_count: u32,
    daily_max: Decimal,
) -> Option<Violation> {
    if today.count >= daily_count as usize {
        return Some(Violation::DailyCountExceeded { limit: daily_count });
    }
    match today.total.checked_add(tx.amount) {
        Some(total) if total <= daily_max => None,
        _ => Some(Violation::DailyAmountExceeded { limit: daily_max }),
    }
}

/// Packages a currency policy as a rule engine check.
pub fn currency_limits_rule(
    policy: CurrencyPolicy,
) -> impl Fn(&Transaction) -> Result<RuleResult, RuleError> + Send + Sync + 'static {
    move |tx: &Transaction| Ok(policy.check(tx.amount, &tx.currency))
}

/// Turns an optional violation into a rule result.
pub fn to_rule_result(violation: Option<Violation>, pass_message: &str) -> RuleResult {
    match violation {
        Some(v) => RuleResult::fail(v.to_string()),
        None => RuleResult::pass(pass_message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleEngine;
    use rust_decimal_macros::dec;

    fn tx(amount: Decimal) -> Transaction {
        Transaction::new(amount, "USD", "A", "B")
    }

    fn patterns() -> Vec<String> {
        vec!["test".into(), "fraud".into(), "xxx".into()]
    }

    #[test]
    fn test_amount_bounds_numeric() {
        assert!(amount_bounds(&tx(dec!(9)), dec!(10000), dec!(1)).is_empty());
        assert!(amount_bounds(&tx(dec!(10000)), dec!(10000), dec!(1)).is_empty());
        assert_eq!(
            amount_bounds(&tx(dec!(10000.01)), dec!(10000), dec!(1)),
            vec![Violation::ExceedsSingleLimit {
                amount: dec!(10000.01),
                limit: dec!(10000)
            }]
        );
        assert_eq!(
            amount_bounds(&tx(dec!(0.99)), dec!(10000), dec!(1)),
            vec![Violation::BelowMinimum { min: dec!(1) }]
        );
    }

    #[test]
    fn test_blacklist_either_side() {
        let mut list = HashSet::new();
        list.insert("B".to_string());

        assert_eq!(blacklist(&tx(dec!(5)), &list), Some(Violation::BlacklistedAccount));
        let reversed = Transaction::new(dec!(5), "USD", "B", "C");
        assert_eq!(blacklist(&reversed, &list), Some(Violation::BlacklistedAccount));
        let clean = Transaction::new(dec!(5), "USD", "C", "D");
        assert_eq!(blacklist(&clean, &list), None);
    }

    #[test]
    fn test_blacklist_exact_match() {
        let mut list = HashSet::new();
        list.insert("b".to_string());
        assert_eq!(blacklist(&tx(dec!(5)), &list), None);
    }

    #[test]
    fn test_memo_case_insensitive() {
        for memo in ["TEST", "Test", "contains test"] {
            let found = suspicious_memo(&tx(dec!(5)).with_memo(memo), &patterns());
            assert_eq!(
                found,
                vec![Violation::SuspiciousMemo {
                    pattern: "test".into()
                }],
                "memo {memo:?}"
            );
        }
    }

    #[test]
    fn test_memo_multiple_patterns_in_order() {
        let found = suspicious_memo(&tx(dec!(5)).with_memo("XXX Fraud test"), &patterns());
        let names: Vec<String> = found.iter().map(|v| v.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "Suspicious pattern detected in memo: test",
                "Suspicious pattern detected in memo: fraud",
                "Suspicious pattern detected in memo: xxx",
            ]
        );
    }

    #[test]
    fn test_memo_absent_or_clean() {
        assert!(suspicious_memo(&tx(dec!(5)), &patterns()).is_empty());
        assert!(suspicious_memo(&tx(dec!(5)).with_memo("rent"), &patterns()).is_empty());
    }

    #[test]
    fn test_velocity_count_before_amount() {
        let busy = DailyActivity {
            count: 20,
            total: dec!(49999),
        };
        assert_eq!(
            velocity(&tx(dec!(100)), busy, 20, dec!(50000)),
            Some(Violation::DailyCountExceeded { limit: 20 })
        );
    }

    #[test]
    fn test_velocity_amount_boundary() {
        let activity = DailyActivity {
            count: 3,
            total: dec!(49900),
        };
        assert_eq!(velocity(&tx(dec!(100)), activity, 20, dec!(50000)), None);
        assert_eq!(
            velocity(&tx(dec!(100.01)), activity, 20, dec!(50000)),
            Some(Violation::DailyAmountExceeded { limit: dec!(50000) })
        );
    }

    #[test]
    fn test_velocity_overflowing_total_exceeds_limit() {
        let saturated = DailyActivity {
            count: 1,
            total: Decimal::MAX,
        };
        assert_eq!(
            velocity(&tx(dec!(100)), saturated, 20, Decimal::MAX),
            Some(Violation::DailyAmountExceeded { limit: Decimal::MAX })
        );
    }

    #[test]
    fn test_currency_rule_on_engine() {
        let mut engine = RuleEngine::new();
        engine.add_rule("currency", 1, currency_limits_rule(CurrencyPolicy::default()));

        let report = engine.evaluate(&Transaction::new(dec!(50), "JPY", "A", "B"));
        assert!(!report.passed);
        assert_eq!(report.results[0].message, "Currency JPY not supported");
    }

    #[test]
    fn test_to_rule_result() {
        assert!(to_rule_result(None, "fine").pass);
        let failed = to_rule_result(Some(Violation::SelfTransfer), "fine");
        assert_eq!(failed.message, "Self-transfers are not allowed");
    }
}
