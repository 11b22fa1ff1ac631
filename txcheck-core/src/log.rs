//! In-process log of admitted transactions.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use txcheck_types::{EntropySource, LogEntry, Transaction};

use crate::rules::DailyActivity;

const SUFFIX_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
/// Number of distinct suffixes (36^6).
const SUFFIX_SPACE: u64 = 2_176_782_336;
/// Random draws before scanning upward from the last one.
const MAX_DRAWS: usize = 8;

/// Append-only sequence of [`LogEntry`] values, ordered by insertion.
///
/// Generated ids have the form `TXN-<epoch-ms>-<6 base36 chars>` and are
/// unique among the entries currently held.
#[derive(Debug, Default)]
pub struct TransactionLog {
    entries: Vec<LogEntry>,
    ids: HashSet<String>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transaction stamped with `now`.
    ///
    /// A caller-supplied id is kept; otherwise one is generated.
    pub fn append<E: EntropySource>(
        &mut self,
        tx: Transaction,
        now: DateTime<Utc>,
        entropy: &mut E,
    ) -> &LogEntry {
        let id = match tx.id.clone() {
            Some(id) => id,
            None => self.generate_id(now, entropy),
        };
        self.ids.insert(id.clone());
        self.entries.push(LogEntry::new(id, now, tx));
        // The push above guarantees the log is non-empty.
        &self.entries[self.entries.len() - 1]
    }

    fn generate_id<E: EntropySource>(&self, now: DateTime<Utc>, entropy: &mut E) -> String {
        let prefix = format!("TXN-{}-", now.timestamp_millis());
        let mut last = 0;
        for _ in 0..MAX_DRAWS {
            last = entropy.next_u64() % SUFFIX_SPACE;
            let id = format!("{prefix}{}", base36_suffix(last));
            if !self.ids.contains(&id) {
                return id;
            }
        }

        // At most `ids.len()` suffixes are taken, so the scan ends well
        // before it wraps.
        (1..=self.ids.len() as u64 + 1)
            .map(|step| format!("{prefix}{}", base36_suffix((last + step) % SUFFIX_SPACE)))
            .find(|id| !self.ids.contains(id))
            .unwrap_or_else(|| format!("{prefix}{}", base36_suffix(last)))
    }

    /// Count and total of entries from `account` stamped on `date` (UTC).
    ///
    /// The total saturates at [`Decimal::MAX`](rust_decimal::Decimal::MAX).
    pub fn daily_activity(&self, account: &str, date: NaiveDate) -> DailyActivity {
        self.entries
            .iter()
            .filter(|e| e.timestamp().date_naive() == date)
            .filter(|e| e.transaction().from_account == account)
            .fold(DailyActivity::default(), |acc, e| DailyActivity {
                count: acc.count + 1,
                total: acc.total.saturating_add(e.transaction().amount),
            })
    }

    /// Removes entries stamped before `cutoff`. Returns how many went.
    pub fn evict_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ids = &mut self.ids;
        self.entries.retain(|e| {
            let keep = e.timestamp() >= cutoff;
            if !keep {
                ids.remove(e.id());
            }
            keep
        });
        before - self.entries.len()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn base36_suffix(mut value: u64) -> String {
    let mut digits = [b'0'; SUFFIX_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36[(value % 36) as usize];
        value /= 36;
    }
    digits.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use txcheck_types::SeededEntropy;

    /// Replays fixed values, repeating the last one forever.
    struct StuckEntropy {
        values: Vec<u64>,
    }

    impl EntropySource for StuckEntropy {
        fn next_u64(&mut self) -> u64 {
            if self.values.len() > 1 {
                self.values.remove(0)
            } else {
                self.values[0]
            }
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_base36_suffix() {
        assert_eq!(base36_suffix(0), "000000");
        assert_eq!(base36_suffix(35), "00000z");
        assert_eq!(base36_suffix(36), "000010");
        assert_eq!(base36_suffix(u64::MAX).len(), SUFFIX_LEN);
    }

    #[test]
    fn test_generated_id_format() {
        let mut log = TransactionLog::new();
        let mut entropy = SeededEntropy::new(1);
        let entry = log.append(Transaction::new(dec!(5), "USD", "A", "B"), at(9), &mut entropy);

        let expected_prefix = format!("TXN-{}-", at(9).timestamp_millis());
        assert!(entry.id().starts_with(&expected_prefix));
        assert_eq!(entry.id().len(), expected_prefix.len() + SUFFIX_LEN);
    }

    #[test]
    fn test_colliding_suffix_is_redrawn() {
        let mut log = TransactionLog::new();
        let mut entropy = StuckEntropy {
            values: vec![7, 7, 8],
        };

        let first = log
            .append(Transaction::new(dec!(5), "USD", "A", "B"), at(9), &mut entropy)
            .id()
            .to_string();
        let second = log
            .append(Transaction::new(dec!(5), "USD", "A", "B"), at(9), &mut entropy)
            .id()
            .to_string();

        assert_ne!(first, second);
        assert!(second.ends_with("000008"));
    }

    #[test]
    fn test_constant_entropy_falls_back_to_scan() {
        let mut log = TransactionLog::new();
        let mut entropy = StuckEntropy { values: vec![7] };

        let ids: Vec<String> = (0..3)
            .map(|_| {
                log.append(Transaction::new(dec!(5), "USD", "A", "B"), at(9), &mut entropy)
                    .id()
                    .to_string()
            })
            .collect();

        assert!(ids[0].ends_with("000007"));
        assert!(ids[1].ends_with("000008"));
        assert!(ids[2].ends_with("000009"));
    }

    #[test]
    fn test_daily_total_saturates() {
        let mut log = TransactionLog::new();
        let mut entropy = SeededEntropy::new(5);
        log.append(Transaction::new(Decimal::MAX, "USD", "A", "B"), at(1), &mut entropy);
        log.append(Transaction::new(Decimal::MAX, "USD", "A", "B"), at(2), &mut entropy);

        let activity = log.daily_activity("A", at(0).date_naive());
        assert_eq!(activity.count, 2);
        assert_eq!(activity.total, Decimal::MAX);
    }

    #[test]
    fn test_caller_id_kept() {
        let mut log = TransactionLog::new();
        let tx = Transaction::new(dec!(5), "USD", "A", "B").with_id("ext-42");
        let entry = log.append(tx, at(9), &mut SeededEntropy::new(1));
        assert_eq!(entry.id(), "ext-42");
    }

    #[test]
    fn test_daily_activity_filters_by_date_and_originator() {
        let mut log = TransactionLog::new();
        let mut entropy = SeededEntropy::new(3);
        log.append(Transaction::new(dec!(100), "USD", "A", "B"), at(1), &mut entropy);
        log.append(Transaction::new(dec!(250), "USD", "A", "C"), at(22), &mut entropy);
        log.append(Transaction::new(dec!(999), "USD", "B", "A"), at(12), &mut entropy);
        log.append(
            Transaction::new(dec!(70), "USD", "A", "B"),
            at(12) - TimeDelta::days(1),
            &mut entropy,
        );

        let activity = log.daily_activity("A", at(0).date_naive());
        assert_eq!(activity.count, 2);
        assert_eq!(activity.total, dec!(350));
    }

    #[test]
    fn test_evict_before() {
        let mut log = TransactionLog::new();
        let mut entropy = SeededEntropy::new(4);
        log.append(Transaction::new(dec!(1), "USD", "A", "B"), at(1), &mut entropy);
        log.append(Transaction::new(dec!(2), "USD", "A", "B"), at(5), &mut entropy);

        assert_eq!(log.evict_before(at(3)), 1);
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].transaction().amount, dec!(2));
        assert_eq!(log.evict_before(at(3)), 0);
    }
}
