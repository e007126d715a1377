use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::stats::{calc_stats, Stats, WinRatePolicy};
use crate::models::{Trade, UNKNOWN_PERIOD};

/// Aggregates for one year-month bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period_key: String,
    pub stats: Stats,
}

/// Partition trades by period key and aggregate each bucket. Rows come back
/// in ascending key order, with the "unknown" bucket always last.
pub fn group_by_period(trades: &[Trade], policy: WinRatePolicy) -> Vec<PeriodSummary> {
    let mut buckets: HashMap<String, Vec<Trade>> = HashMap::new();
    for trade in trades {
        buckets
            .entry(trade.period_key.clone())
            .or_default()
            .push(trade.clone());
    }

    let mut rows: Vec<PeriodSummary> = buckets
        .into_iter()
        .map(|(period_key, bucket)| PeriodSummary {
            period_key,
            stats: calc_stats(&bucket, policy),
        })
        .collect();

    rows.sort_by(|a, b| compare_period_keys(&a.period_key, &b.period_key));
    rows
}

fn compare_period_keys(a: &str, b: &str) -> Ordering {
    match (a == UNKNOWN_PERIOD, b == UNKNOWN_PERIOD) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

/// Pick the best and worst known periods by net profit. Expects rows in the
/// ascending order produced by [`group_by_period`], so ties resolve to the
/// earliest period. `None` when every row is the unknown bucket.
pub fn best_and_worst(rows: &[PeriodSummary]) -> Option<(&PeriodSummary, &PeriodSummary)> {
    let mut known = rows.iter().filter(|r| r.period_key != UNKNOWN_PERIOD);
    let first = known.next()?;
    let mut best = first;
    let mut worst = first;
    for row in known {
        if row.stats.net_profit > best.stats.net_profit {
            best = row;
        }
        if row.stats.net_profit < worst.stats.net_profit {
            worst = row;
        }
    }
    Some((best, worst))
}
