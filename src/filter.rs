use crate::models::{Trade, TradeFilters};

/// Return the order-preserving subset of `trades` matching every provided,
/// non-empty criterion. Never fails; an all-wildcard filter returns a copy
/// of the input.
pub fn apply_filters(trades: &[Trade], filters: &TradeFilters) -> Vec<Trade> {
    trades
        .iter()
        .filter(|t| matches(t, filters))
        .cloned()
        .collect()
}

fn matches(trade: &Trade, filters: &TradeFilters) -> bool {
    if let Some(result) = filters.result {
        if trade.result != result {
            return false;
        }
    }
    if let Some(period) = non_empty(&filters.period_key) {
        if trade.period_key != period {
            return false;
        }
    }
    if let Some(pair) = non_empty(&filters.pair) {
        if trade.pair != pair {
            return false;
        }
    }
    if let Some(query) = non_empty(&filters.query) {
        let needle = query.to_lowercase();
        let haystack = format!(
            "{} {} {} {}",
            trade.pair,
            trade.bias,
            trade.result.as_str(),
            trade.notes
        )
        .to_lowercase();
        if !haystack.contains(&needle) {
            return false;
        }
    }
    true
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use crate::schema::Normalizer;
    use serde_json::json;

    fn sample() -> Vec<Trade> {
        Normalizer::default().normalize_batch(&[
            json!({"date": "2024-01-15", "pair": "EURUSD", "bias": "long", "result": "win", "notes": "trend day"}),
            json!({"date": "2024-01-20", "pair": "GBPUSD", "bias": "short", "result": "loss", "notes": "late entry"}),
            json!({"date": "2024-02-01", "pair": "EURUSD", "bias": "sell", "result": "be", "notes": ""}),
        ])
    }

    #[test]
    fn test_default_filter_is_wildcard() {
        let trades = sample();
        let kept = apply_filters(&trades, &TradeFilters::default());
        assert_eq!(kept.len(), 3);
        // original order preserved
        assert_eq!(kept[0].pair, "EURUSD");
        assert_eq!(kept[1].pair, "GBPUSD");
    }

    #[test]
    fn test_exact_criteria_are_conjunctive() {
        let trades = sample();
        let filters = TradeFilters {
            pair: Some("EURUSD".to_string()),
            period_key: Some("2024-01".to_string()),
            ..Default::default()
        };
        let kept = apply_filters(&trades, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].result, Outcome::Win);
    }

    #[test]
    fn test_query_matches_notes_case_insensitively() {
        let trades = sample();
        let filters = TradeFilters {
            query: Some("LATE ENTRY".to_string()),
            ..Default::default()
        };
        let kept = apply_filters(&trades, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].pair, "GBPUSD");
    }

    #[test]
    fn test_empty_string_criteria_are_wildcards() {
        let trades = sample();
        let filters = TradeFilters {
            query: Some("   ".to_string()),
            period_key: Some("".to_string()),
            pair: Some("".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filters(&trades, &filters).len(), 3);
    }

    #[test]
    fn test_absent_result_matches_nothing() {
        let trades = sample();
        let filters = TradeFilters {
            result: Some(Outcome::Unclassified),
            ..Default::default()
        };
        assert!(apply_filters(&trades, &filters).is_empty());
    }
}
