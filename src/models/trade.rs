use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Period bucket for trades whose timestamp failed to parse.
pub const UNKNOWN_PERIOD: &str = "unknown";

/// Placeholder shown when a record carries no instrument label.
pub const MISSING_PAIR: &str = "—";

/// Classified trade outcome. `Unclassified` covers open trades and
/// unrecognized result labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Outcome {
    #[serde(rename = "win")]
    Win,
    #[serde(rename = "loss")]
    Loss,
    #[serde(rename = "be")]
    Breakeven,
    #[serde(rename = "")]
    #[default]
    Unclassified,
}

impl Outcome {
    /// Classify a raw result label. Precedence: any "break" substring wins
    /// (covers "breakeven", "break even"), then the tp/sl shorthands, then
    /// exact membership in the canonical set.
    pub fn classify(raw: &str) -> Self {
        let label = raw.to_lowercase();
        if label.contains("break") {
            return Outcome::Breakeven;
        }
        match label.as_str() {
            "tp" | "win" => Outcome::Win,
            "sl" | "loss" => Outcome::Loss,
            "be" => Outcome::Breakeven,
            _ => Outcome::Unclassified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Breakeven => "be",
            Outcome::Unclassified => "",
        }
    }
}

/// Classify a raw bias/direction label into BUY/SELL, passing anything else
/// through upper-cased.
pub fn classify_bias(raw: &str) -> String {
    let b = raw.to_uppercase();
    if b.contains("BUY") || b == "LONG" {
        "BUY".to_string()
    } else if b.contains("SELL") || b == "SHORT" {
        "SELL".to_string()
    } else {
        b
    }
}

/// Canonical trade record, produced by the normalizer from one raw store
/// record. Immutable once constructed; a refresh replaces the whole
/// collection rather than mutating trades in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub timestamp: Option<DateTime<Utc>>,
    /// "YYYY-MM" bucket derived from `timestamp`, or `UNKNOWN_PERIOD`.
    pub period_key: String,
    pub pair: String,
    pub bias: String,
    pub result: Outcome,

    /// Raw price scalars, passed through untyped (schema-dependent).
    pub entry: Option<Value>,
    pub stop_loss: Option<Value>,
    pub take_profit: Option<Value>,

    pub r_multiple: Option<f64>,
    pub profit: Option<f64>,

    pub notes: String,
    pub before_img: Option<String>,
    pub after_img: Option<String>,
}

/// Filter criteria over the canonical collection. `None` (or an empty
/// string) means the criterion is a wildcard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeFilters {
    pub query: Option<String>,
    pub result: Option<Outcome>,
    pub period_key: Option<String>,
    pub pair: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_result_labels() {
        assert_eq!(Outcome::classify("WIN"), Outcome::Win);
        assert_eq!(Outcome::classify("loss"), Outcome::Loss);
        assert_eq!(Outcome::classify("be"), Outcome::Breakeven);
        assert_eq!(Outcome::classify("TP"), Outcome::Win);
        assert_eq!(Outcome::classify("sl"), Outcome::Loss);
        assert_eq!(Outcome::classify("break even"), Outcome::Breakeven);
        assert_eq!(Outcome::classify("Breakeven"), Outcome::Breakeven);
        assert_eq!(Outcome::classify("open"), Outcome::Unclassified);
        assert_eq!(Outcome::classify(""), Outcome::Unclassified);
    }

    #[test]
    fn test_break_substring_takes_precedence() {
        // "breaksl" contains both markers; the substring rule runs first
        assert_eq!(Outcome::classify("breaksl"), Outcome::Breakeven);
    }

    #[test]
    fn test_classify_bias() {
        assert_eq!(classify_bias("buy limit"), "BUY");
        assert_eq!(classify_bias("long"), "BUY");
        assert_eq!(classify_bias("Sell"), "SELL");
        assert_eq!(classify_bias("short"), "SELL");
        assert_eq!(classify_bias("neutral"), "NEUTRAL");
        assert_eq!(classify_bias(""), "");
    }

    #[test]
    fn test_outcome_serializes_to_canonical_labels() {
        assert_eq!(serde_json::to_string(&Outcome::Win).unwrap(), "\"win\"");
        assert_eq!(serde_json::to_string(&Outcome::Breakeven).unwrap(), "\"be\"");
        assert_eq!(serde_json::to_string(&Outcome::Unclassified).unwrap(), "\"\"");
    }
}
