use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maps each canonical trade attribute to the ordered list of raw field
/// names that may supply it. Schema revisions renamed columns over time;
/// this table is configuration data, so a new revision means a new table,
/// not new code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasTable {
    pub id: Vec<String>,
    pub created_at: Vec<String>,
    pub pair: Vec<String>,
    pub bias: Vec<String>,
    pub result: Vec<String>,
    pub entry: Vec<String>,
    pub sl: Vec<String>,
    pub tp: Vec<String>,
    pub r: Vec<String>,
    pub profit: Vec<String>,
    pub notes: Vec<String>,
    pub before_img: Vec<String>,
    pub after_img: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for AliasTable {
    fn default() -> Self {
        AliasTable {
            id: names(&["id"]),
            created_at: names(&["created_at", "date", "time"]),
            pair: names(&["pair", "symbol", "market"]),
            bias: names(&["bias", "direction", "side", "type", "htf_bias"]),
            result: names(&["result", "outcome", "status"]),
            entry: names(&["entry", "entry_price"]),
            sl: names(&["sl", "stop", "stop_loss"]),
            tp: names(&["tp", "take_profit"]),
            r: names(&["rr", "r", "r_multiple", "rmultiple"]),
            profit: names(&["pnl", "profit", "net", "amount"]),
            notes: names(&["notes", "comment", "model", "reason", "emotions"]),
            before_img: names(&["before_url", "before_img", "before", "img_before"]),
            after_img: names(&["after_url", "after_img", "after", "img_after"]),
        }
    }
}

/// Return the value of the first alias present in the record with a non-null
/// value. An empty string counts as present; JSON null and missing keys do
/// not.
pub fn resolve<'a>(record: &'a Map<String, Value>, aliases: &[String]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|name| record.get(name))
        .find(|value| !value.is_null())
}
