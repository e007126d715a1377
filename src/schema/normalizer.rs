use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use super::alias::{resolve, AliasTable};
use crate::error::CoreError;
use crate::models::{classify_bias, Outcome, Trade, MISSING_PAIR, UNKNOWN_PERIOD};

/// Builds canonical trades from raw, loosely-typed store records. All
/// "which field might this be called" uncertainty lives in the alias table;
/// all classification and coercion rules live here, once.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    table: AliasTable,
}

impl Normalizer {
    pub fn new(table: AliasTable) -> Self {
        Self { table }
    }

    pub fn alias_table(&self) -> &AliasTable {
        &self.table
    }

    /// Normalize one raw record. Fails only when the value is not a record
    /// at all (JSON null or a bare scalar); an empty object is legal and
    /// yields an all-default trade.
    pub fn normalize(&self, raw: &Value) -> Result<Trade, CoreError> {
        let record = raw
            .as_object()
            .ok_or_else(|| CoreError::MalformedRecord(format!("expected object, got {}", raw)))?;
        Ok(self.normalize_record(record))
    }

    /// Normalize a whole fetched batch. Malformed records degrade to
    /// placeholder trades instead of aborting the batch; partial analytics
    /// beats none.
    pub fn normalize_batch(&self, raws: &[Value]) -> Vec<Trade> {
        raws.iter()
            .map(|raw| match self.normalize(raw) {
                Ok(trade) => trade,
                Err(e) => {
                    log::warn!("Substituting placeholder for malformed record: {}", e);
                    self.normalize_record(&Map::new())
                }
            })
            .collect()
    }

    pub fn normalize_record(&self, record: &Map<String, Value>) -> Trade {
        let t = &self.table;

        let timestamp = resolve(record, &t.created_at).and_then(parse_timestamp);
        let period_key = timestamp
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_else(|| UNKNOWN_PERIOD.to_string());

        Trade {
            id: resolve(record, &t.id)
                .map(value_text)
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            timestamp,
            period_key,
            pair: resolve(record, &t.pair)
                .map(|v| value_text(v).to_uppercase())
                .unwrap_or_else(|| MISSING_PAIR.to_string()),
            bias: resolve(record, &t.bias)
                .map(|v| classify_bias(&value_text(v)))
                .unwrap_or_default(),
            result: resolve(record, &t.result)
                .map(|v| Outcome::classify(&value_text(v)))
                .unwrap_or_default(),
            entry: resolve(record, &t.entry).cloned(),
            stop_loss: resolve(record, &t.sl).cloned(),
            take_profit: resolve(record, &t.tp).cloned(),
            r_multiple: to_num(resolve(record, &t.r)),
            profit: to_num(resolve(record, &t.profit)),
            notes: resolve(record, &t.notes).map(value_text).unwrap_or_default(),
            before_img: resolve(record, &t.before_img).map(value_text),
            after_img: resolve(record, &t.after_img).map(value_text),
        }
    }
}

/// Render a raw JSON value as plain text (strings unquoted).
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a resolved timestamp value. Accepts RFC 3339, naive date-times,
/// bare dates (midnight UTC), and integer epochs (values at millisecond
/// magnitude are detected by size).
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => {
            let epoch = n.as_i64()?;
            if epoch.unsigned_abs() >= 100_000_000_000 {
                DateTime::from_timestamp_millis(epoch)
            } else {
                DateTime::from_timestamp(epoch, 0)
            }
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

/// Coerce a resolved scalar to a finite float. Absent, null, empty-string,
/// unparseable and non-finite values all collapse to `None`.
pub fn to_num(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}
