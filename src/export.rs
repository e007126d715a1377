use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::models::Trade;
use crate::schema::normalizer::value_text;

/// Canonical export column order, matching the default alias table's
/// primary names so an export can be re-imported as-is.
pub const EXPORT_COLUMNS: [&str; 12] = [
    "created_at",
    "pair",
    "bias",
    "result",
    "entry",
    "sl",
    "tp",
    "r",
    "profit",
    "notes",
    "before_img",
    "after_img",
];

/// Serialize trades to CSV text: one header row, one row per trade in input
/// order. Fields containing the delimiter, quotes or newlines are quoted
/// with internal quotes doubled; missing values become empty fields.
pub fn to_csv(trades: &[Trade], columns: &[&str]) -> Result<String, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;
    for trade in trades {
        writer.write_record(columns.iter().map(|c| column_value(trade, c)))?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| CoreError::Export(e.to_string()))
}

fn column_value(trade: &Trade, column: &str) -> String {
    match column {
        "created_at" => trade
            .timestamp
            .map(|d| d.to_rfc3339())
            .unwrap_or_default(),
        "pair" => trade.pair.clone(),
        "bias" => trade.bias.clone(),
        "result" => trade.result.as_str().to_string(),
        "entry" => trade.entry.as_ref().map(value_text).unwrap_or_default(),
        "sl" => trade.stop_loss.as_ref().map(value_text).unwrap_or_default(),
        "tp" => trade
            .take_profit
            .as_ref()
            .map(value_text)
            .unwrap_or_default(),
        "r" => trade.r_multiple.map(|v| v.to_string()).unwrap_or_default(),
        "profit" => trade.profit.map(|v| v.to_string()).unwrap_or_default(),
        "notes" => trade.notes.clone(),
        "before_img" => trade.before_img.clone().unwrap_or_default(),
        "after_img" => trade.after_img.clone().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Date-stamped artifact name, e.g. `journal_history_2024-01-15.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("journal_history_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the export artifact into `dir` under its date-stamped name and
/// return the full path.
pub fn write_export(
    dir: &Path,
    trades: &[Trade],
    columns: &[&str],
    date: NaiveDate,
) -> Result<PathBuf, CoreError> {
    let path = dir.join(export_filename(date));
    std::fs::write(&path, to_csv(trades, columns)?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use crate::schema::Normalizer;
    use serde_json::json;

    fn sample() -> Vec<Trade> {
        Normalizer::default().normalize_batch(&[
            json!({
                "date": "2024-01-15T10:00:00Z",
                "pair": "EURUSD",
                "bias": "long",
                "result": "tp",
                "entry": "1.0850",
                "sl": 1.0800,
                "tp": 1.0950,
                "rr": "2",
                "pnl": "150",
                "notes": "say \"hi\", ok",
            }),
            json!({"result": "sl"}),
        ])
    }

    #[test]
    fn test_header_and_row_order() {
        let csv_text = to_csv(&sample(), &EXPORT_COLUMNS).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "created_at,pair,bias,result,entry,sl,tp,r,profit,notes,before_img,after_img"
        );
        assert_eq!(csv_text.lines().count(), 3);
    }

    #[test]
    fn test_quoting_and_round_trip_of_tricky_note() {
        let csv_text = to_csv(&sample(), &EXPORT_COLUMNS).unwrap();
        assert!(csv_text.contains("\"say \"\"hi\"\", ok\""));

        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let row = reader.records().next().unwrap().unwrap();
        let notes_idx = headers.iter().position(|h| h == "notes").unwrap();
        assert_eq!(&row[notes_idx], "say \"hi\", ok");
    }

    #[test]
    fn test_missing_values_are_empty_fields() {
        let csv_text = to_csv(&sample(), &EXPORT_COLUMNS).unwrap();
        let second_row = csv_text.lines().nth(2).unwrap();
        // defaulted trade: no timestamp, placeholder pair, loss, all else empty
        assert_eq!(second_row, ",—,,loss,,,,,,,,");
        assert!(!csv_text.contains("null"));
    }

    #[test]
    fn test_export_reimports_with_same_classification() {
        let trades = sample();
        let csv_text = to_csv(&trades, &EXPORT_COLUMNS).unwrap();

        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let normalizer = Normalizer::default();
        for (record, original) in reader.records().zip(&trades) {
            let record = record.unwrap();
            let raw: serde_json::Map<String, serde_json::Value> = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), json!(v)))
                .collect();
            let reparsed = normalizer.normalize_record(&raw);
            assert_eq!(reparsed.result, original.result);
            assert_eq!(reparsed.period_key, original.period_key);
        }
    }

    #[test]
    fn test_write_export_creates_date_stamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let path = write_export(dir.path(), &sample(), &EXPORT_COLUMNS, date).unwrap();
        assert!(path.ends_with("journal_history_2024-03-05.csv"));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("created_at,"));
    }

    #[test]
    fn test_result_column_uses_canonical_labels() {
        let trades = sample();
        assert_eq!(trades[0].result, Outcome::Win);
        let csv_text = to_csv(&trades, &EXPORT_COLUMNS).unwrap();
        assert!(csv_text.lines().nth(1).unwrap().contains(",win,"));
    }
}
