//! JSON document format shared by the persisted state and file export.
//!
//! ```json
//! { "format": "alco-ledger", "version": 1,
//!   "entries": { "2024-01-05": [ { "typeId": "beer", "volumeMl": 500 } ] } }
//! ```
//!
//! Documents written by older trackers carry only `entries`, and may hold a
//! single `{ "grams": N }` object per day instead of a list. Both are read.

use crate::errors::{LedgerError, Result};
use crate::models::{ConsumptionEntry, Ledger};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const FORMAT_NAME: &str = "alco-ledger";
pub const FORMAT_VERSION: u64 = 1;

#[derive(Serialize)]
struct Document<'a> {
    format: &'static str,
    version: u64,
    entries: &'a BTreeMap<String, Vec<ConsumptionEntry>>,
}

pub fn encode(ledger: &Ledger) -> Result<String> {
    let document = Document {
        format: FORMAT_NAME,
        version: FORMAT_VERSION,
        entries: ledger.days(),
    };
    let text = serde_json::to_string_pretty(&document)?;
    Ok(text)
}

/// Parses and validates a document. Any malformed day or entry rejects the
/// whole document.
pub fn decode(text: &str) -> Result<Ledger> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| LedgerError::MalformedDocument(err.to_string()))?;
    let Value::Object(mut root) = value else {
        return Err(malformed("top-level value must be an object"));
    };

    if let Some(version) = root.get("version") {
        let version = version
            .as_u64()
            .ok_or_else(|| malformed("'version' must be a non-negative integer"))?;
        if version > FORMAT_VERSION {
            return Err(LedgerError::UnsupportedVersion(version));
        }
    }

    let Some(Value::Object(entries)) = root.remove("entries") else {
        return Err(malformed("'entries' must be an object keyed by date"));
    };

    let mut days = BTreeMap::new();
    for (date, value) in entries {
        let items = match value {
            Value::Array(items) => items,
            single @ Value::Object(_) => vec![single],
            _ => return Err(LedgerError::invalid_entry(&date, "day must be a list of entries")),
        };
        let parsed = items
            .into_iter()
            .map(|item| {
                serde_json::from_value::<ConsumptionEntry>(item)
                    .map_err(|_| LedgerError::invalid_entry(&date, "unrecognized entry shape"))
            })
            .collect::<Result<Vec<_>>>()?;
        days.insert(date, parsed);
    }

    Ledger::from_days(days)
}

fn malformed(reason: &str) -> LedgerError {
    LedgerError::MalformedDocument(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ledger {
        let mut days = BTreeMap::new();
        days.insert(
            "2024-01-05".to_string(),
            vec![
                ConsumptionEntry::beverage("beer", 500.0),
                ConsumptionEntry::grams(12.5),
            ],
        );
        days.insert(
            "2024-02-29".to_string(),
            vec![ConsumptionEntry::beverage("vodka", 50.0)],
        );
        Ledger::from_days(days).unwrap()
    }

    #[test]
    fn encoded_document_carries_format_marker() {
        let text = encode(&sample()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["format"], FORMAT_NAME);
        assert_eq!(value["version"], FORMAT_VERSION);
        assert_eq!(value["entries"]["2024-02-29"][0]["typeId"], "vodka");
    }

    #[test]
    fn decode_reads_back_encoded_ledger() {
        let ledger = sample();
        assert_eq!(decode(&encode(&ledger).unwrap()).unwrap(), ledger);
    }

    #[test]
    fn decode_accepts_legacy_documents() {
        let ledger = decode(
            r#"{"entries": {"2023-12-31": {"grams": 30}, "2024-01-01": [{"typeId": "gin", "volumeMl": 40}], "2024-01-02": []}}"#,
        )
        .unwrap();
        assert_eq!(ledger.day("2023-12-31"), Some(&[ConsumptionEntry::grams(30.0)][..]));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn decode_rejects_wrong_structure() {
        for text in [
            "[]",
            "42",
            "not json",
            r#"{"days": {}}"#,
            r#"{"entries": []}"#,
            r#"{"entries": "2024-01-01"}"#,
        ] {
            assert!(decode(text).is_err(), "{text}");
        }
    }

    #[test]
    fn decode_rejects_bad_days_and_entries() {
        assert!(matches!(
            decode(r#"{"entries": {"yesterday": [{"grams": 3}]}}"#),
            Err(LedgerError::InvalidDate(_))
        ));
        assert!(matches!(
            decode(r#"{"entries": {"2024-01-01": [{"grams": -3}]}}"#),
            Err(LedgerError::InvalidEntry { .. })
        ));
        assert!(matches!(
            decode(r#"{"entries": {"2024-01-01": [{"volume": 3}]}}"#),
            Err(LedgerError::InvalidEntry { .. })
        ));
        assert!(matches!(
            decode(r#"{"entries": {"2024-01-01": 5}}"#),
            Err(LedgerError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn decode_rejects_newer_versions() {
        assert!(matches!(
            decode(r#"{"version": 2, "entries": {}}"#),
            Err(LedgerError::UnsupportedVersion(2))
        ));
        assert!(decode(r#"{"version": 1, "entries": {}}"#).unwrap().is_empty());
    }
}
