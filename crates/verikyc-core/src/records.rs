//! Loading and normalizing OCR-extracted document records
//!
//! Extraction output is one JSON file per document, holding either a single
//! object or an array of objects with issuer-defined field names. Everything
//! downstream works on `Record`s whose keys have been lowercased.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One extracted record with lowercase keys
pub type Record = Map<String, Value>;

/// Lowercase every key of a raw record
///
/// When two keys collide after lowercasing, the one appearing later wins.
pub fn normalize_keys(raw: &Map<String, Value>) -> Record {
    raw.iter()
        .map(|(k, v)| (k.to_lowercase(), v.clone()))
        .collect()
}

/// Flatten a parsed JSON document into normalized records
///
/// Objects become a single record, arrays keep their object elements, and any
/// other shape yields nothing.
pub fn records_from_value(value: &Value) -> Vec<Record> {
    match value {
        Value::Object(map) => vec![normalize_keys(map)],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .map(normalize_keys)
            .collect(),
        _ => Vec::new(),
    }
}

/// Parse JSON text into normalized records
pub fn parse_records(content: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(content)?;
    Ok(records_from_value(&value))
}

/// Read and parse a record file
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path)?;
    parse_records(&content)
}

/// Read a record file that may legitimately be absent
///
/// A missing file is zero records rather than an error.
pub fn load_optional_records(path: &Path) -> Result<Vec<Record>> {
    match fs::read_to_string(path) {
        Ok(content) => parse_records(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(Error::Io(e)),
    }
}

/// A value counts as present unless it is null, an empty string, or an empty list
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

/// Whether the record holds a present value under any of the keys
pub fn has_any(record: &Record, keys: &[&str]) -> bool {
    keys.iter()
        .any(|k| record.get(*k).is_some_and(is_present))
}

/// Lowercased string field, or empty when absent or not a string
pub fn lowercase_text(record: &Record, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// First present value, scanning keys in order and records in file order per key
pub fn first_present<'a>(records: &'a [Record], keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        records
            .iter()
            .filter_map(|rec| rec.get(*key))
            .find(|v| is_present(v))
    })
}

/// Render a value the way it should appear in the KYC record
///
/// Strings pass through untouched; numbers and booleans keep their JSON text
/// so identifiers like `123412341234` are not reformatted.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `first_present` rendered as text
pub fn first_text(records: &[Record], keys: &[&str]) -> Option<String> {
    first_present(records, keys).map(value_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_keys_lowercases() {
        let raw = json!({"Name_English": "Asha", "DOB": "01/01/1990"});
        let rec = normalize_keys(raw.as_object().unwrap());
        assert_eq!(rec["name_english"], "Asha");
        assert_eq!(rec["dob"], "01/01/1990");
        assert!(!rec.contains_key("DOB"));
    }

    #[test]
    fn test_normalize_keys_later_key_wins() {
        let rec = parse_records(r#"{"NAME": "first", "name": "second"}"#).unwrap();
        assert_eq!(rec[0]["name"], "second");
    }

    #[test]
    fn test_records_from_value_shapes() {
        assert_eq!(records_from_value(&json!({"a": 1})).len(), 1);
        assert_eq!(
            records_from_value(&json!([{"a": 1}, 5, "x", {"b": 2}, null])).len(),
            2
        );
        assert!(records_from_value(&json!("just text")).is_empty());
        assert!(records_from_value(&json!(42)).is_empty());
        assert!(records_from_value(&json!([])).is_empty());
    }

    #[test]
    fn test_parse_records_rejects_malformed() {
        assert!(parse_records("{not json").is_err());
    }

    #[test]
    fn test_is_present() {
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&json!([])));
        assert!(is_present(&json!(" ")));
        assert!(is_present(&json!(0)));
        assert!(is_present(&json!(false)));
        assert!(is_present(&json!({})));
        assert!(is_present(&json!(["x"])));
    }

    #[test]
    fn test_first_present_scans_keys_before_records() {
        let records = parse_records(
            r#"[{"name": "From Name"}, {"name_english": "From English"}]"#,
        )
        .unwrap();
        assert_eq!(
            first_text(&records, &["name_english", "name"]),
            Some("From English".to_string())
        );
    }

    #[test]
    fn test_first_present_skips_empty_values() {
        let records =
            parse_records(r#"[{"name": ""}, {"name": null}, {"name": "Ravi"}]"#).unwrap();
        assert_eq!(first_text(&records, &["name"]), Some("Ravi".to_string()));
        assert_eq!(first_text(&records, &["missing"]), None);
    }

    #[test]
    fn test_value_text_keeps_number_text() {
        assert_eq!(value_text(&json!(123412341234u64)), "123412341234");
        assert_eq!(value_text(&json!("ABCDE1234F")), "ABCDE1234F");
        assert_eq!(value_text(&json!(true)), "true");
    }

    #[test]
    fn test_lowercase_text_ignores_non_strings() {
        let rec = parse_records(r#"{"document_type": "PASSPORT", "mrz_line1": 7}"#).unwrap();
        assert_eq!(lowercase_text(&rec[0], "document_type"), "passport");
        assert_eq!(lowercase_text(&rec[0], "mrz_line1"), "");
        assert_eq!(lowercase_text(&rec[0], "absent"), "");
    }

    #[test]
    fn test_load_optional_records_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let records = load_optional_records(&dir.path().join("pan.json")).unwrap();
        assert!(records.is_empty());
    }
}
